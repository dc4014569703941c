use once_cell::sync::Lazy;
use scraper::Selector;

use super::{SniffResult, Sniffer};
use crate::page::Page;

static BOOTSTRAP_LINK: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("link[href*='bootstrap']").expect("bootstrap selector must parse")
});
static MUI_STYLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("style[id*='Mui']").expect("mui selector must parse"));
static STYLESHEET_LINK: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("link[rel='stylesheet']").expect("stylesheet selector must parse")
});
static STYLE_TAG: Lazy<Selector> =
    Lazy::new(|| Selector::parse("style").expect("style selector must parse"));

/// Spots stock UI kits (Bootstrap, Material-UI) used without customization.
pub struct UiKitSniffer;

impl UiKitSniffer {
    /// True when stylesheets beyond the kit's own are present: another
    /// stylesheet link, or more than one `<style>` tag.
    fn has_custom_css(page: &Page) -> bool {
        let extra_links = page
            .select(&STYLESHEET_LINK)
            .filter_map(|element| element.value().attr("href"))
            .any(|href| !href.contains("bootstrap") && !href.contains("material"));
        extra_links || page.count(&STYLE_TAG) > 1
    }
}

impl Sniffer for UiKitSniffer {
    fn name(&self) -> &'static str {
        "UIKit"
    }

    fn sniff(&self, page: &Page, _url: Option<&str>) -> SniffResult {
        if page.count(&BOOTSTRAP_LINK) > 0 {
            if Self::has_custom_css(page) {
                return self.result(0.2, "Bootstrap detected, but custom styles are applied.");
            }
            return self.result(0.7, "Default Bootstrap CSS seems to be used.");
        }

        if page.count(&MUI_STYLE) > 0 {
            if Self::has_custom_css(page) {
                return self.result(0.2, "Material-UI detected, but custom styles are applied.");
            }
            return self.result(0.6, "Default Material-UI styles seem to be used.");
        }

        self.result(0.0, "No common UI kits detected.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(html: &str) -> SniffResult {
        UiKitSniffer.sniff(&Page::parse(html), None)
    }

    #[test]
    fn default_bootstrap_scores_high() {
        let html = r#"<html><head><link rel="stylesheet" href="https://cdn.example/bootstrap.min.css"></head></html>"#;
        let result = sniff(html);
        assert_eq!(result.score, 0.7);
        assert!(result.message.contains("Bootstrap"));
    }

    #[test]
    fn customized_bootstrap_scores_low() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="https://cdn.example/bootstrap.min.css">
            <link rel="stylesheet" href="custom.css">
            </head></html>"#;
        let result = sniff(html);
        assert_eq!(result.score, 0.2);
    }

    #[test]
    fn default_material_ui_scores() {
        let html = r#"<html><head><style id="Mui-Styles-123"></style></head></html>"#;
        let result = sniff(html);
        assert_eq!(result.score, 0.6);
        assert!(result.message.contains("Material-UI"));
    }

    #[test]
    fn material_ui_with_extra_style_tags_scores_low() {
        let html = r#"<html><head><style id="Mui-Styles-123"></style><style>.x{}</style></head></html>"#;
        let result = sniff(html);
        assert_eq!(result.score, 0.2);
    }

    #[test]
    fn no_kit_scores_zero() {
        let html = r#"<html><head><link rel="stylesheet" href="my-styles.css"></head></html>"#;
        let result = sniff(html);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.message, "No common UI kits detected.");
    }
}
