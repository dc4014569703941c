use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use super::{round2, SniffResult, Sniffer};
use crate::page::Page;

static TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("title selector must parse"));
static BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("body").expect("body selector must parse"));
static APP_ROOT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#root, div#app").expect("app root selector must parse"));
static SCRIPT_SRC: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script[src]").expect("script selector must parse"));
static LINK_HREF: Lazy<Selector> =
    Lazy::new(|| Selector::parse("link[href]").expect("link selector must parse"));

static REACT_APP_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?i)^React App$").expect("title pattern must parse"));
static CREATED_WITH: Lazy<Regex> =
    Lazy::new(|| Regex::new("(?i)This site was created with").expect("created-with pattern must parse"));
static VITE_ASSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/assets/index-[a-z0-9]+\.(js|css)").expect("vite asset pattern must parse")
});
static GENERIC_LOGO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)logo192\.png|logo512\.png|vite\.svg").expect("logo pattern must parse")
});

/// Source lines below which a document counts as a bare skeleton.
const MINIMAL_HTML_LINES: usize = 50;

/// Looks for untouched framework boilerplate: default titles, empty app
/// shells, hashed starter assets, stock favicons.
pub struct BoilerplateSniffer;

impl BoilerplateSniffer {
    fn has_empty_app_skeleton(page: &Page) -> bool {
        page.select(&APP_ROOT)
            .any(|element| element.inner_html().trim().is_empty())
    }

    fn has_vite_assets(page: &Page) -> bool {
        let script_hit = page
            .select(&SCRIPT_SRC)
            .filter_map(|element| element.value().attr("src"))
            .any(|src| VITE_ASSET.is_match(src));
        let link_hit = page
            .select(&LINK_HREF)
            .filter_map(|element| element.value().attr("href"))
            .any(|href| VITE_ASSET.is_match(href));
        script_hit || link_hit
    }

    fn has_generic_logo(page: &Page) -> bool {
        page.select(&LINK_HREF)
            .filter_map(|element| element.value().attr("href"))
            .any(|href| GENERIC_LOGO.is_match(href))
    }
}

impl Sniffer for BoilerplateSniffer {
    fn name(&self) -> &'static str {
        "Boilerplate"
    }

    fn sniff(&self, page: &Page, _url: Option<&str>) -> SniffResult {
        let mut score: f64 = 0.0;
        let mut messages: Vec<String> = Vec::new();

        let title = page.text_of(&TITLE);
        if REACT_APP_TITLE.is_match(title.trim()) {
            score += 0.9;
            messages.push("Default \"React App\" title found.".into());
        }

        let body_text = page.text_of(&BODY);
        if CREATED_WITH.is_match(&body_text) {
            score += 0.8;
            messages.push("Contains \"This site was created with...\" text.".into());
        }

        let empty_skeleton = Self::has_empty_app_skeleton(page);
        if empty_skeleton {
            score += 0.6;
            messages.push("Empty #root/#app skeleton div found (client-rendered shell).".into());
        }

        if Self::has_vite_assets(page) {
            score += 0.4;
            messages.push("Hashed Vite starter asset filenames detected.".into());
        }

        if empty_skeleton && page.html().lines().count() < MINIMAL_HTML_LINES {
            score += 0.3;
            messages.push("Minimal HTML document wrapping an empty app skeleton.".into());
        }

        if Self::has_generic_logo(page) {
            score += 0.15;
            messages.push("Generic starter logo/favicon referenced.".into());
        }

        if messages.is_empty() {
            return self.result(0.0, "No obvious framework boilerplate found.");
        }

        self.result(round2(score.min(1.0)), messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(html: &str) -> SniffResult {
        BoilerplateSniffer.sniff(&Page::parse(html), None)
    }

    #[test]
    fn detects_default_react_app_title() {
        let result = sniff("<html><head><title>React App</title></head><body></body></html>");
        assert_eq!(result.score, 0.9);
        assert_eq!(result.message, "Default \"React App\" title found.");
    }

    #[test]
    fn detects_created_with_text() {
        let result =
            sniff("<html><body><p>This site was created with XYZ builder.</p></body></html>");
        assert_eq!(result.score, 0.8);
        assert_eq!(result.message, "Contains \"This site was created with...\" text.");
    }

    #[test]
    fn detects_empty_app_skeleton_in_minimal_document() {
        let result = sniff(r#"<html><body><div id="root"></div></body></html>"#);
        // 0.6 for the skeleton plus 0.3 for the minimal single-line source.
        assert_eq!(result.score, 0.9);
        assert!(result.message.contains("skeleton"));
        assert!(result.message.contains("Minimal HTML"));
    }

    #[test]
    fn populated_root_div_is_not_a_skeleton() {
        let result = sniff(r#"<html><body><div id="root"><h1>Rendered</h1></div></body></html>"#);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn detects_hashed_vite_assets() {
        let result = sniff(
            r#"<html><head><script src="/assets/index-D3fx91ab.js"></script></head><body><p>content</p></body></html>"#,
        );
        assert_eq!(result.score, 0.4);
        assert!(result.message.contains("Vite"));
    }

    #[test]
    fn detects_generic_logo_favicon() {
        let result = sniff(
            r#"<html><head><link rel="apple-touch-icon" href="/logo192.png"></head><body><p>x</p></body></html>"#,
        );
        assert_eq!(result.score, 0.15);
        assert!(result.message.contains("logo"));
    }

    #[test]
    fn clean_page_scores_zero() {
        let result = sniff(
            "<html><head><title>My Custom Site</title></head><body><p>Hello world</p></body></html>",
        );
        assert_eq!(result.score, 0.0);
        assert_eq!(result.message, "No obvious framework boilerplate found.");
    }
}
