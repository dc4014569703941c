use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use super::{SniffResult, Sniffer};
use crate::page::Page;

static STYLED: Lazy<Selector> =
    Lazy::new(|| Selector::parse("*[style]").expect("styled selector must parse"));
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("img selector must parse"));
static SVG: Lazy<Selector> = Lazy::new(|| Selector::parse("svg").expect("svg selector must parse"));

static FLEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)display:\s*flex").expect("flex pattern must parse"));
static GRID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)display:\s*grid").expect("grid pattern must parse"));

/// Judges layout technique and media density from inline styles.
pub struct DesignSniffer;

impl DesignSniffer {
    fn inline_style_matches(page: &Page, pattern: &Regex) -> bool {
        page.select(&STYLED)
            .filter_map(|element| element.value().attr("style"))
            .any(|style| pattern.is_match(style))
    }
}

impl Sniffer for DesignSniffer {
    fn name(&self) -> &'static str {
        "Design"
    }

    fn sniff(&self, page: &Page, _url: Option<&str>) -> SniffResult {
        let mut score: f64 = 0.0;
        let mut messages: Vec<&str> = Vec::new();

        let has_flex = Self::inline_style_matches(page, &FLEX);
        let has_grid = Self::inline_style_matches(page, &GRID);
        if !has_flex && !has_grid {
            score += 0.5;
            messages.push(
                "Layout seems to be using older techniques (tables or floats), \
                 which might indicate a template.",
            );
        }

        if page.count(&IMG) + page.count(&SVG) < 2 {
            score += 0.3;
            messages.push("Very few images or SVGs used, suggesting a low-effort design.");
        }

        if messages.is_empty() {
            return self.result(0.0, "Layout seems modern and uses sufficient media.");
        }

        self.result(score.min(1.0), messages.join(" "))
    }
}
