use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use super::{round2, SniffResult, Sniffer};
use crate::page::Page;

// Curated palettes AI tools default to. Tuned against generated landing
// pages; matched with a distance tolerance to absorb near-duplicates.
const ORANGES: &[&str] = &[
    "#ff6b6b", "#ff8c42", "#ff9f1c", "#ff7733", "#f77f00", "#fd7e14", "#ff6347",
];
const PURPLES: &[&str] = &[
    "#6c5ce7", "#a29bfe", "#7c3aed", "#8b5cf6", "#9d4edd", "#b388ff", "#7c4dff",
];
const BLUES: &[&str] = &[
    "#0061ff", "#0052d9", "#0066ff", "#0080ff", "#00a8ff", "#3498db", "#4a90e2", "#5e60ce",
    "#2196f3", "#1890ff",
];
const TEALS: &[&str] = &[
    "#00d4aa", "#1abc9c", "#16a085", "#00b4d8", "#48cae4", "#06ffa5",
];
const EXACT_AI_COLORS: &[&str] = &[
    "#0061ff", "#0052d9", "#ff6b6b", "#6c5ce7", "#0066ff", "#00d4aa", "#ff9f1c",
];

/// Euclidean RGB distance below which two colors count as the same shade.
const SIMILARITY_THRESHOLD: f64 = 30.0;

static STYLED: Lazy<Selector> =
    Lazy::new(|| Selector::parse("*[style]").expect("styled selector must parse"));
static STYLE_TAG: Lazy<Selector> =
    Lazy::new(|| Selector::parse("style").expect("style selector must parse"));

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)#[0-9a-f]{6}|#[0-9a-f]{3}").expect("hex pattern must parse"));
static RGB_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)rgba?\s*\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)").expect("rgb pattern must parse")
});
static GRADIENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(?i)linear-gradient|radial-gradient").expect("gradient pattern must parse")
});

/// Detects the color palettes AI site generators default to.
pub struct ColorPaletteSniffer;

impl ColorPaletteSniffer {
    fn collect_colors(style: &str, found: &mut HashSet<String>) {
        for mat in HEX_COLOR.find_iter(style) {
            found.insert(mat.as_str().to_ascii_lowercase());
        }
        for capture in RGB_COLOR.captures_iter(style) {
            let channels: Option<(u8, u8, u8)> = (|| {
                Some((
                    capture.get(1)?.as_str().parse().ok()?,
                    capture.get(2)?.as_str().parse().ok()?,
                    capture.get(3)?.as_str().parse().ok()?,
                ))
            })();
            if let Some((r, g, b)) = channels {
                found.insert(format!("#{r:02x}{g:02x}{b:02x}"));
            }
        }
    }

    fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
        let hex = color.strip_prefix('#').unwrap_or(color);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some((r, g, b))
    }

    fn colors_are_similar(a: &str, b: &str) -> bool {
        if a.eq_ignore_ascii_case(b) {
            return true;
        }
        let (Some(a), Some(b)) = (Self::hex_to_rgb(a), Self::hex_to_rgb(b)) else {
            return false;
        };
        let distance = (f64::from(a.0) - f64::from(b.0)).powi(2)
            + (f64::from(a.1) - f64::from(b.1)).powi(2)
            + (f64::from(a.2) - f64::from(b.2)).powi(2);
        distance.sqrt() < SIMILARITY_THRESHOLD
    }

    fn count_family_matches(found: &HashSet<String>, family: &[&str]) -> usize {
        family
            .iter()
            .filter(|target| found.iter().any(|color| Self::colors_are_similar(color, target)))
            .count()
    }
}

impl Sniffer for ColorPaletteSniffer {
    fn name(&self) -> &'static str {
        "ColorPalette"
    }

    fn sniff(&self, page: &Page, _url: Option<&str>) -> SniffResult {
        let mut score: f64 = 0.0;
        let mut messages: Vec<String> = Vec::new();
        let mut found: HashSet<String> = HashSet::new();

        let mut has_gradients = false;
        for element in page.select(&STYLED) {
            if let Some(style) = element.value().attr("style") {
                Self::collect_colors(style, &mut found);
                has_gradients = has_gradients || GRADIENT.is_match(style);
            }
        }
        for element in page.select(&STYLE_TAG) {
            let content = element.inner_html();
            Self::collect_colors(&content, &mut found);
            has_gradients = has_gradients || content.to_ascii_lowercase().contains("gradient");
        }

        if has_gradients {
            score += 0.2;
            messages.push("Uses CSS gradients (common in AI templates)".into());
        }

        let orange_matches = Self::count_family_matches(&found, ORANGES);
        let purple_matches = Self::count_family_matches(&found, PURPLES);
        let blue_matches = Self::count_family_matches(&found, BLUES);
        let teal_matches = Self::count_family_matches(&found, TEALS);

        if orange_matches >= 2 {
            score += 0.3;
            messages.push("Multiple vibrant orange/coral colors detected (AI template signature)".into());
        } else if orange_matches == 1 {
            score += 0.15;
            messages.push("Found trendy orange color commonly used in AI templates".into());
        }

        if purple_matches >= 2 {
            score += 0.25;
            messages.push("Purple gradient palette detected (popular in AI SaaS templates)".into());
        }

        if teal_matches >= 2 {
            score += 0.2;
            messages.push("Teal/cyan color scheme (trendy AI default)".into());
        }

        let families_used = [orange_matches, purple_matches, blue_matches, teal_matches]
            .iter()
            .filter(|&&count| count > 0)
            .count();
        if families_used >= 3 {
            score += 0.25;
            messages.push("Uses multiple trendy color families (AI-like color diversity)".into());
        }

        let exact_matches: Vec<&str> = EXACT_AI_COLORS
            .iter()
            .filter(|color| found.contains(**color))
            .copied()
            .collect();
        if exact_matches.len() >= 2 {
            score += 0.3;
            messages.push(format!(
                "Exact AI template colors detected: {}",
                exact_matches.join(", ")
            ));
        } else if exact_matches.len() == 1 {
            score += 0.2;
            messages.push(format!("Found exact AI-favorite color: {}", exact_matches[0]));
        }

        if found.contains("#0061ff") {
            score += 0.2;
            messages.push("#0061FF detected (signature AI default accent color)".into());
        }

        if messages.is_empty() {
            return self.result(0.0, "Color palette does not match common AI-generated patterns");
        }

        self.result(round2(score.min(1.0)), messages.join("; "))
    }
}
