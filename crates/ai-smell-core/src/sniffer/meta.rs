use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use super::matcher::count_generic_phrases;
use super::{round2, SniffResult, Sniffer};
use crate::page::Page;

static AUTHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta[name='author']").expect("author selector must parse"));
static GENERATOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='generator']").expect("generator selector must parse")
});
static DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[name='description']").expect("description selector must parse")
});
static OG_DESCRIPTION: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("meta[property='og:description']").expect("og:description selector must parse")
});

static GENERIC_BUILDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new("(?i)wix|squarespace|godaddy|weebly|webnode|site123")
        .expect("generic builder pattern must parse")
});
static AI_GENERATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bai\b|copilot|gemini|gpt").expect("AI generator pattern must parse")
});

/// Names of AI site builders that show up in author/generator tags.
const AI_BUILDER_NAMES: &[&str] = &[
    "lovable",
    "gptengineer",
    "gpt engineer",
    "base44",
    "bolt.new",
    "v0.dev",
    "durable",
    "framer",
];

/// Canned description text that templates ship with.
const PLACEHOLDER_LANGUAGE: &[&str] = &[
    "lorem ipsum",
    "your description here",
    "welcome to our website",
    "this is a placeholder",
    "edit this description",
    "a description of your site",
];

/// Inspects `<meta>` author/generator/description tags for builder
/// fingerprints and template-grade copy.
pub struct MetaSniffer;

impl MetaSniffer {
    fn mentions_builder(value: &str) -> bool {
        let value = value.to_lowercase();
        AI_BUILDER_NAMES.iter().any(|name| value.contains(name))
    }

    fn has_placeholder_language(description: &str) -> bool {
        let description = description.to_lowercase();
        PLACEHOLDER_LANGUAGE
            .iter()
            .any(|phrase| description.contains(phrase))
    }
}

impl Sniffer for MetaSniffer {
    fn name(&self) -> &'static str {
        "Meta"
    }

    fn sniff(&self, page: &Page, _url: Option<&str>) -> SniffResult {
        let mut score: f64 = 0.0;
        let mut messages: Vec<String> = Vec::new();

        if let Some(author) = page.first_attr(&AUTHOR, "content") {
            if Self::mentions_builder(author) {
                score += 1.0;
                messages.push(format!("Author meta tag names an AI builder: {author}"));
            }
        }

        if let Some(generator) = page.first_attr(&GENERATOR, "content") {
            if GENERIC_BUILDER.is_match(generator) {
                score += 0.8;
                messages.push(format!("Site made with a generic builder: {generator}"));
            }
            if AI_GENERATOR.is_match(generator) || Self::mentions_builder(generator) {
                score += 1.0;
                messages.push(format!("Generator tag explicitly mentions AI: {generator}"));
            }
        }

        let description = page.first_attr(&DESCRIPTION, "content").unwrap_or("");
        let length = description.chars().count();
        let phrases = count_generic_phrases(description);

        if Self::has_placeholder_language(description) {
            score += 0.9;
            messages.push("Meta description contains placeholder template language.".into());
        }

        if phrases >= 3 {
            score += 0.7;
            messages.push(format!(
                "Meta description is saturated with generic marketing phrases ({phrases} found)."
            ));
        } else if phrases == 2 {
            score += 0.4;
            messages.push("Meta description leans on generic marketing phrases.".into());
        }

        if length > 120 && length < 160 && phrases >= 1 {
            score += 0.2;
            messages.push("SEO-length meta description built from generic phrasing.".into());
        }

        if length > 10 && length < 50 && phrases == 0 {
            score += 0.3;
            messages.push("Meta description is very short, possibly a default.".into());
        }

        if let Some(og_description) = page.first_attr(&OG_DESCRIPTION, "content") {
            if og_description == description && length > 100 {
                score += 0.1;
                messages.push("og:description is a verbatim copy of the meta description.".into());
            }
        }

        if messages.is_empty() {
            return self.result(0.0, "No specific AI-related meta tags found.");
        }

        self.result(round2(score.min(1.0)), messages.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sniff(html: &str) -> SniffResult {
        MetaSniffer.sniff(&Page::parse(html), None)
    }

    #[test]
    fn ai_generator_tag_scores_full() {
        let result = sniff(r#"<html><head><meta name="generator" content="Lovable AI"></head></html>"#);
        assert_eq!(result.score, 1.0);
        assert_eq!(
            result.message,
            "Generator tag explicitly mentions AI: Lovable AI"
        );
    }

    #[test]
    fn generic_builder_tag_scores_lower() {
        let result = sniff(
            r#"<html><head><meta name="generator" content="Wix.com Website Builder"></head></html>"#,
        );
        assert_eq!(result.score, 0.8);
        assert_eq!(
            result.message,
            "Site made with a generic builder: Wix.com Website Builder"
        );
    }

    #[test]
    fn author_naming_a_builder_scores_full() {
        let result =
            sniff(r#"<html><head><meta name="author" content="Built by Lovable"></head></html>"#);
        assert_eq!(result.score, 1.0);
        assert!(result.message.contains("AI builder"));
    }

    #[test]
    fn short_default_description_scores() {
        // Exactly 30 characters, no marketing phrases.
        let content = "This is a short description...";
        assert_eq!(content.chars().count(), 30);
        let html =
            format!(r#"<html><head><meta name="description" content="{content}"></head></html>"#);
        let result = sniff(&html);
        assert_eq!(result.score, 0.3);
        assert_eq!(
            result.message,
            "Meta description is very short, possibly a default."
        );
    }

    #[test]
    fn seo_length_description_with_generic_phrase_gets_bonus() {
        // 130 characters with one generic phrase.
        let content = "Unlock the potential of your business with our platform, built to \
                       deliver outstanding results for teams of every size, everywhere.";
        assert!(content.chars().count() > 120 && content.chars().count() < 160);
        let html =
            format!(r#"<html><head><meta name="description" content="{content}"></head></html>"#);
        let result = sniff(&html);
        assert!(result.message.contains("SEO-length"));
        assert!(result.score >= 0.2);
    }

    #[test]
    fn placeholder_description_scores_high() {
        let html = r#"<html><head><meta name="description" content="Lorem ipsum dolor sit amet, consectetur adipiscing elit placeholder."></head></html>"#;
        let result = sniff(html);
        assert_eq!(result.score, 0.9);
        assert!(result.message.contains("placeholder"));
    }

    #[test]
    fn duplicated_long_og_description_adds_signal() {
        let content = "a".repeat(110);
        let html = format!(
            r#"<html><head><meta name="description" content="{content}"><meta property="og:description" content="{content}"></head></html>"#,
        );
        let result = sniff(&html);
        assert_eq!(result.score, 0.1);
        assert!(result.message.contains("og:description"));
    }

    #[test]
    fn marketing_heavy_description_scores() {
        let html = r#"<html><head><meta name="description" content="In today's digital age, harnessing the power of data will revolutionize the industry."></head></html>"#;
        let result = sniff(html);
        // Three phrases plus no SEO-length bonus (86 chars).
        assert_eq!(result.score, 0.7);
    }

    #[test]
    fn stacked_signals_clamp_to_one() {
        let html = r#"<html><head>
            <meta name="author" content="Built by Lovable">
            <meta name="generator" content="Lovable AI">
            <meta name="description" content="Lorem ipsum dolor sit amet, consectetur adipiscing elit placeholder.">
            </head></html>"#;
        let result = sniff(html);
        // 1.0 author + 1.0 generator + 0.9 placeholder, clamped.
        assert_eq!(result.score, 1.0);
        assert!(result.message.contains("AI builder"));
        assert!(result.message.contains("placeholder"));
    }

    #[test]
    fn no_meta_signals_scores_zero() {
        let result = sniff("<html><head><title>My Site</title></head></html>");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.message, "No specific AI-related meta tags found.");
    }

    #[test]
    fn long_rich_description_scores_zero() {
        let content = "b".repeat(170);
        let html =
            format!(r#"<html><head><meta name="description" content="{content}"></head></html>"#);
        let result = sniff(&html);
        assert_eq!(result.score, 0.0);
    }
}
