use once_cell::sync::Lazy;
use scraper::Selector;

use super::matcher::count_generic_phrases;
use super::{round2, SniffResult, Sniffer};
use crate::page::Page;

static PARAGRAPH: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("paragraph selector must parse"));

/// Sentences shorter than this (trimmed) are treated as noise.
const MIN_SENTENCE_LEN: usize = 5;

/// Flags thin or generically worded paragraph copy.
pub struct ContentSniffer;

impl Sniffer for ContentSniffer {
    fn name(&self) -> &'static str {
        "Content"
    }

    fn sniff(&self, page: &Page, _url: Option<&str>) -> SniffResult {
        let text = page.text_of(&PARAGRAPH);
        let sentences = text
            .split('.')
            .filter(|sentence| sentence.trim().len() > MIN_SENTENCE_LEN)
            .count();

        if sentences < 3 {
            return self.result(0.5, "Very little paragraph content on the page.");
        }

        let phrases = count_generic_phrases(&text);
        if phrases > 1 {
            let score = (0.3 + (phrases as f64 - 1.0) * 0.2).min(0.9);
            return self.result(
                round2(score),
                format!("Found {phrases} generic, AI-like phrases."),
            );
        }

        self.result(0.0, "Content does not seem to contain overly generic phrases.")
    }
}
