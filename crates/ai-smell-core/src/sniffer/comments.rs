use std::collections::BTreeSet;

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;

use super::{round2, SniffResult, Sniffer};
use crate::page::Page;

static HTML_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--(.*?)-->").expect("comment pattern must parse"));
static SCRIPT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("script").expect("script selector must parse"));
static STYLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("style").expect("style selector must parse"));

/// Scaffolding tokens that generators and templates leave behind in comments
/// and inline code.
const SCAFFOLD_TOKENS: &[&str] = &[
    "todo",
    "fixme",
    "hack:",
    "lorem ipsum",
    "placeholder",
    "your code here",
    "change this",
    "add your",
];

static TOKEN_AUTOMATON: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(SCAFFOLD_TOKENS)
        .expect("scaffold token automaton must build")
});

/// Finds leftover placeholder comments: TODO/FIXME markers, lorem ipsum, and
/// "your code here" style scaffolding in HTML comments and inline
/// script/style blocks.
pub struct CommentsSniffer;

impl CommentsSniffer {
    fn gather_comment_text(page: &Page) -> String {
        let mut text = String::new();
        for capture in HTML_COMMENT.captures_iter(page.html()) {
            if let Some(comment) = capture.get(1) {
                text.push_str(comment.as_str());
                text.push('\n');
            }
        }
        for element in page.select(&SCRIPT).chain(page.select(&STYLE)) {
            text.push_str(&element.inner_html());
            text.push('\n');
        }
        text
    }
}

impl Sniffer for CommentsSniffer {
    fn name(&self) -> &'static str {
        "Comments"
    }

    fn sniff(&self, page: &Page, _url: Option<&str>) -> SniffResult {
        let haystack = Self::gather_comment_text(page);

        let mut found: BTreeSet<usize> = BTreeSet::new();
        for mat in TOKEN_AUTOMATON.find_iter(&haystack) {
            found.insert(mat.pattern().as_usize());
        }

        if found.is_empty() {
            return self.result(0.0, "No leftover placeholder comments detected.");
        }

        let tokens: Vec<&str> = found.iter().map(|&idx| SCAFFOLD_TOKENS[idx]).collect();
        let score = (0.3 + (found.len() as f64 - 1.0) * 0.2).min(0.9);
        self.result(
            round2(score),
            format!(
                "Leftover scaffolding in comments or inline code: {}",
                tokens.join(", ")
            ),
        )
    }
}
