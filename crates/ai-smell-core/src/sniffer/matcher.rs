use std::collections::HashSet;

use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;
use regex::Regex;

/// A set of case-insensitive regex alternatives, any one of which counts as a
/// match. Pattern-over-markup checks are inherently approximate; keeping them
/// behind this helper pins their semantics and makes them testable in
/// isolation.
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    /// Compile a set of patterns. Panics on an invalid pattern, which is a
    /// bug in the curated pattern tables, not a runtime condition.
    pub fn new(patterns: &[&str]) -> Self {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(&format!("(?i){pattern}"))
                    .unwrap_or_else(|err| panic!("invalid curated pattern `{pattern}`: {err}"))
            })
            .collect();
        Self { patterns }
    }

    /// True when any pattern matches the haystack.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.patterns.iter().any(|regex| regex.is_match(haystack))
    }
}

/// Generic marketing phrases that AI-written copy leans on. Shared by the
/// Content and Meta sniffers.
pub const GENERIC_PHRASES: &[&str] = &[
    "in today's digital age",
    "harnessing the power",
    "a new era of",
    "it's important to",
    "unlock the potential",
    "revolutionize the",
];

static PHRASE_AUTOMATON: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(GENERIC_PHRASES)
        .expect("generic phrase automaton must build")
});

/// Number of distinct generic marketing phrases present in the text.
/// Repeated occurrences of the same phrase count once.
pub fn count_generic_phrases(text: &str) -> usize {
    let mut seen: HashSet<usize> = HashSet::new();
    for mat in PHRASE_AUTOMATON.find_iter(text) {
        seen.insert(mat.pattern().as_usize());
    }
    seen.len()
}
