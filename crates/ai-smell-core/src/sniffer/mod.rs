use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::page::Page;

pub mod boilerplate;
pub mod color;
pub mod comments;
pub mod content;
pub mod design;
pub mod domain;
pub mod matcher;
pub mod meta;
pub mod techstack;
pub mod uikit;

/// The result of a single sniffer analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SniffResult {
    /// Name of the sniffer that produced the result.
    pub sniffer: String,
    /// Smell score from 0.0 (no smell) to 1.0 (strong smell).
    pub score: f64,
    /// Human-readable explanation of the score.
    pub message: String,
}

impl SniffResult {
    /// Construct a result, clamping the score into `[0.0, 1.0]`.
    pub fn new(sniffer: impl Into<String>, score: f64, message: impl Into<String>) -> Self {
        Self {
            sniffer: sniffer.into(),
            score: score.clamp(0.0, 1.0),
            message: message.into(),
        }
    }
}

/// A single heuristic check over a page snapshot.
///
/// Sniffers are stateless and total: for any well-formed DOM they return a
/// result, degrading to score 0 with a diagnostic message when their signal
/// is absent or malformed. The registry owns one instance of each and reuses
/// it across runs.
pub trait Sniffer: Send + Sync {
    /// Unique display name, also the weight-lookup key.
    fn name(&self) -> &'static str;

    /// Analyze the page, optionally informed by its originating URL.
    fn sniff(&self, page: &Page, url: Option<&str>) -> SniffResult;

    /// Build a result carrying this sniffer's name.
    fn result(&self, score: f64, message: impl Into<String>) -> SniffResult
    where
        Self: Sized,
    {
        SniffResult::new(self.name(), score, message)
    }
}

static REGISTRY: Lazy<Vec<Box<dyn Sniffer>>> = Lazy::new(|| {
    vec![
        Box::new(domain::DomainSniffer),
        Box::new(techstack::TechStackSniffer),
        Box::new(meta::MetaSniffer),
        Box::new(boilerplate::BoilerplateSniffer),
        Box::new(comments::CommentsSniffer),
        Box::new(color::ColorPaletteSniffer),
        Box::new(content::ContentSniffer),
        Box::new(design::DesignSniffer),
        Box::new(uikit::UiKitSniffer),
    ]
});

/// The fixed, ordered sniffer registry. Insertion order is evaluation and
/// display order; the Domain check runs first as the most definitive signal.
pub fn registry() -> &'static [Box<dyn Sniffer>] {
    &REGISTRY
}

/// Round a score to two decimal places for stable report output.
pub(crate) fn round2(score: f64) -> f64 {
    (score * 100.0).round() / 100.0
}
