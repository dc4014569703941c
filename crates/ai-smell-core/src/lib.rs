pub mod fetch;
pub mod page;
pub mod report;
pub mod scorer;
pub mod sniffer;

pub use fetch::{build_client, fetch_html, fetch_page, FetchError, SPOOFED_USER_AGENT};
pub use page::Page;
pub use report::{render_report, verdict, OutputFormat};
pub use scorer::{calculate_overall_score, InvalidWeightError, OverallScore, WeightTable};
pub use sniffer::{registry, SniffResult, Sniffer};

use tracing::debug;

/// Run every registered sniffer over a page snapshot and combine the results
/// into one weighted overall score. Sniffers run sequentially in registry
/// order; they are pure over the snapshot, so ordering only affects how the
/// report displays.
pub fn analyze(page: &Page, url: Option<&str>, weights: &WeightTable) -> OverallScore {
    let results: Vec<SniffResult> = registry()
        .iter()
        .map(|sniffer| sniffer.sniff(page, url))
        .collect();
    debug!(sniffers = results.len(), "collected sniffer results");
    calculate_overall_score(results, weights)
}
