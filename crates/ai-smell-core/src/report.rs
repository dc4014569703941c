use std::fmt::Write;

use serde::Serialize;

use crate::scorer::OverallScore;
use crate::sniffer::SniffResult;

/// Output formats supported by the report renderer.
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Map an overall score to the human verdict line.
pub fn verdict(total_score: f64) -> &'static str {
    if total_score > 0.7 {
        "Highly likely AI-generated or low-effort template."
    } else if total_score > 0.4 {
        "Some elements suggest AI-generation or template usage."
    } else {
        "Appears to be custom-built."
    }
}

/// Render the analysis outcome for one page in the requested format.
pub fn render_report(
    url: &str,
    overall: &OverallScore,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => render_text(url, overall),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ReportDocument::new(
            url, overall,
        ))?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(&ReportDocument::new(url, overall))?),
    }
}

fn render_text(url: &str, overall: &OverallScore) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "AI-Smell test for: {url}")?;
    writeln!(out)?;
    writeln!(out, "## Analysis Report")?;
    writeln!(out)?;

    let name_width = overall
        .report
        .iter()
        .map(|result| result.sniffer.len())
        .chain(std::iter::once("Sniffer".len()))
        .max()
        .unwrap_or(0);
    // "██████████ 100%" plus padding.
    let score_width = 17;

    writeln!(
        out,
        "| {name:<name_width$} | {score:<score_width$} | Details",
        name = "Sniffer",
        score = "Score",
    )?;
    writeln!(
        out,
        "| {} | {} | {}",
        "-".repeat(name_width),
        "-".repeat(score_width),
        "-".repeat(7)
    )?;

    for result in &overall.report {
        let filled = (result.score * 10.0).round() as usize;
        let bar: String = "█".repeat(filled) + &"░".repeat(10 - filled);
        let percent = (result.score * 100.0).round() as i64;
        writeln!(
            out,
            "| **{name:<name_width$}** | {bar} {percent:>3}% | {message}",
            name = result.sniffer,
            message = result.message,
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Overall AI-Smell Score: {:.0}%",
        overall.total_score * 100.0
    )?;
    writeln!(out, "Verdict: {}", verdict(overall.total_score))?;
    Ok(out)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportDocument<'a> {
    url: &'a str,
    overall_score: f64,
    verdict: &'static str,
    report: &'a [SniffResult],
}

impl<'a> ReportDocument<'a> {
    fn new(url: &'a str, overall: &'a OverallScore) -> Self {
        Self {
            url,
            overall_score: overall.total_score,
            verdict: verdict(overall.total_score),
            report: &overall.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OverallScore {
        OverallScore {
            total_score: 0.75,
            report: vec![
                SniffResult::new("Domain", 1.0, "Hosted on AI builder domain: lovable.app"),
                SniffResult::new("Design", 0.0, "Layout seems modern and uses sufficient media."),
            ],
        }
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(verdict(0.71), "Highly likely AI-generated or low-effort template.");
        assert_eq!(verdict(0.7), "Some elements suggest AI-generation or template usage.");
        assert_eq!(verdict(0.41), "Some elements suggest AI-generation or template usage.");
        assert_eq!(verdict(0.4), "Appears to be custom-built.");
        assert_eq!(verdict(0.0), "Appears to be custom-built.");
    }

    #[test]
    fn text_report_contains_table_and_verdict() {
        let output = render_report("https://x.lovable.app", &sample(), OutputFormat::Text).unwrap();
        assert!(output.contains("AI-Smell test for: https://x.lovable.app"));
        assert!(output.contains("**Domain"));
        assert!(output.contains("██████████ 100%"));
        assert!(output.contains("░░░░░░░░░░   0%"));
        assert!(output.contains("Overall AI-Smell Score: 75%"));
        assert!(output.contains("Highly likely"));
    }

    #[test]
    fn json_report_has_expected_shape() {
        let output = render_report("https://example.com", &sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["url"], "https://example.com");
        assert_eq!(value["overallScore"], serde_json::json!(0.75));
        assert!(value["verdict"].as_str().unwrap().contains("Highly likely"));
        assert_eq!(value["report"][0]["sniffer"], "Domain");
        assert_eq!(value["report"][0]["score"], serde_json::json!(1.0));
    }

    #[test]
    fn yaml_report_round_trips() {
        let output = render_report("https://example.com", &sample(), OutputFormat::Yaml).unwrap();
        let value: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
        assert_eq!(value["overallScore"], serde_yaml::Value::from(0.75));
        assert_eq!(value["report"][1]["sniffer"], serde_yaml::Value::from("Design"));
    }
}
