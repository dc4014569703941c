use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use ai_smell_core::{analyze, fetch, render_report, OutputFormat, WeightTable};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "ai-smell",
    author,
    version,
    about = "Detects AI-generated or template-built websites"
)]
struct Cli {
    /// URL of the website to analyze
    url: String,

    /// Console output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Save the report to a file; format is inferred from the extension
    /// (.json, .yaml/.yml, anything else is text)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Weight overrides: a JSON/TOML/YAML map from sniffer name to weight
    #[arg(long, value_name = "FILE")]
    weights: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Yaml => OutputFormat::Yaml,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let weights = load_weights(cli.weights.as_deref())?;
    debug!(url = %cli.url, "starting analysis");
    let client = fetch::build_client().context("failed to build HTTP client")?;
    let page = fetch::fetch_page(&client, &cli.url)
        .await
        .with_context(|| format!("failed to analyze {}", cli.url))?;
    let overall = analyze(&page, Some(&cli.url), &weights);

    if let Some(path) = &cli.output {
        let rendered = render_report(&cli.url, &overall, format_for_path(path))?;
        fs::write(path, rendered)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("Report saved to {}", path.display());
    } else {
        println!("{}", render_report(&cli.url, &overall, cli.format.into())?);
    }
    Ok(())
}

fn format_for_path(path: &Path) -> OutputFormat {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => OutputFormat::Json,
        Some("yaml") | Some("yml") => OutputFormat::Yaml,
        _ => OutputFormat::Text,
    }
}

fn load_weights(path: Option<&Path>) -> Result<WeightTable> {
    let mut table = WeightTable::default();
    let Some(path) = path else {
        return Ok(table);
    };
    let overrides: HashMap<String, f64> = config::Config::builder()
        .add_source(config::File::from(path))
        .build()
        .with_context(|| format!("failed to read weight overrides from {}", path.display()))?
        .try_deserialize()
        .with_context(|| format!("invalid weight overrides in {}", path.display()))?;
    for (sniffer, weight) in overrides {
        table
            .set(sniffer, weight)
            .with_context(|| format!("invalid weight override in {}", path.display()))?;
    }
    Ok(table)
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,hyper=warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init();
}
