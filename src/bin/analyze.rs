use std::process::ExitCode;

use anyhow::{Context, Result};
use artwork_analyzer::{Analyzer, AnalyzerConfig, RandomTagSelector, SeededTagSelector, UrlImageLoader};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

/// Extract a dominant-color palette and descriptive tags from artwork images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more image URLs or file paths
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Print each result as JSON (`{"tags": [...], "colorPalette": [...]}`)
    #[arg(short, long)]
    json: bool,

    /// Seed for the style tags, for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip the processing pause before results are shown
    #[arg(long)]
    no_delay: bool,

    /// Origin remote hosts must allow before their pixels are read
    #[arg(short, long)]
    origin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let mut config = AnalyzerConfig::from_env();
    if args.no_delay {
        config = config.without_delay();
    }
    if let Some(origin) = args.origin {
        config = config.with_origin(origin);
    }

    let loader = UrlImageLoader::new(&config).context("failed to build HTTP client")?;
    let analyzer = match args.seed {
        Some(seed) => Analyzer::new(loader, SeededTagSelector::new(seed), config),
        None => Analyzer::new(loader, RandomTagSelector, config),
    };

    let mut failed = false;
    for input in &args.inputs {
        match analyzer.analyze(input).await {
            Ok(result) if args.json => {
                println!("{}", serde_json::to_string(&result)?);
            }
            Ok(result) => {
                println!("{input}");
                println!("  palette: {}", result.color_palette.join(" "));
                println!("  tags:    {}", result.tags.join(", "));
            }
            Err(e) => {
                eprintln!("{input}: {e}");
                failed = true;
            }
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
