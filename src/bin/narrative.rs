//! Command-line driver for the narrative analyzer.
//!
//! Usage:
//!   cargo run --bin narrative -- analyze --input request.json
//!   cargo run --bin narrative -- summarize --file article.txt
//!   cargo run --bin narrative -- keyword "How does social media shape climate opinion?"
//!
//! Each command prints the result envelope as JSON and exits non-zero on failure.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use narrative_analysis::config::{Config, RuntimeConfig, load_env_file};
use narrative_analysis::{NarrativeAnalyzer, ResearchRequest, ResultEnvelope};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "narrative")]
#[command(about = "LLM-backed narrative analysis of articles", long_about = None)]
struct Cli {
    /// Override the configured model
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Narrative analysis for a research question across articles
    Analyze {
        /// JSON file holding {"researchQuestion": ..., "articles": [...]}
        #[arg(long)]
        input: PathBuf,
    },
    /// Summarize a single article
    Summarize {
        /// Read the article text from a file instead of the argument
        #[arg(long)]
        file: Option<PathBuf>,
        text: Option<String>,
    },
    /// Extract a search keyword from a research question
    Keyword { question: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging first so configuration warnings are visible.
    load_env_file();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(RuntimeConfig::load_from_env().log_level))
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::load().context("load configuration")?;
    if let Some(model) = cli.model {
        config.override_model(model).context("--model")?;
    }

    let analyzer = NarrativeAnalyzer::from_config(&config)?;

    let ok = match cli.command {
        Commands::Analyze { input } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("read {}", input.display()))?;
            let request: ResearchRequest =
                serde_json::from_str(&raw).context("parse research request")?;
            print_envelope(&analyzer.generate_analysis(&request).await)?
        }
        Commands::Summarize { file, text } => {
            let text = match (file, text) {
                (Some(path), _) => std::fs::read_to_string(&path)
                    .with_context(|| format!("read {}", path.display()))?,
                (None, Some(text)) => text,
                (None, None) => bail!("provide article text or --file"),
            };
            print_envelope(&analyzer.generate_summary(&text).await)?
        }
        Commands::Keyword { question } => {
            print_envelope(&analyzer.extract_keyword(&question).await)?
        }
    };

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

fn print_envelope<T: Serialize>(envelope: &ResultEnvelope<T>) -> Result<bool> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(envelope.is_success())
}
