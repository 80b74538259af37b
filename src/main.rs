use std::future::Future;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use arabic_keywords::config::Config;
use arabic_keywords::keywords::Strategy;
use arabic_keywords::output::{self, terminal};
use arabic_keywords::pipeline::{KeywordEngine, StrategyOutcome};
use arabic_keywords::presets::{self, PRESETS};

/// Arabic keywords: compare keyword extraction strategies on Arabic text.
///
/// Cleans the input, removes stopwords, and ranks keywords with TF-IDF,
/// YAKE, embedding similarity, or a fusion of them.
#[derive(Parser)]
#[command(name = "arabic-keywords", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the text comes from. A blank or missing text falls back to a topic.
#[derive(Args)]
struct InputArgs {
    /// Text to analyze
    #[arg(long)]
    text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Built-in topic used when no text is given (see `topics`)
    #[arg(long, default_value = presets::DEFAULT_TOPIC)]
    topic: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract keywords with one strategy
    Extract {
        /// tfidf, yake, keybert-distilbert, keybert-arabic-bert,
        /// keybert-xlm-roberta, tfidf-arabert or tfidf-yake-arabert
        #[arg(long, short, default_value = "tfidf")]
        strategy: Strategy,

        /// Number of keywords to keep (default: KEYWORDS_TOP_N or 10)
        #[arg(long)]
        top_n: Option<usize>,

        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Run several strategies on the same text
    Compare {
        /// Comma-separated strategies (default: all)
        #[arg(long, value_delimiter = ',')]
        strategies: Vec<Strategy>,

        /// Number of keywords to keep per strategy
        #[arg(long)]
        top_n: Option<usize>,

        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Show the cleaned text and the tokens left after stopword removal
    Clean {
        #[command(flatten)]
        input: InputArgs,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the built-in topics
    Topics,

    /// Show the model directory and which encoders are installed
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("arabic_keywords=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            strategy,
            top_n,
            input,
            json,
        } => {
            let config = Config::load()?;
            let engine = KeywordEngine::from_config(&config)?;
            let text = read_input(&input)?;
            let top_n = top_n.unwrap_or(config.top_n);

            let extraction =
                match retry_once(strategy, || engine.extract(&text, strategy, top_n)).await {
                    Ok(extraction) => extraction,
                    Err(e) if e.is_transient() => {
                        return Err(anyhow::Error::from(e).context(
                            "Embedding backend unavailable. The tfidf and yake strategies run without models.",
                        ));
                    }
                    Err(e) => return Err(e.into()),
                };

            if json {
                println!("{}", serde_json::to_string_pretty(&extraction)?);
            } else {
                terminal::display_extraction(&extraction);
            }
        }

        Commands::Compare {
            strategies,
            top_n,
            input,
            json,
        } => {
            let config = Config::load()?;
            let engine = KeywordEngine::from_config(&config)?;
            let text = read_input(&input)?;
            let top_n = top_n.unwrap_or(config.top_n);

            let requested = if strategies.is_empty() {
                Strategy::ALL.to_vec()
            } else {
                strategies
            };

            // Strategies whose encoders aren't installed are reported, not run.
            let (runnable, missing): (Vec<Strategy>, Vec<Strategy>) =
                requested.into_iter().partition(|s| {
                    s.encoders()
                        .iter()
                        .all(|&id| engine.registry().is_available(id))
                });
            for strategy in &missing {
                warn!(strategy = strategy.name(), "Skipping strategy, encoder model not installed");
            }

            let mut outcomes = engine.compare(&text, &runnable, top_n).await?;
            for outcome in &mut outcomes {
                if matches!(&outcome.result, Err(e) if e.is_transient()) {
                    warn!(strategy = outcome.strategy.name(), "Retrying strategy once");
                    outcome.result = engine.extract(&text, outcome.strategy, top_n).await;
                }
            }
            for strategy in missing {
                let encoders: Vec<&str> = strategy.encoders().iter().map(|id| id.name()).collect();
                outcomes.push(StrategyOutcome {
                    strategy,
                    result: Err(arabic_keywords::ExtractError::backend(
                        encoders.join(", "),
                        "model files not installed (see `arabic-keywords status`)",
                    )),
                });
            }

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output::comparison_json(&outcomes))?
                );
            } else {
                terminal::display_comparison(&outcomes);
            }
        }

        Commands::Clean { input, json } => {
            let config = Config::load()?;
            let engine = KeywordEngine::from_config(&config)?;
            let text = read_input(&input)?;
            let prepared = engine.prepare(&text);

            if json {
                println!("{}", serde_json::to_string_pretty(&prepared)?);
            } else {
                terminal::display_prepared(&prepared);
            }
        }

        Commands::Topics => {
            terminal::display_topics(&PRESETS);
        }

        Commands::Status => {
            let config = Config::load()?;
            let installed = config.installed_encoders();
            terminal::display_status(&config.model_dir, &installed);
            println!();
            println!("  Default top_n: {}", config.top_n);
            println!("  Inference timeout: {}s", config.inference_timeout.as_secs());
            println!("  Fusion match: {}", config.fusion_match);
            if installed.is_empty() {
                println!(
                    "\n{}",
                    "Only the tfidf and yake strategies can run right now.".yellow()
                );
            }
        }
    }

    Ok(())
}

/// The text to analyze: `--file`, else `--text`, else the `--topic` preset.
fn read_input(input: &InputArgs) -> Result<String> {
    let from_file = match &input.file {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };
    let text = from_file.as_deref().or(input.text.as_deref());
    Ok(presets::resolve_input(text, &input.topic)?)
}

/// Run `op`, and run it a second time if the first attempt hit a backend
/// failure. Other errors are returned immediately.
async fn retry_once<T, F, Fut>(strategy: Strategy, mut op: F) -> arabic_keywords::Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = arabic_keywords::Result<T>>,
{
    match op().await {
        Err(e) if e.is_transient() => {
            warn!(strategy = strategy.name(), error = %e, "Backend failed, retrying once");
            let result = op().await;
            if result.is_ok() {
                info!(strategy = strategy.name(), "Retry succeeded");
            }
            result
        }
        other => other,
    }
}
