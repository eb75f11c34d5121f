use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use palisade::classifier::{ContentClassifier, MistralClassifier, NoopClassifier};
use palisade::config::Config;
use palisade::flags::{Flag, FlagConfigPatch};
use palisade::service::{ModerationService, Outcome};
use palisade::store::{FileFlagConfigStore, FileWordListStore};

/// Palisade: pre-publication moderation gate for customer reviews.
///
/// Combines an external toxicity classifier with a forbidden-word
/// dictionary and personal-name redaction, then renders a RED/GREEN
/// publish-or-hold verdict.
#[derive(Parser)]
#[command(name = "palisade", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Moderate a single review and print the verdict
    Moderate {
        /// The review text
        text: String,

        /// Moderation threshold in [0.1, 1.0]; out-of-range values are clamped
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Manage the forbidden-word list
    Words {
        #[command(subcommand)]
        command: WordsCommand,
    },

    /// Show or tune the RED/GREEN flag configuration
    Flags {
        #[command(subcommand)]
        command: FlagsCommand,
    },

    /// Run the HTTP moderation API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "5004")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[derive(Subcommand)]
enum WordsCommand {
    /// List the forbidden words and their masks
    List,
    /// Add a word (stored lowercase)
    Add { word: String },
    /// Remove a word
    Remove { word: String },
}

#[derive(Subcommand)]
enum FlagsCommand {
    /// Show the current configuration
    Show,
    /// Update one or more fields
    Set {
        /// Classifier score at or above which a review goes RED
        #[arg(long)]
        score_threshold: Option<f64>,

        /// Whether redacted forbidden words force RED
        #[arg(long)]
        forbidden_words: Option<bool>,

        /// Whether redacted personal names force RED
        #[arg(long)]
        proper_names: Option<bool>,

        /// Whether any text modification forces RED
        #[arg(long)]
        text_modification: Option<bool>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("palisade=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let service = build_service(&config).await?;

    match cli.command {
        Commands::Moderate { text, threshold } => {
            let result = service.moderate(&text, threshold).await?;

            let flag = match result.verdict.flag {
                Flag::Red => "RED — human review required".red().bold(),
                Flag::Green => "GREEN — safe to publish".green().bold(),
            };
            println!("{flag}");
            for reason in &result.verdict.reasons {
                println!("  - {reason}");
            }

            println!("\nOriginal:  {}", result.original_text);
            println!("Moderated: {}", result.moderated_text);

            if let Some(error) = &result.classification.error {
                println!("\n{} {error}", "Classifier unavailable:".yellow());
            } else if !result.classification.category_scores.is_empty() {
                println!(
                    "\nClassifier scores (threshold {}):",
                    result.moderation_threshold
                );
                let mut scores: Vec<_> = result.classification.category_scores.iter().collect();
                scores.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
                for (category, score) in scores {
                    println!("  {score:>6.3}  {category}");
                }
            }
        }

        Commands::Words { command } => match command {
            WordsCommand::List => {
                let words = service.list_words().await;
                if words.is_empty() {
                    println!("No forbidden words configured.");
                } else {
                    for (word, mask) in words {
                        println!("  {word:<24} {mask}");
                    }
                }
            }
            WordsCommand::Add { word } => {
                let (word, mask, outcome) = service.add_word(&word).await?;
                report_outcome(&outcome);
                println!("Added \"{word}\" (mask: {mask})");
            }
            WordsCommand::Remove { word } => {
                let outcome = service.remove_word(&word).await?;
                report_outcome(&outcome);
                println!("Removed \"{}\"", word.trim().to_lowercase());
            }
        },

        Commands::Flags { command } => match command {
            FlagsCommand::Show => {
                let config = service.flag_config().await;
                println!(
                    "Classifier score threshold: {}",
                    config.mistral_score_threshold
                );
                println!(
                    "Forbidden words -> RED:     {}",
                    config.forbidden_words_trigger_red
                );
                println!(
                    "Proper names -> RED:        {}",
                    config.proper_names_trigger_red
                );
                println!(
                    "Text modified -> RED:       {}",
                    config.text_modification_trigger_red
                );
            }
            FlagsCommand::Set {
                score_threshold,
                forbidden_words,
                proper_names,
                text_modification,
            } => {
                let patch = FlagConfigPatch {
                    mistral_score_threshold: score_threshold,
                    forbidden_words_trigger_red: forbidden_words,
                    proper_names_trigger_red: proper_names,
                    text_modification_trigger_red: text_modification,
                };
                let outcome = service.update_flag_config(&patch).await?;
                report_outcome(&outcome);
                println!("{}", "Flag configuration updated.".bold());
            }
        },

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            palisade::web::run_server(service, port, &bind).await?;
        }
    }

    Ok(())
}

/// Wire the file stores and the configured classifier into a service.
async fn build_service(config: &Config) -> Result<Arc<ModerationService>> {
    let classifier = build_classifier(config);
    let word_store = Arc::new(FileWordListStore::new(&config.words_path));
    let flag_store = Arc::new(FileFlagConfigStore::new(&config.flags_path));

    let service = ModerationService::new(classifier, word_store, flag_store).await?;
    Ok(Arc::new(service))
}

/// Pick the classifier based on configuration. Without an API key the
/// pipeline still runs: dictionary and name redaction don't need one.
fn build_classifier(config: &Config) -> Arc<dyn ContentClassifier> {
    if config.mistral_api_key.is_empty() {
        warn!("MISTRAL_API_KEY not set, moderating without the classifier");
        Arc::new(NoopClassifier)
    } else {
        info!("Using Mistral moderation classifier");
        Arc::new(MistralClassifier::new(
            config.mistral_api_key.clone(),
            &config.mistral_api_url,
        ))
    }
}

fn report_outcome(outcome: &Outcome) {
    if let Outcome::Unsaved(detail) = outcome {
        println!(
            "{} applied in memory but not saved: {detail}",
            "Warning:".yellow()
        );
    }
}
