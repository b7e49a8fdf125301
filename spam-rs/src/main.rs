use clap::{Parser, Subcommand};
use spam_rs::api::ApiServer;
use spam_rs::config::{Config, LoggingConfig};
use spam_rs::model::ModelHandle;
use spam_rs::spam::{ScoreResult, SpamScorer};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Classify messages as SPAM or SAFE", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,
    /// Classify a message given as arguments, or read from stdin
    Classify {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Message text
        text: Vec<String>,
    },
    /// Print the effective configuration and model status
    CheckConfig,
}

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", logging.level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Ok(Config::from_file(path)?)
    } else {
        Ok(Config::default())
    }
}

fn print_result(result: &ScoreResult) {
    println!("Result:               {}", result.final_label);
    println!("Model probability:    {:.4}", result.raw_prob);
    println!("Keyword score:        {:.4}", result.keyword_score);
    if result.matched_keywords.is_empty() {
        println!("Matched keywords:     none");
    } else {
        println!("Matched keywords:     {}", result.matched_keywords.join(", "));
    }
    println!("Uppercase score:      {:.4}", result.uppercase_score);
    println!("Boost:                {:.4}", result.boost);
    println!("Adjusted probability: {:.4}", result.adjusted_prob);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_logging(&config.logging);

    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));
    if cli.config.exists() {
        info!("Configuration loaded from {}", cli.config.display());
    } else {
        info!("No config file found, using defaults");
    }

    let scoring = Arc::new(config.scoring_config()?);
    let model = ModelHandle::load(&config.model);
    let scorer = SpamScorer::new(scoring, model);

    match cli.command {
        Commands::Serve => {
            info!("  Listening on: {}", config.server.listen_addr);
            info!("  Threshold: {}", scorer.config().threshold());
            info!("  Keywords: {}", scorer.config().catalog().len());

            let server = ApiServer::new(scorer, config.server.listen_addr.clone());
            server.run().await?;
        }
        Commands::Classify { json, text } => {
            let message = if text.is_empty() {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                text.join(" ")
            };

            let message = message.trim();
            if message.is_empty() {
                anyhow::bail!("Please provide a message to classify");
            }

            let result = scorer.classify(message)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_result(&result);
            }
        }
        Commands::CheckConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
            match scorer.model().load_error() {
                None => println!("# model: loaded"),
                Some(reason) => println!("# model: unavailable ({})", reason),
            }
        }
    }

    Ok(())
}
