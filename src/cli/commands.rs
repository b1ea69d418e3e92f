//! CLI commands implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::bot::Bot;
use crate::config::{Config, ENV_BOT_TOKEN};
use crate::lookup::{self, Resolution};
use crate::store::{RecordStore, SharedStore};

#[derive(Parser)]
#[command(name = "tochka")]
#[command(about = "Trading point lookup bot for Telegram")]
#[command(version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Telegram bot (long polling)
    Run,

    /// Load the data file and report partition statistics
    Check,

    /// Resolve a single query and print the result
    Lookup {
        /// Trading point name to look up
        query: Vec<String>,
    },

    /// Print every known trading point name
    List,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run => cmd_run(&config).await,
        Commands::Check => cmd_check(&config).await,
        Commands::Lookup { query } => cmd_lookup(&config, &query.join(" ")).await,
        Commands::List => cmd_list(&config).await,
    }
}

/// Load the record table from the configured data file, with a spinner.
fn load_store(config: &Config) -> anyhow::Result<RecordStore> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Loading {}...", config.data_path().display()));

    let source = config.open_source();
    let store = RecordStore::load(source.as_ref(), &config.partitions);
    pb.finish_and_clear();

    Ok(store?)
}

async fn cmd_run(config: &Config) -> anyhow::Result<()> {
    let Some(token) = config.bot_token() else {
        println!("{} {} is not set", style("✗").red(), ENV_BOT_TOKEN);
        println!(
            "  Add it to .env or export it: {}=<token from @BotFather>",
            ENV_BOT_TOKEN
        );
        return Ok(());
    };

    let store = Arc::new(SharedStore::new(load_store(config)?));
    {
        let snapshot = store.snapshot().await;
        println!(
            "{} Loaded {} records across {} partitions",
            style("✓").green(),
            snapshot.total_records(),
            snapshot.partitions().len()
        );
    }

    let bot = Bot::new(config.clone(), &token, store).await?;
    println!(
        "{} Bot is polling. Press Ctrl+C to stop.",
        style("→").cyan()
    );

    bot.run().await
}

async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    let store = load_store(config)?;

    println!("\n{}", style("Data Check").bold());
    println!("{}", "-".repeat(40));
    println!("{:<20} {}", "Data file:", config.data_path().display());

    for partition in store.partitions() {
        println!(
            "{:<20} {} records",
            format!("{}:", partition.schema().name),
            partition.len()
        );
    }
    println!("{:<20} {}", "Total:", store.total_records());

    Ok(())
}

async fn cmd_lookup(config: &Config, query: &str) -> anyhow::Result<()> {
    let store = load_store(config)?;

    match lookup::resolve(&store, query) {
        Resolution::EmptyQuery => {
            println!(
                "{} Enter a trading point name to look up",
                style("!").yellow()
            );
        }
        Resolution::Found(card) => {
            println!(
                "\n{} ({})",
                style(&card.display_name).bold(),
                card.partition
            );
            println!("{}", "-".repeat(40));
            for (label, value) in &card.fields {
                println!("{:<16} {}", format!("{}:", label), value);
            }
        }
        Resolution::Miss(miss) => {
            println!(
                "{} No trading point named '{}'",
                style("✗").red(),
                miss.query
            );
            if !miss.suggestions.is_empty() {
                println!("\n{}", style("Similar names:").cyan());
                for name in &miss.suggestions {
                    println!("  • {}", name);
                }
            }
        }
    }

    Ok(())
}

async fn cmd_list(config: &Config) -> anyhow::Result<()> {
    let store = load_store(config)?;
    for name in store.all_display_names() {
        println!("{}", name);
    }
    Ok(())
}
