//! tochka - trading point lookup bot.
//!
//! Answers chat messages with structured trading-point records loaded
//! from a tabular data file (Excel workbook or a directory of CSVs).

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    // Initialize logging based on verbosity
    let default_filter = if tochka::cli::is_verbose() {
        "tochka=info"
    } else {
        "tochka=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Run CLI
    tochka::cli::run().await
}
