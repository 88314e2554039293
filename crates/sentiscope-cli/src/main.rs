mod analyze;
mod check;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sentiscope")]
#[command(about = "Cross-platform sentiment analysis for a search query")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect items for a query and print the analysis report as JSON
    Analyze {
        /// Product, brand or topic to search for
        query: String,

        /// Skip the live APIs and analyze mock data only
        #[arg(long)]
        mock: bool,

        /// Print the report on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Show which platform APIs are configured and test each live one
    CheckApis {
        /// Query used for the test calls
        #[arg(long, default_value = "iPhone")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(command) = Cli::parse().command else {
        Cli::command().print_help()?;
        return Ok(());
    };
    let config = if uses_credentials(&command) {
        sentiscope_core::load_app_config()?
    } else {
        sentiscope_core::load_offline_config()?
    };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Logs go to stderr so report JSON on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Analyze {
            query,
            mock,
            compact,
        } => analyze::run_analyze(&config, &query, mock, compact).await?,
        Commands::CheckApis { query } => check::run_check_apis(&config, &query).await?,
    }

    Ok(())
}

/// Mock-only analysis never touches the platform APIs.
fn uses_credentials(command: &Commands) -> bool {
    !matches!(command, Commands::Analyze { mock: true, .. })
}
