//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use postdeck_core::config::{Config, paths};

mod commands;

#[derive(Parser)]
#[command(name = "postdeck")]
#[command(version)]
#[command(about = "Terminal dashboard for a social-media scheduling service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Server origin (overrides the configured base_url)
    #[arg(long, env = "POSTDECK_BASE_URL", value_name = "URL", global = true)]
    base_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Check server connectivity
    Ping,
    /// Remove the stored session token
    Logout,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
}

/// Parses arguments, initializes logging, and dispatches.
///
/// # Errors
/// Returns an error if the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    // Keep the appender guard alive for the process lifetime.
    let _log_guard = init_logging();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "postdeck starting");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(async {
        match cli.command {
            None => commands::dashboard(&config).await,
            Some(Commands::Ping) => commands::ping(&config).await,
            Some(Commands::Logout) => commands::logout(),
            Some(Commands::Config { command }) => match command {
                ConfigCommands::Path => commands::config_path(),
                ConfigCommands::Show => commands::config_show(&config),
            },
        }
    })
}

/// File logging under `<home>/logs`, filtered by `POSTDECK_LOG`.
///
/// Logging must never write to the terminal the TUI owns, so everything
/// goes to a daily-rolled file. Failure to set up logging is not fatal.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::EnvFilter;

    let logs_dir = paths::logs_dir();
    if std::fs::create_dir_all(&logs_dir).is_err() {
        return None;
    }

    let appender = tracing_appender::rolling::daily(logs_dir, "postdeck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("POSTDECK_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    result.ok().map(|()| guard)
}
