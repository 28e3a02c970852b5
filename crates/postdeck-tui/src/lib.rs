//! Full-screen terminal dashboard for Postdeck.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use postdeck_core::api::ApiClient;
use postdeck_core::auth::TokenStore;
use postdeck_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive dashboard.
///
/// # Errors
/// Returns an error if no terminal is attached or terminal I/O fails.
pub async fn run_dashboard(config: &Config, token_store: TokenStore) -> Result<()> {
    // The dashboard requires a terminal to render
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The dashboard requires a terminal.\n\
             Use `postdeck ping` to check server connectivity instead."
        );
    }

    // A malformed token file is treated as logged out, not fatal.
    let stored_token = match token_store.load() {
        Ok(token) => token,
        Err(err) => {
            tracing::warn!(error = format!("{err:#}"), "ignoring unreadable token file");
            None
        }
    };

    // Print pre-TUI info to stderr (will be replaced by alternate screen)
    let mut err = stderr();
    writeln!(err, "Postdeck Dashboard")?;
    writeln!(err, "Server: {}", config.base_url)?;
    if let Some(token) = &stored_token {
        writeln!(
            err,
            "Stored session: {}",
            postdeck_core::auth::mask_token(token)
        )?;
    }
    err.flush()?;

    let client = ApiClient::new(&config.base_url, config.request_timeout())?;
    let mut runtime = TuiRuntime::new(client, token_store, config.analytics_days, stored_token)?;
    runtime.run()?;

    // Print goodbye after TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
