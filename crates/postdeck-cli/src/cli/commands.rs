//! Command implementations.

use anyhow::{Context, Result};
use postdeck_core::api::ApiClient;
use postdeck_core::auth::TokenStore;
use postdeck_core::config::{Config, paths};

/// Default command: the interactive dashboard.
pub async fn dashboard(config: &Config) -> Result<()> {
    postdeck_tui::run_dashboard(config, TokenStore::default()).await
}

/// `postdeck ping` — health-check the configured server.
pub async fn ping(config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.base_url, config.request_timeout())?;
    let health = client
        .health()
        .await
        .with_context(|| format!("Server {} is unreachable", config.base_url))?;
    println!("{}: {}", config.base_url, health.status);
    Ok(())
}

/// `postdeck logout` — remove the stored session token.
pub fn logout() -> Result<()> {
    let store = TokenStore::default();
    if store.clear()? {
        println!("Logged out.");
    } else {
        println!("No stored session.");
    }
    Ok(())
}

/// `postdeck config path`
pub fn config_path() -> Result<()> {
    println!("{}", paths::config_path().display());
    Ok(())
}

/// `postdeck config show`
pub fn config_show(config: &Config) -> Result<()> {
    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}
