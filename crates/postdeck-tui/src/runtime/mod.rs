//! TUI runtime - owns terminal, runs event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here.
//! The reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! Async API calls send their completion `UiEvent`s to `inbox_tx`; the
//! runtime drains `inbox_rx` each frame. In-flight requests are never
//! aborted on navigation — the reducer's per-region load ids drop stale
//! completions instead.

mod handlers;

use std::future::Future;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use postdeck_core::api::ApiClient;
use postdeck_core::auth::TokenStore;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll interval while requests are in flight.
const ACTIVE_POLL_DURATION: Duration = Duration::from_millis(50);

/// Poll interval when idle (saves CPU).
const IDLE_POLL_DURATION: Duration = Duration::from_millis(150);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop,
/// panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: Arc<ApiClient>,
    token_store: TokenStore,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Creates a new TUI runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(
        client: ApiClient,
        token_store: TokenStore,
        analytics_days: u32,
        stored_token: Option<String>,
    ) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let state = AppState::new(analytics_days, stored_token);
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client: Arc::new(client),
            token_store,
            inbox_tx,
            inbox_rx,
            last_tick: Instant::now(),
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        // Stored token: optimistic dashboard, then profile re-validation.
        let startup = update::startup_effects(&self.state);
        self.execute_effects(startup);
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true; // initial render

        while !self.state.should_quit {
            for event in self.collect_events()? {
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
                dirty = true;
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    // ========================================================================
    // Event Collection
    // ========================================================================

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        // Drain inbox - all async results arrive here
        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let tick_interval = if self.state.loads.is_any_loading() {
            ACTIVE_POLL_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        // Block on terminal input only when there is nothing else to do.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if crossterm::event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(crossterm::event::read()?));
            // Drain any remaining buffered events (non-blocking)
            while crossterm::event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(crossterm::event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    // ========================================================================
    // Effect Dispatch
    // ========================================================================

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns an async handler; its resulting event lands in the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    /// Returns the session token, or None (and a log line) when a
    /// token-requiring effect fires while logged out.
    fn session_token(&self) -> Option<String> {
        let token = self.state.session.token.clone();
        if token.is_none() {
            tracing::warn!("authenticated effect requested without a session token");
        }
        token
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }

            // Token persistence (synchronous, tiny file)
            UiEffect::PersistToken { token } => {
                if let Err(err) = self.token_store.save(&token) {
                    tracing::warn!(error = format!("{err:#}"), "failed to persist token");
                }
            }
            UiEffect::ClearToken => {
                if let Err(err) = self.token_store.clear() {
                    tracing::warn!(error = format!("{err:#}"), "failed to clear token");
                }
            }

            // Auth calls
            UiEffect::FetchProfile => {
                let Some(token) = self.session_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::fetch_profile(client, token));
            }
            UiEffect::SubmitLogin { username, password } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::login(client, username, password));
            }
            UiEffect::SubmitRegister { draft } => {
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::register(client, draft));
            }

            // View loads
            UiEffect::LoadPosts { id } => {
                let Some(token) = self.session_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::load_posts(client, token, id));
            }
            UiEffect::LoadDashboardSummary { id } => {
                let Some(token) = self.session_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                let days = self.state.analytics_days;
                self.spawn_effect(move || handlers::load_dashboard_summary(client, token, days, id));
            }
            UiEffect::LoadAnalyticsSummary { id } => {
                let Some(token) = self.session_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                let days = self.state.analytics_days;
                self.spawn_effect(move || handlers::load_analytics_summary(client, token, days, id));
            }
            UiEffect::LoadBestTimes { id } => {
                let Some(token) = self.session_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::load_best_times(client, token, id));
            }
            UiEffect::LoadAccounts { id } => {
                let Some(token) = self.session_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::load_accounts(client, token, id));
            }

            // Mutating calls
            UiEffect::SchedulePost { draft } => {
                let Some(token) = self.session_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::schedule_post(client, token, draft));
            }
            UiEffect::DeletePost { post_id } => {
                let Some(token) = self.session_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::delete_post(client, token, post_id));
            }
            UiEffect::ConnectAccount { draft } => {
                let Some(token) = self.session_token() else {
                    return;
                };
                let client = Arc::clone(&self.client);
                self.spawn_effect(move || handlers::connect_account(client, token, draft));
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
