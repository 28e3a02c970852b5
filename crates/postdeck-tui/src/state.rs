//! Application state composition.
//!
//! ```text
//! AppState
//! ├── session: Session            (token + user; the only shared state)
//! ├── view: View                  (exactly one active view)
//! ├── flash: Option<Flash>        (transient status message)
//! ├── load_seq / loads            (latest-request-wins guards per region)
//! ├── login / register            (auth forms)
//! ├── dashboard                   (stats, upcoming posts, schedule form)
//! ├── analytics                   (summary + best times)
//! └── accounts                    (account list + connect form)
//! ```
//!
//! The session state machine has two states, derived from `session`:
//! logged out (`user` is None) and logged in. `user` being set implies
//! `token` is set; the reverse does not hold — a stored token is
//! optimistic until the startup profile fetch confirms it.

use postdeck_core::api::User;

use crate::common::{LoadSeq, Loads};
use crate::features::accounts::AccountsState;
use crate::features::analytics::AnalyticsState;
use crate::features::auth::{LoginForm, RegisterForm};
use crate::features::dashboard::DashboardState;
use crate::features::statusline::Flash;

/// The five mutually-exclusive views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Dashboard,
    Analytics,
    Accounts,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Sign in",
            View::Register => "Register",
            View::Dashboard => "Dashboard",
            View::Analytics => "Analytics",
            View::Accounts => "Accounts",
        }
    }
}

/// Process-wide session: the bearer token plus the confirmed profile.
#[derive(Debug, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Combined application state, mutated only by the reducer.
#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    pub view: View,
    pub session: Session,
    pub flash: Option<Flash>,
    pub load_seq: LoadSeq,
    pub loads: Loads,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub dashboard: DashboardState,
    pub analytics: AnalyticsState,
    pub accounts: AccountsState,
    /// Lookback window for summary requests.
    pub analytics_days: u32,
}

impl AppState {
    /// Creates the initial state.
    ///
    /// With a stored token the machine starts optimistically on the
    /// dashboard; the runtime issues the profile fetch that either
    /// confirms the session or falls back to the login view.
    pub fn new(analytics_days: u32, stored_token: Option<String>) -> Self {
        let view = if stored_token.is_some() {
            View::Dashboard
        } else {
            View::Login
        };
        Self {
            should_quit: false,
            view,
            session: Session {
                token: stored_token,
                user: None,
            },
            flash: None,
            load_seq: LoadSeq::default(),
            loads: Loads::default(),
            login: LoginForm::default(),
            register: RegisterForm::default(),
            dashboard: DashboardState::default(),
            analytics: AnalyticsState::default(),
            accounts: AccountsState::default(),
            analytics_days,
        }
    }
}
