//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects. The reducer never performs I/O.
//!
//! Session transitions in one place:
//! - login/register success  -> logged in, token persisted, dashboard
//! - login/register failure  -> unchanged, error flashed
//! - startup profile failure -> logged out, stored token cleared
//! - explicit logout         -> logged out, stored token cleared

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::accounts::{AccountsAction, AccountsState, handle_form_key};
use crate::features::analytics::AnalyticsState;
use crate::features::auth::{LoginAction, RegisterAction, handle_login_key, handle_register_key};
use crate::features::dashboard::{self, DashboardAction, DashboardState};
use crate::features::statusline::Flash;
use crate::state::{AppState, View};

/// Effects to run right after state construction: a stored token is
/// optimistic until the profile fetch confirms it.
pub fn startup_effects(state: &AppState) -> Vec<UiEffect> {
    if state.session.token.is_some() && !state.session.is_logged_in() {
        vec![UiEffect::FetchProfile]
    } else {
        vec![]
    }
}

/// The main reducer function.
pub fn update(state: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(state, &term_event),

        UiEvent::ProfileLoaded { result } => match result {
            Ok(user) => {
                state.session.user = Some(user);
                activate_view(state, state.view)
            }
            // Any failure invalidates the stored token: back to login.
            Err(err) => {
                tracing::info!(error = %err, "stored session rejected, logging out");
                force_logout(
                    state,
                    Some(Flash::info("Session expired. Please sign in again.")),
                )
            }
        },

        UiEvent::LoginCompleted { result } => handle_auth_result(
            state,
            result,
            "Login successful",
            "Login failed. Please try again.",
        ),
        UiEvent::RegisterCompleted { result } => handle_auth_result(
            state,
            result,
            "Registration successful",
            "Registration failed. Please try again.",
        ),

        UiEvent::PostsLoaded { id, result } => {
            if !state.loads.posts.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(posts) => state.dashboard.apply_posts(posts),
                Err(err) => flash_error(state, &err, "Failed to load posts"),
            }
            vec![]
        }
        UiEvent::DashboardSummaryLoaded { id, result } => {
            if !state.loads.dashboard_summary.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(summary) => state.dashboard.summary = Some(summary),
                Err(err) => flash_error(state, &err, "Failed to load analytics"),
            }
            vec![]
        }
        UiEvent::AnalyticsSummaryLoaded { id, result } => {
            if !state.loads.analytics_summary.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(summary) => state.analytics.summary = Some(summary),
                Err(err) => flash_error(state, &err, "Failed to load analytics"),
            }
            vec![]
        }
        UiEvent::BestTimesLoaded { id, result } => {
            if !state.loads.best_times.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(times) => state.analytics.best_times = Some(times),
                Err(err) => flash_error(state, &err, "Failed to load recommendations"),
            }
            vec![]
        }
        UiEvent::AccountsLoaded { id, result } => {
            if !state.loads.accounts.finish_if_active(id) {
                return vec![];
            }
            match result {
                Ok(accounts) => state.accounts.accounts = Some(accounts),
                Err(err) => flash_error(state, &err, "Failed to load accounts"),
            }
            vec![]
        }

        UiEvent::PostScheduled { result } => match result {
            Ok(_) => {
                state.flash = Some(Flash::info("Post scheduled successfully!"));
                state.dashboard.form.reset();
                activate_view(state, View::Dashboard)
            }
            Err(err) => {
                flash_error(state, &err, "Failed to schedule post. Please try again.");
                vec![]
            }
        },
        UiEvent::PostDeleted { result } => match result {
            Ok(()) => {
                state.flash = Some(Flash::info("Post cancelled"));
                let id = state.load_seq.next_id();
                state.loads.posts.begin(id);
                vec![UiEffect::LoadPosts { id }]
            }
            Err(err) => {
                flash_error(state, &err, "Failed to cancel post. Please try again.");
                vec![]
            }
        },
        UiEvent::AccountConnected { result } => match result {
            Ok(_) => {
                state.flash = Some(Flash::info("Account connected successfully!"));
                state.accounts.form_visible = false;
                state.accounts.form.reset();
                let id = state.load_seq.next_id();
                state.loads.accounts.begin(id);
                vec![UiEffect::LoadAccounts { id }]
            }
            Err(err) => {
                flash_error(state, &err, "Failed to connect account. Please try again.");
                vec![]
            }
        },
    }
}

/// Activates a view: sets the single active view and, when logged in,
/// starts that view's data loads. Idempotent; re-activation re-fetches.
pub fn activate_view(state: &mut AppState, view: View) -> Vec<UiEffect> {
    state.view = view;
    if !state.session.is_logged_in() {
        return vec![];
    }
    match view {
        View::Dashboard => {
            let posts = state.load_seq.next_id();
            state.loads.posts.begin(posts);
            let summary = state.load_seq.next_id();
            state.loads.dashboard_summary.begin(summary);
            vec![
                UiEffect::LoadPosts { id: posts },
                UiEffect::LoadDashboardSummary { id: summary },
            ]
        }
        View::Analytics => {
            let summary = state.load_seq.next_id();
            state.loads.analytics_summary.begin(summary);
            let times = state.load_seq.next_id();
            state.loads.best_times.begin(times);
            vec![
                UiEffect::LoadAnalyticsSummary { id: summary },
                UiEffect::LoadBestTimes { id: times },
            ]
        }
        View::Accounts => {
            let id = state.load_seq.next_id();
            state.loads.accounts.begin(id);
            vec![UiEffect::LoadAccounts { id }]
        }
        View::Login | View::Register => vec![],
    }
}

fn handle_auth_result(
    state: &mut AppState,
    result: Result<postdeck_core::api::AuthPayload, postdeck_core::api::ApiError>,
    success_message: &str,
    fallback: &str,
) -> Vec<UiEffect> {
    match result {
        Ok(payload) => {
            state.session.token = Some(payload.token.clone());
            state.session.user = Some(payload.user);
            state.login.reset();
            state.register.reset();
            state.flash = Some(Flash::info(success_message));
            let mut effects = vec![UiEffect::PersistToken {
                token: payload.token,
            }];
            effects.extend(activate_view(state, View::Dashboard));
            effects
        }
        Err(err) => {
            // Remain on the current view; session untouched.
            flash_error(state, &err, fallback);
            vec![]
        }
    }
}

/// Drops the session entirely: in-memory state, stored token, view data.
fn force_logout(state: &mut AppState, flash: Option<Flash>) -> Vec<UiEffect> {
    state.session.clear();
    state.loads.clear_all();
    state.dashboard = DashboardState::default();
    state.analytics = AnalyticsState::default();
    state.accounts = AccountsState::default();
    state.flash = flash;
    state.view = View::Login;
    vec![UiEffect::ClearToken]
}

fn flash_error(state: &mut AppState, err: &postdeck_core::api::ApiError, fallback: &str) {
    state.flash = Some(Flash::error(err.user_message(fallback)));
}

fn handle_terminal_event(state: &mut AppState, event: &Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(state, *key),
        _ => vec![],
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let logged_in = state.session.is_logged_in();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return vec![UiEffect::Quit],
            KeyCode::Char('d') if logged_in => return activate_view(state, View::Dashboard),
            KeyCode::Char('a') if logged_in => return activate_view(state, View::Analytics),
            KeyCode::Char('o') if logged_in => return activate_view(state, View::Accounts),
            KeyCode::Char('l') if logged_in => return force_logout(state, None),
            KeyCode::Char('r') if !logged_in => {
                let target = if state.view == View::Register {
                    View::Login
                } else {
                    View::Register
                };
                return activate_view(state, target);
            }
            KeyCode::Char('t') if logged_in && state.view == View::Accounts => {
                if state.accounts.form_visible {
                    state.accounts.form_visible = false;
                    state.accounts.form.reset();
                } else {
                    state.accounts.form_visible = true;
                }
                return vec![];
            }
            _ => return vec![],
        }
    }

    if key.code == KeyCode::Esc {
        if state.flash.take().is_some() {
            return vec![];
        }
        match state.view {
            View::Register => return activate_view(state, View::Login),
            View::Accounts if state.accounts.form_visible => {
                state.accounts.form_visible = false;
                state.accounts.form.reset();
                return vec![];
            }
            _ => return vec![],
        }
    }

    match state.view {
        View::Login => match handle_login_key(&mut state.login, key) {
            LoginAction::Submit { username, password } => {
                vec![UiEffect::SubmitLogin { username, password }]
            }
            LoginAction::Invalid { message } => {
                state.flash = Some(Flash::error(message));
                vec![]
            }
            LoginAction::None => vec![],
        },
        View::Register => match handle_register_key(&mut state.register, key) {
            RegisterAction::Submit { draft } => vec![UiEffect::SubmitRegister { draft }],
            RegisterAction::Invalid { message } => {
                state.flash = Some(Flash::error(message));
                vec![]
            }
            RegisterAction::None => vec![],
        },
        View::Dashboard => match dashboard::handle_key(&mut state.dashboard, key) {
            DashboardAction::Schedule { draft } => vec![UiEffect::SchedulePost { draft }],
            DashboardAction::Invalid { message } => {
                state.flash = Some(Flash::error(message));
                vec![]
            }
            DashboardAction::Delete { post_id } => vec![UiEffect::DeletePost { post_id }],
            DashboardAction::None => vec![],
        },
        View::Analytics => vec![],
        View::Accounts => {
            if state.accounts.form_visible {
                match handle_form_key(&mut state.accounts, key) {
                    AccountsAction::Connect { draft } => vec![UiEffect::ConnectAccount { draft }],
                    AccountsAction::Invalid { message } => {
                        state.flash = Some(Flash::error(message));
                        vec![]
                    }
                    AccountsAction::None => vec![],
                }
            } else {
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use postdeck_core::api::{ApiError, AuthPayload, Post, User};

    use crate::features::statusline::FlashKind;

    use super::*;

    fn user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "username": "casey",
            "email": "casey@example.com",
            "subscription_plan": "basic",
            "subscription_active": true
        }))
        .unwrap()
    }

    fn auth_payload(token: &str) -> AuthPayload {
        AuthPayload {
            token: token.to_string(),
            user: user(),
        }
    }

    fn pending_post(id: i64) -> Post {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "content": format!("post {id}"),
            "platforms": ["twitter"],
            "scheduled_time": "2026-03-01T09:30:00",
            "status": "pending"
        }))
        .unwrap()
    }

    fn logged_in_state() -> AppState {
        let mut state = AppState::new(30, None);
        let effects = update(
            &mut state,
            UiEvent::LoginCompleted {
                result: Ok(auth_payload("tok-1")),
            },
        );
        assert!(!effects.is_empty());
        state
    }

    fn rejected(message: &str) -> ApiError {
        ApiError::Rejected {
            message: Some(message.to_string()),
        }
    }

    fn key_event(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn ctrl(c: char) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::CONTROL,
        )))
    }

    // ------------------------------------------------------------------
    // Startup
    // ------------------------------------------------------------------

    #[test]
    fn test_startup_without_token_stays_on_login() {
        let state = AppState::new(30, None);
        assert_eq!(state.view, View::Login);
        assert!(startup_effects(&state).is_empty());
    }

    #[test]
    fn test_startup_with_token_is_optimistic() {
        let state = AppState::new(30, Some("tok-old".to_string()));
        assert_eq!(state.view, View::Dashboard);
        assert!(!state.session.is_logged_in());
        let effects = startup_effects(&state);
        assert!(matches!(effects.as_slice(), [UiEffect::FetchProfile]));
    }

    #[test]
    fn test_profile_success_confirms_session_and_loads_dashboard() {
        let mut state = AppState::new(30, Some("tok-old".to_string()));
        let effects = update(&mut state, UiEvent::ProfileLoaded { result: Ok(user()) });
        assert!(state.session.is_logged_in());
        assert_eq!(state.view, View::Dashboard);
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::LoadPosts { .. }, UiEffect::LoadDashboardSummary { .. }]
        ));
    }

    #[test]
    fn test_profile_failure_clears_token_and_shows_login() {
        let mut state = AppState::new(30, Some("tok-stale".to_string()));
        let effects = update(
            &mut state,
            UiEvent::ProfileLoaded {
                result: Err(rejected("Invalid or expired token")),
            },
        );
        assert_eq!(state.view, View::Login);
        assert!(state.session.token.is_none());
        assert!(state.session.user.is_none());
        assert!(matches!(effects.as_slice(), [UiEffect::ClearToken]));
    }

    // ------------------------------------------------------------------
    // Login / register transitions
    // ------------------------------------------------------------------

    #[test]
    fn test_login_success_persists_token_exactly_once() {
        let mut state = AppState::new(30, None);
        let effects = update(
            &mut state,
            UiEvent::LoginCompleted {
                result: Ok(auth_payload("tok-1")),
            },
        );
        assert!(state.session.is_logged_in());
        assert_eq!(state.session.token.as_deref(), Some("tok-1"));
        assert_eq!(state.view, View::Dashboard);

        let persists = effects
            .iter()
            .filter(|e| matches!(e, UiEffect::PersistToken { .. }))
            .count();
        assert_eq!(persists, 1);
    }

    #[test]
    fn test_login_failure_leaves_session_unchanged() {
        let mut state = AppState::new(30, None);
        let effects = update(
            &mut state,
            UiEvent::LoginCompleted {
                result: Err(rejected("Invalid credentials")),
            },
        );
        assert!(effects.is_empty());
        assert_eq!(state.view, View::Login);
        assert!(state.session.token.is_none());
        // The server message surfaces verbatim.
        let flash = state.flash.as_ref().unwrap();
        assert_eq!(flash.kind, FlashKind::Error);
        assert_eq!(flash.text, "Invalid credentials");
    }

    #[test]
    fn test_login_transport_failure_uses_generic_fallback() {
        let mut state = AppState::new(30, None);
        update(
            &mut state,
            UiEvent::LoginCompleted {
                result: Err(ApiError::MissingData),
            },
        );
        assert_eq!(
            state.flash.as_ref().unwrap().text,
            "Login failed. Please try again."
        );
    }

    #[test]
    fn test_register_success_behaves_like_login() {
        let mut state = AppState::new(30, None);
        update(&mut state, ctrl('r'));
        assert_eq!(state.view, View::Register);

        let effects = update(
            &mut state,
            UiEvent::RegisterCompleted {
                result: Ok(auth_payload("tok-2")),
            },
        );
        assert_eq!(state.view, View::Dashboard);
        assert!(
            effects
                .iter()
                .any(|e| matches!(e, UiEffect::PersistToken { token } if token == "tok-2"))
        );
    }

    // ------------------------------------------------------------------
    // Logout
    // ------------------------------------------------------------------

    #[test]
    fn test_logout_clears_everything_from_any_view() {
        let mut state = logged_in_state();
        update(&mut state, ctrl('a'));
        assert_eq!(state.view, View::Analytics);

        let effects = update(&mut state, ctrl('l'));
        assert_eq!(state.view, View::Login);
        assert!(state.session.token.is_none());
        assert!(state.session.user.is_none());
        assert!(matches!(effects.as_slice(), [UiEffect::ClearToken]));
    }

    // ------------------------------------------------------------------
    // View activation
    // ------------------------------------------------------------------

    #[test]
    fn test_navigation_activates_exactly_one_view() {
        let mut state = logged_in_state();
        for (event, view) in [
            (ctrl('a'), View::Analytics),
            (ctrl('o'), View::Accounts),
            (ctrl('d'), View::Dashboard),
        ] {
            update(&mut state, event);
            assert_eq!(state.view, view);
        }
    }

    #[test]
    fn test_view_loads_match_view() {
        let mut state = logged_in_state();
        let effects = update(&mut state, ctrl('a'));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::LoadAnalyticsSummary { .. }, UiEffect::LoadBestTimes { .. }]
        ));

        let effects = update(&mut state, ctrl('o'));
        assert!(matches!(effects.as_slice(), [UiEffect::LoadAccounts { .. }]));
    }

    #[test]
    fn test_activation_is_idempotent_and_refetches() {
        let mut state = logged_in_state();
        let first = update(&mut state, ctrl('d'));
        let second = update(&mut state, ctrl('d'));
        assert_eq!(state.view, View::Dashboard);
        assert_eq!(first.len(), second.len());
        // Fresh load ids each time.
        let id_of = |effects: &[UiEffect]| match effects.first() {
            Some(UiEffect::LoadPosts { id }) => *id,
            other => panic!("expected LoadPosts, got {other:?}"),
        };
        assert_ne!(id_of(&first), id_of(&second));
    }

    #[test]
    fn test_no_loads_when_logged_out() {
        let mut state = AppState::new(30, None);
        let effects = activate_view(&mut state, View::Dashboard);
        assert!(effects.is_empty());
    }

    // ------------------------------------------------------------------
    // Stale responses
    // ------------------------------------------------------------------

    #[test]
    fn test_stale_posts_response_is_discarded() {
        let mut state = logged_in_state();
        let first = update(&mut state, ctrl('d'));
        let stale_id = match first.first() {
            Some(UiEffect::LoadPosts { id }) => *id,
            other => panic!("expected LoadPosts, got {other:?}"),
        };
        let second = update(&mut state, ctrl('d'));
        let fresh_id = match second.first() {
            Some(UiEffect::LoadPosts { id }) => *id,
            other => panic!("expected LoadPosts, got {other:?}"),
        };

        // Stale completion: dropped entirely.
        update(
            &mut state,
            UiEvent::PostsLoaded {
                id: stale_id,
                result: Ok(vec![pending_post(99)]),
            },
        );
        assert!(!state.dashboard.posts_loaded);

        // Fresh completion applies.
        update(
            &mut state,
            UiEvent::PostsLoaded {
                id: fresh_id,
                result: Ok(vec![pending_post(1), pending_post(2)]),
            },
        );
        assert!(state.dashboard.posts_loaded);
        assert_eq!(state.dashboard.pending.len(), 2);
    }

    // ------------------------------------------------------------------
    // Post scheduling
    // ------------------------------------------------------------------

    #[test]
    fn test_submit_without_platforms_sends_nothing() {
        let mut state = logged_in_state();
        for c in "hello".chars() {
            state.dashboard.form.content.insert(c);
        }
        let effects = update(&mut state, key_event(KeyCode::Enter));
        assert!(effects.is_empty());
        assert_eq!(
            state.flash.as_ref().unwrap().text,
            "Please select at least one platform"
        );
    }

    #[test]
    fn test_schedule_success_resets_form_and_reloads() {
        let mut state = logged_in_state();
        for c in "draft".chars() {
            state.dashboard.form.content.insert(c);
        }
        let effects = update(
            &mut state,
            UiEvent::PostScheduled {
                result: Ok(pending_post(5)),
            },
        );
        assert!(state.dashboard.form.content.is_empty());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::LoadPosts { .. }, UiEffect::LoadDashboardSummary { .. }]
        ));
    }

    #[test]
    fn test_schedule_failure_flashes_server_message() {
        let mut state = logged_in_state();
        update(
            &mut state,
            UiEvent::PostScheduled {
                result: Err(rejected("Subscription expired")),
            },
        );
        assert_eq!(state.flash.as_ref().unwrap().text, "Subscription expired");
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    #[test]
    fn test_account_connected_hides_form_and_reloads() {
        let mut state = logged_in_state();
        update(&mut state, ctrl('o'));
        update(&mut state, ctrl('t'));
        assert!(state.accounts.form_visible);

        let account = serde_json::from_value(serde_json::json!({
            "id": 1,
            "platform": "twitter",
            "account_name": "@casey",
            "is_active": true
        }))
        .unwrap();
        let effects = update(&mut state, UiEvent::AccountConnected { result: Ok(account) });
        assert!(!state.accounts.form_visible);
        assert!(matches!(effects.as_slice(), [UiEffect::LoadAccounts { .. }]));
    }

    // ------------------------------------------------------------------
    // Misc keys
    // ------------------------------------------------------------------

    #[test]
    fn test_esc_dismisses_flash_first() {
        let mut state = logged_in_state();
        assert!(state.flash.is_some());
        update(&mut state, key_event(KeyCode::Esc));
        assert!(state.flash.is_none());
    }

    #[test]
    fn test_ctrl_r_toggles_login_register() {
        let mut state = AppState::new(30, None);
        update(&mut state, ctrl('r'));
        assert_eq!(state.view, View::Register);
        update(&mut state, ctrl('r'));
        assert_eq!(state.view, View::Login);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut state = AppState::new(30, None);
        let effects = update(&mut state, ctrl('c'));
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }
}
