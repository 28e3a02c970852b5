//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only (HTTP calls, token persistence); the reducer
//! never performs I/O or spawns tasks itself.

use postdeck_core::api::{AccountDraft, PostDraft, RegisterDraft};

use crate::common::LoadId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Re-validate the stored session by fetching the profile.
    FetchProfile,
    /// Submit the login form.
    SubmitLogin { username: String, password: String },
    /// Submit the registration form.
    SubmitRegister { draft: RegisterDraft },
    /// Persist the bearer token to disk (successful login/register).
    PersistToken { token: String },
    /// Remove the persisted bearer token (logout, stale session).
    ClearToken,

    /// Load the post list for the dashboard.
    LoadPosts { id: LoadId },
    /// Load the dashboard's analytics summary.
    LoadDashboardSummary { id: LoadId },
    /// Load the analytics view's summary.
    LoadAnalyticsSummary { id: LoadId },
    /// Load best-time recommendations.
    LoadBestTimes { id: LoadId },
    /// Load the connected-accounts list.
    LoadAccounts { id: LoadId },

    /// Schedule a new post.
    SchedulePost { draft: PostDraft },
    /// Cancel a scheduled post.
    DeletePost { post_id: i64 },
    /// Connect a social account.
    ConnectAccount { draft: AccountDraft },
}
