//! UI event types.
//!
//! Events are the only inputs to the reducer: terminal input, the tick,
//! and completions of async API calls. View-load completions carry the
//! `LoadId` they were started with so the reducer can discard stale ones.

use postdeck_core::api::{Account, AnalyticsSummary, ApiError, AuthPayload, BestTime, Post, User};

use crate::common::LoadId;

#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick (drives rendering cadence).
    Tick,
    /// Raw terminal input.
    Terminal(crossterm::event::Event),

    /// Startup profile fetch finished (session re-validation).
    ProfileLoaded { result: Result<User, ApiError> },
    /// Login call finished.
    LoginCompleted { result: Result<AuthPayload, ApiError> },
    /// Register call finished.
    RegisterCompleted { result: Result<AuthPayload, ApiError> },

    /// GET /api/posts finished (dashboard).
    PostsLoaded {
        id: LoadId,
        result: Result<Vec<Post>, ApiError>,
    },
    /// Dashboard's 30-day summary finished.
    DashboardSummaryLoaded {
        id: LoadId,
        result: Result<AnalyticsSummary, ApiError>,
    },
    /// Analytics view's summary finished.
    AnalyticsSummaryLoaded {
        id: LoadId,
        result: Result<AnalyticsSummary, ApiError>,
    },
    /// GET /api/analytics/best-times finished.
    BestTimesLoaded {
        id: LoadId,
        result: Result<Vec<BestTime>, ApiError>,
    },
    /// GET /api/accounts finished.
    AccountsLoaded {
        id: LoadId,
        result: Result<Vec<Account>, ApiError>,
    },

    /// POST /api/posts finished.
    PostScheduled { result: Result<Post, ApiError> },
    /// DELETE /api/posts/{id} finished.
    PostDeleted { result: Result<(), ApiError> },
    /// POST /api/accounts finished.
    AccountConnected { result: Result<Account, ApiError> },
}
