//! Effect handler implementations.
//!
//! Pure async functions: each performs one API call and wraps the result
//! in the `UiEvent` the reducer expects. The runtime owns spawning.

use std::sync::Arc;

use postdeck_core::api::{AccountDraft, ApiClient, PostDraft, RegisterDraft};

use crate::common::LoadId;
use crate::events::UiEvent;

pub async fn fetch_profile(client: Arc<ApiClient>, token: String) -> UiEvent {
    UiEvent::ProfileLoaded {
        result: client.profile(&token).await,
    }
}

pub async fn login(client: Arc<ApiClient>, username: String, password: String) -> UiEvent {
    UiEvent::LoginCompleted {
        result: client.login(&username, &password).await,
    }
}

pub async fn register(client: Arc<ApiClient>, draft: RegisterDraft) -> UiEvent {
    UiEvent::RegisterCompleted {
        result: client.register(&draft).await,
    }
}

pub async fn load_posts(client: Arc<ApiClient>, token: String, id: LoadId) -> UiEvent {
    UiEvent::PostsLoaded {
        id,
        result: client.posts(&token).await,
    }
}

pub async fn load_dashboard_summary(
    client: Arc<ApiClient>,
    token: String,
    days: u32,
    id: LoadId,
) -> UiEvent {
    UiEvent::DashboardSummaryLoaded {
        id,
        result: client.analytics_summary(&token, days).await,
    }
}

pub async fn load_analytics_summary(
    client: Arc<ApiClient>,
    token: String,
    days: u32,
    id: LoadId,
) -> UiEvent {
    UiEvent::AnalyticsSummaryLoaded {
        id,
        result: client.analytics_summary(&token, days).await,
    }
}

pub async fn load_best_times(client: Arc<ApiClient>, token: String, id: LoadId) -> UiEvent {
    UiEvent::BestTimesLoaded {
        id,
        result: client.best_times(&token).await,
    }
}

pub async fn load_accounts(client: Arc<ApiClient>, token: String, id: LoadId) -> UiEvent {
    UiEvent::AccountsLoaded {
        id,
        result: client.accounts(&token).await,
    }
}

pub async fn schedule_post(client: Arc<ApiClient>, token: String, draft: PostDraft) -> UiEvent {
    UiEvent::PostScheduled {
        result: client.schedule_post(&token, &draft).await,
    }
}

pub async fn delete_post(client: Arc<ApiClient>, token: String, post_id: i64) -> UiEvent {
    UiEvent::PostDeleted {
        result: client.delete_post(&token, post_id).await,
    }
}

pub async fn connect_account(
    client: Arc<ApiClient>,
    token: String,
    draft: AccountDraft,
) -> UiEvent {
    UiEvent::AccountConnected {
        result: client.add_account(&token, &draft).await,
    }
}
