//! Analytics view state.

use postdeck_core::api::{AnalyticsSummary, BestTime};

/// Data shown by the analytics view; both regions load independently.
#[derive(Debug, Default)]
pub struct AnalyticsState {
    pub summary: Option<AnalyticsSummary>,
    pub best_times: Option<Vec<BestTime>>,
}
