//! Analytics feature slice: read-only engagement views.

pub mod render;
pub mod state;

pub use state::AnalyticsState;
