//! Dashboard feature slice: stats, upcoming posts, schedule form.

pub mod render;
pub mod state;
pub mod update;

pub use state::{DashboardState, PostForm, UPCOMING_LIMIT};
pub use update::{DashboardAction, handle_key};
