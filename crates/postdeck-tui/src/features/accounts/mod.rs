//! Accounts feature slice: connected accounts and the connect form.

pub mod render;
pub mod state;
pub mod update;

pub use state::AccountsState;
pub use update::{AccountsAction, handle_form_key};
