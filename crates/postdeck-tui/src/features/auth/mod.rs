//! Auth feature slice: login and registration forms.

pub mod render;
pub mod state;
pub mod update;

pub use state::{LoginForm, RegisterForm};
pub use update::{LoginAction, RegisterAction, handle_login_key, handle_register_key};
