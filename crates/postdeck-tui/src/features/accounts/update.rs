//! Accounts view key handling.

use crossterm::event::{KeyCode, KeyEvent};
use postdeck_core::api::AccountDraft;

use super::state::{AccountField, AccountsState};

#[derive(Debug)]
pub enum AccountsAction {
    None,
    /// Submit a validated connect-account draft.
    Connect { draft: AccountDraft },
    /// Client-side validation failed; nothing was sent.
    Invalid { message: &'static str },
}

/// Handles a key while the connect form is visible.
pub fn handle_form_key(state: &mut AccountsState, key: KeyEvent) -> AccountsAction {
    let form = &mut state.form;
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left if form.focus == AccountField::Platform => form.cycle_platform(false),
        KeyCode::Right if form.focus == AccountField::Platform => form.cycle_platform(true),
        KeyCode::Enter => {
            if form.account_name.is_empty() || form.credentials.is_empty() {
                return AccountsAction::Invalid {
                    message: "Account name and credentials are required",
                };
            }
            return AccountsAction::Connect {
                draft: AccountDraft {
                    platform: form.platform().to_string(),
                    account_name: form.account_name.value().to_string(),
                    // Opaque text, passed through untouched.
                    credentials: form.credentials.value().to_string(),
                },
            };
        }
        KeyCode::Char(c) => {
            if let Some(field) = form.focused_field() {
                field.insert(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = form.focused_field() {
                field.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(field) = form.focused_field() {
                field.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(field) = form.focused_field() {
                field.move_right();
            }
        }
        _ => {}
    }
    AccountsAction::None
}
