//! Dashboard key handling and post-form validation.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use postdeck_core::api::PostDraft;

use super::state::{DashboardState, PostField};

/// Input format for the scheduled-time field (local time).
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug)]
pub enum DashboardAction {
    None,
    /// Submit a validated post draft.
    Schedule { draft: PostDraft },
    /// Client-side validation failed; nothing was sent.
    Invalid { message: String },
    /// Cancel the selected upcoming post.
    Delete { post_id: i64 },
}

pub fn handle_key(state: &mut DashboardState, key: KeyEvent) -> DashboardAction {
    match key.code {
        KeyCode::Tab => state.form.focus_next(),
        KeyCode::BackTab => state.form.focus_prev(),
        KeyCode::Up => state.select_prev(),
        KeyCode::Down => state.select_next(),
        KeyCode::Delete => {
            if let Some(post) = state.selected_post() {
                return DashboardAction::Delete { post_id: post.id };
            }
        }
        KeyCode::Enter => return build_draft(state),
        KeyCode::Left if state.form.focus == PostField::Platforms => {
            state.form.platform_cursor_left();
        }
        KeyCode::Right if state.form.focus == PostField::Platforms => {
            state.form.platform_cursor_right();
        }
        KeyCode::Char(' ') if state.form.focus == PostField::Platforms => {
            state.form.toggle_platform();
        }
        KeyCode::Char(c) => {
            if let Some(field) = state.form.focused_field() {
                field.insert(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = state.form.focused_field() {
                field.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(field) = state.form.focused_field() {
                field.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(field) = state.form.focused_field() {
                field.move_right();
            }
        }
        KeyCode::Home => {
            if let Some(field) = state.form.focused_field() {
                field.move_home();
            }
        }
        KeyCode::End => {
            if let Some(field) = state.form.focused_field() {
                field.move_end();
            }
        }
        _ => {}
    }
    DashboardAction::None
}

/// Validates the form and builds the request draft.
///
/// The platform check runs first and short-circuits before any network
/// call is considered.
fn build_draft(state: &DashboardState) -> DashboardAction {
    let form = &state.form;

    let platforms = form.selected_platforms();
    if platforms.is_empty() {
        return DashboardAction::Invalid {
            message: "Please select at least one platform".to_string(),
        };
    }

    if form.content.is_empty() {
        return DashboardAction::Invalid {
            message: "Post content is required".to_string(),
        };
    }

    let Some(scheduled_time) = parse_schedule_input(form.scheduled_time.value()) else {
        return DashboardAction::Invalid {
            message: "Scheduled time must be YYYY-MM-DD HH:MM".to_string(),
        };
    };

    let media_url = match form.media_url.value().trim() {
        "" => None,
        url => Some(url.to_string()),
    };

    DashboardAction::Schedule {
        draft: PostDraft {
            content: form.content.value().to_string(),
            platforms,
            scheduled_time,
            media_url,
        },
    }
}

/// Parses the scheduled-time input (local wall clock) into UTC.
pub fn parse_schedule_input(raw: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), TIME_FORMAT).ok()?;
    let local = match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) | chrono::LocalResult::Ambiguous(dt, _) => dt,
        chrono::LocalResult::None => return None,
    };
    Some(local.with_timezone(&Utc))
}
