//! Status line: flash messages and session info.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Info,
    Error,
}

/// A transient one-line message shown in the status bar until replaced
/// or dismissed with Esc.
#[derive(Debug)]
pub struct Flash {
    pub kind: FlashKind,
    pub text: String,
}

impl Flash {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            text: text.into(),
        }
    }
}

/// Builds the status line: flash first, session info otherwise.
pub fn status_line(state: &AppState) -> Line<'static> {
    if let Some(flash) = &state.flash {
        let style = match flash.kind {
            FlashKind::Info => Style::default().fg(Color::Green),
            FlashKind::Error => Style::default().fg(Color::Red),
        };
        let text = crate::common::text::sanitize_for_display(&flash.text).into_owned();
        return Line::from(Span::styled(format!(" {text}"), style));
    }

    let mut spans = Vec::new();
    if let Some(user) = &state.session.user {
        spans.push(Span::styled(
            format!(
                " {} ({})",
                crate::common::text::sanitize_for_display(&user.username),
                crate::common::text::sanitize_for_display(&user.subscription_plan),
            ),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::styled(
            "  ·  Ctrl+D dashboard · Ctrl+A analytics · Ctrl+O accounts · Ctrl+L logout · Ctrl+C quit",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(
            " Not signed in  ·  Ctrl+C quit",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
