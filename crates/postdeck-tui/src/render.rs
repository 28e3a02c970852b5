//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a
//! ratatui frame, and never mutate state or return effects. The whole
//! frame is rebuilt from state on every draw — exactly one view is
//! rendered, so view exclusivity is structural.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::statusline::status_line;
use crate::features::{accounts, analytics, auth, dashboard};
use crate::state::{AppState, View};

/// Height of the header (tab) row.
const HEADER_HEIGHT: u16 = 1;

/// Height of the status line below the body.
const STATUS_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);

    frame.render_widget(Paragraph::new(header_line(state)), rows[0]);
    render_body(state, frame, rows[1]);
    frame.render_widget(Paragraph::new(status_line(state)), rows[2]);
}

fn render_body(state: &AppState, frame: &mut Frame, area: Rect) {
    match state.view {
        View::Login => auth::render::render_login(frame, area, &state.login),
        View::Register => auth::render::render_register(frame, area, &state.register),
        View::Dashboard => dashboard::render::render(frame, area, &state.dashboard),
        View::Analytics => analytics::render::render(frame, area, &state.analytics),
        View::Accounts => accounts::render::render(frame, area, &state.accounts),
    }
}

/// Builds the header: app name plus the tabs reachable from the current
/// session state.
fn header_line(state: &AppState) -> Line<'static> {
    let tabs: &[View] = if state.session.is_logged_in() {
        &[View::Dashboard, View::Analytics, View::Accounts]
    } else {
        &[View::Login, View::Register]
    };

    let mut spans = vec![Span::styled(
        " Postdeck ",
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
    )];
    for view in tabs {
        let style = if *view == state.view {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("  {}  ", view.title()), style));
    }
    Line::from(spans)
}
