//! Accounts view rendering: connected accounts list and connect form.

use postdeck_core::api::Account;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::text::{capitalize, sanitize_for_display};

use super::state::{AccountField, AccountForm, AccountsState};

pub fn render(frame: &mut Frame, area: Rect, state: &AccountsState) {
    let constraints = if state.form_visible {
        [Constraint::Percentage(55), Constraint::Percentage(45)]
    } else {
        [Constraint::Percentage(100), Constraint::Percentage(0)]
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let list_block = Block::default()
        .borders(Borders::ALL)
        .title(" Connected accounts ");
    let list_inner = list_block.inner(columns[0]);
    frame.render_widget(list_block, columns[0]);
    let lines = match &state.accounts {
        Some(accounts) => account_lines(accounts),
        None => vec![Line::from(Span::styled(
            "Loading…",
            Style::default().fg(Color::DarkGray),
        ))],
    };
    frame.render_widget(Paragraph::new(lines), list_inner);

    if state.form_visible {
        let form_block = Block::default()
            .borders(Borders::ALL)
            .title(" Connect account ");
        let form_inner = form_block.inner(columns[1]);
        frame.render_widget(form_block, columns[1]);
        frame.render_widget(Paragraph::new(form_lines(&state.form)), form_inner);
    }
}

/// Builds the account list rows.
pub fn account_lines(accounts: &[Account]) -> Vec<Line<'static>> {
    if accounts.is_empty() {
        return vec![Line::from(Span::styled(
            "No accounts connected",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = Vec::new();
    for account in accounts {
        let (badge, badge_style) = if account.is_active {
            ("Active", Style::default().fg(Color::Green))
        } else {
            ("Inactive", Style::default().fg(Color::Red))
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}  ", capitalize(&sanitize_for_display(&account.platform))),
                Style::default().fg(Color::White),
            ),
            Span::styled(badge, badge_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", sanitize_for_display(&account.account_name)),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Ctrl+T connect an account",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn form_lines(form: &AccountForm) -> Vec<Line<'static>> {
    let platform_focused = form.focus == AccountField::Platform;
    vec![
        choice_line("Platform", form.platform(), platform_focused),
        field_line("Account name", &form.account_name.display(), form.focus == AccountField::Name),
        field_line(
            "Credentials",
            &form.credentials.display(),
            form.focus == AccountField::Credentials,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Enter connect · Tab next field · Esc close",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let pointer = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let mut value = value.to_string();
    if focused {
        value.push('▏');
    }
    Line::from(vec![
        Span::styled(format!("{pointer}{label:<14}"), label_style),
        Span::raw(value),
    ])
}

fn choice_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let pointer = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{pointer}{label:<14}"), label_style),
        Span::styled(format!("‹ {value} ›"), Style::default().fg(Color::Yellow)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn account(platform: &str, name: &str, active: bool) -> Account {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "platform": platform,
            "account_name": name,
            "is_active": active
        }))
        .unwrap()
    }

    #[test]
    fn test_empty_accounts_renders_placeholder() {
        let lines = account_lines(&[]);
        assert_eq!(line_text(&lines[0]), "No accounts connected");
    }

    #[test]
    fn test_account_row_shows_status_badge() {
        let lines = account_lines(&[account("twitter", "@casey", true)]);
        assert_eq!(line_text(&lines[0]), "Twitter  Active");
        assert_eq!(line_text(&lines[1]), "  @casey");
    }

    #[test]
    fn test_inactive_account_badge() {
        let lines = account_lines(&[account("facebook", "casey.page", false)]);
        assert!(line_text(&lines[0]).contains("Inactive"));
    }

    #[test]
    fn test_account_name_with_markup_is_literal() {
        let lines = account_lines(&[account("twitter", "<b>bold</b>", true)]);
        assert_eq!(line_text(&lines[1]), "  <b>bold</b>");
    }
}
