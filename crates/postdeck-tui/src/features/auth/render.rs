//! Login and registration view rendering.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::TextField;

use super::state::{LoginField, LoginForm, RegisterField, RegisterForm};

const LABEL_WIDTH: usize = 14;

pub fn render_login(frame: &mut Frame, area: Rect, form: &LoginForm) {
    let block = Block::default().borders(Borders::ALL).title(" Sign in ");
    let inner = centered_box(area, 52, 9);
    frame.render_widget(block, inner);

    let lines = vec![
        Line::from(""),
        field_line("Username", &form.username, form.focus == LoginField::Username),
        field_line("Password", &form.password, form.focus == LoginField::Password),
        Line::from(""),
        hint_line("Enter to sign in · Tab next field · Ctrl+R register"),
    ];

    let para = Paragraph::new(lines);
    frame.render_widget(para, inset(inner));
}

pub fn render_register(frame: &mut Frame, area: Rect, form: &RegisterForm) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Create account ");
    let inner = centered_box(area, 52, 12);
    frame.render_widget(block, inner);

    let plan_focused = form.focus == RegisterField::Plan;
    let lines = vec![
        Line::from(""),
        field_line("Username", &form.username, form.focus == RegisterField::Username),
        field_line("Email", &form.email, form.focus == RegisterField::Email),
        field_line("Password", &form.password, form.focus == RegisterField::Password),
        choice_line("Plan", form.plan(), plan_focused),
        Line::from(""),
        hint_line("Enter to register · Tab next field · ←/→ change plan"),
        hint_line("Esc back to sign in"),
    ];

    let para = Paragraph::new(lines);
    frame.render_widget(para, inset(inner));
}

fn field_line(label: &str, field: &TextField, focused: bool) -> Line<'static> {
    let pointer = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let mut value = field.display();
    if focused {
        value.push('▏');
    }
    Line::from(vec![
        Span::styled(format!("{pointer}{label:<LABEL_WIDTH$}"), label_style),
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
        Span::styled(format!("{pointer}{label:<LABEL_WIDTH$}"), label_style),
        Span::styled(format!("‹ {value} ›"), Style::default().fg(Color::Yellow)),
    ])
}

fn hint_line(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))
}

/// Centers a fixed-size box inside `area`, clamped to fit.
fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn inset(area: Rect) -> Rect {
    Rect::new(
        area.x + 2,
        area.y + 1,
        area.width.saturating_sub(4),
        area.height.saturating_sub(2),
    )
}
