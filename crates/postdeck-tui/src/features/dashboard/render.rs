//! Dashboard view rendering: stat tiles, upcoming posts, schedule form.

use chrono::Local;
use postdeck_core::api::Post;
use postdeck_core::api::types::PLATFORMS;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::text::{format_count, sanitize_for_display, truncate_with_ellipsis};

use super::state::{DashboardState, PostField, PostForm};
use super::update::TIME_FORMAT;

/// Content preview length in the upcoming list.
const PREVIEW_WIDTH: usize = 50;

pub fn render(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_stats(frame, rows[0], state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let upcoming_block = Block::default()
        .borders(Borders::ALL)
        .title(" Upcoming posts ");
    let upcoming_inner = upcoming_block.inner(columns[0]);
    frame.render_widget(upcoming_block, columns[0]);
    let lines = upcoming_lines(state, upcoming_inner.width as usize);
    frame.render_widget(Paragraph::new(lines), upcoming_inner);

    let form_block = Block::default()
        .borders(Borders::ALL)
        .title(" Schedule a post ");
    let form_inner = form_block.inner(columns[1]);
    frame.render_widget(form_block, columns[1]);
    frame.render_widget(Paragraph::new(form_lines(&state.form)), form_inner);
}

fn render_stats(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let (reach, engagement) = state.summary.as_ref().map_or_else(
        || ("–".to_string(), "–".to_string()),
        |s| {
            (
                format_count(s.total_reach),
                format!("{:.1}%", s.avg_engagement_rate),
            )
        },
    );

    stat_tile(frame, tiles[0], "Total posts", &state.total_posts.to_string());
    stat_tile(frame, tiles[1], "Pending", &state.pending.len().to_string());
    stat_tile(frame, tiles[2], "30d reach", &reach);
    stat_tile(frame, tiles[3], "Engagement", &engagement);
}

fn stat_tile(frame: &mut Frame, area: Rect, label: &str, value: &str) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    let line = Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(
            value.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}

/// Builds the upcoming-posts list: first 5 pending posts, server order.
pub fn upcoming_lines(state: &DashboardState, width: usize) -> Vec<Line<'static>> {
    if !state.posts_loaded {
        return vec![Line::from(Span::styled(
            "Loading…",
            Style::default().fg(Color::DarkGray),
        ))];
    }
    if state.pending.is_empty() {
        return vec![Line::from(Span::styled(
            "No upcoming posts scheduled",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut lines = Vec::new();
    for (idx, post) in state.upcoming().iter().enumerate() {
        let selected = idx == state.selected;
        lines.extend(post_entry(post, selected, width));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "↑/↓ select · Del cancel post",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn post_entry(post: &Post, selected: bool, width: usize) -> Vec<Line<'static>> {
    let pointer = if selected { "> " } else { "  " };
    let title_style = if selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let preview_width = PREVIEW_WIDTH.min(width.saturating_sub(2).max(4));
    let preview = truncate_with_ellipsis(&sanitize_for_display(&post.content), preview_width);
    let when = post
        .scheduled_time
        .with_timezone(&Local)
        .format(TIME_FORMAT)
        .to_string();

    let mut badges: Vec<Span<'static>> = vec![Span::raw("  ")];
    for platform in &post.platforms {
        badges.push(Span::styled(
            format!("[{}] ", sanitize_for_display(platform)),
            Style::default().fg(Color::Magenta),
        ));
    }

    vec![
        Line::from(Span::styled(format!("{pointer}{preview}"), title_style)),
        Line::from(Span::styled(
            format!("  Scheduled: {when}"),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(badges),
    ]
}

fn form_lines(form: &PostForm) -> Vec<Line<'static>> {
    let mut lines = vec![
        text_field_line("Content", &form.content.display(), form.focus == PostField::Content),
        text_field_line(
            "When (local)",
            &form.scheduled_time.display(),
            form.focus == PostField::Time,
        ),
        text_field_line("Media URL", &form.media_url.display(), form.focus == PostField::MediaUrl),
        platforms_line(form),
        Line::from(""),
        Line::from(Span::styled(
            "Enter schedule · Tab next field · Space toggle platform",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    if form.focus == PostField::Time {
        lines.push(Line::from(Span::styled(
            "Format: 2026-03-14 18:30",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn text_field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
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
        Span::styled(format!("{pointer}{label:<13}"), label_style),
        Span::raw(value),
    ])
}

fn platforms_line(form: &PostForm) -> Line<'static> {
    let focused = form.focus == PostField::Platforms;
    let pointer = if focused { "> " } else { "  " };
    let label_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![Span::styled(
        format!("{pointer}{:<13}", "Platforms"),
        label_style,
    )];
    for (idx, name) in PLATFORMS.iter().enumerate() {
        let on = form.platforms.get(idx).copied().unwrap_or(false);
        let mark = if on { "x" } else { " " };
        let style = if focused && idx == form.platform_cursor {
            Style::default().fg(Color::Cyan)
        } else if on {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{mark}] {name}  "), style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use postdeck_core::api::Post;

    use super::*;

    fn pending_post(id: i64, content: &str) -> Post {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "content": content,
            "platforms": ["twitter"],
            "scheduled_time": "2026-03-01T09:30:00",
            "status": "pending"
        }))
        .unwrap()
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_pending_renders_placeholder() {
        let mut state = DashboardState::default();
        state.apply_posts(Vec::new());
        let lines = upcoming_lines(&state, 80);
        assert_eq!(line_text(&lines[0]), "No upcoming posts scheduled");
    }

    #[test]
    fn test_not_yet_loaded_shows_loading() {
        let state = DashboardState::default();
        let lines = upcoming_lines(&state, 80);
        assert_eq!(line_text(&lines[0]), "Loading…");
    }

    #[test]
    fn test_renders_at_most_five_posts() {
        let mut state = DashboardState::default();
        state.apply_posts((1..=12).map(|i| pending_post(i, &format!("post {i}"))).collect());
        let lines = upcoming_lines(&state, 80);
        let entries = lines
            .iter()
            .filter(|l| line_text(l).contains("Scheduled:"))
            .count();
        assert_eq!(entries, 5);
    }

    #[test]
    fn test_markup_in_content_renders_literally() {
        let mut state = DashboardState::default();
        state.apply_posts(vec![pending_post(1, "<script>alert('x')</script>")]);
        let lines = upcoming_lines(&state, 80);
        assert!(line_text(&lines[0]).contains("<script>alert('x')</script>"));
    }

    #[test]
    fn test_escape_bytes_are_stripped_from_content() {
        let mut state = DashboardState::default();
        state.apply_posts(vec![pending_post(1, "evil\x1b[2Jpost")]);
        let lines = upcoming_lines(&state, 80);
        assert!(line_text(&lines[0]).contains("evil[2Jpost"));
        assert!(!line_text(&lines[0]).contains('\x1b'));
    }

    #[test]
    fn test_long_content_is_previewed() {
        let long = "x".repeat(120);
        let mut state = DashboardState::default();
        state.apply_posts(vec![pending_post(1, &long)]);
        let lines = upcoming_lines(&state, 200);
        let title = line_text(&lines[0]);
        assert!(title.ends_with('…'));
        assert!(title.len() < 60);
    }
}
