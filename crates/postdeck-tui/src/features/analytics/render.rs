//! Analytics view rendering: engagement tiles, platform breakdown, best times.

use std::collections::BTreeMap;

use postdeck_core::api::{BestTime, PlatformStats};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::common::text::{capitalize, format_count, sanitize_for_display};

use super::state::AnalyticsState;

pub fn render(frame: &mut Frame, area: Rect, state: &AnalyticsState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_tiles(frame, rows[0], state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let breakdown_block = Block::default()
        .borders(Borders::ALL)
        .title(" Platform breakdown ");
    let breakdown_inner = breakdown_block.inner(columns[0]);
    frame.render_widget(breakdown_block, columns[0]);
    let breakdown = state
        .summary
        .as_ref()
        .map(|s| breakdown_lines(&s.platform_breakdown))
        .unwrap_or_else(loading_lines);
    frame.render_widget(Paragraph::new(breakdown), breakdown_inner);

    let times_block = Block::default()
        .borders(Borders::ALL)
        .title(" Best posting times ");
    let times_inner = times_block.inner(columns[1]);
    frame.render_widget(times_block, columns[1]);
    let times = state
        .best_times
        .as_deref()
        .map(best_time_lines)
        .unwrap_or_else(loading_lines);
    frame.render_widget(Paragraph::new(times), times_inner);
}

fn render_tiles(frame: &mut Frame, area: Rect, state: &AnalyticsState) {
    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let (likes, shares, comments, engagement) = state.summary.as_ref().map_or_else(
        || ("–".to_string(), "–".to_string(), "–".to_string(), "–".to_string()),
        |s| {
            (
                format_count(s.total_likes),
                format_count(s.total_shares),
                format_count(s.total_comments),
                format!("{:.1}%", s.avg_engagement_rate),
            )
        },
    );

    stat_tile(frame, tiles[0], "Likes", &likes);
    stat_tile(frame, tiles[1], "Shares", &shares);
    stat_tile(frame, tiles[2], "Comments", &comments);
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

fn loading_lines() -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        "Loading…",
        Style::default().fg(Color::DarkGray),
    ))]
}

/// Builds the per-platform breakdown rows.
pub fn breakdown_lines(breakdown: &BTreeMap<String, PlatformStats>) -> Vec<Line<'static>> {
    if breakdown.is_empty() {
        return vec![Line::from(Span::styled(
            "No data available",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    breakdown
        .iter()
        .map(|(platform, stats)| {
            Line::from(vec![
                Span::styled(
                    format!("{}: ", capitalize(&sanitize_for_display(platform))),
                    Style::default().fg(Color::White),
                ),
                Span::styled(
                    format!("{} posts, {} reach", stats.posts, format_count(stats.reach)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

/// Builds the best-time recommendation rows.
pub fn best_time_lines(times: &[BestTime]) -> Vec<Line<'static>> {
    if times.is_empty() {
        return vec![Line::from(Span::styled(
            "No recommendations available",
            Style::default().fg(Color::DarkGray),
        ))];
    }

    times
        .iter()
        .map(|t| {
            Line::from(vec![
                Span::styled(
                    format!("{}:00 on {}", t.hour, sanitize_for_display(&t.day)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" - {}", sanitize_for_display(&t.reason)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_breakdown_renders_placeholder() {
        let lines = breakdown_lines(&BTreeMap::new());
        assert_eq!(line_text(&lines[0]), "No data available");
    }

    #[test]
    fn test_breakdown_formats_counts_and_names() {
        let mut breakdown = BTreeMap::new();
        breakdown.insert(
            "twitter".to_string(),
            PlatformStats {
                posts: 3,
                reach: 40000,
            },
        );
        let lines = breakdown_lines(&breakdown);
        assert_eq!(line_text(&lines[0]), "Twitter: 3 posts, 40,000 reach");
    }

    #[test]
    fn test_empty_best_times_renders_placeholder() {
        let lines = best_time_lines(&[]);
        assert_eq!(line_text(&lines[0]), "No recommendations available");
    }

    #[test]
    fn test_best_time_row_format() {
        let times = vec![BestTime {
            hour: 9,
            day: "weekday".to_string(),
            reason: "Morning engagement".to_string(),
        }];
        let lines = best_time_lines(&times);
        assert_eq!(line_text(&lines[0]), "9:00 on weekday - Morning engagement");
    }
}
