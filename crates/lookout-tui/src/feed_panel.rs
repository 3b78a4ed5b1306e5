//! Activity feed rendering.
//!
//! Renders the filtered, aggregated feed. Error presentation follows the
//! stale-data rule: with prior data on hand a failed poll shows a one-line
//! banner above the stale list; with nothing to fall back on it takes the
//! whole panel.

use chrono::{DateTime, Utc};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use lookout_core::aggregator::{ActiveWorkSummary, ActivityView};
use lookout_core::filter::FilterSelection;
use lookout_core::format::{compact_count, relative_time, truncate};
use lookout_core::resource::AsyncState;
use lookout_core::types::{ItemKind, ThreadedItem};

/// Render the feed view into `area`.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    activity: &AsyncState<Vec<ThreadedItem>>,
    view: &ActivityView,
    visible: &[ThreadedItem],
    selection: &FilterSelection,
    scroll_offset: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Activity Feed — {} ", filter_bar(selection, &view.summary)));

    // No fallback data at all: the error or loading state owns the panel
    if !activity.has_data() {
        let text = if activity.is_error() {
            format!(
                "Unable to load activity: {}\n\nPress r to retry.",
                activity.error.as_deref().unwrap_or("unknown error")
            )
        } else {
            "Loading activity…".to_string()
        };
        let style = if activity.is_error() {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        frame.render_widget(
            Paragraph::new(text)
                .style(style)
                .block(block)
                .wrap(Wrap { trim: true }),
            area,
        );
        return;
    }

    let now = Utc::now();
    let mut lines: Vec<Line> = Vec::new();

    if activity.is_error() {
        lines.push(Line::from(Span::styled(
            format!(
                "⚠ {} — showing last known data (r to retry)",
                activity.error.as_deref().unwrap_or("refresh failed")
            ),
            Style::default().fg(Color::Yellow),
        )));
    }

    if visible.is_empty() {
        let text = if selection.has_active_filters() {
            "No activity matches the current filters. Press x to clear."
        } else {
            "No activity yet."
        };
        lines.push(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for item in visible.iter().skip(scroll_offset) {
            lines.push(item_line(item, now));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One feed row. Replies indent under their thread root.
fn item_line(item: &ThreadedItem, now: DateTime<Utc>) -> Line<'static> {
    let indent = if item.parent_id.is_some() { "   ↳ " } else { "" };
    let agent = item.agent_key.as_deref().unwrap_or("—");

    Line::from(vec![
        Span::styled(
            format!("{indent}{} ", kind_tag(item.kind)),
            Style::default().fg(kind_color(item.kind)),
        ),
        Span::styled(
            truncate(&item.title(), 48),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {agent}  {}", relative_time(item.timestamp, now)),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Header fragment describing filters and the active-work summary.
///
/// Kept pure for testing; the summary counts come straight from the
/// aggregator, never recomputed here.
pub fn filter_bar(selection: &FilterSelection, summary: &ActiveWorkSummary) -> String {
    let agent = selection.agent.as_deref().unwrap_or("all agents");
    let mut bar = format!(
        "{} working · {} open · {agent} · {}",
        compact_count(summary.working_agents as u64),
        compact_count(summary.open_items as u64),
        selection.kind.label(),
    );
    if selection.has_active_filters() {
        bar.push_str(" [x clears]");
    }
    bar
}

fn kind_tag(kind: ItemKind) -> &'static str {
    match kind {
        ItemKind::Issue => "[issue]",
        ItemKind::PullRequest => "[pr]",
        ItemKind::Deploy => "[deploy]",
        ItemKind::Standalone => "[note]",
    }
}

fn kind_color(kind: ItemKind) -> Color {
    match kind {
        ItemKind::Issue => Color::Green,
        ItemKind::PullRequest => Color::Magenta,
        ItemKind::Deploy => Color::Cyan,
        ItemKind::Standalone => Color::Blue,
    }
}
