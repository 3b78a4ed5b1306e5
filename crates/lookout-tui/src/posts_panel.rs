//! Blog posts rendering. No aggregation or filtering; a plain list.

use chrono::Utc;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use lookout_core::format::{relative_time, truncate};
use lookout_core::resource::AsyncState;
use lookout_core::types::BlogPost;

/// Render the posts view into `area`.
pub fn render(frame: &mut Frame, area: Rect, posts: &AsyncState<Vec<BlogPost>>, scroll_offset: usize) {
    let block = Block::default().borders(Borders::ALL).title(" Posts ");
    let style = if posts.is_error() && !posts.has_data() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(posts_text(posts, scroll_offset))
            .style(style)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Textual post list; pure so the layout is testable.
pub fn posts_text(posts: &AsyncState<Vec<BlogPost>>, scroll_offset: usize) -> String {
    let Some(list) = &posts.data else {
        return if posts.is_error() {
            format!(
                "Unable to load posts: {}\n\nPress r to retry.",
                posts.error.as_deref().unwrap_or("unknown error")
            )
        } else {
            "Loading posts…".to_string()
        };
    };

    let mut lines = Vec::new();
    if posts.is_error() {
        lines.push(format!(
            "⚠ {} — showing last known data (r to retry)",
            posts.error.as_deref().unwrap_or("refresh failed")
        ));
        lines.push(String::new());
    }

    if list.is_empty() {
        lines.push("No posts yet.".to_string());
        return lines.join("\n");
    }

    let now = Utc::now();
    for post in list.iter().skip(scroll_offset) {
        lines.push(format!(
            "{}  ({})",
            truncate(&post.title, 60),
            relative_time(post.published_at, now)
        ));
        if !post.summary.is_empty() {
            lines.push(format!("    {}", truncate(&post.summary, 76)));
        }
    }
    lines.join("\n")
}
