//! Board health rendering.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use lookout_api::BoardHealth;
use lookout_core::format::compact_count;
use lookout_core::resource::AsyncState;

/// Width of the proportional status bar in characters.
const BAR_WIDTH: usize = 40;

/// Render the board view into `area`.
pub fn render(frame: &mut Frame, area: Rect, board: &AsyncState<BoardHealth>) {
    let block = Block::default().borders(Borders::ALL).title(" Board Health ");
    let text = board_text(board);
    let style = if board.is_error() && !board.has_data() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(style)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

/// Textual board summary; pure so the layout is testable.
pub fn board_text(board: &AsyncState<BoardHealth>) -> String {
    let Some(health) = &board.data else {
        return if board.is_error() {
            format!(
                "Unable to load board health: {}\n\nPress r to retry.",
                board.error.as_deref().unwrap_or("unknown error")
            )
        } else {
            "Loading board health…".to_string()
        };
    };

    let mut lines = Vec::new();
    if board.is_error() {
        lines.push(format!(
            "⚠ {} — showing last known data (r to retry)",
            board.error.as_deref().unwrap_or("refresh failed")
        ));
        lines.push(String::new());
    }

    let segments = health.segments();
    if segments.is_empty() {
        lines.push("The board is empty.".to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "Total: {}   Drafts: {}",
        compact_count(health.total_items),
        compact_count(health.draft_items)
    ));
    lines.push(String::new());
    lines.push(status_bar(health));
    lines.push(String::new());
    for segment in &segments {
        lines.push(format!(
            "{:<12} {:>5}  {:>3.0}%",
            segment.status, segment.count, segment.percent
        ));
    }
    lines.join("\n")
}

/// Proportional one-line bar, one block run per segment.
fn status_bar(health: &BoardHealth) -> String {
    let glyphs = ['█', '▓', '▒', '░'];
    let mut bar = String::new();
    for (i, segment) in health.segments().iter().enumerate() {
        let width = ((segment.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let glyph = glyphs[i % glyphs.len()];
        for _ in 0..width.max(1) {
            bar.push(glyph);
        }
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_core::resource::LoadStatus;

    fn health(json: &str) -> BoardHealth {
        serde_json::from_str(json).unwrap()
    }

    fn success_state(json: &str) -> AsyncState<BoardHealth> {
        AsyncState {
            data: Some(health(json)),
            status: LoadStatus::Success,
            error: None,
        }
    }

    #[test]
    fn test_board_text_lists_segments_in_order() {
        let state =
            success_state(r#"{"total_items":4,"by_status":{"Done":3,"Todo":1},"draft_items":1}"#);
        let text = board_text(&state);
        let done = text.find("Done").unwrap();
        let todo = text.find("Todo").unwrap();
        assert!(done < todo);
        assert!(text.contains("75%"));
        assert!(text.contains("25%"));
    }

    #[test]
    fn test_empty_board_is_not_an_error() {
        let state = success_state(r#"{"total_items":0,"by_status":{}}"#);
        assert_eq!(board_text(&state), "The board is empty.");
    }

    #[test]
    fn test_error_without_data_takes_panel() {
        let state: AsyncState<BoardHealth> = AsyncState {
            data: None,
            status: LoadStatus::Error,
            error: Some("connection refused".into()),
        };
        let text = board_text(&state);
        assert!(text.contains("connection refused"));
        assert!(text.contains("retry"));
    }

    #[test]
    fn test_error_with_stale_data_shows_banner_and_data() {
        let mut state =
            success_state(r#"{"total_items":4,"by_status":{"Done":3,"Todo":1},"draft_items":0}"#);
        state.status = LoadStatus::Error;
        state.error = Some("timeout".into());
        let text = board_text(&state);
        assert!(text.contains("timeout"));
        assert!(text.contains("last known data"));
        assert!(text.contains("Done"));
    }
}
