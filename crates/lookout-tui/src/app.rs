//! Main application state and loop for the Lookout TUI.
//!
//! The `App` struct owns the view switching, filter intents, and the draw
//! loop. All remote data lives behind the [`DataManager`]; the loop only
//! reads its latest snapshots, so a slow endpoint never blocks input.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use lookout_core::config::Config;
use lookout_core::resource::LoadStatus;

use crate::data::DataManager;
use crate::event::{AppEvent, InputHandler};
use crate::view::View;
use crate::{board_panel, feed_panel, posts_panel};

/// Result type for app operations.
pub type AppResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Event poll timeout; also bounds how quickly a background fetch shows up.
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Minimum redraw cadence so the header clock and freshly polled data appear
/// without a keypress.
const REDRAW_INTERVAL: Duration = Duration::from_secs(1);

/// Main application state.
pub struct App {
    /// Current active view
    current_view: View,
    /// Input handler for key events
    input_handler: InputHandler,
    /// Whether the app should quit
    should_quit: bool,
    /// Whether to show the help overlay
    show_help: bool,
    /// Status message shown in the footer
    status_message: Option<String>,
    /// List scroll position for the current view
    scroll_offset: usize,
    /// Polling sources and filter state
    data_manager: DataManager,
    /// Dirty flag - whether UI needs redraw
    dirty: bool,
    last_draw: Instant,
}

impl App {
    /// Create a new app instance. Polling starts in [`run`](Self::run), not
    /// here.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            current_view: View::default(),
            input_handler: InputHandler::new(),
            should_quit: false,
            show_help: false,
            status_message: None,
            scroll_offset: 0,
            data_manager: DataManager::new(config)?,
            dirty: true,
            last_draw: Instant::now(),
        })
    }

    /// Returns the current view.
    pub fn current_view(&self) -> View {
        self.current_view
    }

    /// Returns whether the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns whether the help overlay is visible.
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Switch to a specific view.
    pub fn switch_view(&mut self, view: View) {
        if self.current_view != view {
            self.current_view = view;
            self.scroll_offset = 0;
            self.status_message = Some(format!(
                "{} (press {} to return here)",
                view.title(),
                view.hotkey()
            ));
            self.mark_dirty();
        }
    }

    /// Go to the next view in the Tab cycle.
    pub fn next_view(&mut self) {
        self.switch_view(self.current_view.next());
    }

    /// Go to the previous view in the Tab cycle.
    pub fn prev_view(&mut self) {
        self.switch_view(self.current_view.prev());
    }

    /// Handle a key event.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let event = self.input_handler.handle_key(key);
        self.handle_app_event(event);
    }

    /// Handle an application event.
    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SwitchView(view) => self.switch_view(view),
            AppEvent::NextView => self.next_view(),
            AppEvent::PrevView => self.prev_view(),
            AppEvent::CycleAgentFilter => {
                let agents = self.data_manager.status_state().data.unwrap_or_default();
                self.data_manager.cycle_agent_filter(&agents);
                let selection = self.data_manager.selection();
                self.status_message = Some(match &selection.agent {
                    Some(agent) => format!("Filtering by agent: {agent}"),
                    None => "Agent filter cleared".to_string(),
                });
                self.mark_dirty();
            }
            AppEvent::CycleKindFilter => {
                self.data_manager.cycle_kind_filter();
                self.status_message = Some(format!(
                    "Type filter: {}",
                    self.data_manager.selection().kind.label()
                ));
                self.mark_dirty();
            }
            AppEvent::ClearFilters => {
                self.data_manager.clear_filters();
                self.status_message = Some("Filters cleared".to_string());
                self.mark_dirty();
            }
            AppEvent::Refresh => {
                self.data_manager.refresh_all();
                self.status_message = Some("Refreshing…".to_string());
                self.mark_dirty();
            }
            AppEvent::NavigateUp => {
                if self.scroll_offset > 0 {
                    self.scroll_offset -= 1;
                    self.mark_dirty();
                }
            }
            AppEvent::NavigateDown => {
                if self.scroll_offset < self.scroll_limit() {
                    self.scroll_offset += 1;
                    self.mark_dirty();
                }
            }
            AppEvent::ShowHelp => {
                self.show_help = true;
                self.mark_dirty();
            }
            AppEvent::Cancel => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.status_message = None;
                }
                self.mark_dirty();
            }
            AppEvent::Quit | AppEvent::ForceQuit => self.should_quit = true,
            AppEvent::None => {}
        }
    }

    /// Largest scroll offset that still shows a line in the current view.
    ///
    /// The board view does not scroll.
    fn scroll_limit(&self) -> usize {
        match self.current_view {
            View::Feed => {
                let view = self.data_manager.activity_view();
                self.data_manager
                    .visible_items(&view)
                    .len()
                    .saturating_sub(1)
            }
            View::Posts => self
                .data_manager
                .posts_state()
                .data
                .map(|posts| posts.len().saturating_sub(1))
                .unwrap_or(0),
            View::Board => 0,
        }
    }

    /// Run the main application loop.
    ///
    /// Activates polling on entry and deactivates on every exit path,
    /// including errors from the draw loop.
    pub fn run(&mut self) -> AppResult<()> {
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.data_manager.activate();
        let result = self.run_loop(&mut terminal);
        self.data_manager.deactivate();

        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            terminal.backend_mut(),
            crossterm::terminal::LeaveAlternateScreen
        )?;
        terminal.show_cursor()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> AppResult<()> {
        while !self.should_quit {
            let needs_redraw = self.dirty || self.last_draw.elapsed() >= REDRAW_INTERVAL;
            if needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.dirty = false;
                self.last_draw = Instant::now();
            }

            if event::poll(EVENT_POLL_TIMEOUT)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key_event(key);
                }
            }
        }
        Ok(())
    }

    /// Draw the UI.
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(5),    // Content
                Constraint::Length(2), // Footer
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);
        self.draw_content(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);

        if self.show_help {
            self.draw_help_overlay(frame, area);
        }
    }

    /// Header: title, clock, and a compact roster health indicator.
    fn draw_header(&mut self, frame: &mut Frame, area: Rect) {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let title = format!(" Lookout — {} ", self.current_view.title());

        let status = self.data_manager.status_state();
        let (status_text, status_color) = match (&status.data, status.status) {
            (None, LoadStatus::Error) => ("[offline]".to_string(), Color::Red),
            (None, _) => ("[connecting…]".to_string(), Color::Yellow),
            (Some(agents), _) => {
                let working = agents.iter().filter(|a| a.state.is_working()).count();
                if status.is_error() {
                    ("[stale]".to_string(), Color::Yellow)
                } else if agents.is_empty() {
                    ("[no agents]".to_string(), Color::DarkGray)
                } else {
                    (format!("[{working}/{} working]", agents.len()), Color::Green)
                }
            }
        };

        let right_len = now.len() + 2 + status_text.len();
        let spacing = area.width.saturating_sub(title.len() as u16 + right_len as u16 + 2) as usize;

        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                title,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(spacing)),
            Span::styled(now, Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(status_text, Style::default().fg(status_color)),
        ]))
        .block(Block::default().borders(Borders::ALL));

        frame.render_widget(header, area);
    }

    fn draw_content(&mut self, frame: &mut Frame, area: Rect) {
        match self.current_view {
            View::Feed => {
                let activity = self.data_manager.activity_state();
                let view = self.data_manager.activity_view();
                let visible = self.data_manager.visible_items(&view);
                let selection = self.data_manager.selection().clone();
                feed_panel::render(
                    frame,
                    area,
                    &activity,
                    &view,
                    &visible,
                    &selection,
                    self.scroll_offset,
                );
            }
            View::Board => board_panel::render(frame, area, &self.data_manager.board_state()),
            View::Posts => posts_panel::render(
                frame,
                area,
                &self.data_manager.posts_state(),
                self.scroll_offset,
            ),
        }
    }

    /// Footer: hotkey hints, with the status message taking precedence.
    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let hotkey_style = Style::default().fg(Color::Cyan);
        let line = match &self.status_message {
            Some(message) => Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(vec![
                Span::styled("[f]", hotkey_style),
                Span::raw("Feed "),
                Span::styled("[b]", hotkey_style),
                Span::raw("Board "),
                Span::styled("[p]", hotkey_style),
                Span::raw("Posts "),
                Span::styled("[a]", hotkey_style),
                Span::raw("Agent "),
                Span::styled("[t]", hotkey_style),
                Span::raw("Type "),
                Span::styled("[x]", hotkey_style),
                Span::raw("Clear "),
                Span::styled("[r]", hotkey_style),
                Span::raw("Refresh "),
                Span::styled("[?]", hotkey_style),
                Span::raw("Help "),
                Span::styled("[q]", hotkey_style),
                Span::raw("Quit"),
            ]),
        };

        let footer = Paragraph::new(line)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::TOP));

        frame.render_widget(footer, area);
    }

    fn draw_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let width = area.width.min(50);
        let height = area.height.min(16);
        let popup = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        let text = "\
 f        Activity feed
 b        Board health
 p        Posts
 Tab      Next view
 a        Cycle agent filter
 t        Cycle type filter
 x        Clear filters
 r        Refresh all sources
 j / k    Scroll
 ?        This help
 Esc      Close help
 q        Quit";

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Help ")
                    .border_style(Style::default().fg(Color::Cyan)),
            ),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app() -> App {
        App::new(&Config::default()).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_view_switching_resets_scroll() {
        let mut app = app();
        app.scroll_offset = 3;

        app.handle_key_event(key(KeyCode::Char('b')));
        assert_eq!(app.current_view(), View::Board);
        assert_eq!(app.scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_scroll_clamped_to_list_length() {
        // With nothing fetched the feed is empty, so there is nowhere to
        // scroll to; the offset must not run past the list.
        let mut app = app();
        for _ in 0..5 {
            app.handle_app_event(AppEvent::NavigateDown);
        }
        assert_eq!(app.scroll_offset, 0);

        app.handle_app_event(AppEvent::NavigateUp);
        assert_eq!(app.scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = app();
        assert!(!app.should_quit());
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_help_toggle() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('?')));
        assert!(app.show_help());
        app.handle_key_event(key(KeyCode::Esc));
        assert!(!app.show_help());
    }

    #[tokio::test]
    async fn test_esc_clears_status_message_when_no_help() {
        let mut app = app();
        app.handle_app_event(AppEvent::Refresh);
        assert!(app.status_message.is_some());
        app.handle_app_event(AppEvent::Cancel);
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_filter_events_update_selection() {
        let mut app = app();
        app.handle_app_event(AppEvent::CycleKindFilter);
        assert!(app.data_manager.selection().has_active_filters());
        app.handle_app_event(AppEvent::ClearFilters);
        assert!(!app.data_manager.selection().has_active_filters());
    }

    #[tokio::test]
    async fn test_tab_cycles_views() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.current_view(), View::Board);
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.current_view(), View::Posts);
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.current_view(), View::Feed);
    }
}
