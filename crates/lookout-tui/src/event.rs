//! Event handling for the Lookout TUI.
//!
//! Converts keyboard input into application events. Filter intents flow
//! upward through these events; the app applies them to its selection state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::view::View;

/// Application-level events that can trigger state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Switch to a specific view
    SwitchView(View),
    /// Cycle to the next view
    NextView,
    /// Cycle to the previous view
    PrevView,
    /// Cycle the agent filter through known agents
    CycleAgentFilter,
    /// Cycle the type filter
    CycleKindFilter,
    /// Reset both filter axes
    ClearFilters,
    /// Refresh all polling sources now
    Refresh,
    /// Navigate up in a list
    NavigateUp,
    /// Navigate down in a list
    NavigateDown,
    /// Show help overlay
    ShowHelp,
    /// Close help overlay / cancel
    Cancel,
    /// Request application quit
    Quit,
    /// Force quit (Ctrl+C)
    ForceQuit,
    /// No action needed
    None,
}

/// Input handler for converting key events to app events.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Create a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Handle a key event and return the corresponding app event.
    pub fn handle_key(&self, key: KeyEvent) -> AppEvent {
        // Ctrl+C always force quits
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppEvent::ForceQuit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => AppEvent::Quit,
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') => AppEvent::ShowHelp,
            KeyCode::Esc => AppEvent::Cancel,

            // View hotkeys
            KeyCode::Char('f') | KeyCode::Char('F') => AppEvent::SwitchView(View::Feed),
            KeyCode::Char('b') | KeyCode::Char('B') => AppEvent::SwitchView(View::Board),
            KeyCode::Char('p') | KeyCode::Char('P') => AppEvent::SwitchView(View::Posts),

            // Filters
            KeyCode::Char('a') | KeyCode::Char('A') => AppEvent::CycleAgentFilter,
            KeyCode::Char('t') | KeyCode::Char('T') => AppEvent::CycleKindFilter,
            KeyCode::Char('x') | KeyCode::Char('X') => AppEvent::ClearFilters,

            // Refresh
            KeyCode::Char('r') | KeyCode::Char('R') => AppEvent::Refresh,

            // Tab cycling
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    AppEvent::PrevView
                } else {
                    AppEvent::NextView
                }
            }
            KeyCode::BackTab => AppEvent::PrevView,

            // List navigation
            KeyCode::Up | KeyCode::Char('k') => AppEvent::NavigateUp,
            KeyCode::Down | KeyCode::Char('j') => AppEvent::NavigateDown,

            _ => AppEvent::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_with(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn test_view_hotkeys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('f'))),
            AppEvent::SwitchView(View::Feed)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('b'))),
            AppEvent::SwitchView(View::Board)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('p'))),
            AppEvent::SwitchView(View::Posts)
        );
    }

    #[test]
    fn test_filter_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('a'))),
            AppEvent::CycleAgentFilter
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('t'))),
            AppEvent::CycleKindFilter
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('x'))),
            AppEvent::ClearFilters
        );
    }

    #[test]
    fn test_ctrl_c_force_quit() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_with(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            AppEvent::ForceQuit
        );
    }

    #[test]
    fn test_tab_cycling() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Tab)), AppEvent::NextView);
        assert_eq!(
            handler.handle_key(key_with(KeyCode::Tab, KeyModifiers::SHIFT)),
            AppEvent::PrevView
        );
        assert_eq!(handler.handle_key(key(KeyCode::BackTab)), AppEvent::PrevView);
    }

    #[test]
    fn test_case_insensitive_hotkeys() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char('R'))), AppEvent::Refresh);
        assert_eq!(handler.handle_key(key(KeyCode::Char('Q'))), AppEvent::Quit);
    }

    #[test]
    fn test_navigation_keys() {
        let handler = InputHandler::new();
        assert_eq!(handler.handle_key(key(KeyCode::Char('j'))), AppEvent::NavigateDown);
        assert_eq!(handler.handle_key(key(KeyCode::Char('k'))), AppEvent::NavigateUp);
    }
}
