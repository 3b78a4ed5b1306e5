//! View definitions for the Lookout TUI.

/// Top-level dashboard views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Aggregated, filterable activity feed
    #[default]
    Feed,
    /// Board health overview
    Board,
    /// Blog posts
    Posts,
}

impl View {
    /// All views in display order.
    pub fn all() -> [View; 3] {
        [View::Feed, View::Board, View::Posts]
    }

    /// Title shown in the header.
    pub fn title(&self) -> &'static str {
        match self {
            View::Feed => "Activity Feed",
            View::Board => "Board Health",
            View::Posts => "Posts",
        }
    }

    /// Hotkey that switches to this view.
    pub fn hotkey(&self) -> char {
        match self {
            View::Feed => 'f',
            View::Board => 'b',
            View::Posts => 'p',
        }
    }

    /// Next view in the Tab cycle.
    pub fn next(&self) -> View {
        match self {
            View::Feed => View::Board,
            View::Board => View::Posts,
            View::Posts => View::Feed,
        }
    }

    /// Previous view in the Tab cycle.
    pub fn prev(&self) -> View {
        match self {
            View::Feed => View::Posts,
            View::Board => View::Feed,
            View::Posts => View::Board,
        }
    }
}
