//! Data management for the Lookout TUI.
//!
//! [`DataManager`] owns one polling source per remote endpoint, the filter
//! engine, and the current filter selection. Each source has its own
//! lifecycle; there is no shared cache and no cross-source ordering. The
//! aggregated view is recomputed from the latest snapshots on demand, so the
//! UI always renders a consistent product of whatever has arrived so far.

use tracing::info;

use lookout_api::{ApiClient, BoardHealth};
use lookout_core::aggregator::{aggregate, ActivityView};
use lookout_core::config::Config;
use lookout_core::filter::{FilterEngine, FilterSelection};
use lookout_core::poller::PollingSource;
use lookout_core::resource::{AsyncResource, AsyncState};
use lookout_core::types::{AgentStatus, BlogPost, ThreadedItem};

/// Owns the polling sources and filter state behind the dashboard.
pub struct DataManager {
    status_source: PollingSource<Vec<AgentStatus>>,
    activity_source: PollingSource<Vec<ThreadedItem>>,
    board_source: PollingSource<BoardHealth>,
    posts_source: PollingSource<Vec<BlogPost>>,
    engine: FilterEngine,
    selection: FilterSelection,
}

impl DataManager {
    /// Build the sources from configuration. Nothing fetches until
    /// [`activate`](Self::activate) is called.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = ApiClient::from_config(&config.api)?;

        let status_client = client.clone();
        let status_resource = AsyncResource::new("agent-status", move || {
            let client = status_client.clone();
            async move {
                let response = client
                    .fetch_agent_status()
                    .await
                    .map_err(|e| anyhow::anyhow!(e.friendly_message()))?;
                Ok(response.agents)
            }
        });

        let activity_client = client.clone();
        let activity_resource = AsyncResource::new("activity", move || {
            let client = activity_client.clone();
            async move {
                let response = client
                    .fetch_activity()
                    .await
                    .map_err(|e| anyhow::anyhow!(e.friendly_message()))?;
                Ok(response.items)
            }
        });

        let board_client = client.clone();
        let board_resource = AsyncResource::new("board-health", move || {
            let client = board_client.clone();
            async move {
                client
                    .fetch_board_health()
                    .await
                    .map_err(|e| anyhow::anyhow!(e.friendly_message()))
            }
        });

        let posts_client = client;
        let posts_resource = AsyncResource::new("blog-posts", move || {
            let client = posts_client.clone();
            async move {
                let response = client
                    .fetch_blog_posts()
                    .await
                    .map_err(|e| anyhow::anyhow!(e.friendly_message()))?;
                Ok(response.posts)
            }
        });

        Ok(Self {
            status_source: PollingSource::new(status_resource, config.poll.status_interval()),
            activity_source: PollingSource::new(activity_resource, config.poll.activity_interval()),
            board_source: PollingSource::new(board_resource, config.poll.board_interval()),
            posts_source: PollingSource::new(posts_resource, config.poll.posts_interval()),
            engine: FilterEngine::new(config.feed.standalone_policy),
            selection: FilterSelection::default(),
        })
    }

    /// Start all polling sources.
    pub fn activate(&self) {
        info!("activating polling sources");
        self.status_source.activate();
        self.activity_source.activate();
        self.board_source.activate();
        self.posts_source.activate();
    }

    /// Stop all polling sources and detach their resources.
    ///
    /// Runs on every exit path; sources also detach themselves on Drop.
    pub fn deactivate(&self) {
        info!("deactivating polling sources");
        self.status_source.deactivate();
        self.activity_source.deactivate();
        self.board_source.deactivate();
        self.posts_source.deactivate();
    }

    /// Trigger an out-of-band refresh of every source (retry affordance).
    pub fn refresh_all(&self) {
        self.status_source.refresh_now();
        self.activity_source.refresh_now();
        self.board_source.refresh_now();
        self.posts_source.refresh_now();
    }

    /// Latest agent-status source state.
    pub fn status_state(&self) -> AsyncState<Vec<AgentStatus>> {
        self.status_source.state()
    }

    /// Latest activity source state.
    pub fn activity_state(&self) -> AsyncState<Vec<ThreadedItem>> {
        self.activity_source.state()
    }

    /// Latest board-health source state.
    pub fn board_state(&self) -> AsyncState<BoardHealth> {
        self.board_source.state()
    }

    /// Latest blog-posts source state.
    pub fn posts_state(&self) -> AsyncState<Vec<BlogPost>> {
        self.posts_source.state()
    }

    /// Aggregate the latest snapshots into one view model.
    ///
    /// Missing snapshots contribute nothing; the aggregator tolerates any
    /// interleaving of source updates.
    pub fn activity_view(&self) -> ActivityView {
        let statuses = self.status_source.state().data.unwrap_or_default();
        let items = self.activity_source.state().data.unwrap_or_default();
        aggregate(&statuses, &[items])
    }

    /// Apply the current filter selection to an aggregated view.
    pub fn visible_items(&self, view: &ActivityView) -> Vec<ThreadedItem> {
        self.engine.apply(&view.items, &self.selection)
    }

    /// Current filter selection.
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Advance the agent filter: none -> first agent -> ... -> last -> none.
    pub fn cycle_agent_filter(&mut self, agents: &[AgentStatus]) {
        self.selection.agent = next_agent(agents, self.selection.agent.as_deref());
    }

    /// Advance the type filter through its cycle.
    pub fn cycle_kind_filter(&mut self) {
        self.selection.kind = self.selection.kind.next();
    }

    /// Reset both filter axes.
    pub fn clear_filters(&mut self) {
        self.selection.clear();
    }
}

/// Next agent key in the cycle, or `None` after the last one.
///
/// A selected agent that disappeared from the roster restarts the cycle.
fn next_agent(agents: &[AgentStatus], current: Option<&str>) -> Option<String> {
    match current {
        None => agents.first().map(|a| a.key.clone()),
        Some(current) => {
            let idx = agents.iter().position(|a| a.key == current);
            match idx {
                Some(idx) => agents.get(idx + 1).map(|a| a.key.clone()),
                None => agents.first().map(|a| a.key.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookout_core::types::AgentState;

    fn agent(key: &str) -> AgentStatus {
        AgentStatus {
            key: key.into(),
            display_name: String::new(),
            last_seen_at: lookout_core::types::now(),
            state: AgentState::Idle,
        }
    }

    #[test]
    fn test_next_agent_cycles_back_to_none() {
        let agents = vec![agent("po"), agent("qa")];
        assert_eq!(next_agent(&agents, None), Some("po".into()));
        assert_eq!(next_agent(&agents, Some("po")), Some("qa".into()));
        assert_eq!(next_agent(&agents, Some("qa")), None);
    }

    #[test]
    fn test_next_agent_empty_roster() {
        assert_eq!(next_agent(&[], None), None);
        assert_eq!(next_agent(&[], Some("gone")), None);
    }

    #[test]
    fn test_next_agent_restarts_on_unknown_selection() {
        let agents = vec![agent("po")];
        assert_eq!(next_agent(&agents, Some("gone")), Some("po".into()));
    }

    #[tokio::test]
    async fn test_manager_lifecycle() {
        let manager = DataManager::new(&Config::default()).unwrap();
        // Nothing active until asked
        let view = manager.activity_view();
        assert!(view.items.is_empty());

        manager.activate();
        manager.deactivate();
        // Deactivation detaches every resource; a later refresh is a no-op
        manager.refresh_all();
        assert!(manager.status_state().data.is_none() || manager.status_state().has_data());
    }

    #[tokio::test]
    async fn test_filter_cycling() {
        let mut manager = DataManager::new(&Config::default()).unwrap();
        assert!(!manager.selection().has_active_filters());

        manager.cycle_kind_filter();
        assert!(manager.selection().has_active_filters());

        manager.cycle_agent_filter(&[agent("po")]);
        assert_eq!(manager.selection().agent.as_deref(), Some("po"));

        manager.clear_filters();
        assert!(!manager.selection().has_active_filters());
    }
}
