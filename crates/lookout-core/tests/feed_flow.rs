//! End-to-end flow over the sync layer: poll snapshots in, aggregate, filter.

use std::time::Duration;

use chrono::{TimeZone, Utc};
use lookout_core::aggregator::aggregate;
use lookout_core::filter::{FilterEngine, FilterSelection, KindFilter};
use lookout_core::poller::PollingSource;
use lookout_core::resource::AsyncResource;
use lookout_core::types::{AgentState, AgentStatus, ItemKind, ThreadedItem};

fn agent_working(key: &str) -> AgentStatus {
    AgentStatus {
        key: key.into(),
        display_name: String::new(),
        last_seen_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 0, 0).unwrap(),
        state: AgentState::Working,
    }
}

fn item(id: &str, kind: ItemKind, agent: Option<&str>, minute: u32) -> ThreadedItem {
    ThreadedItem {
        id: id.into(),
        kind,
        agent_key: agent.map(Into::into),
        timestamp: Utc.with_ymd_and_hms(2026, 8, 1, 12, minute, 0).unwrap(),
        parent_id: None,
        payload: serde_json::json!({}),
    }
}

#[test]
fn agent_filter_over_aggregated_feed() {
    // Status: po working. Items: an issue by po at T1 and an agent-less
    // deploy at T2 > T1. Filtering to po yields the issue only.
    let statuses = vec![agent_working("po")];
    let snapshots = vec![vec![
        item("1", ItemKind::Issue, Some("po"), 1),
        item("2", ItemKind::Deploy, None, 2),
    ]];

    let view = aggregate(&statuses, &snapshots);
    assert_eq!(view.summary.working_agents, 1);
    assert_eq!(
        view.items.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
        vec!["2", "1"],
        "feed orders newest-first before filtering"
    );

    let selection = FilterSelection {
        agent: Some("po".into()),
        kind: KindFilter::All,
    };
    let visible = FilterEngine::default().apply(&view.items, &selection);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "1");
}

#[tokio::test]
async fn polled_snapshots_feed_the_aggregator() {
    // Two independent sources with no ordering guarantee between them; the
    // aggregator is recomputed from whatever the latest snapshots are.
    let status_resource = AsyncResource::new("agent-status", || async {
        Ok(vec![agent_working("po"), agent_working("qa")])
    });
    let items_resource = AsyncResource::new("activity", || async {
        Ok(vec![
            item("a", ItemKind::PullRequest, Some("po"), 1),
            item("b", ItemKind::Issue, Some("qa"), 2),
        ])
    });

    let status_source = PollingSource::new(status_resource, Duration::from_secs(30));
    let items_source = PollingSource::new(items_resource, Duration::from_secs(15));
    status_source.activate();
    items_source.activate();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let statuses = status_source.state().data.expect("status snapshot");
    let items = items_source.state().data.expect("items snapshot");
    let view = aggregate(&statuses, &[items]);

    assert_eq!(view.summary.working_agents, 2);
    assert_eq!(view.items.len(), 2);
    assert_eq!(view.items[0].id, "b");

    // Teardown cancels both sources unconditionally.
    status_source.deactivate();
    items_source.deactivate();
    assert!(!status_source.resource().is_live());
    assert!(!items_source.resource().is_live());
}
