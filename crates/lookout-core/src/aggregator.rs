//! Merging independently-polled snapshots into one feed.
//!
//! [`aggregate`] is a pure function of the latest agent-status snapshot and
//! any number of threaded-item snapshots. It performs no I/O and holds no
//! timers; callers re-run it whenever any input snapshot changes. Output
//! ordering is deterministic: thread groups sort by their most recent
//! timestamp descending, with the thread root first and replies following in
//! their own timestamp order, so a reply never renders above its thread.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::types::{AgentStatus, ThreadedItem};

/// Derived counts over the current aggregated state.
///
/// Recomputed on every aggregation, never cached independently of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveWorkSummary {
    /// Agents currently in the Working state
    pub working_agents: usize,
    /// Items whose payload marks them unresolved
    pub open_items: usize,
}

/// The normalized view model produced by one aggregation pass.
#[derive(Debug, Clone, Default)]
pub struct ActivityView {
    /// Deduplicated agent statuses, one per key, in first-seen order
    pub agents: Vec<AgentStatus>,
    /// Merged items in display order
    pub items: Vec<ThreadedItem>,
    /// Derived counts
    pub summary: ActiveWorkSummary,
}

/// Merge the latest snapshots into one ordered view plus derived summary.
///
/// Each call treats its inputs as the authoritative full snapshot: there is
/// no incremental patching. Duplicate agent keys keep the last occurrence;
/// duplicate item ids keep the first and drop the rest.
pub fn aggregate(statuses: &[AgentStatus], item_snapshots: &[Vec<ThreadedItem>]) -> ActivityView {
    let agents = dedupe_agents(statuses);
    let items = merge_items(item_snapshots);

    let summary = ActiveWorkSummary {
        working_agents: agents.iter().filter(|a| a.state.is_working()).count(),
        open_items: items.iter().filter(|i| i.is_open()).count(),
    };

    let items = order_by_thread(items);

    ActivityView {
        agents,
        items,
        summary,
    }
}

/// Keep one status per agent key. Later entries replace earlier ones in
/// place, preserving first-seen order.
fn dedupe_agents(statuses: &[AgentStatus]) -> Vec<AgentStatus> {
    let mut by_key: HashMap<&str, usize> = HashMap::new();
    let mut agents: Vec<AgentStatus> = Vec::with_capacity(statuses.len());
    for status in statuses {
        match by_key.get(status.key.as_str()) {
            Some(&idx) => agents[idx] = status.clone(),
            None => {
                by_key.insert(status.key.as_str(), agents.len());
                agents.push(status.clone());
            }
        }
    }
    agents
}

/// Concatenate snapshots, dropping items whose id was already seen.
fn merge_items(item_snapshots: &[Vec<ThreadedItem>]) -> Vec<ThreadedItem> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut items = Vec::new();
    for snapshot in item_snapshots {
        for item in snapshot {
            if seen.insert(item.id.as_str()) {
                items.push(item.clone());
            } else {
                warn!(item_id = %item.id, "duplicate item id dropped during merge");
            }
        }
    }
    items
}

/// Sort items newest-first at the thread-root level, keeping replies adjacent
/// to their root in ascending timestamp order.
fn order_by_thread(items: Vec<ThreadedItem>) -> Vec<ThreadedItem> {
    let parent_of: HashMap<String, Option<String>> = items
        .iter()
        .map(|i| (i.id.clone(), i.parent_id.clone()))
        .collect();

    struct Group {
        root_id: String,
        latest: chrono::DateTime<chrono::Utc>,
        members: Vec<ThreadedItem>,
    }

    let mut groups: Vec<Group> = Vec::new();
    let mut group_index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let root_id = resolve_root(&item.id, &parent_of);
        let idx = *group_index.entry(root_id.clone()).or_insert_with(|| {
            groups.push(Group {
                root_id,
                latest: item.timestamp,
                members: Vec::new(),
            });
            groups.len() - 1
        });
        if item.timestamp > groups[idx].latest {
            groups[idx].latest = item.timestamp;
        }
        groups[idx].members.push(item);
    }

    // Groups newest-first; root_id breaks timestamp ties deterministically
    groups.sort_by(|a, b| {
        b.latest
            .cmp(&a.latest)
            .then_with(|| a.root_id.cmp(&b.root_id))
    });

    let mut ordered = Vec::new();
    for mut group in groups {
        // Root first, then replies in conversation order
        group.members.sort_by(|a, b| {
            let a_is_root = a.id == group.root_id;
            let b_is_root = b.id == group.root_id;
            b_is_root
                .cmp(&a_is_root)
                .then_with(|| a.timestamp.cmp(&b.timestamp))
                .then_with(|| a.id.cmp(&b.id))
        });
        ordered.append(&mut group.members);
    }
    ordered
}

/// Follow the parent chain to the thread root.
///
/// An item whose parent is missing from the snapshot counts as a root, as
/// does any item on a parent cycle (the walk stops at the first repeat).
fn resolve_root(id: &str, parent_of: &HashMap<String, Option<String>>) -> String {
    let mut current = id;
    let mut visited: HashSet<&str> = HashSet::new();
    while visited.insert(current) {
        match parent_of.get(current) {
            Some(Some(parent)) if parent_of.contains_key(parent.as_str()) => {
                current = parent;
            }
            _ => break,
        }
    }
    current.to_string()
}
