// SeqSleuth - core/graph.rs
//
// Session partitioning and the event transition graph.
//
// A session is the time-ordered run of records sharing one
// (component, pid) key. Adjacency is only ever counted inside a session:
// interleaved lines from different processes are independent control
// flows.

use crate::core::model::LogRecord;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// TransitionGraph
// =============================================================================

/// Weighted directed graph over event names.
///
/// `count(a, b)` is the number of times `b` followed `a` at the configured
/// look-ahead window within one session. Every stored count is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransitionGraph {
    edges: BTreeMap<String, BTreeMap<String, u64>>,
}

impl TransitionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more `src -> dst` transition.
    pub fn increment(&mut self, src: &str, dst: &str) {
        *self
            .edges
            .entry(src.to_string())
            .or_default()
            .entry(dst.to_string())
            .or_insert(0) += 1;
    }

    /// Successors of `src`, highest count first, ties by name ascending.
    pub fn successors_of(&self, src: &str) -> Vec<(&str, u64)> {
        let mut successors: Vec<(&str, u64)> = self
            .edges
            .get(src)
            .map(|dsts| dsts.iter().map(|(d, c)| (d.as_str(), *c)).collect())
            .unwrap_or_default();
        // Map iteration is already name-ascending; a stable sort keeps that
        // order among equal counts.
        successors.sort_by(|a, b| b.1.cmp(&a.1));
        successors
    }

    /// Weight of a single edge (0 when absent).
    pub fn count(&self, src: &str, dst: &str) -> u64 {
        self.edges
            .get(src)
            .and_then(|dsts| dsts.get(dst))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all outgoing edge weights of `src`.
    pub fn total_out(&self, src: &str) -> u64 {
        self.edges
            .get(src)
            .map(|dsts| dsts.values().sum())
            .unwrap_or(0)
    }

    /// Event names with at least one outgoing edge, sorted.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    /// Number of distinct `src -> dst` pairs.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeMap::len).sum()
    }

    /// Sum of all edge weights.
    pub fn total_transitions(&self) -> u64 {
        self.edges.values().flat_map(|dsts| dsts.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

// =============================================================================
// Sessions
// =============================================================================

/// Partition records into sessions keyed by `(component, pid)`.
///
/// Each session is sorted by timestamp. The sort is stable, so records with
/// identical timestamps keep their file order.
pub fn sessions(records: &[LogRecord]) -> BTreeMap<(&str, u64), Vec<&LogRecord>> {
    let mut sessions: BTreeMap<(&str, u64), Vec<&LogRecord>> = BTreeMap::new();
    for record in records {
        sessions.entry(record.session_key()).or_default().push(record);
    }
    for session in sessions.values_mut() {
        session.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    }
    sessions
}

/// Build the transition graph at look-ahead distance `window`.
///
/// A window of 0 would pair every event with itself; it is treated as 1.
pub fn build_graph(records: &[LogRecord], window: usize) -> TransitionGraph {
    let window = if window == 0 {
        tracing::warn!("Transition window of 0 is not meaningful; using 1");
        1
    } else {
        window
    };

    let sessions = sessions(records);
    let mut graph = TransitionGraph::new();

    for session in sessions.values() {
        for (src, dst) in session.iter().zip(session.iter().skip(window)) {
            graph.increment(&src.event.name, &dst.event.name);
        }
    }

    tracing::debug!(
        sessions = sessions.len(),
        window,
        sources = graph.edges.len(),
        edges = graph.edge_count(),
        "Transition graph built"
    );

    graph
}

// =============================================================================
// Most-common chain
// =============================================================================

/// Follow the single most common successor from `start` for up to `depth`
/// steps.
///
/// Only edges with `count >= threshold` are considered. Unvisited successors
/// are preferred; when every qualifying successor is already on the path
/// the top one is taken anyway. The chain stops early once no successor
/// qualifies. The first element is the start event with no count.
pub fn most_common_sequence(
    graph: &TransitionGraph,
    start: &str,
    depth: usize,
    threshold: u64,
) -> Vec<(String, Option<u64>)> {
    let mut path = vec![(start.to_string(), None)];
    let mut visited: BTreeSet<String> = BTreeSet::from([start.to_string()]);
    let mut current = start.to_string();

    for _ in 0..depth {
        let ranked: Vec<(&str, u64)> = graph
            .successors_of(&current)
            .into_iter()
            .filter(|(_, count)| *count >= threshold)
            .collect();

        let Some(&first) = ranked.first() else {
            break;
        };
        let (next, count) = ranked
            .iter()
            .find(|(name, _)| !visited.contains(*name))
            .copied()
            .unwrap_or(first);

        path.push((next.to_string(), Some(count)));
        visited.insert(next.to_string());
        current = next.to_string();
    }

    path
}
