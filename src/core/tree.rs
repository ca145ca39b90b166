// SeqSleuth - core/tree.rs
//
// Successor tree extraction.
//
// Each node keeps at most `branching` qualifying successors and the tree
// stops at `depth` levels below the root. Qualification applies an absolute
// count threshold and a relative share of the node's own outgoing total.
// Inverted mode negates both tests (strictly) to surface rare transitions;
// the boundary values therefore qualify in normal mode only.

use crate::core::graph::TransitionGraph;
use crate::core::model::SuccessorTree;
use crate::util::constants;
use std::collections::HashSet;

/// Limits and qualification rules for tree extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    /// Maximum children per node.
    pub branching: usize,
    /// Maximum depth below the root.
    pub depth: usize,
    /// Absolute edge count bound.
    pub threshold: u64,
    /// Share of the parent's outgoing total, in `[0, 1]`.
    pub relative_threshold: f64,
    /// Surface weak transitions instead of strong ones.
    pub inverted: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            branching: constants::DEFAULT_BRANCHING,
            depth: constants::DEFAULT_DEPTH,
            threshold: constants::DEFAULT_THRESHOLD,
            relative_threshold: constants::DEFAULT_RELATIVE_THRESHOLD,
            inverted: false,
        }
    }
}

impl TreeConfig {
    /// Whether an edge of weight `count` out of a node with outgoing total
    /// `total` qualifies. `total` must be non-zero.
    pub fn qualifies(&self, count: u64, total: u64) -> bool {
        let ratio = count as f64 / total as f64;
        if self.inverted {
            count < self.threshold && ratio < self.relative_threshold
        } else {
            count >= self.threshold && ratio >= self.relative_threshold
        }
    }
}

/// All qualifying successors of `node`, highest count first (ties by name).
///
/// Path exclusion is not applied here; this is the raw qualified set of a
/// single node.
pub fn qualified_successors<'g>(
    graph: &'g TransitionGraph,
    node: &str,
    config: &TreeConfig,
) -> Vec<(&'g str, u64)> {
    let total = graph.total_out(node);
    if total == 0 {
        return Vec::new();
    }
    graph
        .successors_of(node)
        .into_iter()
        .filter(|&(_, count)| config.qualifies(count, total))
        .collect()
}

/// Build the successor tree rooted at `root`.
///
/// An event name never repeats along a single root-to-leaf path, but sibling
/// branches may converge on the same name.
pub fn build_tree(graph: &TransitionGraph, root: &str, config: &TreeConfig) -> SuccessorTree {
    let mut tree = SuccessorTree::root(root);
    if config.depth == 0 {
        return tree;
    }
    let mut path: HashSet<&str> = HashSet::from([root]);
    tree.children = expand(graph, root, config.depth, &mut path, config);
    tree
}

fn expand<'g>(
    graph: &'g TransitionGraph,
    node: &str,
    remaining_depth: usize,
    path: &mut HashSet<&'g str>,
    config: &TreeConfig,
) -> Vec<SuccessorTree> {
    let mut children = Vec::new();

    let candidates = qualified_successors(graph, node, config)
        .into_iter()
        .filter(|(name, _)| !path.contains(name))
        .take(config.branching)
        .collect::<Vec<_>>();

    for (name, count) in candidates {
        let mut child = SuccessorTree::child(name, count);
        if remaining_depth > 1 {
            path.insert(name);
            child.children = expand(graph, name, remaining_depth - 1, path, config);
            path.remove(name);
        }
        children.push(child);
    }

    children
}
