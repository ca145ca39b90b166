// SeqSleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;

// =============================================================================
// Log Record (normalised output of parsing)
// =============================================================================

/// A single parsed log line.
///
/// Created once per valid input line and never mutated afterwards. Session
/// grouping and graph building borrow records rather than copying them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    /// Raw timestamp text in `YYYYMMDD-HH:MM:SS:mmm` form. The format is
    /// fixed-width and zero-padded, so lexicographic order is time order.
    pub timestamp: String,

    /// Originating component (non-empty).
    pub component: String,

    /// Process ID that emitted the line.
    pub pid: u64,

    /// Event extracted from the content field.
    pub event: Event,

    /// 1-based line number in the source file.
    pub line_number: u64,
}

impl LogRecord {
    /// Session key: events only chain together within one component/process.
    pub fn session_key(&self) -> (&str, u64) {
        (self.component.as_str(), self.pid)
    }
}

// =============================================================================
// Event
// =============================================================================

/// The named occurrence in a line's content field plus its free-form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Maximal leading run of alphabetic characters of the trimmed content.
    pub name: String,

    /// Text after the first non-alphabetic character, trimmed. May be empty.
    pub payload: String,
}

impl Event {
    /// Split event content into name and payload.
    ///
    /// The first non-alphabetic character acts as the separator and is
    /// dropped: `"onStep 12"` gives `("onStep", "12")` and `"onStop:0"`
    /// gives `("onStop", "0")`. Content without such a character is all name.
    pub fn from_content(content: &str) -> Self {
        let content = content.trim();
        match content.char_indices().find(|(_, ch)| !ch.is_alphabetic()) {
            Some((idx, separator)) => Self {
                name: content[..idx].to_string(),
                payload: content[idx + separator.len_utf8()..].trim().to_string(),
            },
            None => Self {
                name: content.to_string(),
                payload: String::new(),
            },
        }
    }
}

// =============================================================================
// Successor Tree
// =============================================================================

/// One node of a successor tree.
///
/// The root carries no count; every other node carries the weight of the
/// edge from its parent. A node with no children is a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuccessorTree {
    /// Event name at this node.
    pub name: String,

    /// Edge weight from the parent. `None` for the root.
    pub count: Option<u64>,

    /// Qualified successors, highest count first.
    pub children: Vec<SuccessorTree>,
}

impl SuccessorTree {
    /// A root node with no children yet.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            count: None,
            children: Vec::new(),
        }
    }

    /// A child node reached over an edge of weight `count`.
    pub fn child(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count: Some(count),
            children: Vec::new(),
        }
    }

    /// True when no successor qualified for this node.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Length of the longest root-to-leaf path (a bare root has height 0).
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes, root included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }
}

// =============================================================================
// Frequency Entry
// =============================================================================

/// One row of a frequency table: a key, its occurrence count and its share
/// of the grand total as a percentage (0-100).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyEntry {
    pub key: String,
    pub count: usize,
    pub percent: f64,
}

// =============================================================================
// Analysis Report
// =============================================================================

/// Line accounting for one parsed file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseSummary {
    pub lines_processed: u64,
    pub records: usize,
    pub blank_lines: u64,
    pub rejected_lines: u64,
}

/// Settings an analysis ran with, echoed into the report header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisParameters {
    pub threshold: u64,
    pub relative_threshold: f64,
    pub branching: usize,
    pub depth: usize,
    pub window: usize,
    pub inverted: bool,
}

/// One step of a most-common chain. The first step has no count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainStep {
    pub name: String,
    pub count: Option<u64>,
}

/// Everything the report renderers need, computed in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Display form of the analysed file path.
    pub source: String,
    pub parameters: AnalysisParameters,
    pub parse: ParseSummary,
    /// Distinct event names, sorted.
    pub unique_events: Vec<String>,
    pub component_frequencies: Vec<FrequencyEntry>,
    pub event_frequencies: Vec<FrequencyEntry>,
    /// Distinct `src -> dst` pairs in the transition graph.
    pub graph_edges: usize,
    /// Sum of all transition counts.
    pub graph_transitions: u64,
    /// Trees with at least one qualifying child, in root name order.
    pub trees: Vec<SuccessorTree>,
    /// Greedy most-common chains per root (only when requested).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub chains: Vec<Vec<ChainStep>>,
}
