// SeqSleuth - core/report.rs
//
// Text and JSON rendering of an analysis report.
// Core layer: writes to any Write trait object.

use crate::core::model::{AnalysisReport, ChainStep, FrequencyEntry, SuccessorTree};
use crate::util::error::ReportError;
use std::fmt::Write as _;
use std::io::Write;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

const RULE_WIDTH: usize = 60;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const BLANK_INDENT: &str = "    ";

/// Render a report in the requested format to `writer`.
pub fn write_report<W: Write>(
    report: &AnalysisReport,
    format: ReportFormat,
    mut writer: W,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Text => writer
            .write_all(render_text(report).as_bytes())
            .map_err(|e| ReportError::Io { source: e })?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)
                .map_err(|e| ReportError::Json { source: e })?;
            writeln!(writer).map_err(|e| ReportError::Io { source: e })?;
        }
    }
    writer.flush().map_err(|e| ReportError::Io { source: e })
}

/// Render the full human-readable report.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);
    let p = &report.parameters;

    // `write!` into a String cannot fail.
    let _ = writeln!(out, "Parsing log file: {}", report.source);
    let _ = writeln!(
        out,
        "Parsed {} record(s) from {} line(s) ({} blank, {} skipped)\n",
        report.parse.records,
        report.parse.lines_processed,
        report.parse.blank_lines,
        report.parse.rejected_lines
    );

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Unique event names ({} total):",
        report.unique_events.len()
    );
    for name in &report.unique_events {
        let _ = writeln!(out, "  {name}");
    }

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "Component frequencies:");
    out.push_str(&render_frequencies(&report.component_frequencies));

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(out, "Event frequencies:");
    out.push_str(&render_frequencies(&report.event_frequencies));

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(
        out,
        "Transition graph (window={}): {} distinct edge(s), {} transition(s)",
        p.window, report.graph_edges, report.graph_transitions
    );

    let _ = writeln!(out, "\n{rule}");
    let _ = writeln!(
        out,
        "{} successor trees (threshold={}, relative_threshold={}, branching={}, depth={}):\n",
        if p.inverted {
            "Least-common (inverted)"
        } else {
            "Most-common"
        },
        p.threshold,
        p.relative_threshold,
        p.branching,
        p.depth
    );
    if report.trees.is_empty() {
        let _ = writeln!(out, "  (no event has a qualifying successor)\n");
    }
    for tree in &report.trees {
        out.push_str(&render_tree(tree));
        out.push('\n');
    }

    if !report.chains.is_empty() {
        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "Most-common chains (threshold={}):\n", p.threshold);
        for chain in &report.chains {
            let _ = writeln!(out, "  {}", render_chain(chain));
        }
    }

    out
}

/// Render a tree with box-drawing connectors and edge weights.
///
/// ```text
/// onStep
///     ├── onStop  (×3)
///     │   └── onStep  (×2)
///     └── flush  (×1)
/// ```
pub fn render_tree(tree: &SuccessorTree) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tree.name);
    render_children(&tree.children, BLANK_INDENT, &mut out);
    out
}

fn render_children(children: &[SuccessorTree], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        let connector = if is_last { LAST_BRANCH } else { BRANCH };
        let _ = write!(out, "{prefix}{connector}{}", child.name);
        if let Some(count) = child.count {
            let _ = write!(out, "  (×{count})");
        }
        out.push('\n');

        let child_prefix = format!(
            "{prefix}{}",
            if is_last { BLANK_INDENT } else { PIPE_INDENT }
        );
        render_children(&child.children, &child_prefix, out);
    }
}

/// Render a chain as `a → b (×3) → c (×2)`.
pub fn render_chain(chain: &[ChainStep]) -> String {
    chain
        .iter()
        .map(|step| match step.count {
            Some(count) => format!("{} (×{count})", step.name),
            None => step.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(" → ")
}

fn render_frequencies(entries: &[FrequencyEntry]) -> String {
    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>8}  {:>6.2}%",
            entry.key, entry.count, entry.percent
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{AnalysisParameters, ParseSummary};

    fn sample_tree() -> SuccessorTree {
        let mut root = SuccessorTree::root("onStep");
        let mut stop = SuccessorTree::child("onStop", 3);
        stop.children.push(SuccessorTree::child("onStep", 2));
        root.children.push(stop);
        root.children.push(SuccessorTree::child("flush", 1));
        root
    }

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            source: "sample.log".to_string(),
            parameters: AnalysisParameters {
                threshold: 1,
                relative_threshold: 0.15,
                branching: 2,
                depth: 4,
                window: 1,
                inverted: false,
            },
            parse: ParseSummary {
                lines_processed: 4,
                records: 3,
                blank_lines: 1,
                rejected_lines: 0,
            },
            unique_events: vec!["flush".to_string(), "onStep".to_string()],
            component_frequencies: vec![FrequencyEntry {
                key: "Comp".to_string(),
                count: 3,
                percent: 100.0,
            }],
            event_frequencies: Vec::new(),
            graph_edges: 2,
            graph_transitions: 2,
            trees: vec![sample_tree()],
            chains: Vec::new(),
        }
    }

    #[test]
    fn test_render_tree_connectors() {
        let expected = "onStep\n\
                        \x20   ├── onStop  (×3)\n\
                        \x20   │   └── onStep  (×2)\n\
                        \x20   └── flush  (×1)\n";
        assert_eq!(render_tree(&sample_tree()), expected);
    }

    #[test]
    fn test_render_bare_root() {
        assert_eq!(render_tree(&SuccessorTree::root("x")), "x\n");
    }

    #[test]
    fn test_render_chain() {
        let chain = vec![
            ChainStep {
                name: "a".to_string(),
                count: None,
            },
            ChainStep {
                name: "b".to_string(),
                count: Some(4),
            },
        ];
        assert_eq!(render_chain(&chain), "a → b (×4)");
    }

    #[test]
    fn test_text_report_sections() {
        let text = render_text(&sample_report());
        assert!(text.contains("Parsing log file: sample.log"));
        assert!(text.contains("Unique event names (2 total):"));
        assert!(text.contains("  Comp         3  100.00%"));
        assert!(text.contains("Event frequencies:"));
        assert!(text.contains("Most-common successor trees"));
        assert!(text.contains("└── flush  (×1)"));
        assert!(!text.contains("Most-common chains"));
    }

    #[test]
    fn test_text_report_inverted_header() {
        let mut report = sample_report();
        report.parameters.inverted = true;
        report.trees.clear();
        let text = render_text(&report);
        assert!(text.contains("Least-common (inverted) successor trees"));
        assert!(text.contains("(no event has a qualifying successor)"));
    }

    #[test]
    fn test_json_report_is_valid() {
        let mut buf = Vec::new();
        write_report(&sample_report(), ReportFormat::Json, &mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["source"], "sample.log");
        assert_eq!(value["trees"][0]["name"], "onStep");
        assert!(value["trees"][0]["count"].is_null());
        assert_eq!(value["trees"][0]["children"][0]["count"], 3);
        assert!(value.get("chains").is_none());
    }

    #[test]
    fn test_text_report_written_to_writer() {
        let mut buf = Vec::new();
        write_report(&sample_report(), ReportFormat::Text, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output, render_text(&sample_report()));
    }
}
