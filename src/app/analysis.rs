// SeqSleuth - app/analysis.rs
//
// Analysis pipeline orchestration:
//   read file -> parse -> catalog + frequencies -> transition graph ->
//   successor tree per event -> report.
//
// Everything after the file read is a pure function of the content and the
// settings, so `analyse_content` is what the tests drive.

use crate::app::settings::AnalysisSettings;
use crate::core::catalog::unique_event_names;
use crate::core::frequency::{component_frequencies, event_frequencies};
use crate::core::graph::{build_graph, most_common_sequence};
use crate::core::model::{AnalysisReport, ChainStep, ParseSummary};
use crate::core::parser::parse_content;
use crate::core::tree::build_tree;
use crate::platform::fs::read_file_lossy;
use crate::util::error::{Result, SeqSleuthError};
use std::time::Instant;

/// Read `settings.log_file` and analyse it.
pub fn analyse_file(settings: &AnalysisSettings) -> Result<AnalysisReport> {
    let path = &settings.log_file;
    let content = read_file_lossy(path).map_err(|e| SeqSleuthError::Io {
        path: path.clone(),
        operation: "read log file",
        source: e,
    })?;
    tracing::info!(
        path = %path.display(),
        bytes = content.len(),
        "Log file loaded"
    );
    Ok(analyse_content(
        &content,
        &path.display().to_string(),
        settings,
    ))
}

/// Analyse log content already held in memory.
///
/// `source` is only used to label the report.
pub fn analyse_content(content: &str, source: &str, settings: &AnalysisSettings) -> AnalysisReport {
    let started = Instant::now();

    let parsed = parse_content(content, &settings.parse);
    for err in &parsed.errors {
        tracing::debug!(error = %err, "Line skipped");
    }
    if parsed.rejected_lines > 0 {
        tracing::warn!(
            rejected = parsed.rejected_lines,
            "Some lines were malformed and have been skipped"
        );
    }

    let records = &parsed.records;
    let unique_events = unique_event_names(records);
    let graph = build_graph(records, settings.window);

    let trees: Vec<_> = unique_events
        .iter()
        .map(|name| build_tree(&graph, name, &settings.tree))
        .filter(|tree| !tree.is_leaf())
        .collect();

    let chains: Vec<Vec<ChainStep>> = if settings.chains {
        unique_events
            .iter()
            .map(|name| {
                most_common_sequence(&graph, name, settings.tree.depth, settings.tree.threshold)
            })
            .filter(|path| path.len() > 1)
            .map(|path| {
                path.into_iter()
                    .map(|(name, count)| ChainStep { name, count })
                    .collect::<Vec<_>>()
            })
            .collect()
    } else {
        Vec::new()
    };

    tracing::info!(
        records = records.len(),
        events = unique_events.len(),
        edges = graph.edge_count(),
        trees = trees.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Analysis completed"
    );

    AnalysisReport {
        source: source.to_string(),
        parameters: settings.parameters(),
        parse: ParseSummary {
            lines_processed: parsed.lines_processed,
            records: records.len(),
            blank_lines: parsed.blank_lines,
            rejected_lines: parsed.rejected_lines,
        },
        unique_events: unique_events.into_iter().collect(),
        component_frequencies: component_frequencies(records),
        event_frequencies: event_frequencies(records),
        graph_edges: graph.edge_count(),
        graph_transitions: graph.total_transitions(),
        trees,
        chains,
    }
}
