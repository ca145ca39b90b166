// SeqSleuth - core/parser.rs
//
// Line-oriented parsing of `timestamp|component|pid|content` logs.
// Core layer: accepts file content as a string, never touches the
// filesystem directly.
//
// Malformed lines are excluded from the record set and reported as
// diagnostics; a parse never fails as a whole.

use crate::core::model::{Event, LogRecord};
use crate::util::constants;
use crate::util::error::ParseError;
use std::collections::BTreeMap;

/// Configuration for parsing operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Diagnostics retained before further errors are only counted.
    pub max_parse_errors: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_parse_errors: constants::MAX_PARSE_ERRORS,
        }
    }
}

/// Result of parsing one log file.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Successfully parsed records, in file order.
    pub records: Vec<LogRecord>,
    /// Diagnostics for rejected lines (capped at `max_parse_errors`).
    /// Blank lines are counted but not listed.
    pub errors: Vec<ParseError>,
    /// Total lines seen, blank ones included.
    pub lines_processed: u64,
    /// Lines skipped because they were empty after trimming.
    pub blank_lines: u64,
    /// Non-blank lines rejected as malformed or with an invalid pid.
    pub rejected_lines: u64,
}

/// Parse a single raw line into a record.
///
/// `line_number` is 1-based and only used for diagnostics.
pub fn parse_line(line: &str, line_number: u64) -> Result<LogRecord, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::BlankLine { line_number });
    }

    let parts: Vec<&str> = line
        .splitn(constants::FIELD_COUNT, constants::FIELD_DELIMITER)
        .collect();
    let [timestamp, component, raw_pid, content] = parts.as_slice() else {
        return Err(ParseError::MalformedLine {
            line_number,
            reason: format!(
                "expected {} '{}'-delimited fields, found {}",
                constants::FIELD_COUNT,
                constants::FIELD_DELIMITER,
                parts.len()
            ),
        });
    };

    if component.trim().is_empty() {
        return Err(ParseError::MalformedLine {
            line_number,
            reason: "empty component field".to_string(),
        });
    }

    let pid = raw_pid
        .trim()
        .parse::<u64>()
        .map_err(|_| ParseError::InvalidPid {
            line_number,
            raw_pid: raw_pid.to_string(),
        })?;

    Ok(LogRecord {
        timestamp: (*timestamp).to_string(),
        component: (*component).to_string(),
        pid,
        event: Event::from_content(content),
        line_number,
    })
}

/// Parse the full content of a log file.
///
/// Every line is attempted; rejected lines are counted and, up to the
/// configured cap, described in `errors`.
pub fn parse_content(content: &str, config: &ParseConfig) -> ParseResult {
    let mut result = ParseResult::default();

    for (line_idx, line) in content.lines().enumerate() {
        result.lines_processed += 1;
        let line_number = (line_idx as u64) + 1;

        match parse_line(line, line_number) {
            Ok(record) => result.records.push(record),
            Err(ParseError::BlankLine { .. }) => result.blank_lines += 1,
            Err(err) => {
                result.rejected_lines += 1;
                tracing::trace!(
                    line = line_number,
                    preview = %preview(line),
                    error = %err,
                    "Skipping line"
                );
                if result.errors.len() < config.max_parse_errors {
                    result.errors.push(err);
                }
            }
        }
    }

    tracing::debug!(
        lines = result.lines_processed,
        records = result.records.len(),
        blank = result.blank_lines,
        rejected = result.rejected_lines,
        "Parsing completed"
    );

    result
}

/// Group records by component, keeping file order within each group.
pub fn group_by_component(records: &[LogRecord]) -> BTreeMap<String, Vec<&LogRecord>> {
    let mut groups: BTreeMap<String, Vec<&LogRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.component.clone())
            .or_default()
            .push(record);
    }
    groups
}

/// Truncate a line for debug output.
fn preview(line: &str) -> &str {
    match line.char_indices().nth(constants::DEBUG_MAX_LINE_PREVIEW) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}
