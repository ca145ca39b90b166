// SeqSleuth - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SeqSleuth";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "SeqSleuth";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Input
// =============================================================================

/// Log file analysed when neither the CLI nor config.toml names one.
pub const DEFAULT_LOG_FILE: &str = "HealthApp.log";

/// Field delimiter of the `timestamp|component|pid|content` line format.
pub const FIELD_DELIMITER: char = '|';

/// Number of fields in a well-formed line. The last field keeps any
/// further delimiters verbatim.
pub const FIELD_COUNT: usize = 4;

// =============================================================================
// Parsing limits
// =============================================================================

/// Maximum number of parse diagnostics retained per file. Lines beyond the
/// cap are still counted, just not described.
pub const MAX_PARSE_ERRORS: usize = 1_000;

/// Hard upper bound on the configurable diagnostic cap.
pub const ABSOLUTE_MAX_PARSE_ERRORS: usize = 100_000;

// =============================================================================
// Analysis defaults and bounds
// =============================================================================

/// Minimum absolute edge count for a successor to qualify.
pub const DEFAULT_THRESHOLD: u64 = 1;

/// Upper bound on the absolute threshold.
pub const MAX_THRESHOLD: u64 = 1_000_000_000;

/// Minimum share of a node's outgoing transitions for a successor to qualify.
pub const DEFAULT_RELATIVE_THRESHOLD: f64 = 0.15;

/// Valid range of the relative threshold (inclusive).
pub const MIN_RELATIVE_THRESHOLD: f64 = 0.0;
pub const MAX_RELATIVE_THRESHOLD: f64 = 1.0;

/// Maximum successors shown per tree node.
pub const DEFAULT_BRANCHING: usize = 2;

/// Upper bound on branching. Tree size grows as branching^depth.
pub const MAX_BRANCHING: usize = 32;

/// Maximum depth of each successor tree (root is depth 0).
pub const DEFAULT_DEPTH: usize = 4;

/// Valid depth range.
pub const MIN_DEPTH: usize = 1;
pub const MAX_DEPTH: usize = 16;

/// Look-ahead distance when recording a transition edge.
pub const DEFAULT_WINDOW: usize = 1;

/// Valid window range.
pub const MIN_WINDOW: usize = 1;
pub const MAX_WINDOW: usize = 10_000;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in config.toml.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Maximum size of config.toml in bytes.
pub const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024; // 64 KB
