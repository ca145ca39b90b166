// SeqSleuth - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all SeqSleuth operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum SeqSleuthError {
    /// Log line parsing failed.
    Parse(ParseError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Report rendering failed.
    Report(ReportError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for SeqSleuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Report(e) => write!(f, "Report error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for SeqSleuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Report(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Reasons a single log line was excluded from the record set.
///
/// None of these abort a parse: the parser records them as diagnostics and
/// moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line is empty or whitespace only.
    BlankLine { line_number: u64 },

    /// The line does not have the `timestamp|component|pid|content` shape.
    MalformedLine { line_number: u64, reason: String },

    /// The pid field is not a non-negative integer.
    InvalidPid { line_number: u64, raw_pid: String },
}

impl ParseError {
    /// 1-based line number the error refers to.
    pub fn line_number(&self) -> u64 {
        match self {
            Self::BlankLine { line_number }
            | Self::MalformedLine { line_number, .. }
            | Self::InvalidPid { line_number, .. } => *line_number,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankLine { line_number } => write!(f, "line {line_number}: blank line"),
            Self::MalformedLine {
                line_number,
                reason,
            } => write!(f, "line {line_number}: {reason}"),
            Self::InvalidPid {
                line_number,
                raw_pid,
            } => write!(
                f,
                "line {line_number}: pid '{raw_pid}' is not a non-negative integer"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for SeqSleuthError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Config '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for SeqSleuthError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Report errors
// ---------------------------------------------------------------------------

/// Errors related to rendering or writing the analysis report.
#[derive(Debug)]
pub enum ReportError {
    /// JSON serialisation error.
    Json { source: serde_json::Error },

    /// I/O error writing the report.
    Io { source: io::Error },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { source } => write!(f, "JSON report error: {source}"),
            Self::Io { source } => write!(f, "Report I/O error: {source}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source } => Some(source),
            Self::Io { source } => Some(source),
        }
    }
}

impl From<ReportError> for SeqSleuthError {
    fn from(e: ReportError) -> Self {
        Self::Report(e)
    }
}

/// Convenience type alias for SeqSleuth results.
pub type Result<T> = std::result::Result<T, SeqSleuthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_parse_error_display_includes_line_number() {
        let err = ParseError::InvalidPid {
            line_number: 7,
            raw_pid: "abc".to_string(),
        };
        assert_eq!(err.line_number(), 7);
        assert_eq!(
            err.to_string(),
            "line 7: pid 'abc' is not a non-negative integer"
        );
    }

    #[test]
    fn test_io_error_preserves_source_chain() {
        let err = SeqSleuthError::Io {
            path: PathBuf::from("missing.log"),
            operation: "read",
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.log"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_converts_into_top_level() {
        let err: SeqSleuthError = ConfigError::ValueOutOfRange {
            field: "analysis.depth".to_string(),
            value: "0".to_string(),
            expected: "1-16".to_string(),
        }
        .into();
        assert!(matches!(err, SeqSleuthError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
