// SeqSleuth - app/settings.rs
//
// Resolution of the effective analysis settings.
//
// Precedence: command line > config.toml > built-in defaults. Values that
// are out of range never abort the run: they produce a warning and the next
// source in the chain is used instead.

use crate::core::model::AnalysisParameters;
use crate::core::parser::ParseConfig;
use crate::core::tree::TreeConfig;
use crate::platform::config::{check_range, AppConfig};
use crate::util::constants;
use std::path::PathBuf;

/// Raw values as given on the command line (`None` = not given).
///
/// Integers are signed so that `-t -3` reaches validation instead of being
/// rejected by the argument parser.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub log_file: Option<PathBuf>,
    pub threshold: Option<i64>,
    pub relative_threshold: Option<f64>,
    pub branching: Option<i64>,
    pub depth: Option<i64>,
    pub window: Option<i64>,
    pub inverted: bool,
    pub chains: bool,
}

/// Fully resolved, validated settings for one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub log_file: PathBuf,
    pub tree: TreeConfig,
    pub window: usize,
    pub chains: bool,
    pub parse: ParseConfig,
}

impl AnalysisSettings {
    /// Parameters echoed in the report header.
    pub fn parameters(&self) -> AnalysisParameters {
        AnalysisParameters {
            threshold: self.tree.threshold,
            relative_threshold: self.tree.relative_threshold,
            branching: self.tree.branching,
            depth: self.tree.depth,
            window: self.window,
            inverted: self.tree.inverted,
        }
    }
}

/// Merge CLI overrides with config values and defaults.
///
/// Returns the settings plus any warnings about rejected CLI values.
pub fn resolve(overrides: &SettingsOverrides, config: &AppConfig) -> (AnalysisSettings, Vec<String>) {
    let mut warnings = Vec::new();

    let log_file = overrides
        .log_file
        .clone()
        .or_else(|| config.log_file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_LOG_FILE));

    let threshold = overrides
        .threshold
        .and_then(|v| cli_unsigned("--threshold", v, 0, constants::MAX_THRESHOLD, &mut warnings))
        .or(config.threshold)
        .unwrap_or(constants::DEFAULT_THRESHOLD);

    let relative_threshold = overrides
        .relative_threshold
        .and_then(|v| {
            check_range(
                "--relative_threshold",
                v,
                constants::MIN_RELATIVE_THRESHOLD..=constants::MAX_RELATIVE_THRESHOLD,
            )
            .map_err(|e| warnings.push(format!("{e}. Using default.")))
            .ok()
        })
        .or(config.relative_threshold)
        .unwrap_or(constants::DEFAULT_RELATIVE_THRESHOLD);

    let branching = overrides
        .branching
        .and_then(|v| {
            cli_unsigned(
                "--branching",
                v,
                0,
                constants::MAX_BRANCHING as u64,
                &mut warnings,
            )
        })
        .map(|v| v as usize)
        .or(config.branching)
        .unwrap_or(constants::DEFAULT_BRANCHING);

    let depth = overrides
        .depth
        .and_then(|v| {
            cli_unsigned(
                "--depth",
                v,
                constants::MIN_DEPTH as u64,
                constants::MAX_DEPTH as u64,
                &mut warnings,
            )
        })
        .map(|v| v as usize)
        .or(config.depth)
        .unwrap_or(constants::DEFAULT_DEPTH);

    let window = overrides
        .window
        .and_then(|v| {
            cli_unsigned(
                "--window",
                v,
                constants::MIN_WINDOW as u64,
                constants::MAX_WINDOW as u64,
                &mut warnings,
            )
        })
        .map(|v| v as usize)
        .or(config.window)
        .unwrap_or(constants::DEFAULT_WINDOW);

    let inverted = overrides.inverted || config.inverted.unwrap_or(false);

    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let settings = AnalysisSettings {
        log_file,
        tree: TreeConfig {
            branching,
            depth,
            threshold,
            relative_threshold,
            inverted,
        },
        window,
        chains: overrides.chains,
        parse: ParseConfig {
            max_parse_errors: config.max_parse_errors,
        },
    };

    tracing::debug!(?settings, "Analysis settings resolved");

    (settings, warnings)
}

fn cli_unsigned(
    flag: &str,
    value: i64,
    min: u64,
    max: u64,
    warnings: &mut Vec<String>,
) -> Option<u64> {
    let checked = u64::try_from(value)
        .ok()
        .and_then(|v| check_range(flag, v, min..=max).ok());
    if checked.is_none() {
        warnings.push(format!(
            "{flag} {value} is out of range ({min}-{max}). Using default."
        ));
    }
    checked
}
