// SeqSleuth - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Resolved platform paths for SeqSleuth configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/seqsleuth/ or %APPDATA%\SeqSleuth\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Default location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[input]` section.
    pub input: InputSection,
    /// `[analysis]` section.
    pub analysis: AnalysisSection,
    /// `[parsing]` section.
    pub parsing: ParsingSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Log file analysed when none is given on the command line.
    pub log_file: Option<String>,
}

/// `[analysis]` config section. Signed types so that negative values are
/// reported as out of range instead of failing the whole parse.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    pub threshold: Option<i64>,
    pub relative_threshold: Option<f64>,
    pub branching: Option<i64>,
    pub depth: Option<i64>,
    pub window: Option<i64>,
    pub inverted: Option<bool>,
}

/// `[parsing]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ParsingSection {
    /// Diagnostics retained per file.
    pub max_parse_errors: Option<usize>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Analysis values are `None` when the file does not set them (or sets them
/// out of range), so the command line and built-in defaults can fill in.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Input --
    pub log_file: Option<String>,

    // -- Analysis --
    pub threshold: Option<u64>,
    pub relative_threshold: Option<f64>,
    pub branching: Option<usize>,
    pub depth: Option<usize>,
    pub window: Option<usize>,
    pub inverted: Option<bool>,

    // -- Parsing --
    pub max_parse_errors: usize,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            threshold: None,
            relative_threshold: None,
            branching: None,
            depth: None,
            window: None,
            inverted: None,
            max_parse_errors: constants::MAX_PARSE_ERRORS,
            log_level: None,
        }
    }
}

/// Check that `value` lies in `range`, naming `field` in the error.
pub fn check_range<T>(field: &str, value: T, range: RangeInclusive<T>) -> Result<T, ConfigError>
where
    T: PartialOrd + Display,
{
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("{}-{}", range.start(), range.end()),
        })
    }
}

/// Range-check a signed value destined for an unsigned setting.
fn check_unsigned(
    field: &str,
    value: i64,
    min: u64,
    max: u64,
    warnings: &mut Vec<String>,
) -> Option<u64> {
    let checked = u64::try_from(value)
        .ok()
        .and_then(|v| check_range(field, v, min..=max).ok());
    if checked.is_none() {
        warnings.push(format!(
            "{field} = {value} is out of range ({min}-{max}). Using default."
        ));
    }
    checked
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// If the file does not exist, returns defaults with no warnings (first-run).
/// If the file is unreadable or unparseable, returns defaults with a warning
/// -- the analysis still runs but the user is informed.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match read_config_file(config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "{}. Using defaults.",
                ConfigError::TomlParse {
                    path: config_path.to_path_buf(),
                    source: e,
                }
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

fn read_config_file(path: &Path) -> Result<String, ConfigError> {
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    let size = std::fs::metadata(path).map_err(io_err)?.len();
    if size > constants::MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            max_size: constants::MAX_CONFIG_FILE_SIZE,
        });
    }
    std::fs::read_to_string(path).map_err(io_err)
}

/// Validate each field against named constants, accumulating all warnings.
fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Input: log_file --
    if let Some(file) = raw.input.log_file {
        if !file.trim().is_empty() {
            config.log_file = Some(file);
        }
    }

    // -- Analysis --
    let a = raw.analysis;
    if let Some(v) = a.threshold {
        config.threshold = check_unsigned(
            "[analysis] threshold",
            v,
            0,
            constants::MAX_THRESHOLD,
            warnings,
        );
    }
    if let Some(v) = a.relative_threshold {
        match check_range(
            "[analysis] relative_threshold",
            v,
            constants::MIN_RELATIVE_THRESHOLD..=constants::MAX_RELATIVE_THRESHOLD,
        ) {
            Ok(v) => config.relative_threshold = Some(v),
            Err(e) => warnings.push(format!("{e}. Using default.")),
        }
    }
    if let Some(v) = a.branching {
        config.branching = check_unsigned(
            "[analysis] branching",
            v,
            0,
            constants::MAX_BRANCHING as u64,
            warnings,
        )
        .map(|v| v as usize);
    }
    if let Some(v) = a.depth {
        config.depth = check_unsigned(
            "[analysis] depth",
            v,
            constants::MIN_DEPTH as u64,
            constants::MAX_DEPTH as u64,
            warnings,
        )
        .map(|v| v as usize);
    }
    if let Some(v) = a.window {
        config.window = check_unsigned(
            "[analysis] window",
            v,
            constants::MIN_WINDOW as u64,
            constants::MAX_WINDOW as u64,
            warnings,
        )
        .map(|v| v as usize);
    }
    config.inverted = a.inverted;

    // -- Parsing: max_parse_errors --
    if let Some(max) = raw.parsing.max_parse_errors {
        match check_range(
            "[parsing] max_parse_errors",
            max,
            0..=constants::ABSOLUTE_MAX_PARSE_ERRORS,
        ) {
            Ok(v) => config.max_parse_errors = v,
            Err(e) => warnings.push(format!(
                "{e}. Using default ({}).",
                constants::MAX_PARSE_ERRORS
            )),
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    config
}
