// SeqSleuth - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Settings resolution (CLI > config.toml > defaults)
// 4. Running the analysis and printing the report to stdout

use clap::{CommandFactory, Parser, ValueEnum};
use seqsleuth::app;
use seqsleuth::core::report::{write_report, ReportFormat};
use seqsleuth::platform;
use seqsleuth::util;
use std::path::PathBuf;
use std::process::ExitCode;

/// Report output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

/// SeqSleuth - Event-sequence analyser for pipe-delimited logs.
///
/// Parses `timestamp|component|pid|content` lines, builds a per-process
/// transition graph over event names and prints, for every event, a tree of
/// its most common (or, with --inverted, rarest) successors.
#[derive(Parser, Debug)]
#[command(name = "SeqSleuth", version, about)]
struct Cli {
    /// Path to the log file (default: [input] log_file from config, then HealthApp.log).
    log_file: Option<PathBuf>,

    /// Minimum number of times an A->B transition must occur to qualify.
    #[arg(short = 't', long, allow_negative_numbers = true)]
    threshold: Option<i64>,

    /// Minimum share (0-1) of A's outgoing transitions that A->B must have.
    #[arg(
        short = 'r',
        long = "relative_threshold",
        visible_alias = "relative-threshold",
        allow_negative_numbers = true
    )]
    relative_threshold: Option<f64>,

    /// Maximum successors shown per tree node.
    #[arg(short = 'b', long, allow_negative_numbers = true)]
    branching: Option<i64>,

    /// Maximum depth of each successor tree.
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    depth: Option<i64>,

    /// Look-ahead window when building transition pairs.
    #[arg(short = 'w', long, allow_negative_numbers = true)]
    window: Option<i64>,

    /// Surface rare transitions instead of frequent ones.
    #[arg(short = 'i', long)]
    inverted: bool,

    /// Also print the single most-common chain for every event.
    #[arg(short = 'c', long)]
    chains: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Explicit config.toml path (default: platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is loaded before logging so its [logging] level can apply;
    // warnings are replayed once the subscriber exists.
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform::config::PlatformPaths::resolve().config_file());
    let (app_config, config_warnings) = platform::config::load_config(&config_path);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "SeqSleuth starting"
    );

    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }
    if cli.config.is_some() && !config_path.exists() {
        tracing::warn!(path = %config_path.display(), "Config file not found; using defaults");
    }

    let overrides = app::settings::SettingsOverrides {
        log_file: cli.log_file.clone(),
        threshold: cli.threshold,
        relative_threshold: cli.relative_threshold,
        branching: cli.branching,
        depth: cli.depth,
        window: cli.window,
        inverted: cli.inverted,
        chains: cli.chains,
    };
    // Rejected CLI values are logged at warn level inside `resolve`.
    let (settings, _) = app::settings::resolve(&overrides, &app_config);

    if settings.log_file.as_os_str().is_empty() {
        eprintln!("Error: no log file given.\n");
        eprintln!("{}", Cli::command().render_usage());
        return ExitCode::from(1);
    }

    let report = match app::analysis::analyse_file(&settings) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Analysis failed");
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let stdout = std::io::stdout();
    if let Err(e) = write_report(&report, cli.format.into(), stdout.lock()) {
        tracing::error!(error = %e, "Failed to write report");
        eprintln!("Error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}
