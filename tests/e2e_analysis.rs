// SeqSleuth - tests/e2e_analysis.rs
//
// End-to-end tests for the parsing and analysis pipeline.
//
// These tests exercise a real log file on disk, real config.toml loading
// and the full path from raw lines to rendered successor trees, with no
// mocks or stubs.

use seqsleuth::app::analysis::{analyse_content, analyse_file};
use seqsleuth::app::settings::{resolve, AnalysisSettings, SettingsOverrides};
use seqsleuth::core::graph::build_graph;
use seqsleuth::core::parser::{parse_content, ParseConfig};
use seqsleuth::core::report::{render_text, render_tree, write_report, ReportFormat};
use seqsleuth::core::tree::{build_tree, qualified_successors, TreeConfig};
use seqsleuth::platform::config::{load_config, AppConfig};
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to an on-disk fixture file.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sample_content() -> String {
    fs::read_to_string(fixture("healthapp_sample.log")).unwrap()
}

fn settings_for(overrides: SettingsOverrides) -> AnalysisSettings {
    let overrides = SettingsOverrides {
        log_file: Some(fixture("healthapp_sample.log")),
        ..overrides
    };
    resolve(&overrides, &AppConfig::default()).0
}

// =============================================================================
// Parsing E2E
// =============================================================================

/// The sample holds 17 valid records, one blank line, one line without
/// delimiters and one line with a non-numeric pid.
#[test]
fn e2e_parses_fixture_with_skips() {
    let result = parse_content(&sample_content(), &ParseConfig::default());
    assert_eq!(result.lines_processed, 20);
    assert_eq!(result.records.len(), 17);
    assert_eq!(result.blank_lines, 1);
    assert_eq!(result.rejected_lines, 2);
    assert_eq!(result.errors[0].line_number(), 15);
    assert_eq!(result.errors[1].line_number(), 16);

    let spu = result
        .records
        .iter()
        .find(|r| r.component == "Step_SPUtils")
        .unwrap();
    assert_eq!(spu.event.name, "getTodayTotalDetailSteps");
    assert!(spu.event.payload.starts_with("= 1514038440000"));
}

/// Parsing the same file twice yields identical graphs.
#[test]
fn e2e_graph_is_deterministic() {
    let content = sample_content();
    let a = build_graph(&parse_content(&content, &ParseConfig::default()).records, 1);
    let b = build_graph(&parse_content(&content, &ParseConfig::default()).records, 1);
    assert_eq!(a, b);
}

// =============================================================================
// Graph E2E
// =============================================================================

#[test]
fn e2e_graph_edges_respect_sessions_and_time_order() {
    let records = parse_content(&sample_content(), &ParseConfig::default()).records;
    let graph = build_graph(&records, 1);

    assert_eq!(graph.count("onStandStepChanged", "onExtend"), 4);
    assert_eq!(
        graph.count("onStandStepChanged", "processHandleBroadcastAction"),
        1
    );
    assert_eq!(graph.count("onExtend", "onStandStepChanged"), 2);
    // Pid 30002400 logs onReceive with an earlier timestamp than the line
    // before it; after sorting it leads that session.
    assert_eq!(graph.count("onReceive", "onStandStepChanged"), 1);
    // Different components never chain, even when adjacent in the file.
    assert_eq!(graph.count("onExtend", "onReceive"), 0);
    assert_eq!(graph.count("onStandStepChanged", "flush"), 0);
    // The two HiH lines share component and pid despite being far apart.
    assert_eq!(
        graph.count("saveHealthDetailData", "saveHealthDetailData"),
        1
    );
}

// =============================================================================
// Tree E2E
// =============================================================================

#[test]
fn e2e_default_tree_rendering() {
    let records = parse_content(&sample_content(), &ParseConfig::default()).records;
    let graph = build_graph(&records, 1);
    let tree = build_tree(&graph, "onStandStepChanged", &TreeConfig::default());

    let expected = "onStandStepChanged\n\
                    \x20   ├── onExtend  (×4)\n\
                    \x20   │   └── processHandleBroadcastAction  (×1)\n\
                    \x20   └── processHandleBroadcastAction  (×1)\n";
    assert_eq!(render_tree(&tree), expected);
}

#[test]
fn e2e_report_filters_uninteresting_roots() {
    let settings = settings_for(SettingsOverrides::default());
    let report = analyse_file(&settings).unwrap();

    assert_eq!(report.parse.records, 17);
    assert_eq!(report.unique_events.len(), 7);
    assert_eq!(report.component_frequencies[0].key, "Step_LSC");
    assert_eq!(report.component_frequencies[0].count, 12);
    assert_eq!(report.event_frequencies[0].key, "onStandStepChanged");
    assert_eq!(report.event_frequencies[0].count, 5);

    // saveHealthDetailData only loops onto itself and flush has no
    // successors: neither produces a tree.
    let roots: Vec<&str> = report.trees.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        roots,
        vec![
            "onExtend",
            "onReceive",
            "onStandStepChanged",
            "processHandleBroadcastAction"
        ]
    );
}

#[test]
fn e2e_inverted_mode_surfaces_rare_transitions() {
    let settings = settings_for(SettingsOverrides {
        threshold: Some(2),
        relative_threshold: Some(0.5),
        inverted: true,
        ..SettingsOverrides::default()
    });
    let report = analyse_content(&sample_content(), "sample", &settings);

    let root = report
        .trees
        .iter()
        .find(|t| t.name == "onStandStepChanged")
        .unwrap();
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].name, "processHandleBroadcastAction");
    assert_eq!(root.children[0].count, Some(1));
}

#[test]
fn e2e_inversion_law_on_fixture() {
    let records = parse_content(&sample_content(), &ParseConfig::default()).records;
    let graph = build_graph(&records, 1);
    for threshold in 0..6 {
        for relative in [0.0, 0.2, 1.0 / 3.0, 0.5, 0.8, 1.0] {
            let normal = TreeConfig {
                branching: 10,
                depth: 1,
                threshold,
                relative_threshold: relative,
                inverted: false,
            };
            let inverted = TreeConfig {
                inverted: true,
                ..normal.clone()
            };
            for src in graph.sources() {
                let n = qualified_successors(&graph, src, &normal);
                let i = qualified_successors(&graph, src, &inverted);
                assert!(i.iter().all(|edge| !n.contains(edge)));
            }
        }
    }
}

#[test]
fn e2e_threshold_above_every_count_gives_no_trees() {
    let settings = settings_for(SettingsOverrides {
        threshold: Some(5),
        ..SettingsOverrides::default()
    });
    let report = analyse_content(&sample_content(), "sample", &settings);
    assert!(report.trees.is_empty());
    assert!(render_text(&report).contains("(no event has a qualifying successor)"));
}

#[test]
fn e2e_window_two() {
    let settings = settings_for(SettingsOverrides {
        window: Some(2),
        relative_threshold: Some(0.0),
        ..SettingsOverrides::default()
    });
    let report = analyse_content(&sample_content(), "sample", &settings);
    // Only sessions with three or more records contribute at window 2.
    assert!(report.graph_transitions > 0);
    assert_eq!(report.parameters.window, 2);
}

// =============================================================================
// Config + report E2E
// =============================================================================

#[test]
fn e2e_config_file_drives_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[input]\nlog_file = {:?}\n\n[analysis]\nbranching = 1\ndepth = 1\n",
            fixture("healthapp_sample.log").display().to_string()
        ),
    )
    .unwrap();

    let (config, warnings) = load_config(&config_path);
    assert!(warnings.is_empty(), "{warnings:?}");
    let (settings, _) = resolve(&SettingsOverrides::default(), &config);
    let report = analyse_file(&settings).unwrap();

    assert!(report.trees.iter().all(|t| t.children.len() <= 1));
    assert!(report.trees.iter().all(|t| t.height() <= 1));
}

#[test]
fn e2e_json_report_round_trips_through_serde_json() {
    let settings = settings_for(SettingsOverrides {
        chains: true,
        ..SettingsOverrides::default()
    });
    let report = analyse_file(&settings).unwrap();

    let mut buf = Vec::new();
    write_report(&report, ReportFormat::Json, &mut buf).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();

    assert_eq!(value["parse"]["records"], 17);
    assert_eq!(value["parameters"]["branching"], 2);
    assert!(value["trees"].as_array().unwrap().len() == report.trees.len());
    assert!(!value["chains"].as_array().unwrap().is_empty());
}

#[test]
fn e2e_missing_file_reports_io_error() {
    let settings = resolve(
        &SettingsOverrides {
            log_file: Some(fixture("does_not_exist.log")),
            ..SettingsOverrides::default()
        },
        &AppConfig::default(),
    )
    .0;
    let err = analyse_file(&settings).unwrap_err();
    assert!(err.to_string().contains("does_not_exist.log"));
}
