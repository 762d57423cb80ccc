//! Tests for the report module.

use hinge_builder::{FlatHingeOptions, SideHingeOptions};
use test_harness::HingeBench;

#[test]
fn test_empty_bench_report() {
    let b = HingeBench::mock();
    let report = b.report().unwrap();
    let text = report.to_text();
    assert!(text.contains("Shapes (0):"));
    assert!(text.contains("Failures: none"));
}

#[test]
fn test_report_lists_every_shape() {
    let mut b = HingeBench::mock();
    b.side("lid", 60.0, 20.0, &SideHingeOptions::default())
        .unwrap()
        .flat("tray", 12.0, 20.0, 2.0, &FlatHingeOptions::default())
        .unwrap();

    let text = b.report().unwrap().to_text();
    assert!(text.contains("Shapes (2):"), "Should list 2 shapes: {}", text);
    assert!(text.contains("side \"lid\""), "Should mention lid: {}", text);
    assert!(text.contains("flat \"tray\""), "Should mention tray: {}", text);
    assert!(text.contains("Hinge width: 6.40"), "Should show width: {}", text);
    assert!(text.contains("Bodies: 1 (OK)"), "Should show connectivity");
}

#[test]
fn test_report_runs_oracles() {
    let mut b = HingeBench::mock();
    b.flat("tray", 12.0, 20.0, 2.0, &FlatHingeOptions::default())
        .unwrap();

    let report = b.report().unwrap();
    assert_eq!(report.oracle_results.len(), 4);
    assert_eq!(report.failures().count(), 0);
    assert!(report.to_text().contains("[PASS] tray / single_body"));
}

#[test]
fn test_report_serializes_to_json() {
    let mut b = HingeBench::mock();
    b.samples().unwrap();

    let json = b.report().unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let shapes = value["shapes"].as_array().unwrap();
    assert_eq!(shapes.len(), 2);
    assert_eq!(shapes[0]["name"], "Side hinge");
    assert!(shapes[0]["hinge_width"].is_null());
}

#[test]
fn test_display_matches_to_text() {
    let mut b = HingeBench::mock();
    b.side("lid", 60.0, 20.0, &SideHingeOptions::default())
        .unwrap();
    let report = b.report().unwrap();
    assert_eq!(format!("{}", report), report.to_text());
}
