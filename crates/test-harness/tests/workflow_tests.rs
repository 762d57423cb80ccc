//! Tests for the HingeBench workflow API.

use approx::assert_relative_eq;
use hinge_builder::{FlatHingeOptions, SideHingeOptions};
use test_harness::{HarnessError, HingeBench};

#[test]
fn test_side_registers_named_shape() {
    let mut b = HingeBench::mock();
    b.side("lid", 60.0, 20.0, &SideHingeOptions::default())
        .unwrap();
    b.assert_shape_count(1).unwrap();
    assert_eq!(b.names(), ["lid"]);
    assert!(b.solid_handle("lid").is_ok());
}

#[test]
fn test_chained_builds_keep_order() {
    let mut b = HingeBench::mock();
    b.side("a", 20.0, 20.0, &SideHingeOptions::default())
        .unwrap()
        .flat("b", 12.0, 20.0, 2.0, &FlatHingeOptions::default())
        .unwrap();
    assert_eq!(b.names(), ["a", "b"]);
    assert_eq!(
        b.history(),
        [
            ("side".to_string(), "a".to_string()),
            ("flat".to_string(), "b".to_string())
        ]
    );
}

#[test]
fn test_unknown_name_returns_error() {
    let b = HingeBench::mock();
    assert!(matches!(
        b.solid_handle("nonexistent"),
        Err(HarnessError::ShapeNotFound { .. })
    ));
}

#[test]
fn test_duplicate_name_returns_error() {
    let mut b = HingeBench::mock();
    b.side("h", 20.0, 20.0, &SideHingeOptions::default())
        .unwrap();
    let result = b.flat("h", 12.0, 20.0, 2.0, &FlatHingeOptions::default());
    assert!(matches!(result, Err(HarnessError::DuplicateName { .. })));
}

#[test]
fn test_build_errors_surface_as_harness_errors() {
    let mut b = HingeBench::mock();
    let result = b.side("tiny", 20.0, 0.5, &SideHingeOptions::default());
    assert!(matches!(result, Err(HarnessError::Build(_))));
    b.assert_shape_count(0).unwrap();
}

#[test]
fn test_auto_check_passes_for_valid_hinges() {
    let mut b = HingeBench::mock().with_auto_check();
    b.side("side", 30.0, 25.0, &SideHingeOptions::default())
        .unwrap();
    b.flat("flat", 10.0, 25.0, 1.5, &FlatHingeOptions::default())
        .unwrap();
}

#[test]
fn test_translated_copy_keeps_hinge_width() {
    let mut b = HingeBench::mock();
    b.flat("flat", 12.0, 20.0, 2.0, &FlatHingeOptions::default())
        .unwrap()
        .translated("moved", "flat", [0.0, 0.0, 3.0])
        .unwrap()
        .shifted_x("slid", "flat", -4.0)
        .unwrap();

    assert_eq!(b.hinge_width("moved").unwrap(), b.hinge_width("flat").unwrap());
    let moved = b.bounding_box("moved").unwrap();
    assert_relative_eq!(moved.min[2], 3.0, epsilon = 1e-9);
    let slid = b.bounding_box("slid").unwrap();
    assert_relative_eq!(slid.min[0], -14.0, epsilon = 1e-9);
}

#[test]
fn test_failed_build_unwraps_to_error() {
    let mut b = HingeBench::mock();
    b.side("lid", 60.0, 20.0, &SideHingeOptions::default())
        .unwrap();
    let err = b
        .flat("tray", 12.0, 0.5, 2.0, &FlatHingeOptions::default())
        .unwrap_err();
    assert!(matches!(err, HarnessError::Build(_)));

    let debug = format!("{:?}", b);
    assert!(debug.starts_with("HingeBench"), "{}", debug);
    assert!(debug.contains("\"lid\""), "{}", debug);
    assert!(!debug.contains("tray"), "{}", debug);
}

#[test]
fn test_history_records_samples_and_config() {
    let mut b = HingeBench::mock();
    b.samples()
        .unwrap()
        .config("[[hinge]]\nname = \"lid\"\nkind = \"side\"\nheight = 60.0\nwidth = 20.0\n")
        .unwrap();
    assert_eq!(
        b.history(),
        [
            ("samples".to_string(), "built".to_string()),
            ("config".to_string(), "built".to_string())
        ]
    );
}
