//! TruckKernel scenario tests.
//!
//! These test against real truck geometry. Full hinges need booleans on
//! coplanar faces and revolves of profiles touching the axis, which truck
//! does not handle reliably; those tests are #[ignore]d.

use hinge_builder::profiles::{pillar_profile, spacer_profile, support_drawing};
use hinge_builder::{FlatHingeOptions, HingeError, SideHingeDims, SideHingeOptions};
use hinge_types::{Drawing, PlaneName};
use test_harness::assertions::assert_all_pass;
use test_harness::{oracle, HarnessError, HingeBench};

fn sample_dims() -> SideHingeDims {
    let options = SideHingeOptions {
        hinge_radius: Some(6.0),
        ..Default::default()
    };
    SideHingeDims::new(60.0, 20.0, &options).unwrap()
}

#[test]
fn test_truck_rejects_invalid_parameters() {
    let mut b = HingeBench::truck();
    let err = b
        .side("side", 60.0, 0.0, &SideHingeOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Build(HingeError::InvalidParameter { .. })
    ));

    let options = FlatHingeOptions {
        n_couples: 0,
        ..Default::default()
    };
    let err = b.flat("flat", 12.0, 20.0, 2.0, &options).unwrap_err();
    assert!(matches!(
        err,
        HarnessError::Build(HingeError::InvalidParameter { .. })
    ));
    b.assert_shape_count(0).unwrap();
}

#[test]
fn test_truck_pillar_extrude() {
    let dims = sample_dims();
    let mut b = HingeBench::truck();
    let sketch = Drawing::from(pillar_profile(&dims).unwrap()).sketch_on_plane(PlaneName::YZ, 0.0);
    let pillar = b.kernel_mut().extrude(&sketch, dims.support_width).unwrap();

    let introspect = b.kernel().as_introspect();
    let bbox = introspect.bounding_box(&pillar).unwrap();
    assert!((bbox.max[0] - dims.support_width).abs() < 1e-6, "{:?}", bbox);
    assert!(bbox.min[1].abs() < 1e-6, "{:?}", bbox);
    assert!((bbox.max[1] - 6.4).abs() < 1e-6, "{:?}", bbox);
    assert!(bbox.min[2].abs() < 1e-6, "{:?}", bbox);
    assert!((bbox.max[2] - 30.0).abs() < 1e-6, "{:?}", bbox);
    assert!(oracle::check_single_body(introspect, &pillar).passed);
}

#[test]
fn test_truck_spacer_extrude() {
    let mut b = HingeBench::truck();
    let sketch = Drawing::from(spacer_profile(6.0, 0.4).unwrap()).sketch_on_plane(PlaneName::XY, 0.0);
    let spacer = b.kernel_mut().extrude(&sketch, 1.0).unwrap();

    let bbox = b.kernel().as_introspect().bounding_box(&spacer).unwrap();
    assert!((bbox.min[0] + 2.2).abs() < 1e-6, "{:?}", bbox);
    assert!((bbox.max[0] - 0.2).abs() < 1e-6, "{:?}", bbox);
    assert!(bbox.min[1].abs() < 1e-6, "{:?}", bbox);
    assert!((bbox.max[1] - 6.0).abs() < 1e-6, "{:?}", bbox);
}

#[test]
#[ignore = "truck 0.4: coplanar boolean faces fail"]
fn test_truck_support_drawing() {
    let dims = sample_dims();
    let mut b = HingeBench::truck();
    let sketch = support_drawing(&dims).unwrap().sketch_on_plane(PlaneName::YZ, 0.0);
    let support = b.kernel_mut().extrude(&sketch, dims.support_width).unwrap();
    assert!(oracle::check_single_body(b.kernel().as_introspect(), &support).passed);
}

#[test]
#[ignore = "truck 0.4: revolving a profile edge on the axis degenerates"]
fn test_truck_side_hinge() {
    let mut b = HingeBench::truck();
    let options = SideHingeOptions {
        hinge_radius: Some(6.0),
        ..Default::default()
    };
    b.side("side", 60.0, 20.0, &options).unwrap();
    b.assert_bounding_box("side", [-10.0, -6.4, 0.0], [10.0, 6.4, 36.0], 1e-3)
        .unwrap();
    assert_all_pass(&b.check_hinge("side").unwrap()).unwrap();
}

#[test]
#[ignore = "truck 0.4: coplanar boolean faces fail"]
fn test_truck_flat_hinge() {
    let mut b = HingeBench::truck();
    b.flat("flat", 12.0, 20.0, 2.0, &FlatHingeOptions::default())
        .unwrap();
    b.assert_hinge_width("flat", 6.4, 1e-12).unwrap();
    assert_all_pass(&b.check_hinge("flat").unwrap()).unwrap();
}
