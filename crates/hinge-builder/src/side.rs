//! Side hinge: a barrel carried by pillars, printed standing on its side.

use std::f64::consts::PI;

use hinge_kernel::SolidHandle;
use hinge_types::PlaneName;
use tracing::{debug, info, instrument};

use crate::kernel_ext::{KernelBundle, KernelExt};
use crate::layout::support_placements;
use crate::params::{SideHingeDims, SideHingeOptions};
use crate::profiles::{barrel_drawing, support_drawing};
use crate::types::{HingeError, HingeResult};

/// Revolve the barrel cross-section into a cylinder along X through the
/// origin.
pub(crate) fn revolve_barrel(
    kb: &mut dyn KernelBundle,
    width: f64,
    radius: f64,
    tolerance: f64,
    n_couples: usize,
    step: f64,
    with_spacers: bool,
) -> Result<SolidHandle, HingeError> {
    let sketch = barrel_drawing(width, radius, tolerance, n_couples, step, with_spacers)?
        .sketch_on_plane(PlaneName::XY, 0.0);
    Ok(kb.revolve(&sketch, [0.0; 3], [1.0, 0.0, 0.0], 2.0 * PI)?)
}

/// Build a side hinge of the given height (Z) and width (X).
///
/// The barrel axis runs along X at half height. Supports alternate between
/// the two leaves of the hinge: every other one is mirrored through the XZ
/// plane so its pillar stands on the opposite side.
#[instrument(skip(kb))]
pub fn make_side_hinge(
    kb: &mut dyn KernelBundle,
    height: f64,
    width: f64,
    options: &SideHingeOptions,
) -> Result<HingeResult, HingeError> {
    let dims = SideHingeDims::new(height, width, options)?;
    debug!(
        radius = dims.radius,
        support_width = dims.support_width,
        step = dims.translation_step,
        "side hinge dimensions"
    );

    let barrel = revolve_barrel(
        kb,
        dims.width,
        dims.radius,
        dims.tolerance,
        dims.n_couples,
        dims.translation_step,
        true,
    )?;
    let mut hinge = kb.translate_z(&barrel, dims.height / 2.0)?;

    let support_sketch =
        support_drawing(&dims)?.sketch_on_plane(PlaneName::YZ, dims.tolerance / 2.0);
    let support = kb.extrude(&support_sketch, dims.support_width)?;
    let mirrored = kb.mirror(&support, PlaneName::XZ)?;

    for placement in support_placements(&dims) {
        let base = if placement.mirrored {
            &mirrored
        } else {
            &support
        };
        let copy = kb.translate_x(base, placement.x_offset)?;
        hinge = kb.fuse(&hinge, &copy)?;
    }

    info!(hinge_width = dims.hinge_width(), "side hinge built");
    Ok(HingeResult {
        hinge,
        hinge_width: dims.hinge_width(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hinge_kernel::{KernelIntrospect, MockKernel, MockOp};
    use hinge_types::Axis;

    fn sample_options() -> SideHingeOptions {
        SideHingeOptions {
            hinge_radius: Some(6.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_sample_side_hinge_dimensions() {
        let mut kernel = MockKernel::new();
        let result = make_side_hinge(&mut kernel, 60.0, 20.0, &sample_options()).unwrap();
        assert_relative_eq!(result.hinge_width, 6.4, epsilon = 1e-12);

        let bbox = kernel.bounding_box(&result.hinge).unwrap();
        assert_relative_eq!(bbox.extent(Axis::X), 20.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.min[2], 0.0, epsilon = 1e-9);
        assert_relative_eq!(bbox.max[1], 6.4, epsilon = 1e-9);
        assert_relative_eq!(bbox.min[1], -6.4, epsilon = 1e-9);
    }

    #[test]
    fn test_barrel_is_revolved_about_x() {
        let mut kernel = MockKernel::new();
        make_side_hinge(&mut kernel, 60.0, 20.0, &sample_options()).unwrap();

        let revolves: Vec<_> = kernel
            .operations()
            .iter()
            .filter_map(|op| match op {
                MockOp::Revolve {
                    axis_direction,
                    angle,
                    ..
                } => Some((*axis_direction, *angle)),
                _ => None,
            })
            .collect();
        assert_eq!(revolves, vec![([1.0, 0.0, 0.0], 2.0 * PI)]);
        assert_eq!(
            kernel.count_ops(|op| matches!(op, MockOp::Mirror { plane: PlaneName::XZ })),
            1
        );
    }

    #[test]
    fn test_each_couple_adds_two_supports() {
        for n_couples in 1..4 {
            let mut kernel = MockKernel::new();
            let options = SideHingeOptions {
                n_couples,
                ..sample_options()
            };
            make_side_hinge(&mut kernel, 60.0, 20.0, &options).unwrap();
            assert_eq!(
                kernel.count_ops(|op| matches!(op, MockOp::Fuse)),
                2 * n_couples
            );
        }
    }

    #[test]
    fn test_invalid_width_makes_no_kernel_calls() {
        let mut kernel = MockKernel::new();
        let options = SideHingeOptions {
            tolerance: 1.0,
            ..sample_options()
        };
        let err = make_side_hinge(&mut kernel, 60.0, 3.0, &options).unwrap_err();
        assert!(matches!(err, HingeError::InvalidParameter { .. }));
        assert!(kernel.operations().is_empty());
    }
}
