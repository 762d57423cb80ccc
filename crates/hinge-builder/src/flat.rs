//! Flat hinge: interleaved flaps lying on the print bed around a barrel.

use hinge_kernel::KernelError;
use hinge_types::{fuse_all, Axis, Drawing, EdgeFinder, PlaneName, Profile};
use tracing::{debug, info, instrument, warn};

use crate::kernel_ext::{KernelBundle, KernelExt};
use crate::layout::{flap_placements, FlapSide};
use crate::params::{FlatHingeDims, FlatHingeOptions};
use crate::side::revolve_barrel;
use crate::types::{HingeError, HingeResult};

/// Top edges of the flaps running along the barrel, excluding the outer
/// edges at the flap tips.
pub fn flap_edge_finder(dims: &FlatHingeDims) -> EdgeFinder {
    EdgeFinder::new()
        .in_direction(Axis::X)
        .in_plane(PlaneName::XY, dims.base_height)
        .not(|e| e.in_plane(PlaneName::XZ, dims.flap_length))
        .not(|e| e.in_plane(PlaneName::ZX, dims.flap_length))
}

fn flaps_drawing(dims: &FlatHingeDims) -> Result<Drawing, HingeError> {
    let flap = Profile::rounded_rectangle(dims.flap_width, dims.flap_length, 0.0)?;
    let half = dims.flap_length / 2.0;
    let flaps = flap_placements(dims).into_iter().map(|placement| {
        let dy = match placement.side {
            FlapSide::Upper => half,
            FlapSide::Lower => -half,
        };
        Drawing::from(flap.translated(placement.center_x, dy))
    });
    fuse_all(flaps).ok_or_else(|| HingeError::invalid("flat hinge has no flaps"))
}

/// Build a flat hinge of the given barrel height (Z) and width (X), with
/// flaps `base_height` thick.
///
/// The barrel rests on the XY plane; flaps alternate between +Y and -Y and
/// are trimmed by the barrel envelope so the leaves turn freely.
#[instrument(skip(kb))]
pub fn make_flat_hinge(
    kb: &mut dyn KernelBundle,
    height: f64,
    width: f64,
    base_height: f64,
    options: &FlatHingeOptions,
) -> Result<HingeResult, HingeError> {
    let dims = FlatHingeDims::new(height, width, base_height, options)?;
    debug!(
        radius = dims.radius,
        flap_width = dims.flap_width,
        flap_length = dims.flap_length,
        step = dims.translation_step,
        "flat hinge dimensions"
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
    let barrel = kb.translate_z(&barrel, dims.radius)?;

    let envelope = revolve_barrel(
        kb,
        dims.width,
        dims.radius,
        dims.tolerance,
        dims.n_couples,
        dims.translation_step,
        false,
    )?;
    let envelope = kb.translate_z(&envelope, dims.radius)?;

    let flaps_sketch = flaps_drawing(&dims)?.sketch_on_plane(PlaneName::XY, 0.0);
    let flaps = kb.extrude(&flaps_sketch, dims.base_height)?;
    let flaps = kb.cut(&flaps, &envelope)?;

    let mut hinge = kb.fuse(&barrel, &flaps)?;

    if let Some(distance) = dims.edge_chamfer {
        match kb.chamfer(&hinge, distance, &flap_edge_finder(&dims)) {
            Ok(chamfered) => hinge = chamfered,
            Err(KernelError::NotSupported { operation }) => {
                warn!(%operation, "kernel cannot chamfer, leaving flap edges sharp");
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(hinge_width = dims.hinge_width(), "flat hinge built");
    Ok(HingeResult {
        hinge,
        hinge_width: dims.hinge_width(),
    })
}
