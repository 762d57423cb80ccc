use tracing::instrument;

use crate::flat::make_flat_hinge;
use crate::kernel_ext::{KernelBundle, KernelExt};
use crate::params::{FlatHingeOptions, SideHingeOptions};
use crate::side::make_side_hinge;
use crate::types::{HingeError, NamedShape};

/// The two demonstration hinges, side by side along X.
#[instrument(skip(kb))]
pub fn sample_hinges(kb: &mut dyn KernelBundle) -> Result<Vec<NamedShape>, HingeError> {
    let side_options = SideHingeOptions {
        hinge_radius: Some(6.0),
        ..Default::default()
    };
    let side = make_side_hinge(kb, 60.0, 20.0, &side_options)?;
    let flat = make_flat_hinge(kb, 12.0, 20.0, 2.0, &FlatHingeOptions::default())?;

    Ok(vec![
        NamedShape {
            shape: kb.translate_x(&side.hinge, 15.0)?,
            name: "Side hinge".to_string(),
        },
        NamedShape {
            shape: kb.translate_x(&flat.hinge, -15.0)?,
            name: "Flat hinge".to_string(),
        },
    ])
}
