//! 2D cross-sections of the hinge parts.
//!
//! Support and pillar profiles are drawn in (u, v) = (Y, Z) coordinates of
//! the YZ plane; spacer and barrel profiles in (X, radial) coordinates of
//! the XY plane before revolving about X.

use hinge_types::{draw, Drawing, Profile, ProfileError};

use crate::layout::spacer_offsets;
use crate::params::SideHingeDims;

/// The bracket under the barrel: a 45° slope ending in a flat foot.
pub fn support_profile(dims: &SideHingeDims) -> Result<Profile, ProfileError> {
    let r = dims.radius;
    let s = dims.slope_length;
    let mut pen = draw()
        .move_pointer_to([r, dims.height / 2.0])
        .h_line(-r)
        .polar_line(r, -135.0)
        .line(s, -s);
    if s < dims.x0 {
        pen = pen.h_line(dims.x0 - s);
    }
    pen.close()
}

/// The block behind the barrel that carries the load to the base.
pub fn pillar_profile(dims: &SideHingeDims) -> Result<Profile, ProfileError> {
    let r = dims.radius;
    let bt = dims.back_tolerance;
    let pc = dims.pillar_chamfer;
    let mut pen = draw().h_line(r);
    if bt != 0.0 {
        pen = pen.line(bt, -bt);
    }
    let pillar = pen
        .v_line(-dims.height / 2.0 + bt)
        .h_line(pc - r - bt)
        .line(-pc, pc)
        .close()?;
    Ok(pillar.translated(0.0, dims.height / 2.0))
}

/// Support and pillar with the bore for the opposite barrel removed.
pub fn support_drawing(dims: &SideHingeDims) -> Result<Drawing, ProfileError> {
    let bore = Profile::circle(dims.radius - dims.tolerance)?.translated(0.0, dims.height / 2.0);
    Ok(Drawing::from(support_profile(dims)?)
        .fuse(pillar_profile(dims)?)
        .cut(bore))
}

/// The gap that splits the barrel into free-turning sections, near X = 0.
/// Its middle third is slanted so the revolved gap is conical and prints
/// without support.
pub fn spacer_profile(radius: f64, tolerance: f64) -> Result<Profile, ProfileError> {
    let third = radius / 3.0;
    draw()
        .move_pointer_to([-tolerance / 2.0, radius])
        .v_line(-third)
        .line(-third, -third)
        .v_line(-third)
        .h_line(tolerance)
        .v_line(third)
        .line(third, third)
        .v_line(third)
        .close()
}

/// Half cross-section of the barrel, ready to revolve about X.
///
/// With `with_spacers` the notches between elements are cut out; without
/// them this is the solid cylinder used to trim flaps.
pub fn barrel_drawing(
    width: f64,
    radius: f64,
    tolerance: f64,
    n_couples: usize,
    step: f64,
    with_spacers: bool,
) -> Result<Drawing, ProfileError> {
    let mut barrel =
        Drawing::from(Profile::rounded_rectangle(width, radius, 0.0)?).translate(0.0, radius / 2.0);
    // A zero tolerance leaves no gap to cut
    if with_spacers && tolerance > 0.0 {
        let spacer = spacer_profile(radius, tolerance)?;
        for offset in spacer_offsets(n_couples, step) {
            barrel = barrel.cut(spacer.translated(offset, 0.0));
        }
    }
    Ok(barrel)
}
