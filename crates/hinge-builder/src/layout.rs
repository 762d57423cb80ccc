//! Placement of the repeated elements along the barrel (X axis).
//!
//! Everything here is pure arithmetic on derived dimensions; the builders
//! turn the placements into kernel translations.

use serde::Serialize;

use crate::params::{FlatHingeDims, SideHingeDims};

/// Where a support copy goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SupportPlacement {
    /// Translation along X applied to the freshly extruded support.
    pub x_offset: f64,
    /// Reflected through the XZ plane before being moved.
    pub mirrored: bool,
}

/// Which side of the barrel axis a flap reaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FlapSide {
    /// Towards +Y.
    Upper,
    /// Towards -Y.
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlapPlacement {
    pub center_x: f64,
    pub side: FlapSide,
}

/// X positions of the gaps cut into the barrel: one at the centre and
/// pairs at `±i * step`.
pub fn spacer_offsets(n_couples: usize, step: f64) -> Vec<f64> {
    let mut offsets = vec![0.0];
    for i in 1..n_couples {
        let shift = i as f64 * step;
        offsets.push(shift);
        offsets.push(-shift);
    }
    offsets
}

/// Support copies in assembly order: each couple is a support followed by
/// its mirrored partner one step to the left.
pub fn support_placements(dims: &SideHingeDims) -> Vec<SupportPlacement> {
    let step = dims.translation_step;
    let first = -step * (dims.n_couples as f64 - 1.0);
    (0..dims.n_couples)
        .flat_map(|i| {
            let shift = 2.0 * i as f64 * step;
            [
                SupportPlacement {
                    x_offset: first + shift,
                    mirrored: false,
                },
                SupportPlacement {
                    x_offset: first - step + shift,
                    mirrored: true,
                },
            ]
        })
        .collect()
}

/// Flap copies in assembly order, alternating upper and lower.
pub fn flap_placements(dims: &FlatHingeDims) -> Vec<FlapPlacement> {
    let step = dims.translation_step;
    let n = dims.n_couples as f64;
    (0..dims.n_couples)
        .flat_map(|k| {
            let shift = 2.0 * k as f64 * step;
            [
                FlapPlacement {
                    center_x: -step * (n - 1.5) + shift,
                    side: FlapSide::Upper,
                },
                FlapPlacement {
                    center_x: -step * (n - 0.5) + shift,
                    side: FlapSide::Lower,
                },
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{FlatHingeOptions, SideHingeOptions};
    use approx::assert_relative_eq;

    fn side_dims(n_couples: usize) -> SideHingeDims {
        let options = SideHingeOptions {
            n_couples,
            ..Default::default()
        };
        SideHingeDims::new(12.0, 20.0, &options).unwrap()
    }

    #[test]
    fn test_one_spacer_per_gap() {
        assert_eq!(spacer_offsets(1, 5.0), vec![0.0]);
        assert_eq!(spacer_offsets(3, 2.0), vec![0.0, 2.0, -2.0, 4.0, -4.0]);
    }

    #[test]
    fn test_supports_fill_the_width() {
        let dims = side_dims(2);
        let placements = support_placements(&dims);
        assert_eq!(placements.len(), 4);

        // The base support spans [tolerance / 2, tolerance / 2 + support_width]
        let lo = placements
            .iter()
            .map(|p| p.x_offset + dims.tolerance / 2.0)
            .fold(f64::INFINITY, f64::min);
        let hi = placements
            .iter()
            .map(|p| p.x_offset + dims.tolerance / 2.0 + dims.support_width)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(lo, -10.0, epsilon = 1e-9);
        assert_relative_eq!(hi, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_supports_alternate_and_are_evenly_spaced() {
        let dims = side_dims(3);
        let mut placements = support_placements(&dims);
        placements.sort_by(|a, b| a.x_offset.total_cmp(&b.x_offset));
        for pair in placements.windows(2) {
            assert_ne!(pair[0].mirrored, pair[1].mirrored);
            assert_relative_eq!(
                pair[1].x_offset - pair[0].x_offset,
                dims.translation_step,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_single_couple_has_unshifted_support() {
        let placements = support_placements(&side_dims(1));
        assert_eq!(placements[0].x_offset, 0.0);
        assert!(!placements[0].mirrored);
        assert!(placements[1].mirrored);
    }

    #[test]
    fn test_flaps_alternate_sides_within_width() {
        let dims = FlatHingeDims::new(12.0, 20.0, 2.0, &FlatHingeOptions::default()).unwrap();
        let flaps = flap_placements(&dims);
        assert_eq!(flaps.len(), 4);
        assert_eq!(
            flaps.iter().filter(|f| f.side == FlapSide::Upper).count(),
            2
        );

        let half = dims.flap_width / 2.0;
        let lo = flaps.iter().map(|f| f.center_x - half).fold(f64::INFINITY, f64::min);
        let hi = flaps
            .iter()
            .map(|f| f.center_x + half)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(lo, -10.0, epsilon = 1e-9);
        assert_relative_eq!(hi, 10.0, epsilon = 1e-9);
    }
}
