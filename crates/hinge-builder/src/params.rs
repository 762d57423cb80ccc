//! Hinge options and the dimensions derived from them.
//!
//! Options are what a caller (or a config file) provides; dims are the
//! validated, fully derived numbers the builders work from. Every check
//! happens here, before any kernel call.

use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::types::HingeError;

fn default_tolerance() -> f64 {
    0.4
}

fn default_n_couples() -> usize {
    2
}

fn default_edge_chamfer() -> Option<f64> {
    Some(0.12)
}

/// Options for [`make_side_hinge`](crate::make_side_hinge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SideHingeOptions {
    /// Barrel radius. Absent or zero means "as large as the height allows".
    #[serde(default)]
    pub hinge_radius: Option<f64>,
    /// Clearance between the moving parts.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Number of support pairs along the barrel.
    #[serde(default = "default_n_couples")]
    pub n_couples: usize,
    /// Clearance between a pillar and the barrel of the opposite side.
    #[serde(default = "default_tolerance")]
    pub back_tolerance: f64,
}

impl Default for SideHingeOptions {
    fn default() -> Self {
        Self {
            hinge_radius: None,
            tolerance: default_tolerance(),
            n_couples: default_n_couples(),
            back_tolerance: default_tolerance(),
        }
    }
}

/// Options for [`make_flat_hinge`](crate::make_flat_hinge).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlatHingeOptions {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_n_couples")]
    pub n_couples: usize,
    /// Chamfer on the top edges of the flaps. Absent or zero skips it.
    #[serde(default = "default_edge_chamfer")]
    pub edge_chamfer: Option<f64>,
}

impl Default for FlatHingeOptions {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            n_couples: default_n_couples(),
            edge_chamfer: default_edge_chamfer(),
        }
    }
}

fn require_positive(name: &str, value: f64) -> Result<f64, HingeError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(HingeError::invalid(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<f64, HingeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(HingeError::invalid(format!(
            "{name} must not be negative, got {value}"
        )))
    }
}

/// Width of one support (or flap) once the gaps between all elements are
/// taken out of the total width.
pub fn element_width(width: f64, tolerance: f64, n_couples: usize) -> Result<f64, HingeError> {
    if n_couples == 0 {
        return Err(HingeError::invalid("n_couples must be at least 1"));
    }
    let n_elements = 2 * n_couples;
    let n_cuts = n_elements - 1;
    let element = (width - tolerance * n_cuts as f64) / n_elements as f64;
    if element <= 0.0 {
        return Err(HingeError::invalid(format!(
            "{n_cuts} gaps of {tolerance} leave no room for {n_elements} elements in a width of {width}"
        )));
    }
    Ok(element)
}

/// Fully derived side hinge dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideHingeDims {
    pub height: f64,
    pub width: f64,
    pub radius: f64,
    pub tolerance: f64,
    pub back_tolerance: f64,
    pub n_couples: usize,
    pub support_width: f64,
    pub translation_step: f64,
    /// Horizontal reach of the support below the barrel.
    pub x0: f64,
    pub y0: f64,
    pub slope_length: f64,
    pub pillar_chamfer: f64,
}

impl SideHingeDims {
    pub fn new(height: f64, width: f64, options: &SideHingeOptions) -> Result<Self, HingeError> {
        let height = require_positive("height", height)?;
        let width = require_positive("width", width)?;
        let tolerance = require_non_negative("tolerance", options.tolerance)?;
        let back_tolerance = require_non_negative("back_tolerance", options.back_tolerance)?;

        let requested = match options.hinge_radius {
            Some(r) if r != 0.0 => require_positive("hinge_radius", r)?,
            _ => height,
        };
        let radius = (height / 2.0).min(requested);
        if radius <= tolerance {
            return Err(HingeError::invalid(format!(
                "hinge radius {radius} must exceed the tolerance {tolerance}"
            )));
        }
        if back_tolerance >= height / 2.0 {
            return Err(HingeError::invalid(format!(
                "back_tolerance {back_tolerance} must be smaller than half the height"
            )));
        }

        let support_width = element_width(width, tolerance, options.n_couples)?;
        let x0 = radius + radius / SQRT_2;
        let y0 = radius / SQRT_2;
        let rest = height / 2.0 - y0;

        Ok(Self {
            height,
            width,
            radius,
            tolerance,
            back_tolerance,
            n_couples: options.n_couples,
            support_width,
            translation_step: support_width + tolerance,
            x0,
            y0,
            slope_length: rest.min(x0),
            pillar_chamfer: (radius / 2.0).min(height / 4.0),
        })
    }

    pub fn hinge_width(&self) -> f64 {
        self.radius + self.back_tolerance
    }
}

/// Fully derived flat hinge dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatHingeDims {
    pub height: f64,
    pub width: f64,
    pub base_height: f64,
    pub radius: f64,
    pub tolerance: f64,
    pub n_couples: usize,
    pub flap_width: f64,
    pub flap_length: f64,
    pub translation_step: f64,
    pub edge_chamfer: Option<f64>,
}

impl FlatHingeDims {
    pub fn new(
        height: f64,
        width: f64,
        base_height: f64,
        options: &FlatHingeOptions,
    ) -> Result<Self, HingeError> {
        let height = require_positive("height", height)?;
        let width = require_positive("width", width)?;
        let base_height = require_positive("base_height", base_height)?;
        let tolerance = require_non_negative("tolerance", options.tolerance)?;
        let edge_chamfer = match options.edge_chamfer {
            Some(c) if c != 0.0 => Some(require_positive("edge_chamfer", c)?),
            _ => None,
        };

        let radius = height / 2.0;
        if radius <= tolerance {
            return Err(HingeError::invalid(format!(
                "hinge radius {radius} must exceed the tolerance {tolerance}"
            )));
        }
        let flap_width = element_width(width, tolerance, options.n_couples)?;

        Ok(Self {
            height,
            width,
            base_height,
            radius,
            tolerance,
            n_couples: options.n_couples,
            flap_width,
            flap_length: radius + tolerance,
            translation_step: flap_width + tolerance,
            edge_chamfer,
        })
    }

    pub fn hinge_width(&self) -> f64 {
        self.flap_length
    }
}
