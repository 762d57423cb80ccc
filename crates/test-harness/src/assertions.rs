//! Rich assertion helpers with diagnostic output.
//!
//! Every failure includes the context label, expected vs actual values and
//! the tolerance used.

use hinge_builder::KernelBundle;
use hinge_kernel::SolidHandle;
use hinge_types::BoundingBox;

use crate::helpers::{bbox_distance, format_bbox, HarnessError};
use crate::oracle::OracleVerdict;

/// Assert the solid's bounding box matches expected values within tolerance.
pub fn assert_bounding_box(
    kb: &dyn KernelBundle,
    solid: &SolidHandle,
    expected_min: [f64; 3],
    expected_max: [f64; 3],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = kb.as_introspect().bounding_box(solid)?;
    let expected = BoundingBox::new(expected_min, expected_max);

    if bbox_distance(&actual, &expected) <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] bounding box: expected {}, got {} (tol={})",
                ctx,
                format_bbox(&expected),
                format_bbox(&actual),
                tol,
            ),
        })
    }
}

/// Assert the solid is a single connected body.
pub fn assert_single_body(
    kb: &dyn KernelBundle,
    solid: &SolidHandle,
    ctx: &str,
) -> Result<(), HarnessError> {
    let count = kb.as_introspect().component_count(solid)?;
    if count == 1 {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected 1 connected body, got {}", ctx, count),
        })
    }
}

/// Assert two lengths agree within tolerance.
pub fn assert_length(actual: f64, expected: f64, tol: f64, ctx: &str) -> Result<(), HarnessError> {
    if (actual - expected).abs() <= tol {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {:.4}, got {:.4} (tol={})",
                ctx, expected, actual, tol
            ),
        })
    }
}

/// Turn the first failing verdict into an error.
pub fn assert_all_pass(verdicts: &[OracleVerdict]) -> Result<(), HarnessError> {
    match verdicts.iter().find(|v| !v.passed) {
        None => Ok(()),
        Some(v) => Err(HarnessError::OracleFailure {
            oracle: v.oracle_name.clone(),
            detail: v.detail.clone(),
        }),
    }
}
