//! Helper functions: error type and bounding box math.

use hinge_builder::HingeError;
use hinge_kernel::KernelError;
use hinge_types::BoundingBox;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("shape not found: {name}")]
    ShapeNotFound { name: String },

    #[error("build error: {0}")]
    Build(#[from] HingeError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },

    #[error("duplicate name: {name}")]
    DuplicateName { name: String },
}

// ── Bounding Box Math ───────────────────────────────────────────────────────

/// Largest per-coordinate difference between two boxes.
pub fn bbox_distance(a: &BoundingBox, b: &BoundingBox) -> f64 {
    (0..3)
        .map(|i| {
            (a.min[i] - b.min[i])
                .abs()
                .max((a.max[i] - b.max[i]).abs())
        })
        .fold(0.0, f64::max)
}

/// Format a box as `(x, y, z) -> (x, y, z)` with one decimal.
pub fn format_bbox(bbox: &BoundingBox) -> String {
    format!(
        "({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})",
        bbox.min[0], bbox.min[1], bbox.min[2], bbox.max[0], bbox.max[1], bbox.max[2],
    )
}
