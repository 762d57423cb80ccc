//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics.
//! This lets a test collect all failures in one pass.

use hinge_kernel::{KernelIntrospect, SolidHandle};
use hinge_types::{Axis, EdgeFinder};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Connectivity Oracles ────────────────────────────────────────────────────

/// Check that the solid is one connected body.
pub fn check_single_body(introspect: &dyn KernelIntrospect, solid: &SolidHandle) -> OracleVerdict {
    match introspect.component_count(solid) {
        Ok(1) => OracleVerdict::pass_val("single_body", "1 connected body".to_string(), 1.0),
        Ok(n) => OracleVerdict::fail_val(
            "single_body",
            format!("{} disconnected bodies (expected 1)", n),
            n as f64,
        ),
        Err(e) => OracleVerdict::fail("single_body", format!("kernel error: {}", e)),
    }
}

// ── Extent Oracles ──────────────────────────────────────────────────────────

/// Check that the solid spans exactly `expected` along `axis`.
pub fn check_extent(
    introspect: &dyn KernelIntrospect,
    solid: &SolidHandle,
    axis: Axis,
    expected: f64,
    tol: f64,
) -> OracleVerdict {
    let name = "extent";
    let bbox = match introspect.bounding_box(solid) {
        Ok(b) => b,
        Err(e) => return OracleVerdict::fail(name, format!("kernel error: {}", e)),
    };
    let actual = bbox.extent(axis);
    if (actual - expected).abs() <= tol {
        OracleVerdict::pass_val(
            name,
            format!("{:?} extent {:.4} (expected {:.4})", axis, actual, expected),
            actual,
        )
    } else {
        OracleVerdict::fail_val(
            name,
            format!(
                "{:?} extent {:.4}, expected {:.4} (tol={})",
                axis, actual, expected, tol
            ),
            actual,
        )
    }
}

/// Check that the solid sits on the print bed (lowest point at Z = 0).
pub fn check_rests_on_bed(
    introspect: &dyn KernelIntrospect,
    solid: &SolidHandle,
    tol: f64,
) -> OracleVerdict {
    let name = "rests_on_bed";
    match introspect.bounding_box(solid) {
        Ok(b) if b.min[2].abs() <= tol => {
            OracleVerdict::pass_val(name, "lowest point at Z=0".to_string(), b.min[2])
        }
        Ok(b) => OracleVerdict::fail_val(
            name,
            format!("lowest point at Z={:.4} (tol={})", b.min[2], tol),
            b.min[2],
        ),
        Err(e) => OracleVerdict::fail(name, format!("kernel error: {}", e)),
    }
}

/// Check that the solid is symmetric about the XZ plane in its bounds, as
/// a hinge with alternating leaves is.
pub fn check_y_symmetric(
    introspect: &dyn KernelIntrospect,
    solid: &SolidHandle,
    tol: f64,
) -> OracleVerdict {
    let name = "y_symmetric";
    match introspect.bounding_box(solid) {
        Ok(b) => {
            let skew = b.min[1] + b.max[1];
            if skew.abs() <= tol {
                OracleVerdict::pass_val(
                    name,
                    format!("Y spans ±{:.4}", b.max[1]),
                    b.max[1],
                )
            } else {
                OracleVerdict::fail_val(
                    name,
                    format!("Y spans {:.4} .. {:.4}", b.min[1], b.max[1]),
                    skew,
                )
            }
        }
        Err(e) => OracleVerdict::fail(name, format!("kernel error: {}", e)),
    }
}

// ── Edge Oracles ────────────────────────────────────────────────────────────

/// Check how many edges of the solid an edge finder selects.
pub fn check_edge_selection(
    introspect: &dyn KernelIntrospect,
    solid: &SolidHandle,
    finder: &EdgeFinder,
    expected: usize,
) -> OracleVerdict {
    let name = "edge_selection";
    let edges = match introspect.list_edges(solid) {
        Ok(e) => e,
        Err(e) => return OracleVerdict::fail(name, format!("kernel error: {}", e)),
    };
    let selected = finder.select(&edges).len();
    if selected == expected {
        OracleVerdict::pass_val(
            name,
            format!("{} of {} edges selected", selected, edges.len()),
            selected as f64,
        )
    } else {
        OracleVerdict::fail_val(
            name,
            format!(
                "{} of {} edges selected, expected {}",
                selected,
                edges.len(),
                expected
            ),
            selected as f64,
        )
    }
}

// ── Aggregate ───────────────────────────────────────────────────────────────

/// Run the checks every printable hinge must pass.
pub fn check_hinge(
    introspect: &dyn KernelIntrospect,
    solid: &SolidHandle,
    width: f64,
    tol: f64,
) -> Vec<OracleVerdict> {
    vec![
        check_single_body(introspect, solid),
        check_extent(introspect, solid, Axis::X, width, tol),
        check_rests_on_bed(introspect, solid, tol),
        check_y_symmetric(introspect, solid, tol),
    ]
}
