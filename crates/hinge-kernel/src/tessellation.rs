//! Measurement helpers over truck solids.
//!
//! Bounds come from a triangulation of the solid so curved faces are
//! accounted for; the mesh itself never leaves this module.

use std::collections::HashSet;

use hinge_types::{BoundingBox, EdgeKind};
use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::{MeshableShape, MeshedShape};
use truck_modeling::geometry::Curve;
use truck_modeling::{BoundedCurve, ParametricCurve};

use crate::types::*;

type TruckSolid = truck_modeling::Solid;

/// Axis-aligned bounds of the triangulated solid.
pub fn solid_bounds(solid: &TruckSolid, tolerance: f64) -> Result<BoundingBox, KernelError> {
    let mesh = solid.triangulation(tolerance).to_polygon();
    BoundingBox::from_points(mesh.positions().iter().map(|p| [p[0], p[1], p[2]])).ok_or_else(
        || KernelError::InvalidGeometry {
            reason: "triangulation produced no vertices".to_string(),
        },
    )
}

/// Geometry of every distinct edge of the solid.
pub fn solid_edges(solid: &TruckSolid) -> Vec<EdgeGeometry> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();

    for shell in solid.boundaries().iter() {
        for edge in shell.edge_iter() {
            // Each edge appears in two faces
            if !seen.insert(edge.id()) {
                continue;
            }
            let front = edge.front().point();
            let back = edge.back().point();
            let curve = edge.oriented_curve();
            let (t0, t1) = curve.range_tuple();
            let mid = curve.subs((t0 + t1) / 2.0);
            let kind = match curve {
                Curve::Line(_) => EdgeKind::Line,
                _ => EdgeKind::Curve,
            };
            edges.push(EdgeGeometry {
                kind,
                start: [front[0], front[1], front[2]],
                end: [back[0], back[1], back[2]],
                midpoint: [mid[0], mid[1], mid[2]],
            });
        }
    }

    edges
}
