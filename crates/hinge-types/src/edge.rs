//! Edge descriptions and the declarative edge selector used by chamfers.

use serde::{Deserialize, Serialize};

use crate::plane::{dot, norm, sub, Axis, Plane, PlaneName};

/// Tolerance used when testing edge direction and plane membership.
pub const EDGE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    Line,
    Curve,
}

/// World-space geometry of one edge of a solid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeGeometry {
    pub kind: EdgeKind,
    pub start: [f64; 3],
    pub end: [f64; 3],
    /// A point halfway along the edge (off the chord for curved edges).
    pub midpoint: [f64; 3],
}

impl EdgeGeometry {
    pub fn line(start: [f64; 3], end: [f64; 3]) -> Self {
        Self {
            kind: EdgeKind::Line,
            start,
            end,
            midpoint: [
                (start[0] + end[0]) / 2.0,
                (start[1] + end[1]) / 2.0,
                (start[2] + end[2]) / 2.0,
            ],
        }
    }

    /// Unit direction of a straight edge; `None` for curves or zero length.
    pub fn direction(&self) -> Option<[f64; 3]> {
        if self.kind != EdgeKind::Line {
            return None;
        }
        let d = sub(self.end, self.start);
        let len = norm(d);
        (len > EDGE_TOLERANCE).then(|| [d[0] / len, d[1] / len, d[2] / len])
    }
}

/// One predicate of an [`EdgeFinder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EdgeFilter {
    /// Straight edge parallel to the axis (either sense).
    InDirection { axis: Axis },
    /// Edge lying entirely in the named plane shifted by `offset`.
    InPlane { plane: PlaneName, offset: f64 },
    /// Edge rejected by the nested finder.
    Not { finder: EdgeFinder },
}

impl EdgeFilter {
    fn matches(&self, edge: &EdgeGeometry) -> bool {
        match self {
            EdgeFilter::InDirection { axis } => edge
                .direction()
                .is_some_and(|d| dot(d, axis.vector()).abs() >= 1.0 - EDGE_TOLERANCE),
            EdgeFilter::InPlane { plane, offset } => {
                let plane = Plane::named(*plane, *offset);
                [edge.start, edge.midpoint, edge.end]
                    .iter()
                    .all(|&p| plane.contains(p, EDGE_TOLERANCE))
            }
            EdgeFilter::Not { finder } => !finder.matches(edge),
        }
    }
}

/// Conjunction of edge filters, built fluently:
///
/// ```
/// use hinge_types::{Axis, EdgeFinder, PlaneName};
///
/// let finder = EdgeFinder::new()
///     .in_direction(Axis::X)
///     .in_plane(PlaneName::XY, 2.0)
///     .not(|e| e.in_plane(PlaneName::ZX, 6.4));
/// assert_eq!(finder.filters().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeFinder {
    filters: Vec<EdgeFilter>,
}

impl EdgeFinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_direction(mut self, axis: Axis) -> Self {
        self.filters.push(EdgeFilter::InDirection { axis });
        self
    }

    pub fn in_plane(mut self, plane: PlaneName, offset: f64) -> Self {
        self.filters.push(EdgeFilter::InPlane { plane, offset });
        self
    }

    pub fn not(mut self, build: impl FnOnce(EdgeFinder) -> EdgeFinder) -> Self {
        self.filters.push(EdgeFilter::Not {
            finder: build(EdgeFinder::new()),
        });
        self
    }

    pub fn filters(&self) -> &[EdgeFilter] {
        &self.filters
    }

    /// An empty finder matches every edge.
    pub fn matches(&self, edge: &EdgeGeometry) -> bool {
        self.filters.iter().all(|f| f.matches(edge))
    }

    /// Indices of the matching edges.
    pub fn select(&self, edges: &[EdgeGeometry]) -> Vec<usize> {
        edges
            .iter()
            .enumerate()
            .filter(|(_, e)| self.matches(e))
            .map(|(i, _)| i)
            .collect()
    }
}
