//! MockKernel: deterministic test double implementing Kernel + KernelIntrospect.
//!
//! Solids are tracked as a list of axis-aligned pieces (one per swept
//! profile) plus the edges of those pieces. Booleans never split pieces:
//! a union concatenates them and a cut keeps the base unchanged, so bounds
//! are the envelope a real kernel would produce before trimming. Every call
//! is appended to an operation log for assertions.

use std::collections::HashMap;

use hinge_types::{Axis, EdgeKind, Plane};

use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;

/// Pieces closer than this are considered touching.
const TOUCH_GAP: f64 = 1e-9;

/// One recorded kernel call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockOp {
    Extrude {
        plane: Plane,
        distance: f64,
        profiles: usize,
    },
    Revolve {
        axis_direction: [f64; 3],
        angle: f64,
        profiles: usize,
    },
    Fuse,
    Cut,
    Translate {
        offset: [f64; 3],
    },
    Mirror {
        plane: PlaneName,
    },
    Chamfer {
        distance: f64,
        edges: usize,
    },
}

/// A synthetic solid: envelope pieces and their edges.
#[derive(Debug, Clone)]
struct MockSolid {
    pieces: Vec<BoundingBox>,
    edges: Vec<EdgeGeometry>,
}

impl MockSolid {
    fn map(&self, piece: impl Fn(&BoundingBox) -> BoundingBox, point: impl Fn([f64; 3]) -> [f64; 3]) -> Self {
        MockSolid {
            pieces: self.pieces.iter().map(piece).collect(),
            edges: self
                .edges
                .iter()
                .map(|e| EdgeGeometry {
                    kind: e.kind,
                    start: point(e.start),
                    end: point(e.end),
                    midpoint: point(e.midpoint),
                })
                .collect(),
        }
    }
}

/// Deterministic test double for the geometry kernel.
/// Implements both Kernel and KernelIntrospect.
pub struct MockKernel {
    next_handle: u64,
    solids: HashMap<u64, MockSolid>,
    log: Vec<MockOp>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
            log: Vec::new(),
        }
    }

    /// Every kernel call made so far, in order.
    pub fn operations(&self) -> &[MockOp] {
        &self.log
    }

    /// Number of logged calls matching a predicate.
    pub fn count_ops(&self, pred: impl Fn(&MockOp) -> bool) -> usize {
        self.log.iter().filter(|op| pred(op)).count()
    }

    /// Envelope pieces of a solid, in creation order.
    pub fn pieces(&self, solid: &SolidHandle) -> Result<Vec<BoundingBox>, KernelError> {
        Ok(self.get(solid)?.pieces.clone())
    }

    /// Number of solids currently stored.
    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    fn get(&self, handle: &SolidHandle) -> Result<&MockSolid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::not_found(handle))
    }

    fn store(&mut self, solid: MockSolid, op: MockOp) -> SolidHandle {
        let handle = SolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(handle.id(), solid);
        self.log.push(op);
        handle
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

/// The 12 straight edges of a box piece.
fn box_edges(bbox: &BoundingBox) -> Vec<EdgeGeometry> {
    let c = bbox.corners();
    let edge_pairs = [
        // Bottom face edges
        (0, 1),
        (1, 2),
        (2, 3),
        (3, 0),
        // Top face edges
        (4, 5),
        (5, 6),
        (6, 7),
        (7, 4),
        // Vertical edges
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];
    edge_pairs
        .iter()
        .map(|&(s, e)| EdgeGeometry::line(c[s], c[e]))
        .collect()
}

/// Circular rim of radius `radius` around a principal axis at `center`.
fn rim_edge(center: [f64; 3], axis: Axis, radius: f64) -> EdgeGeometry {
    let j = (axis.index() + 1) % 3;
    let mut start = center;
    start[j] += radius;
    let mut opposite = center;
    opposite[j] -= radius;
    EdgeGeometry {
        kind: EdgeKind::Curve,
        start,
        end: start,
        midpoint: opposite,
    }
}

fn principal_axis(direction: [f64; 3]) -> Option<Axis> {
    let len = (direction[0].powi(2) + direction[1].powi(2) + direction[2].powi(2)).sqrt();
    if len < 1e-12 {
        return None;
    }
    [Axis::X, Axis::Y, Axis::Z]
        .into_iter()
        .find(|axis| (direction[axis.index()].abs() / len - 1.0).abs() < 1e-9)
}

/// World-space corners of a profile's bounding rectangle on the sketch plane.
fn profile_corners(sketch: &Sketch, min: [f64; 2], max: [f64; 2]) -> [[f64; 3]; 4] {
    [
        sketch.to_world([min[0], min[1]]),
        sketch.to_world([max[0], min[1]]),
        sketch.to_world([max[0], max[1]]),
        sketch.to_world([min[0], max[1]]),
    ]
}

impl Kernel for MockKernel {
    fn extrude(&mut self, sketch: &Sketch, distance: f64) -> Result<SolidHandle, KernelError> {
        if distance.abs() < 1e-12 {
            return Err(KernelError::InvalidGeometry {
                reason: "extrude distance is zero".to_string(),
            });
        }
        let profiles = sketch.drawing.solid_profiles();
        if profiles.is_empty() {
            return Err(KernelError::InvalidGeometry {
                reason: "drawing has no material".to_string(),
            });
        }

        let n = sketch.plane.normal;
        let shift = [n[0] * distance, n[1] * distance, n[2] * distance];
        let mut solid = MockSolid {
            pieces: Vec::new(),
            edges: Vec::new(),
        };
        for profile in &profiles {
            let (min, max) = profile.bounds();
            let base = profile_corners(sketch, min, max);
            let piece = BoundingBox::from_points(base.iter().flat_map(|&p| {
                [p, [p[0] + shift[0], p[1] + shift[1], p[2] + shift[2]]]
            }))
            .ok_or_else(|| KernelError::InvalidGeometry {
                reason: "empty profile".to_string(),
            })?;
            solid.edges.extend(box_edges(&piece));
            solid.pieces.push(piece);
        }

        let op = MockOp::Extrude {
            plane: sketch.plane,
            distance,
            profiles: profiles.len(),
        };
        Ok(self.store(solid, op))
    }

    fn revolve(
        &mut self,
        sketch: &Sketch,
        axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        angle: f64,
    ) -> Result<SolidHandle, KernelError> {
        let axis = principal_axis(axis_direction).ok_or_else(|| KernelError::NotSupported {
            operation: "mock revolve about a non-principal axis".to_string(),
        })?;
        if angle.abs() < 1e-12 {
            return Err(KernelError::InvalidGeometry {
                reason: "revolve angle is zero".to_string(),
            });
        }
        let profiles = sketch.drawing.solid_profiles();
        if profiles.is_empty() {
            return Err(KernelError::InvalidGeometry {
                reason: "drawing has no material".to_string(),
            });
        }

        let a = axis.index();
        let mut solid = MockSolid {
            pieces: Vec::new(),
            edges: Vec::new(),
        };
        for profile in &profiles {
            let (min, max) = profile.bounds();
            let corners = profile_corners(sketch, min, max);
            let radius = corners
                .iter()
                .map(|p| {
                    (0..3)
                        .filter(|&i| i != a)
                        .map(|i| (p[i] - axis_origin[i]).powi(2))
                        .sum::<f64>()
                        .sqrt()
                })
                .fold(0.0_f64, f64::max);
            let lo = corners.iter().map(|p| p[a]).fold(f64::INFINITY, f64::min);
            let hi = corners
                .iter()
                .map(|p| p[a])
                .fold(f64::NEG_INFINITY, f64::max);

            let mut piece_min = [0.0; 3];
            let mut piece_max = [0.0; 3];
            for i in 0..3 {
                if i == a {
                    piece_min[i] = lo;
                    piece_max[i] = hi;
                } else {
                    piece_min[i] = axis_origin[i] - radius;
                    piece_max[i] = axis_origin[i] + radius;
                }
            }
            let piece = BoundingBox::new(piece_min, piece_max);

            for end in [lo, hi] {
                let mut center = axis_origin;
                center[a] = end;
                solid.edges.push(rim_edge(center, axis, radius));
            }
            solid.pieces.push(piece);
        }

        let op = MockOp::Revolve {
            axis_direction,
            angle,
            profiles: profiles.len(),
        };
        Ok(self.store(solid, op))
    }

    fn fuse(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        let solid_a = self.get(a)?;
        let solid_b = self.get(b)?;
        let mut merged = solid_a.clone();
        merged.pieces.extend(solid_b.pieces.iter().copied());
        merged.edges.extend(solid_b.edges.iter().copied());
        Ok(self.store(merged, MockOp::Fuse))
    }

    fn cut(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        // The tool must exist even though the envelope ignores it
        self.get(b)?;
        let result = self.get(a)?.clone();
        Ok(self.store(result, MockOp::Cut))
    }

    fn translate(
        &mut self,
        solid: &SolidHandle,
        offset: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        let moved = self.get(solid)?.map(
            |p| p.translated(offset),
            |q| [q[0] + offset[0], q[1] + offset[1], q[2] + offset[2]],
        );
        Ok(self.store(moved, MockOp::Translate { offset }))
    }

    fn mirror(
        &mut self,
        solid: &SolidHandle,
        plane: PlaneName,
    ) -> Result<SolidHandle, KernelError> {
        let i = plane.normal_axis().index();
        let mirrored = self.get(solid)?.map(
            |p| p.mirrored(plane),
            |mut q| {
                q[i] = -q[i];
                q
            },
        );
        Ok(self.store(mirrored, MockOp::Mirror { plane }))
    }

    fn chamfer(
        &mut self,
        solid: &SolidHandle,
        distance: f64,
        edges: &EdgeFinder,
    ) -> Result<SolidHandle, KernelError> {
        if distance <= 0.0 {
            return Err(KernelError::ChamferFailed {
                reason: "chamfer distance must be positive".to_string(),
            });
        }
        let source = self.get(solid)?;
        let selected = edges.select(&source.edges);
        if selected.is_empty() {
            return Err(KernelError::ChamferFailed {
                reason: "no edge matched the filter".to_string(),
            });
        }
        let result = source.clone();
        let op = MockOp::Chamfer {
            distance,
            edges: selected.len(),
        };
        Ok(self.store(result, op))
    }
}

impl KernelIntrospect for MockKernel {
    fn bounding_box(&self, solid: &SolidHandle) -> Result<BoundingBox, KernelError> {
        let solid = self.get(solid)?;
        solid
            .pieces
            .iter()
            .copied()
            .reduce(|acc, p| acc.union(&p))
            .ok_or_else(|| KernelError::InvalidGeometry {
                reason: "solid has no pieces".to_string(),
            })
    }

    fn list_edges(&self, solid: &SolidHandle) -> Result<Vec<EdgeGeometry>, KernelError> {
        Ok(self.get(solid)?.edges.clone())
    }

    /// Connected groups of touching pieces (union-find).
    fn component_count(&self, solid: &SolidHandle) -> Result<usize, KernelError> {
        let pieces = &self.get(solid)?.pieces;
        let mut parent: Vec<usize> = (0..pieces.len()).collect();

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        for i in 0..pieces.len() {
            for j in (i + 1)..pieces.len() {
                if pieces[i].touches(&pieces[j], TOUCH_GAP) {
                    let (ri, rj) = (find(&mut parent, i), find(&mut parent, j));
                    if ri != rj {
                        parent[ri] = rj;
                    }
                }
            }
        }
        Ok((0..pieces.len())
            .filter(|&i| find(&mut parent, i) == i)
            .count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hinge_types::{Drawing, Profile};

    fn rect(w: f64, h: f64) -> Drawing {
        Profile::rounded_rectangle(w, h, 0.0).unwrap().into()
    }

    fn boxed(k: &mut MockKernel, w: f64, h: f64, d: f64) -> SolidHandle {
        let sketch = rect(w, h).sketch_on_plane(PlaneName::XY, 0.0);
        k.extrude(&sketch, d).unwrap()
    }

    #[test]
    fn test_extrude_produces_box_envelope() {
        let mut k = MockKernel::new();
        let solid = boxed(&mut k, 4.0, 2.0, 3.0);
        let bbox = k.bounding_box(&solid).unwrap();
        assert_eq!(bbox.min, [-2.0, -1.0, 0.0]);
        assert_eq!(bbox.max, [2.0, 1.0, 3.0]);
        assert_eq!(k.list_edges(&solid).unwrap().len(), 12);
        assert_eq!(k.component_count(&solid).unwrap(), 1);
    }

    #[test]
    fn test_extrude_on_offset_yz_plane() {
        let mut k = MockKernel::new();
        let sketch = rect(2.0, 2.0).sketch_on_plane(PlaneName::YZ, 0.2);
        let solid = k.extrude(&sketch, 4.7).unwrap();
        let bbox = k.bounding_box(&solid).unwrap();
        assert_relative_eq!(bbox.min[0], 0.2);
        assert_relative_eq!(bbox.max[0], 4.9);
        assert_eq!(bbox.min[1], -1.0);
        assert_eq!(bbox.max[2], 1.0);
    }

    #[test]
    fn test_extrude_rejects_zero_distance() {
        let mut k = MockKernel::new();
        let sketch = rect(1.0, 1.0).sketch_on_plane(PlaneName::XY, 0.0);
        assert!(matches!(
            k.extrude(&sketch, 0.0),
            Err(KernelError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_revolve_around_x_axis() {
        let mut k = MockKernel::new();
        let sketch = rect(20.0, 6.0)
            .translate(0.0, 3.0)
            .sketch_on_plane(PlaneName::XY, 0.0);
        let solid = k
            .revolve(&sketch, [0.0; 3], [1.0, 0.0, 0.0], std::f64::consts::TAU)
            .unwrap();
        let bbox = k.bounding_box(&solid).unwrap();
        assert_eq!(bbox.min, [-10.0, -6.0, -6.0]);
        assert_eq!(bbox.max, [10.0, 6.0, 6.0]);

        let edges = k.list_edges(&solid).unwrap();
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.kind == EdgeKind::Curve));
    }

    #[test]
    fn test_revolve_rejects_skew_axis() {
        let mut k = MockKernel::new();
        let sketch = rect(1.0, 1.0).sketch_on_plane(PlaneName::XY, 0.0);
        assert!(matches!(
            k.revolve(&sketch, [0.0; 3], [1.0, 1.0, 0.0], 1.0),
            Err(KernelError::NotSupported { .. })
        ));
    }

    #[test]
    fn test_fuse_concatenates_and_tracks_components() {
        let mut k = MockKernel::new();
        let a = boxed(&mut k, 2.0, 2.0, 2.0);
        let b = boxed(&mut k, 2.0, 2.0, 2.0);
        let far = k.translate(&b, [10.0, 0.0, 0.0]).unwrap();
        let near = k.translate(&b, [2.0, 0.0, 0.0]).unwrap();

        let disjoint = k.fuse(&a, &far).unwrap();
        assert_eq!(k.component_count(&disjoint).unwrap(), 2);

        let joined = k.fuse(&a, &near).unwrap();
        assert_eq!(k.component_count(&joined).unwrap(), 1);
        assert_eq!(k.list_edges(&joined).unwrap().len(), 24);

        let bbox = k.bounding_box(&joined).unwrap();
        assert_eq!(bbox.max[0], 3.0);
    }

    #[test]
    fn test_cut_keeps_base_envelope() {
        let mut k = MockKernel::new();
        let a = boxed(&mut k, 4.0, 4.0, 1.0);
        let b = boxed(&mut k, 1.0, 1.0, 1.0);
        let cut = k.cut(&a, &b).unwrap();
        assert_eq!(
            k.bounding_box(&cut).unwrap(),
            k.bounding_box(&a).unwrap()
        );
    }

    #[test]
    fn test_mirror_through_xz() {
        let mut k = MockKernel::new();
        let a = boxed(&mut k, 2.0, 2.0, 1.0);
        let moved = k.translate(&a, [0.0, 5.0, 0.0]).unwrap();
        let m = k.mirror(&moved, PlaneName::XZ).unwrap();
        let bbox = k.bounding_box(&m).unwrap();
        assert_eq!(bbox.min[1], -6.0);
        assert_eq!(bbox.max[1], -4.0);
        assert_eq!(k.operations().last(), Some(&MockOp::Mirror { plane: PlaneName::XZ }));
    }

    #[test]
    fn test_chamfer_selects_edges() {
        let mut k = MockKernel::new();
        let a = boxed(&mut k, 2.0, 2.0, 1.0);
        let finder = EdgeFinder::new()
            .in_direction(Axis::X)
            .in_plane(PlaneName::XY, 1.0);
        k.chamfer(&a, 0.1, &finder).unwrap();
        assert_eq!(
            k.operations().last(),
            Some(&MockOp::Chamfer {
                distance: 0.1,
                edges: 2
            })
        );
    }

    #[test]
    fn test_chamfer_without_matches_fails() {
        let mut k = MockKernel::new();
        let a = boxed(&mut k, 2.0, 2.0, 1.0);
        let finder = EdgeFinder::new().in_plane(PlaneName::XY, 5.0);
        assert!(matches!(
            k.chamfer(&a, 0.1, &finder),
            Err(KernelError::ChamferFailed { .. })
        ));
        assert!(k.chamfer(&a, 0.0, &EdgeFinder::new()).is_err());
    }

    #[test]
    fn test_unknown_handle() {
        let mut k = MockKernel::new();
        let ghost = SolidHandle(99);
        assert!(matches!(
            k.translate(&ghost, [1.0, 0.0, 0.0]),
            Err(KernelError::SolidNotFound { handle: 99 })
        ));
    }

    #[test]
    fn test_deterministic_handles() {
        let mut k1 = MockKernel::new();
        let mut k2 = MockKernel::new();
        let a1 = boxed(&mut k1, 1.0, 1.0, 1.0);
        let a2 = boxed(&mut k2, 1.0, 1.0, 1.0);
        assert_eq!(a1, a2);
        assert_eq!(k1.solid_count(), 1);
    }
}
