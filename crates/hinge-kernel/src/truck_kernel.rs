//! TruckKernel: real geometry kernel wrapping truck's API.
//!
//! Drawings are evaluated lazily: every closed profile becomes a planar
//! face that is swept on its own, and the drawing's fuse/cut tree is then
//! replayed as 3D booleans on the swept solids.

use std::collections::HashMap;
use std::f64::consts::PI;

use hinge_types::{Drawing, Plane, Profile, Segment};
use tracing::debug;
use truck_modeling::builder;
use truck_modeling::topology::{Edge, Face, Solid, Vertex, Wire};
use truck_modeling::{InnerSpace, Matrix4, Point3, Rad, Vector3};

use crate::tessellation;
use crate::traits::{Kernel, KernelIntrospect};
use crate::types::*;

/// Tolerance handed to truck's boolean operations.
const BOOLEAN_TOLERANCE: f64 = 0.05;

/// Chord tolerance used when triangulating for measurements.
const MESH_TOLERANCE: f64 = 0.01;

/// Real geometry kernel backed by the truck BREP library.
pub struct TruckKernel {
    next_handle: u64,
    solids: HashMap<u64, Solid>,
}

impl TruckKernel {
    pub fn new() -> Self {
        Self {
            next_handle: 1,
            solids: HashMap::new(),
        }
    }

    fn store_solid(&mut self, solid: Solid) -> SolidHandle {
        let handle = SolidHandle(self.next_handle);
        self.next_handle += 1;
        self.solids.insert(handle.id(), solid);
        handle
    }

    fn get_solid(&self, handle: &SolidHandle) -> Result<&Solid, KernelError> {
        self.solids
            .get(&handle.id())
            .ok_or_else(|| KernelError::not_found(handle))
    }

    /// Sweep every profile of the drawing and replay its boolean tree.
    fn sweep_drawing(
        drawing: &Drawing,
        plane: &Plane,
        sweep: &dyn Fn(&Face) -> Solid,
    ) -> Result<Solid, KernelError> {
        match drawing {
            Drawing::Profile { profile } => {
                let face = face_from_profile(profile, plane)?;
                Ok(sweep(&face))
            }
            Drawing::Fuse { a, b } => {
                let a = Self::sweep_drawing(a, plane, sweep)?;
                let b = Self::sweep_drawing(b, plane, sweep)?;
                union(&a, &b)
            }
            Drawing::Cut { base, tool } => {
                let base = Self::sweep_drawing(base, plane, sweep)?;
                let tool = Self::sweep_drawing(tool, plane, sweep)?;
                subtract(&base, &tool)
            }
        }
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn point(p: [f64; 3]) -> Point3 {
    Point3::new(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Vector3 {
    Vector3::new(v[0], v[1], v[2])
}

fn union(a: &Solid, b: &Solid) -> Result<Solid, KernelError> {
    truck_shapeops::or(a, b, BOOLEAN_TOLERANCE).ok_or_else(|| KernelError::BooleanFailed {
        reason: "truck or() returned None".to_string(),
    })
}

fn subtract(a: &Solid, b: &Solid) -> Result<Solid, KernelError> {
    // Subtraction = A ∩ ¬B. not() mutates in place.
    let mut tool = b.clone();
    tool.not();
    truck_shapeops::and(a, &tool, BOOLEAN_TOLERANCE).ok_or_else(|| KernelError::BooleanFailed {
        reason: "truck and() returned None for subtraction".to_string(),
    })
}

/// Build a planar face from a closed profile placed on `plane`.
///
/// The wire is oriented counter-clockwise in plane coordinates so the face
/// normal follows the plane normal. Full circles are split in two arcs
/// because truck arcs need distinct end vertices.
fn face_from_profile(profile: &Profile, plane: &Plane) -> Result<Face, KernelError> {
    if !profile.closed {
        return Err(KernelError::InvalidGeometry {
            reason: "cannot build a face from an open wire".to_string(),
        });
    }
    let profile = if profile.signed_area() < 0.0 {
        profile.reversed()
    } else {
        profile.clone()
    };

    let mut segments = Vec::with_capacity(profile.segments.len() + 1);
    for segment in &profile.segments {
        match *segment {
            Segment::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } if segment.is_full_circle() => {
                let half = sweep / 2.0;
                for k in 0..2 {
                    segments.push(Segment::Arc {
                        center,
                        radius,
                        start_angle: start_angle + half * k as f64,
                        sweep: half,
                    });
                }
            }
            _ => segments.push(segment.clone()),
        }
    }

    let vertices: Vec<Vertex> = segments
        .iter()
        .map(|s| builder::vertex(point(plane.to_world(s.start()))))
        .collect();
    let n = vertices.len();
    let wire_edges: Vec<Edge> = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            let (v0, v1) = (&vertices[i], &vertices[(i + 1) % n]);
            match segment {
                Segment::Line { .. } => builder::line(v0, v1),
                Segment::Arc { sweep, .. } => {
                    debug_assert!(sweep.abs() < 2.0 * PI);
                    let transit = point(plane.to_world(segment.midpoint()));
                    builder::circle_arc(v0, v1, transit)
                }
            }
        })
        .collect();
    let wire = Wire::from_iter(wire_edges);

    builder::try_attach_plane(&[wire]).map_err(|e| KernelError::InvalidGeometry {
        reason: format!("failed to create planar face: {}", e),
    })
}

impl Kernel for TruckKernel {
    fn extrude(&mut self, sketch: &Sketch, distance: f64) -> Result<SolidHandle, KernelError> {
        if distance.abs() < 1e-12 {
            return Err(KernelError::InvalidGeometry {
                reason: "extrude distance is zero".to_string(),
            });
        }
        let sweep_vec = vector(sketch.plane.normal) * distance;
        let solid = Self::sweep_drawing(&sketch.drawing, &sketch.plane, &|face| {
            builder::tsweep(face, sweep_vec)
        })?;
        Ok(self.store_solid(solid))
    }

    fn revolve(
        &mut self,
        sketch: &Sketch,
        axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        angle: f64,
    ) -> Result<SolidHandle, KernelError> {
        let axis = vector(axis_direction);
        if axis.magnitude() < 1e-12 {
            return Err(KernelError::InvalidGeometry {
                reason: "revolve axis has zero length".to_string(),
            });
        }
        let origin = point(axis_origin);
        let axis = axis.normalize();
        let solid = Self::sweep_drawing(&sketch.drawing, &sketch.plane, &|face| {
            builder::rsweep(face, origin, axis, Rad(angle))
        })?;
        Ok(self.store_solid(solid))
    }

    fn fuse(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        let result = union(self.get_solid(a)?, self.get_solid(b)?)?;
        debug!(a = a.id(), b = b.id(), "truck union");
        Ok(self.store_solid(result))
    }

    fn cut(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError> {
        let result = subtract(self.get_solid(a)?, self.get_solid(b)?)?;
        debug!(a = a.id(), b = b.id(), "truck subtraction");
        Ok(self.store_solid(result))
    }

    fn translate(
        &mut self,
        solid: &SolidHandle,
        offset: [f64; 3],
    ) -> Result<SolidHandle, KernelError> {
        let moved = builder::translated(self.get_solid(solid)?, vector(offset));
        Ok(self.store_solid(moved))
    }

    fn mirror(
        &mut self,
        solid: &SolidHandle,
        plane: PlaneName,
    ) -> Result<SolidHandle, KernelError> {
        let mut scale = [1.0; 3];
        scale[plane.normal_axis().index()] = -1.0;
        let reflection = Matrix4::from_nonuniform_scale(scale[0], scale[1], scale[2]);
        let mut mirrored = builder::transformed(self.get_solid(solid)?, reflection);
        // A reflection turns the boundary inside out
        mirrored.not();
        Ok(self.store_solid(mirrored))
    }

    fn chamfer(
        &mut self,
        _solid: &SolidHandle,
        _distance: f64,
        _edges: &EdgeFinder,
    ) -> Result<SolidHandle, KernelError> {
        Err(KernelError::NotSupported {
            operation: "chamfer".to_string(),
        })
    }
}

impl KernelIntrospect for TruckKernel {
    fn bounding_box(&self, solid: &SolidHandle) -> Result<BoundingBox, KernelError> {
        tessellation::solid_bounds(self.get_solid(solid)?, MESH_TOLERANCE)
    }

    fn list_edges(&self, solid: &SolidHandle) -> Result<Vec<EdgeGeometry>, KernelError> {
        Ok(tessellation::solid_edges(self.get_solid(solid)?))
    }

    fn component_count(&self, solid: &SolidHandle) -> Result<usize, KernelError> {
        Ok(self.get_solid(solid)?.boundaries().len())
    }
}
