use crate::types::*;

/// Core geometry kernel trait: the solid operations the hinge builders need.
/// Implemented by TruckKernel (wraps real truck) and MockKernel (deterministic test double).
///
/// Every operation returns a new handle and leaves its inputs untouched, so a
/// handle clone is a full value copy from the caller's point of view.
pub trait Kernel {
    /// Extrude a sketch along its plane normal by `distance`.
    fn extrude(&mut self, sketch: &Sketch, distance: f64) -> Result<SolidHandle, KernelError>;

    /// Revolve a sketch around an axis by `angle` radians.
    fn revolve(
        &mut self,
        sketch: &Sketch,
        axis_origin: [f64; 3],
        axis_direction: [f64; 3],
        angle: f64,
    ) -> Result<SolidHandle, KernelError>;

    /// Boolean union of two solids.
    fn fuse(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError>;

    /// Boolean subtraction: a minus b.
    fn cut(&mut self, a: &SolidHandle, b: &SolidHandle) -> Result<SolidHandle, KernelError>;

    /// Translate a solid by `offset`.
    fn translate(
        &mut self,
        solid: &SolidHandle,
        offset: [f64; 3],
    ) -> Result<SolidHandle, KernelError>;

    /// Reflect a solid through a named plane passing through the origin.
    fn mirror(&mut self, solid: &SolidHandle, plane: PlaneName)
        -> Result<SolidHandle, KernelError>;

    /// Chamfer (bevel) every edge selected by `edges` with the given distance.
    fn chamfer(
        &mut self,
        solid: &SolidHandle,
        distance: f64,
        edges: &EdgeFinder,
    ) -> Result<SolidHandle, KernelError>;
}

/// Read-only queries on kernel solids.
pub trait KernelIntrospect {
    /// Axis-aligned bounds of a solid.
    fn bounding_box(&self, solid: &SolidHandle) -> Result<BoundingBox, KernelError>;

    /// Geometry of every edge of a solid.
    fn list_edges(&self, solid: &SolidHandle) -> Result<Vec<EdgeGeometry>, KernelError>;

    /// Number of disconnected bodies making up a solid.
    fn component_count(&self, solid: &SolidHandle) -> Result<usize, KernelError>;
}
