use hinge_kernel::{Kernel, KernelError, KernelIntrospect, SolidHandle};

/// Combined trait for builders that need both mutable Kernel access
/// and read-only KernelIntrospect access on the same object.
pub trait KernelBundle: Kernel + KernelIntrospect {
    fn as_introspect(&self) -> &dyn KernelIntrospect;
}

// Blanket implementation for any type that implements both traits
impl<T: Kernel + KernelIntrospect> KernelBundle for T {
    fn as_introspect(&self) -> &dyn KernelIntrospect {
        self
    }
}

/// Single-axis shorthands over [`Kernel::translate`].
pub trait KernelExt: Kernel {
    fn translate_x(&mut self, solid: &SolidHandle, dx: f64) -> Result<SolidHandle, KernelError> {
        self.translate(solid, [dx, 0.0, 0.0])
    }

    fn translate_y(&mut self, solid: &SolidHandle, dy: f64) -> Result<SolidHandle, KernelError> {
        self.translate(solid, [0.0, dy, 0.0])
    }

    fn translate_z(&mut self, solid: &SolidHandle, dz: f64) -> Result<SolidHandle, KernelError> {
        self.translate(solid, [0.0, 0.0, dz])
    }
}

impl<T: Kernel + ?Sized> KernelExt for T {}
