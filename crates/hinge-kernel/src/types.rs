use serde::{Deserialize, Serialize};

// Re-export shared geometry types from hinge-types
pub use hinge_types::{BoundingBox, EdgeFinder, EdgeGeometry, PlaneName, Sketch};

/// Opaque handle to a solid in the geometry kernel.
/// Valid only for the kernel instance that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolidHandle(pub(crate) u64);

impl SolidHandle {
    pub(crate) fn id(&self) -> u64 {
        self.0
    }
}

/// Errors from kernel operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KernelError {
    #[error("boolean operation failed: {reason}")]
    BooleanFailed { reason: String },

    #[error("chamfer failed: {reason}")]
    ChamferFailed { reason: String },

    #[error("invalid geometry: {reason}")]
    InvalidGeometry { reason: String },

    #[error("solid not found: #{handle}")]
    SolidNotFound { handle: u64 },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },

    #[error("kernel error: {message}")]
    Other { message: String },
}

impl KernelError {
    pub(crate) fn not_found(handle: &SolidHandle) -> Self {
        KernelError::SolidNotFound {
            handle: handle.id(),
        }
    }
}
