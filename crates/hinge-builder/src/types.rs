use hinge_kernel::{KernelError, SolidHandle};
use hinge_types::ProfileError;

/// A finished hinge and the clearance the caller must leave for it.
#[derive(Debug, Clone)]
pub struct HingeResult {
    pub hinge: SolidHandle,
    /// How far the hinge reaches behind the rotation axis.
    pub hinge_width: f64,
}

/// A shape paired with a display label.
#[derive(Debug, Clone)]
pub struct NamedShape {
    pub shape: SolidHandle,
    pub name: String,
}

/// Errors from hinge construction.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HingeError {
    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },

    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("invalid hinge configuration: {reason}")]
    Config { reason: String },
}

impl HingeError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        HingeError::InvalidParameter {
            reason: reason.into(),
        }
    }
}
