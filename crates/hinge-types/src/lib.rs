pub mod bbox;
pub mod drawing;
pub mod edge;
pub mod plane;
pub mod profile;

pub use bbox::*;
pub use drawing::*;
pub use edge::*;
pub use plane::*;
pub use profile::*;

/// Distance below which two coordinates are considered coincident.
pub const LINEAR_TOLERANCE: f64 = 1e-9;
