//! Parametric print-in-place hinges built against an injected geometry
//! kernel.

pub mod config;
pub mod flat;
pub mod kernel_ext;
pub mod layout;
pub mod params;
pub mod profiles;
pub mod samples;
pub mod side;
pub mod types;

pub use config::{BuiltHinge, HingeConfig, HingeEntry, HingeKind};
pub use flat::{flap_edge_finder, make_flat_hinge};
pub use kernel_ext::{KernelBundle, KernelExt};
pub use layout::{
    flap_placements, spacer_offsets, support_placements, FlapPlacement, FlapSide,
    SupportPlacement,
};
pub use params::{FlatHingeDims, FlatHingeOptions, SideHingeDims, SideHingeOptions};
pub use samples::sample_hinges;
pub use side::make_side_hinge;
pub use types::*;
