//! JSON summaries of built shapes.

use anyhow::{Context, Result};
use hinge_builder::KernelBundle;
use hinge_kernel::SolidHandle;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ShapeSummary {
    pub name: String,
    pub min: [f64; 3],
    pub max: [f64; 3],
    pub components: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hinge_width: Option<f64>,
}

/// Measure a built shape through the kernel's introspection.
pub fn summarize(
    kb: &dyn KernelBundle,
    name: &str,
    shape: &SolidHandle,
    hinge_width: Option<f64>,
) -> Result<ShapeSummary> {
    let introspect = kb.as_introspect();
    let bbox = introspect
        .bounding_box(shape)
        .with_context(|| format!("measuring bounds of {}", name))?;
    let components = introspect
        .component_count(shape)
        .with_context(|| format!("counting bodies of {}", name))?;
    Ok(ShapeSummary {
        name: name.to_string(),
        min: bbox.min,
        max: bbox.max,
        components,
        hinge_width,
    })
}
