//! Structured text-based reports of a bench.
//!
//! Reports are plain text for reading in test output; the same data is
//! serializable for tools that want JSON.

use std::fmt;

use serde::Serialize;

use crate::helpers::{format_bbox, HarnessError};
use crate::oracle::OracleVerdict;
use crate::workflow::HingeBench;

/// A complete bench report with all sections.
#[derive(Debug, Serialize)]
pub struct BenchReport {
    pub shapes: Vec<ShapeEntry>,
    pub oracle_results: Vec<VerdictEntry>,
}

/// A single shape's report entry.
#[derive(Debug, Serialize)]
pub struct ShapeEntry {
    pub index: usize,
    pub name: String,
    pub kind: String,
    pub hinge_width: Option<f64>,
    pub bounding_box: ([f64; 3], [f64; 3]),
    pub components: usize,
}

#[derive(Debug, Serialize)]
pub struct VerdictEntry {
    pub shape: String,
    pub oracle: String,
    pub passed: bool,
    pub detail: String,
}

impl BenchReport {
    /// Collect every shape of the bench and run its hinge oracles.
    pub fn generate(bench: &HingeBench) -> Result<Self, HarnessError> {
        let mut shapes = Vec::new();
        let mut oracle_results = Vec::new();

        for (index, name) in bench.names().iter().enumerate() {
            let shape = bench.shape(name)?;
            let bbox = bench.bounding_box(name)?;
            shapes.push(ShapeEntry {
                index,
                name: name.clone(),
                kind: shape.kind.clone(),
                hinge_width: shape.hinge_width,
                bounding_box: (bbox.min, bbox.max),
                components: bench.component_count(name)?,
            });
            oracle_results.extend(
                bench
                    .check_hinge(name)?
                    .into_iter()
                    .map(|v: OracleVerdict| VerdictEntry {
                        shape: name.clone(),
                        oracle: v.oracle_name,
                        passed: v.passed,
                        detail: v.detail,
                    }),
            );
        }

        Ok(Self {
            shapes,
            oracle_results,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &VerdictEntry> {
        self.oracle_results.iter().filter(|v| !v.passed)
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        serde_json::to_string_pretty(self).map_err(|e| HarnessError::AssertionFailed {
            detail: format!("report serialization failed: {}", e),
        })
    }

    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Hinge Bench Report ===\n\n");

        out.push_str(&format!("Shapes ({}):\n", self.shapes.len()));
        for entry in &self.shapes {
            out.push_str(&format!(
                "  [{}] {} \"{}\"\n",
                entry.index, entry.kind, entry.name
            ));
            let (min, max) = entry.bounding_box;
            out.push_str(&format!(
                "      Bounds: {}\n",
                format_bbox(&hinge_types::BoundingBox::new(min, max))
            ));
            if let Some(width) = entry.hinge_width {
                out.push_str(&format!("      Hinge width: {:.2}\n", width));
            }
            let status = if entry.components == 1 { "OK" } else { "WARN" };
            out.push_str(&format!(
                "      Bodies: {} ({})\n",
                entry.components, status
            ));
        }

        if !self.oracle_results.is_empty() {
            out.push_str(&format!(
                "\nOracle Results ({} checks):\n",
                self.oracle_results.len()
            ));
            for v in &self.oracle_results {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!(
                    "  [{}] {} / {}: {}\n",
                    status, v.shape, v.oracle, v.detail
                ));
            }
        }

        let failed = self.failures().count();
        if failed == 0 {
            out.push_str("\nFailures: none\n");
        } else {
            out.push_str(&format!("\nFailures: {}\n", failed));
        }

        out
    }
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
