//! HingeBench: fluent API for scripting hinge builds in tests.
//!
//! Calls the real builders against a boxed kernel. All methods accept
//! string names instead of solid handles for readability.

use std::collections::HashMap;
use std::fmt;

use hinge_builder::{
    make_flat_hinge, make_side_hinge, sample_hinges, FlatHingeOptions, HingeConfig,
    HingeResult, KernelBundle, KernelExt, SideHingeOptions,
};
use hinge_kernel::{MockKernel, SolidHandle, TruckKernel};
use hinge_types::BoundingBox;

use crate::assertions;
use crate::helpers::HarnessError;
use crate::oracle::{self, OracleVerdict};
use crate::report::BenchReport;

/// What the bench knows about a named shape.
#[derive(Debug, Clone)]
pub struct BenchShape {
    pub handle: SolidHandle,
    /// `None` for shapes that are not hinges (sample output, moved copies).
    pub hinge_width: Option<f64>,
    /// Requested X extent, when known.
    pub width: Option<f64>,
    pub kind: String,
}

/// A fluent builder for constructing and verifying hinges in tests.
pub struct HingeBench {
    pub(crate) kernel: Box<dyn KernelBundle>,
    shapes: HashMap<String, BenchShape>,
    order: Vec<String>,
    history: Vec<(String, String)>,
    auto_check: bool,
}

impl fmt::Debug for HingeBench {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HingeBench")
            .field("shapes", &self.order)
            .field("history", &self.history)
            .field("auto_check", &self.auto_check)
            .finish_non_exhaustive()
    }
}

impl HingeBench {
    /// Create a new HingeBench with MockKernel (deterministic, fast).
    pub fn mock() -> Self {
        Self::with_kernel(Box::new(MockKernel::new()))
    }

    /// Create a new HingeBench with TruckKernel (real geometry).
    pub fn truck() -> Self {
        Self::with_kernel(Box::new(TruckKernel::new()))
    }

    pub fn with_kernel(kernel: Box<dyn KernelBundle>) -> Self {
        Self {
            kernel,
            shapes: HashMap::new(),
            order: Vec::new(),
            history: Vec::new(),
            auto_check: false,
        }
    }

    /// Enable auto-checking: after every hinge build, run the hinge oracles.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    // ── Builds ──────────────────────────────────────────────────────────

    /// Build a side hinge and register it under `name`.
    pub fn side(
        &mut self,
        name: &str,
        height: f64,
        width: f64,
        options: &SideHingeOptions,
    ) -> Result<&mut Self, HarnessError> {
        self.check_name_available(name)?;
        let result = make_side_hinge(self.kernel.as_mut(), height, width, options)?;
        self.register_hinge(name, "side", result, width)
    }

    /// Build a flat hinge and register it under `name`.
    pub fn flat(
        &mut self,
        name: &str,
        height: f64,
        width: f64,
        base_height: f64,
        options: &FlatHingeOptions,
    ) -> Result<&mut Self, HarnessError> {
        self.check_name_available(name)?;
        let result = make_flat_hinge(self.kernel.as_mut(), height, width, base_height, options)?;
        self.register_hinge(name, "flat", result, width)
    }

    /// Build the sample hinges, registered under their display names.
    pub fn samples(&mut self) -> Result<&mut Self, HarnessError> {
        let shapes = sample_hinges(self.kernel.as_mut())?;
        for shape in shapes {
            self.check_name_available(&shape.name)?;
            self.insert(
                &shape.name,
                BenchShape {
                    handle: shape.shape,
                    hinge_width: None,
                    width: None,
                    kind: "sample".to_string(),
                },
            );
        }
        self.history
            .push(("samples".to_string(), "built".to_string()));
        Ok(self)
    }

    /// Build every hinge of a TOML config.
    pub fn config(&mut self, source: &str) -> Result<&mut Self, HarnessError> {
        let config = HingeConfig::from_toml_str(source)?;
        for entry in &config.hinges {
            self.check_name_available(&entry.name)?;
        }
        let built = config.build(self.kernel.as_mut())?;
        for (hinge, entry) in built.into_iter().zip(&config.hinges) {
            self.insert(
                &hinge.name,
                BenchShape {
                    handle: hinge.shape,
                    hinge_width: Some(hinge.hinge_width),
                    width: Some(entry.width),
                    kind: "config".to_string(),
                },
            );
        }
        self.history.push(("config".to_string(), "built".to_string()));
        Ok(self)
    }

    /// Register a translated copy of a named shape.
    pub fn translated(
        &mut self,
        name: &str,
        source: &str,
        offset: [f64; 3],
    ) -> Result<&mut Self, HarnessError> {
        self.check_name_available(name)?;
        let original = self.shape(source)?.clone();
        let handle = self.kernel.translate(&original.handle, offset)?;
        self.insert(
            name,
            BenchShape {
                handle,
                kind: "translated".to_string(),
                ..original
            },
        );
        Ok(self)
    }

    /// Register a copy of a named shape moved along X only.
    pub fn shifted_x(&mut self, name: &str, source: &str, dx: f64) -> Result<&mut Self, HarnessError> {
        self.check_name_available(name)?;
        let original = self.shape(source)?.clone();
        let handle = self.kernel.translate_x(&original.handle, dx)?;
        self.insert(
            name,
            BenchShape {
                handle,
                kind: "translated".to_string(),
                ..original
            },
        );
        Ok(self)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn shape(&self, name: &str) -> Result<&BenchShape, HarnessError> {
        self.shapes
            .get(name)
            .ok_or_else(|| HarnessError::ShapeNotFound {
                name: name.to_string(),
            })
    }

    /// Get the solid handle for a named shape.
    pub fn solid_handle(&self, name: &str) -> Result<SolidHandle, HarnessError> {
        Ok(self.shape(name)?.handle.clone())
    }

    pub fn hinge_width(&self, name: &str) -> Result<f64, HarnessError> {
        self.shape(name)?
            .hinge_width
            .ok_or_else(|| HarnessError::AssertionFailed {
                detail: format!("'{}' has no hinge width", name),
            })
    }

    pub fn bounding_box(&self, name: &str) -> Result<BoundingBox, HarnessError> {
        let handle = self.solid_handle(name)?;
        Ok(self.kernel.as_introspect().bounding_box(&handle)?)
    }

    pub fn component_count(&self, name: &str) -> Result<usize, HarnessError> {
        let handle = self.solid_handle(name)?;
        Ok(self.kernel.as_introspect().component_count(&handle)?)
    }

    /// Shape names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Get a reference to the kernel bundle (for direct oracle calls).
    pub fn kernel(&self) -> &dyn KernelBundle {
        self.kernel.as_ref()
    }

    /// Get a mutable reference to the kernel bundle.
    pub fn kernel_mut(&mut self) -> &mut dyn KernelBundle {
        self.kernel.as_mut()
    }

    /// Get the build history log.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    // ── Inline Assertions ───────────────────────────────────────────────

    /// Assert the bench holds exactly `expected` shapes.
    pub fn assert_shape_count(&self, expected: usize) -> Result<&Self, HarnessError> {
        if self.order.len() == expected {
            Ok(self)
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!(
                    "expected {} shapes, got {}. Shapes: {:?}",
                    expected,
                    self.order.len(),
                    self.order
                ),
            })
        }
    }

    pub fn assert_hinge_width(
        &self,
        name: &str,
        expected: f64,
        tol: f64,
    ) -> Result<&Self, HarnessError> {
        let actual = self.hinge_width(name)?;
        assertions::assert_length(actual, expected, tol, &format!("{} hinge width", name))?;
        Ok(self)
    }

    pub fn assert_bounding_box(
        &self,
        name: &str,
        min: [f64; 3],
        max: [f64; 3],
        tol: f64,
    ) -> Result<&Self, HarnessError> {
        let handle = self.solid_handle(name)?;
        assertions::assert_bounding_box(self.kernel(), &handle, min, max, tol, name)?;
        Ok(self)
    }

    pub fn assert_single_body(&self, name: &str) -> Result<&Self, HarnessError> {
        let handle = self.solid_handle(name)?;
        assertions::assert_single_body(self.kernel(), &handle, name)?;
        Ok(self)
    }

    // ── Oracle Integration ──────────────────────────────────────────────

    /// Run the hinge oracles on a named shape. Shapes without a known
    /// width skip the extent check.
    pub fn check_hinge(&self, name: &str) -> Result<Vec<OracleVerdict>, HarnessError> {
        let shape = self.shape(name)?;
        let introspect = self.kernel.as_introspect();
        let verdicts = match shape.width {
            Some(width) => oracle::check_hinge(introspect, &shape.handle, width, 1e-6),
            None => vec![
                oracle::check_single_body(introspect, &shape.handle),
                oracle::check_rests_on_bed(introspect, &shape.handle, 1e-6),
                oracle::check_y_symmetric(introspect, &shape.handle, 1e-6),
            ],
        };
        Ok(verdicts)
    }

    /// Generate a report of every shape on the bench.
    pub fn report(&self) -> Result<BenchReport, HarnessError> {
        BenchReport::generate(self)
    }

    // ── Internal Helpers ────────────────────────────────────────────────

    fn register_hinge(
        &mut self,
        name: &str,
        kind: &str,
        result: HingeResult,
        width: f64,
    ) -> Result<&mut Self, HarnessError> {
        self.insert(
            name,
            BenchShape {
                handle: result.hinge,
                hinge_width: Some(result.hinge_width),
                width: Some(width),
                kind: kind.to_string(),
            },
        );
        self.history.push((kind.to_string(), name.to_string()));
        if self.auto_check {
            assertions::assert_all_pass(&self.check_hinge(name)?)?;
        }
        Ok(self)
    }

    fn insert(&mut self, name: &str, shape: BenchShape) {
        self.shapes.insert(name.to_string(), shape);
        self.order.push(name.to_string());
    }

    fn check_name_available(&self, name: &str) -> Result<(), HarnessError> {
        if self.shapes.contains_key(name) {
            Err(HarnessError::DuplicateName {
                name: name.to_string(),
            })
        } else {
            Ok(())
        }
    }
}
