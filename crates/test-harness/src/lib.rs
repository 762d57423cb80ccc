//! Test harness for scripted hinge workflows.
//!
//! Provides programmatic tools for building hinges against either kernel,
//! verifying them at every step, and generating diagnostic output.
//!
//! # Key Components
//!
//! - [`HingeBench`]: Fluent API for building and verifying named hinges
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`report`]: Structured text descriptions of a bench
//! - [`helpers`]: Error type and bounding box math
//! - [`assertions`]: Rich assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::BenchReport;
pub use workflow::HingeBench;
