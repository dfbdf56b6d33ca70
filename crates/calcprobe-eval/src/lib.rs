//! Calcprobe Evaluation Catalog
//!
//! Runs catalogs of calculator cases through a [`Calculator`] and reports
//! how the calculator behaved.
//!
//! # Features
//!
//! - **Built-in catalog**: arithmetic limits, heavy inputs, decimal behaviour
//!   and malformed-input behaviour for `bc`
//! - **Case files**: YAML/JSON cases with declarative inputs and expectations
//! - **Concurrent runner**: bounded parallelism with progress callbacks
//! - **Report generation**: table, JSON and Markdown output formats
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use calcprobe_core::{EvaluatorConfig, ProcessEvaluator};
//! use calcprobe_eval::{CaseLoader, CaseRunner, RunnerConfig};
//!
//! let calculator = Arc::new(ProcessEvaluator::new(EvaluatorConfig::default()));
//! let runner = CaseRunner::new(calculator, RunnerConfig::default().with_jobs(4));
//! let summary = runner.run(CaseLoader::builtin().load_all()?).await;
//! ```
//!
//! [`Calculator`]: calcprobe_core::Calculator

pub mod cases;
pub mod report;
pub mod runner;

// Re-exports for convenience
pub use cases::{
    CaseGroup, CaseLoader, Expectation, InputSpec, TestCase, Verdict, extract_id_from_description,
};
pub use report::{ReportFormat, RunSummary, generate_report};
pub use runner::{CaseOutcome, CaseProgress, CaseRunner, CaseStatus, RunnerConfig};
