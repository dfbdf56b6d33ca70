//! Catalog runner
//!
//! Selects cases, evaluates them with bounded concurrency and collects
//! per-case outcomes into a [`RunSummary`](crate::report::RunSummary).

mod config;
mod executor;
mod outcome;

pub use config::RunnerConfig;
pub use executor::{CaseProgress, CaseRunner, ProgressCallback};
pub use outcome::{CaseOutcome, CaseStatus};
