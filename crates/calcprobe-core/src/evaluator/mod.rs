//! Calculator process evaluator
//!
//! Spawns the calculator with piped stdin/stdout/stderr, feeds it an
//! [`InputSource`], drains both output pipes concurrently and assembles an
//! [`EvaluationResult`]. Evaluation is total: spawn failures and I/O faults
//! come back as failed results, never as errors or panics.

mod output;
mod process;

#[cfg(test)]
mod tests;

pub use output::normalize_stdout;
pub use process::ProcessEvaluator;

use async_trait::async_trait;

use crate::input::InputSource;
use crate::result::EvaluationResult;

/// Something that can evaluate calculator input
#[async_trait]
pub trait Calculator: Send + Sync {
    /// Evaluate without a deadline
    async fn evaluate(&self, input: InputSource) -> EvaluationResult;

    /// Evaluate under the configured wall-clock budget
    async fn evaluate_with_timeout(&self, input: InputSource) -> EvaluationResult;
}
