//! Error taxonomy for calculator evaluation
//!
//! Evaluation itself is total: [`ProcessEvaluator`](crate::ProcessEvaluator) and the
//! timeout guard convert every variant into a failed
//! [`EvaluationResult`](crate::EvaluationResult). The `Result`-returning paths are
//! construction and configuration only.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for calcprobe core operations
pub type EvalResult<T> = Result<T, EvalError>;

/// Stage of an evaluation at which an I/O fault happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoStage {
    /// Writing expression text to the calculator's stdin
    WritingInput,
    /// Reading from the caller-provided stream producer
    ReadingInput,
    /// Flushing or closing the calculator's stdin
    ClosingInput,
    /// Reading the calculator's stdout or stderr
    ReadingOutput,
    /// Waiting for the calculator to exit
    WaitingForExit,
}

impl std::fmt::Display for IoStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match self {
            IoStage::WritingInput => "writing input",
            IoStage::ReadingInput => "reading input stream",
            IoStage::ClosingInput => "closing input",
            IoStage::ReadingOutput => "reading output",
            IoStage::WaitingForExit => "waiting for process exit",
        };
        f.write_str(stage)
    }
}

/// Errors that can occur while evaluating an expression
#[derive(Debug, Error)]
pub enum EvalError {
    /// The calculator process could not be started
    #[error("Failed to start calculator process '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure mid-evaluation
    #[error("I/O error while {stage}: {source}")]
    Io {
        stage: IoStage,
        #[source]
        source: std::io::Error,
    },

    /// Evaluation did not finish within its wall-clock budget
    #[error("Timeout: {label} exceeded {}s", format_secs(.limit))]
    Timeout { label: String, limit: Duration },

    /// Any other failure surfaced while awaiting a guarded evaluation
    #[error("Execution failed: {0}")]
    Execution(String),

    /// Input could not be constructed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}

impl EvalError {
    /// Create an I/O error for the given stage
    pub fn io(stage: IoStage, source: std::io::Error) -> Self {
        Self::Io { stage, source }
    }

    /// Create a timeout error
    pub fn timeout(label: impl Into<String>, limit: Duration) -> Self {
        Self::Timeout {
            label: label.into(),
            limit,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error represents an exceeded deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Render a duration as seconds without a trailing `.0` for whole values
pub(crate) fn format_secs(limit: &Duration) -> String {
    if limit.subsec_nanos() == 0 {
        limit.as_secs().to_string()
    } else {
        limit.as_secs_f64().to_string()
    }
}
