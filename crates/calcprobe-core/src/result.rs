//! Outcome of a single calculator evaluation

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Immutable result of an evaluation attempt
///
/// `success` is derived from `error` alone: an evaluation succeeds when the
/// calculator wrote nothing to stderr. The exit status is recorded for
/// reporting but does not participate. Deserialized results recompute
/// `success` and ignore any stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawResult")]
pub struct EvaluationResult {
    output: Option<String>,
    error: Option<String>,
    success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exit_code: Option<i32>,
    #[serde(default, with = "humantime_serde")]
    elapsed: Duration,
}

/// Serialized form of [`EvaluationResult`]
#[derive(Deserialize)]
struct RawResult {
    output: Option<String>,
    error: Option<String>,
    #[serde(default)]
    exit_code: Option<i32>,
    #[serde(default, with = "humantime_serde")]
    elapsed: Duration,
}

impl From<RawResult> for EvaluationResult {
    fn from(raw: RawResult) -> Self {
        Self {
            exit_code: raw.exit_code,
            elapsed: raw.elapsed,
            ..Self::new(raw.output, raw.error)
        }
    }
}

impl EvaluationResult {
    /// Create a result from captured output and error text
    pub fn new(output: Option<String>, error: Option<String>) -> Self {
        let success = error.as_deref().is_none_or(str::is_empty);
        Self {
            output,
            error,
            success,
            exit_code: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a completed result from normalized stdout and trimmed stderr
    pub fn completed(
        output: String,
        error: String,
        exit_code: Option<i32>,
        elapsed: Duration,
    ) -> Self {
        Self {
            exit_code,
            elapsed,
            ..Self::new(Some(output), Some(error))
        }
    }

    /// Create a failed result with no output from an evaluation error
    pub fn failure(err: &EvalError) -> Self {
        Self::new(None, Some(err.to_string()))
    }

    /// Captured and normalized stdout, `None` when evaluation faulted
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Trimmed stderr or a fault description
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the evaluation produced no error text
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Exit code of the calculator process, if it exited normally
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// Wall-clock time from spawn to join
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Output with surrounding whitespace removed, empty when absent
    pub fn trimmed_output(&self) -> &str {
        self.output.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Whether the error mentions an exceeded deadline
    pub fn is_timeout(&self) -> bool {
        self.error.as_deref().is_some_and(|e| e.contains("Timeout"))
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(f, "Result: {}", self.output.as_deref().unwrap_or(""))
        } else {
            write!(f, "Error: {}", self.error.as_deref().unwrap_or(""))
        }
    }
}
