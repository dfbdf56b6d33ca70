//! Per-case outcomes

use std::fmt;
use std::time::Duration;

use calcprobe_core::EvaluationResult;
use serde::{Deserialize, Serialize};

use crate::cases::{CaseGroup, TestCase, Verdict};

/// Characters of output kept on an outcome
const OUTPUT_PREVIEW_CHARS: usize = 120;

/// Status of a case after it ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Expectation held
    Passed,
    /// Expectation did not hold
    Failed,
    /// Expectation did not hold and the guard cut the evaluation off
    Timeout,
    /// The calculator could not be driven at all
    Error,
}

impl CaseStatus {
    /// Check if the status represents success
    pub fn is_success(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }

    /// Short label for tables
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Passed => "PASS",
            CaseStatus::Failed => "FAIL",
            CaseStatus::Timeout => "TIMEOUT",
            CaseStatus::Error => "ERROR",
        }
    }

    fn classify(verdict: &Verdict, result: &EvaluationResult) -> Self {
        if verdict.passed {
            CaseStatus::Passed
        } else if result.is_timeout() {
            CaseStatus::Timeout
        } else if result.output().is_none() {
            CaseStatus::Error
        } else {
            CaseStatus::Failed
        }
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Result of running one case
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcome {
    /// Case id
    pub id: String,
    /// Case description
    pub description: String,
    /// Case group
    pub group: CaseGroup,
    /// Final status
    pub status: CaseStatus,
    /// Expectation verdict
    pub verdict: Verdict,
    /// Leading part of the calculator output
    pub output_preview: Option<String>,
    /// Full output length in characters
    pub output_len: usize,
    /// Calculator error text
    pub error: Option<String>,
    /// Calculator exit code
    pub exit_code: Option<i32>,
    /// Wall-clock time spent on the case
    pub execution_time_secs: f64,
}

impl CaseOutcome {
    /// Build an outcome from a finished evaluation
    pub fn new(case: &TestCase, result: &EvaluationResult, elapsed: Duration) -> Self {
        let verdict = case.check(result);
        let status = CaseStatus::classify(&verdict, result);

        Self {
            id: case.id.clone(),
            description: case.description.clone(),
            group: case.group,
            status,
            verdict,
            output_preview: result.output().map(|o| o.chars().take(OUTPUT_PREVIEW_CHARS).collect()),
            output_len: result.output().map_or(0, |o| o.chars().count()),
            error: result.error().filter(|e| !e.is_empty()).map(str::to_string),
            exit_code: result.exit_code(),
            execution_time_secs: elapsed.as_secs_f64(),
        }
    }

    /// Whether the case passed
    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}
