//! Case runner driving a calculator through the catalog
//!
//! Cases run with bounded concurrency; every case gets its own freshly built
//! input and its own evaluation, so outcomes never depend on each other.

use std::sync::Arc;
use std::time::Instant;

use calcprobe_core::Calculator;
use futures::StreamExt;
use futures::stream;

use super::{CaseOutcome, CaseStatus, RunnerConfig};
use crate::cases::TestCase;
use crate::report::RunSummary;

/// Callback for progress updates during a run
pub type ProgressCallback = Box<dyn Fn(CaseProgress) + Send + Sync>;

/// Progress update during a run
#[derive(Debug, Clone)]
pub struct CaseProgress {
    /// Number of cases finished so far
    pub completed: usize,
    /// Total number of selected cases
    pub total: usize,
    /// Case id
    pub case_id: String,
    /// Case description
    pub description: String,
    /// `None` when the case is starting, the final status once it finished
    pub status: Option<CaseStatus>,
}

/// Runner for catalog cases
pub struct CaseRunner {
    calculator: Arc<dyn Calculator>,
    config: RunnerConfig,
    calculator_name: String,
    progress_callback: Option<ProgressCallback>,
}

impl CaseRunner {
    /// Create a runner over `calculator`
    pub fn new(calculator: Arc<dyn Calculator>, config: RunnerConfig) -> Self {
        Self {
            calculator,
            config,
            calculator_name: "bc".to_string(),
            progress_callback: None,
        }
    }

    /// Name recorded in the run summary
    pub fn with_calculator_name(mut self, name: impl Into<String>) -> Self {
        self.calculator_name = name.into();
        self
    }

    /// Set progress callback
    pub fn set_progress_callback(&mut self, callback: ProgressCallback) {
        self.progress_callback = Some(callback);
    }

    /// Runner configuration
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run the cases selected by the configuration
    pub async fn run(&self, cases: Vec<TestCase>) -> RunSummary {
        let cases = self.config.select(cases);
        let total = cases.len();
        let start = Instant::now();

        tracing::info!(
            cases = total,
            jobs = self.config.jobs,
            calculator = %self.calculator_name,
            "Starting catalog run"
        );

        let mut pending = stream::iter(cases)
            .map(|case| self.run_case(case, total))
            .buffer_unordered(self.config.jobs.max(1));

        let mut outcomes = Vec::with_capacity(total);
        while let Some(outcome) = pending.next().await {
            let passed = outcome.passed();
            outcomes.push(outcome);

            self.emit_progress(outcomes.last(), outcomes.len(), total);

            if !passed && !self.config.continue_on_failure {
                tracing::warn!("Stopping run after first failing case");
                break;
            }
        }
        drop(pending);

        outcomes.sort_by(|a, b| a.id.cmp(&b.id));
        RunSummary::from_outcomes(&self.calculator_name, outcomes, start.elapsed())
    }

    /// Run a single case
    pub async fn run_single(&self, case: &TestCase) -> CaseOutcome {
        let start = Instant::now();
        let input = case.input.build();

        tracing::info!(
            case_id = %case.id,
            input = %case.input.summary(60),
            guarded = case.guarded,
            "Running case"
        );

        let result = if case.guarded {
            self.calculator.evaluate_with_timeout(input).await
        } else {
            self.calculator.evaluate(input).await
        };

        let outcome = CaseOutcome::new(case, &result, start.elapsed());
        tracing::info!(
            case_id = %case.id,
            status = %outcome.status,
            message = %outcome.verdict.message,
            "Case finished"
        );
        outcome
    }

    async fn run_case(&self, case: TestCase, total: usize) -> CaseOutcome {
        if let Some(callback) = &self.progress_callback {
            callback(CaseProgress {
                completed: 0,
                total,
                case_id: case.id.clone(),
                description: case.description.clone(),
                status: None,
            });
        }
        self.run_single(&case).await
    }

    fn emit_progress(&self, outcome: Option<&CaseOutcome>, completed: usize, total: usize) {
        let (Some(callback), Some(outcome)) = (&self.progress_callback, outcome) else {
            return;
        };
        callback(CaseProgress {
            completed,
            total,
            case_id: outcome.id.clone(),
            description: outcome.description.clone(),
            status: Some(outcome.status),
        });
    }
}
