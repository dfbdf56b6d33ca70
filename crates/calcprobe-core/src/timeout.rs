//! Wall-clock budget around an evaluation
//!
//! The guarded future runs on its own spawned task. On every exit path the
//! task is aborted when the guard returns, which drops the evaluation future
//! and with it the child process (spawned with `kill_on_drop`) and its
//! drainers.

use std::any::Any;
use std::future::Future;
use std::time::Duration;

use tokio::task::{JoinError, JoinHandle};

use crate::error::EvalError;
use crate::result::EvaluationResult;

/// Deadline applied to guarded evaluations
#[derive(Debug, Clone)]
pub struct TimeoutGuard {
    limit: Duration,
    label: String,
}

impl TimeoutGuard {
    /// Create a guard with the given limit and label for timeout messages
    pub fn new(limit: Duration, label: impl Into<String>) -> Self {
        Self {
            limit,
            label: label.into(),
        }
    }

    /// Time budget
    pub fn limit(&self) -> Duration {
        self.limit
    }

    /// Label used in timeout messages
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run `task` under this guard
    pub async fn run<F>(&self, task: F) -> EvaluationResult
    where
        F: Future<Output = EvaluationResult> + Send + 'static,
    {
        run_with_timeout(task, self.limit, &self.label).await
    }
}

/// Spawned worker that is aborted when dropped
struct Worker<T> {
    handle: JoinHandle<T>,
}

impl<T> Drop for Worker<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run `task` on a dedicated worker with a hard deadline
///
/// Returns the task's result unchanged if it finishes in time. Otherwise the
/// worker is cancelled and the result is a failure with
/// `Timeout: <label> exceeded <limit>s`. A panicking task yields
/// `Execution failed: <message>`.
pub async fn run_with_timeout<F>(task: F, limit: Duration, label: &str) -> EvaluationResult
where
    F: Future<Output = EvaluationResult> + Send + 'static,
{
    tracing::info!(task = label, limit_secs = limit.as_secs_f64(), "Starting guarded task");

    let mut worker = Worker {
        handle: tokio::spawn(task),
    };

    let outcome = tokio::time::timeout(limit, &mut worker.handle).await;
    drop(worker);

    match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => {
            let err = EvalError::Execution(describe_join_error(join_error));
            tracing::error!(task = label, error = %err, "Guarded task failed");
            EvaluationResult::failure(&err)
        }
        Err(_) => {
            let err = EvalError::timeout(label, limit);
            tracing::error!(task = label, "{}", err);
            EvaluationResult::failure(&err)
        }
    }
}

fn describe_join_error(err: JoinError) -> String {
    if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        "task was cancelled".to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}
