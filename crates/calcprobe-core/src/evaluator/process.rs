//! Core process evaluator implementation

use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tracing::instrument;

use crate::config::{DrainMode, EvaluatorConfig};
use crate::drainer::{DrainedOutput, StreamDrainer};
use crate::error::{EvalError, EvalResult, IoStage};
use crate::input::InputSource;
use crate::result::EvaluationResult;
use crate::timeout::run_with_timeout;

use super::Calculator;
use super::output::{normalize_stdout, preview, tail};

/// Evaluator driving an external calculator process
///
/// Each call spawns its own process; nothing is shared between calls, so a
/// single evaluator can be cloned and used from many tasks at once.
#[derive(Debug, Clone, Default)]
pub struct ProcessEvaluator {
    config: Arc<EvaluatorConfig>,
}

impl ProcessEvaluator {
    /// Create an evaluator with the given configuration
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Evaluator configuration
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate `input` and wait for the calculator to finish
    #[instrument(skip_all, fields(command = %self.config.command, input = %input.describe()))]
    pub async fn evaluate(&self, input: InputSource) -> EvaluationResult {
        let start = Instant::now();
        match self.run(input, start).await {
            Ok(result) => result,
            Err(err) => {
                tracing::error!(error = %err, "Evaluation failed");
                EvaluationResult::failure(&err)
            }
        }
    }

    /// Evaluate `input` under the configured timeout
    pub async fn evaluate_with_timeout(&self, input: InputSource) -> EvaluationResult {
        let evaluator = self.clone();
        run_with_timeout(
            async move { evaluator.evaluate(input).await },
            self.config.timeout,
            &self.config.label(),
        )
        .await
    }

    async fn run(&self, input: InputSource, start: Instant) -> EvalResult<EvaluationResult> {
        tracing::info!("Launching calculator process");
        let mut child = self.spawn()?;

        let stdin = child.stdin.take();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (stdout_drainer, stderr_drainer) = match self.config.drain_mode {
            DrainMode::Concurrent => {
                let drainers = start_drainers(stdout, stderr);
                self.feed(stdin, input).await?;
                drainers
            }
            DrainMode::AfterInput => {
                self.feed(stdin, input).await?;
                start_drainers(stdout, stderr)
            }
        };

        let (status, stdout, stderr) = tokio::join!(
            wait_for_exit(&mut child),
            join_drainer(stdout_drainer),
            join_drainer(stderr_drainer),
        );
        let status = status?;

        for drained in [&stdout, &stderr] {
            if let Some(fault) = drained.fault() {
                tracing::debug!(
                    pipe = drained.name(),
                    partial_bytes = drained.bytes_read(),
                    "Discarding partial output after read fault"
                );
                return Err(EvalError::io(
                    IoStage::ReadingOutput,
                    std::io::Error::other(format!("{}: {}", drained.name(), fault)),
                ));
            }
        }

        let output = normalize_stdout(stdout.text(), self.config.strip_line_continuations);
        let error = stderr.joined().trim().to_string();

        if !error.is_empty() {
            tracing::error!("STDERR from calculator:\n{}", error);
        }

        tracing::info!(
            preview = %preview(&output, self.config.preview_chars),
            tail = %tail(&output),
            output_len = output.len(),
            error_len = error.len(),
            exit_code = ?status.code(),
            "Result received"
        );

        Ok(EvaluationResult::completed(
            output,
            error,
            status.code(),
            start.elapsed(),
        ))
    }

    fn spawn(&self) -> EvalResult<Child> {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args)
            .envs(&self.config.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        cmd.spawn().map_err(|source| EvalError::Spawn {
            command: self.config.command.clone(),
            source,
        })
    }

    /// Write the input to stdin, then flush and close it
    async fn feed(&self, stdin: Option<ChildStdin>, input: InputSource) -> EvalResult<()> {
        let mut stdin = stdin.ok_or_else(|| {
            EvalError::io(
                IoStage::WritingInput,
                std::io::Error::other("stdin was not captured"),
            )
        })?;

        match input {
            InputSource::Literal(text) => {
                stdin
                    .write_all(text.as_bytes())
                    .await
                    .map_err(|e| EvalError::io(IoStage::WritingInput, e))?;
                stdin
                    .write_all(b"\n")
                    .await
                    .map_err(|e| EvalError::io(IoStage::WritingInput, e))?;
            }
            InputSource::Stream(stream) => {
                tracing::info!(chunk_size = self.config.chunk_size, "Streaming input to calculator");
                let mut reader = stream.into_reader();
                let mut buffer = vec![0u8; self.config.chunk_size];
                let mut total: u64 = 0;

                loop {
                    let n = reader
                        .read(&mut buffer)
                        .await
                        .map_err(|e| EvalError::io(IoStage::ReadingInput, e))?;
                    if n == 0 {
                        break;
                    }
                    stdin
                        .write_all(&buffer[..n])
                        .await
                        .map_err(|e| EvalError::io(IoStage::WritingInput, e))?;
                    total += n as u64;
                }

                tracing::debug!(bytes = total, "Input stream exhausted");
            }
        }

        stdin
            .flush()
            .await
            .map_err(|e| EvalError::io(IoStage::ClosingInput, e))?;
        stdin
            .shutdown()
            .await
            .map_err(|e| EvalError::io(IoStage::ClosingInput, e))?;
        Ok(())
    }
}

#[async_trait]
impl Calculator for ProcessEvaluator {
    async fn evaluate(&self, input: InputSource) -> EvaluationResult {
        ProcessEvaluator::evaluate(self, input).await
    }

    async fn evaluate_with_timeout(&self, input: InputSource) -> EvaluationResult {
        ProcessEvaluator::evaluate_with_timeout(self, input).await
    }
}

fn start_drainers(
    stdout: Option<tokio::process::ChildStdout>,
    stderr: Option<tokio::process::ChildStderr>,
) -> (Option<StreamDrainer>, Option<StreamDrainer>) {
    (
        stdout.map(|pipe| StreamDrainer::start(pipe, "stdout")),
        stderr.map(|pipe| StreamDrainer::start(pipe, "stderr")),
    )
}

async fn join_drainer(drainer: Option<StreamDrainer>) -> DrainedOutput {
    match drainer {
        Some(drainer) => drainer.join().await,
        None => DrainedOutput::default(),
    }
}

async fn wait_for_exit(child: &mut Child) -> EvalResult<std::process::ExitStatus> {
    child
        .wait()
        .await
        .map_err(|e| EvalError::io(IoStage::WaitingForExit, e))
}
