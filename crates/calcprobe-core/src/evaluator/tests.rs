//! Tests for the process evaluator
//!
//! Pipe mechanics are exercised with `sh` and `cat` standing in for the
//! calculator. Tests that need a real `bc` are ignored by default; run them
//! with `cargo test -- --ignored` on a machine that has it.

use super::*;
use crate::config::{DrainMode, EvaluatorConfig};
use crate::input::InputSource;
use std::time::{Duration, Instant};

fn shell(script: &str) -> ProcessEvaluator {
    ProcessEvaluator::new(EvaluatorConfig::new("sh").with_args(["-c", script]))
}

fn cat() -> ProcessEvaluator {
    ProcessEvaluator::new(EvaluatorConfig::new("cat"))
}

fn bc() -> ProcessEvaluator {
    let available = std::process::Command::new("bc")
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok();
    assert!(available, "bc not found on PATH");
    ProcessEvaluator::new(EvaluatorConfig::default())
}

// ============================================================================
// Pipe mechanics
// ============================================================================

#[tokio::test]
async fn test_literal_is_written_with_newline() {
    let result = cat().evaluate(InputSource::literal("2+2")).await;

    assert!(result.is_success());
    assert_eq!(result.output(), Some("2+2"));
    assert_eq!(result.error(), Some(""));
    assert_eq!(result.exit_code(), Some(0));
}

#[tokio::test]
async fn test_stderr_marks_failure() {
    let evaluator = shell("cat; printf '  first\\nsecond\\n\\n' >&2");
    let result = evaluator.evaluate(InputSource::literal("1/0")).await;

    assert!(!result.is_success());
    assert_eq!(result.output(), Some("1/0"));
    assert_eq!(result.error(), Some("first\nsecond"));
}

#[tokio::test]
async fn test_exit_status_is_informational() {
    let result = shell("cat >/dev/null; echo 7; exit 3")
        .evaluate(InputSource::literal("ignored"))
        .await;

    assert!(result.is_success());
    assert_eq!(result.output(), Some("7"));
    assert_eq!(result.exit_code(), Some(3));
}

#[tokio::test]
async fn test_spawn_failure_is_a_result() {
    let evaluator = ProcessEvaluator::new(EvaluatorConfig::new("calcprobe-no-such-binary"));
    let result = evaluator.evaluate(InputSource::literal("2+2")).await;

    assert!(!result.is_success());
    assert!(result.output().is_none());
    let error = result.error().unwrap();
    assert!(error.starts_with("Failed to start calculator process 'calcprobe-no-such-binary'"));
}

#[tokio::test]
async fn test_empty_literal() {
    let result = cat().evaluate(InputSource::literal("")).await;
    assert!(result.is_success());
    assert_eq!(result.output(), Some(""));
}

#[tokio::test]
async fn test_line_continuations_are_joined() {
    let script = "cat >/dev/null; printf '123\\134\\n456\\n'";
    let result = shell(script).evaluate(InputSource::literal("x")).await;
    assert_eq!(result.output(), Some("123456"));

    let mut config = EvaluatorConfig::new("sh").with_args(["-c", script]);
    config.strip_line_continuations = false;
    let result = ProcessEvaluator::new(config)
        .evaluate(InputSource::literal("x"))
        .await;
    assert_eq!(result.output(), Some("123\\456"));
}

#[tokio::test]
async fn test_stream_is_not_terminated_with_newline() {
    let result = shell("wc -c")
        .evaluate(InputSource::stream_text("1+1"))
        .await;
    assert_eq!(result.trimmed_output(), "3");
}

#[tokio::test]
async fn test_repeated_stream_reaches_process() {
    let result = shell("wc -c")
        .evaluate(InputSource::repeated("", "1 + ", 1000, "0\n"))
        .await;
    assert_eq!(result.trimmed_output(), "4002");
}

#[tokio::test]
async fn test_closed_stdin_reports_write_failure() {
    let evaluator = ProcessEvaluator::new(EvaluatorConfig::new("true"));
    let result = evaluator
        .evaluate(InputSource::repeated("", "9", 10_000_000, "\n"))
        .await;

    assert!(!result.is_success());
    assert!(result.output().is_none());
    assert!(
        result
            .error()
            .unwrap()
            .starts_with("I/O error while writing input")
    );
}

// ============================================================================
// Deadlock and timeout behaviour
// ============================================================================

#[tokio::test]
async fn test_large_echo_does_not_deadlock() {
    // Far more than the combined pipe buffers in both directions.
    let evaluator = ProcessEvaluator::new(
        EvaluatorConfig::new("cat").with_timeout(Duration::from_secs(30)),
    );
    let result = evaluator
        .evaluate_with_timeout(InputSource::repeated("", "9", 4 * 1024 * 1024, ""))
        .await;

    assert!(result.is_success(), "error: {:?}", result.error());
    assert_eq!(result.output().map(str::len), Some(4 * 1024 * 1024));
}

#[tokio::test]
async fn test_draining_after_input_can_stall() {
    let evaluator = ProcessEvaluator::new(
        EvaluatorConfig::new("cat")
            .with_timeout(Duration::from_secs(1))
            .with_drain_mode(DrainMode::AfterInput),
    );
    let start = Instant::now();
    let result = evaluator
        .evaluate_with_timeout(InputSource::repeated("", "9", 4 * 1024 * 1024, ""))
        .await;

    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(result.is_timeout());
    assert_eq!(result.error(), Some("Timeout: cat evaluation exceeded 1s"));
}

#[tokio::test]
async fn test_unbounded_stream_is_cut_off() {
    let evaluator = ProcessEvaluator::new(
        EvaluatorConfig::new("sh")
            .with_args(["-c", "cat >/dev/null"])
            .with_timeout(Duration::from_millis(500)),
    );
    let start = Instant::now();
    let result = evaluator
        .evaluate_with_timeout(InputSource::unbounded("1+"))
        .await;

    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(!result.is_success());
    assert!(result.output().is_none());
    assert_eq!(result.error(), Some("Timeout: sh evaluation exceeded 0.5s"));
}

#[tokio::test]
async fn test_slow_process_is_cut_off() {
    let evaluator = ProcessEvaluator::new(
        EvaluatorConfig::new("sleep")
            .with_args(["30"])
            .with_timeout(Duration::from_millis(200)),
    );
    let start = Instant::now();
    let result = evaluator
        .evaluate_with_timeout(InputSource::literal(""))
        .await;

    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(result.is_timeout());
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_timeout_kills_child_process() {
    let dir = tempfile::TempDir::new().unwrap();
    let pidfile = dir.path().join("child.pid");
    let script = format!("echo $$ > '{}'; exec sleep 30", pidfile.display());
    let evaluator = ProcessEvaluator::new(
        EvaluatorConfig::new("sh")
            .with_args(["-c", script.as_str()])
            .with_timeout(Duration::from_millis(300)),
    );

    let result = evaluator
        .evaluate_with_timeout(InputSource::literal(""))
        .await;
    assert_eq!(result.error(), Some("Timeout: sh evaluation exceeded 0.3s"));

    let pid = std::fs::read_to_string(&pidfile).unwrap();
    let stat = format!("/proc/{}/stat", pid.trim());

    let deadline = Instant::now() + Duration::from_secs(3);
    while std::path::Path::new(&stat).exists() && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(
        !std::path::Path::new(&stat).exists(),
        "calculator process {} outlived the timeout",
        pid.trim()
    );
}

#[tokio::test]
async fn test_concurrent_evaluations_are_isolated() {
    let evaluator = cat();
    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let evaluator = evaluator.clone();
            tokio::spawn(async move {
                let expr = format!("{i}+{i}");
                let result = evaluator.evaluate(InputSource::literal(expr.clone())).await;
                (expr, result)
            })
        })
        .collect();

    for task in tasks {
        let (expr, result) = task.await.unwrap();
        assert_eq!(result.output(), Some(expr.as_str()));
    }
}

#[tokio::test]
async fn test_calculator_trait_object() {
    let calculator: std::sync::Arc<dyn Calculator> = std::sync::Arc::new(cat());
    let result = calculator
        .evaluate_with_timeout(InputSource::literal("5"))
        .await;
    assert_eq!(result.output(), Some("5"));
}

// ============================================================================
// Real bc
// ============================================================================

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_addition() {
    let bc = bc();
    let result = bc.evaluate(InputSource::literal("2+2")).await;
    assert!(result.is_success());
    assert_eq!(result.output(), Some("4"));
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_is_idempotent() {
    let bc = bc();
    let first = bc.evaluate(InputSource::literal("2 + 3 * 4 - 5")).await;
    let second = bc.evaluate(InputSource::literal("2 + 3 * 4 - 5")).await;
    assert_eq!(first.output(), Some("9"));
    assert_eq!(first.output(), second.output());
    assert_eq!(first.error(), second.error());
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_divide_by_zero() {
    let bc = bc();
    let result = bc.evaluate(InputSource::literal("1 / 0")).await;
    assert!(!result.is_success());
    assert!(!result.error().unwrap_or_default().is_empty());
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_empty_input() {
    let bc = bc();
    let result = bc.evaluate(InputSource::literal("")).await;
    assert!(result.is_success());
    assert_eq!(result.trimmed_output(), "");
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_scale() {
    let bc = bc();
    let result = bc.evaluate(InputSource::literal("scale=50; 1/7")).await;
    assert_eq!(
        result.output(),
        Some(".14285714285714285714285714285714285714285714285714")
    );
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_long_result_is_rejoined() {
    let bc = bc();
    let result = bc.evaluate(InputSource::literal("scale=5000; 1/3")).await;
    let output = result.output().unwrap();
    assert!(output.starts_with(".3333"));
    assert!(!output.contains('\\'));
    assert!(output.len() > 4999);
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_nested_parentheses() {
    let bc = bc();
    let expr = format!("{}1+2{}", "(".repeat(100), ")".repeat(100));
    let result = bc.evaluate(InputSource::literal(expr)).await;
    assert_eq!(result.output(), Some("3"));
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_streamed_sum() {
    let bc = bc();
    let terms = vec!["1"; 1000].join(" + ");
    let result = bc.evaluate(InputSource::stream_text(format!("{terms}\n"))).await;
    assert_eq!(result.output(), Some("1000"));
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_unbounded_stream_times_out() {
    let bc = bc();
    let start = Instant::now();
    let result = bc.evaluate_with_timeout(InputSource::unbounded("1+")).await;

    assert!(start.elapsed() < Duration::from_secs(10));
    assert!(!result.is_success());
    if result.is_timeout() {
        assert_eq!(result.error(), Some("Timeout: bc evaluation exceeded 2s"));
    }
}
