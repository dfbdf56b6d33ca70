//! End-to-end evaluation through real processes
//!
//! `sh` and `cat` stand in for the calculator where the behaviour under test
//! is about pipes and deadlines. Tests needing `bc` are ignored by default.

use std::time::{Duration, Instant};

use calcprobe_core::{
    Calculator, Config, EvaluatorConfig, InputSource, LoggingConfig, ProcessEvaluator,
    init_logging,
};

fn require_bc() {
    let available = std::process::Command::new("bc")
        .arg("--version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok();
    assert!(available, "bc not found on PATH");
}

#[tokio::test]
async fn test_echo_round_trip_with_logging() {
    init_logging(&LoggingConfig {
        level: "debug".to_string(),
        format: "compact".to_string(),
    });

    let evaluator = ProcessEvaluator::new(EvaluatorConfig::new("cat"));
    let result = evaluator.evaluate_with_timeout(InputSource::literal("6*7")).await;
    assert!(result.is_success());
    assert_eq!(result.output(), Some("6*7"));
}

#[tokio::test]
async fn test_parallel_evaluations_through_trait_objects() {
    let calculator: std::sync::Arc<dyn Calculator> =
        std::sync::Arc::new(ProcessEvaluator::new(EvaluatorConfig::new("cat")));

    let results = futures::future::join_all((0..8).map(|i| {
        let calculator = calculator.clone();
        async move {
            let input = InputSource::repeated(&format!("{i}:"), "x", 100_000, "");
            (i, calculator.evaluate(input).await)
        }
    }))
    .await;

    for (i, result) in results {
        let output = result.output().unwrap();
        assert!(output.starts_with(&format!("{i}:")));
        assert_eq!(output.len(), format!("{i}:").len() + 100_000);
    }
}

#[tokio::test]
async fn test_config_file_drives_evaluator() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("calcprobe.yaml");
    std::fs::write(
        &path,
        "evaluator:\n  command: sh\n  args: [\"-c\", \"cat >/dev/null; echo 42\"]\n  timeout: 3s\n",
    )
    .unwrap();

    let config = Config::load(Some(&path)).unwrap();
    assert_eq!(config.evaluator.timeout, Duration::from_secs(3));

    let result = ProcessEvaluator::new(config.evaluator)
        .evaluate_with_timeout(InputSource::literal("anything"))
        .await;
    assert_eq!(result.output(), Some("42"));
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_properties() {
    require_bc();
    let bc = ProcessEvaluator::new(EvaluatorConfig::default());

    let sum = bc.evaluate(InputSource::literal("2+2")).await;
    assert!(sum.is_success());
    assert_eq!(sum.output(), Some("4"));

    let zero = bc.evaluate(InputSource::literal("1/0")).await;
    assert!(!zero.is_success());
    assert!(!zero.error().unwrap_or_default().trim().is_empty());

    let empty = bc.evaluate(InputSource::literal("")).await;
    assert!(empty.is_success());
    assert!(empty.trimmed_output().is_empty());

    let precise = bc.evaluate(InputSource::literal("scale=50; 1/7")).await;
    assert_eq!(
        precise.output(),
        Some(".14285714285714285714285714285714285714285714285714")
    );
}

#[tokio::test]
#[ignore = "requires bc on PATH"]
async fn test_bc_guard_bounds_unbounded_input() {
    require_bc();
    let bc = ProcessEvaluator::new(EvaluatorConfig::default());

    let start = Instant::now();
    let result = bc
        .evaluate_with_timeout(InputSource::repeated("", "1+", 1_000_000_000, ""))
        .await;

    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(
        result.is_timeout()
            || result.output().is_none_or(|o| o.trim().is_empty())
            || result.output() == Some("0")
    );
}
