//! Single expression evaluation

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use calcprobe_core::{EvaluatorConfig, InputSource, ProcessEvaluator};

use crate::console::CliConsole;

/// Evaluate one expression and print the result
///
/// The output goes to stdout; the calculator's error text goes to stderr and
/// turns the exit status into a failure.
pub async fn eval(
    mut config: EvaluatorConfig,
    expression: &str,
    timeout: Option<f64>,
    no_timeout: bool,
) -> Result<ExitCode> {
    if let Some(secs) = timeout {
        config.timeout = Duration::try_from_secs_f64(secs)
            .with_context(|| format!("Invalid timeout: {}", secs))?;
        config.validate().context("Invalid timeout")?;
    }

    let input = if expression == "-" {
        InputSource::stream(tokio::io::stdin())
    } else {
        InputSource::literal(expression)
    };

    let evaluator = ProcessEvaluator::new(config);
    let result = if no_timeout {
        evaluator.evaluate(input).await
    } else {
        evaluator.evaluate_with_timeout(input).await
    };

    if let Some(output) = result.output().filter(|o| !o.is_empty()) {
        println!("{}", output);
    }

    if result.is_success() {
        return Ok(ExitCode::SUCCESS);
    }

    let console = CliConsole::new(false);
    console.error(result.error().unwrap_or("calculator reported an error"));
    Ok(ExitCode::FAILURE)
}
