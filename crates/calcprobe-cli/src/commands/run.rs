//! Catalog runs

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use calcprobe_core::{EvaluatorConfig, ProcessEvaluator};
use calcprobe_eval::{CaseProgress, CaseRunner, ReportFormat, RunnerConfig, generate_report};

use super::{loader_for, parse_groups};
use crate::console::{CliConsole, status_label, status_mark};

/// Options for `calcprobe run`
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub ids: Vec<String>,
    pub groups: Vec<String>,
    pub tags: Vec<String>,
    pub jobs: usize,
    pub format: String,
    pub cases: Option<PathBuf>,
    pub fail_fast: bool,
    pub verbose: bool,
}

/// Run catalog cases and print a report
pub async fn run(config: EvaluatorConfig, options: RunOptions) -> Result<ExitCode> {
    let console = CliConsole::new(options.verbose);

    let format = ReportFormat::from_str(&options.format).unwrap_or_else(|| {
        console.warn(&format!(
            "Unknown report format '{}', using table",
            options.format
        ));
        ReportFormat::Table
    });

    let mut runner_config = RunnerConfig::default()
        .with_ids(options.ids)
        .with_groups(parse_groups(&options.groups)?)
        .with_tags(options.tags)
        .with_jobs(options.jobs);
    if options.fail_fast {
        runner_config = runner_config.fail_fast();
    }

    let cases = loader_for(options.cases.as_deref())
        .load_all()
        .context("Failed to load cases")?;

    let calculator_name = config.command.clone();
    console.info(&format!(
        "Using '{}' with a {:?} timeout",
        calculator_name, config.timeout
    ));

    let calculator = Arc::new(ProcessEvaluator::new(config));
    let mut runner =
        CaseRunner::new(calculator, runner_config).with_calculator_name(calculator_name);

    runner.set_progress_callback(Box::new(|progress: CaseProgress| {
        if let Some(status) = progress.status {
            eprintln!(
                "[{}/{}] {} {} {} {}",
                progress.completed,
                progress.total,
                status_mark(status),
                progress.case_id,
                progress.description,
                status_label(status)
            );
        }
    }));

    let summary = runner.run(cases).await;
    if summary.total == 0 {
        console.warn("No cases matched the selection");
        return Ok(ExitCode::SUCCESS);
    }

    let report = generate_report(&summary, format)?;
    println!("{}", report);

    let message = format!(
        "{}/{} cases passed ({:.1}%)",
        summary.passed,
        summary.total,
        summary.pass_rate() * 100.0
    );
    if summary.all_passed() {
        console.success(&message);
        Ok(ExitCode::SUCCESS)
    } else {
        console.error(&message);
        Ok(ExitCode::FAILURE)
    }
}
