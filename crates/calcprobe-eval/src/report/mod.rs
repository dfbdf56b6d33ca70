//! Report generation for catalog runs
//!
//! Generates reports as a terminal table, JSON or Markdown.

mod json;
mod markdown;
mod summary;

pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use summary::{GroupStats, RunSummary};

use anyhow::Result;

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Json,
    Markdown,
}

impl ReportFormat {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(ReportFormat::Table),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Generate a report in the specified format
pub fn generate_report(summary: &RunSummary, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Table => Ok(generate_table(summary)),
        ReportFormat::Json => JsonReporter::generate(summary),
        ReportFormat::Markdown => MarkdownReporter::generate(summary),
    }
}

/// Plain table for terminal output
fn generate_table(summary: &RunSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("\n{:=<70}\n", "= Calculator Evaluation Results "));
    output.push_str(&format!(
        "Calculator: {} | Timestamp: {}\n",
        summary.calculator,
        summary.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    output.push_str(&format!("{:=<70}\n\n", ""));

    output.push_str("SUMMARY\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "Passed: {}/{} ({:.1}%)\n",
        summary.passed,
        summary.total,
        summary.pass_rate() * 100.0
    ));
    output.push_str(&format!(
        "Failed: {} | Timed out: {} | Errors: {}\n",
        summary.failed, summary.timed_out, summary.errors
    ));
    output.push_str(&format!("Total Time: {:.1}s\n\n", summary.total_time_secs));

    output.push_str("BY GROUP\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "{:<20} {:>8} {:>10} {:>10} {:>12}\n",
        "Group", "Cases", "Passed", "Rate", "Time"
    ));
    output.push_str(&format!("{:-<70}\n", ""));
    for (name, stats) in &summary.by_group {
        output.push_str(&format!(
            "{:<20} {:>8} {:>10} {:>9.1}% {:>11.1}s\n",
            name,
            stats.total,
            stats.passed,
            stats.pass_rate() * 100.0,
            stats.total_time_secs
        ));
    }
    output.push_str(&format!("{:-<70}\n\n", ""));

    output.push_str("CASE RESULTS\n");
    output.push_str(&format!("{:-<70}\n", ""));
    output.push_str(&format!(
        "{:<6} {:<44} {:>9} {:>8}\n",
        "ID", "Description", "Status", "Time"
    ));
    output.push_str(&format!("{:-<70}\n", ""));
    for outcome in &summary.outcomes {
        let description = if outcome.description.chars().count() > 42 {
            let head: String = outcome.description.chars().take(39).collect();
            format!("{}...", head)
        } else {
            outcome.description.clone()
        };
        output.push_str(&format!(
            "{:<6} {:<44} {:>9} {:>7.2}s\n",
            outcome.id, description, outcome.status, outcome.execution_time_secs
        ));
    }
    output.push_str(&format!("{:=<70}\n", ""));

    output
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::time::Duration;

    use calcprobe_core::EvaluationResult;

    use super::RunSummary;
    use crate::cases::{CaseGroup, Expectation, InputSpec, TestCase};
    use crate::runner::CaseOutcome;

    pub(crate) fn sample_summary() -> RunSummary {
        let division = TestCase::new(
            "022",
            CaseGroup::Decimal,
            "High-precision division",
            InputSpec::literal("scale=50; 1/7"),
            Expectation::equals(".14285714285714285714285714285714285714285714285714"),
        );
        let additions = TestCase::new(
            "006",
            CaseGroup::Heavy,
            "1 billion additions",
            InputSpec::repeated("", "1+", 1_000_000_000, ""),
            Expectation::equals("1000000000"),
        );
        let zero = TestCase::new(
            "013",
            CaseGroup::Behaviour,
            "Division by zero",
            InputSpec::literal("1 / 0"),
            Expectation::HasError,
        );

        let outcomes = vec![
            CaseOutcome::new(
                &additions,
                &EvaluationResult::new(None, Some("Timeout: bc evaluation exceeded 2s".to_string())),
                Duration::from_secs(2),
            ),
            CaseOutcome::new(
                &zero,
                &EvaluationResult::new(Some("0".to_string()), Some(String::new())),
                Duration::from_millis(5),
            ),
            CaseOutcome::new(
                &division,
                &EvaluationResult::new(
                    Some(".14285714285714285714285714285714285714285714285714".to_string()),
                    Some(String::new()),
                ),
                Duration::from_millis(5),
            ),
        ];

        let mut summary = RunSummary::from_outcomes("bc", outcomes, Duration::from_secs(3));
        summary.outcomes.sort_by(|a, b| a.id.cmp(&b.id));
        summary
    }
}
