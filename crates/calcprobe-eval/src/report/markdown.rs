//! Markdown report generation

use anyhow::Result;

use super::RunSummary;

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Generate a Markdown report
    pub fn generate(summary: &RunSummary) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Calculator Evaluation Report\n\n");

        md.push_str("## Overview\n\n");
        md.push_str(&format!("- **Calculator**: {}\n", summary.calculator));
        md.push_str(&format!(
            "- **Timestamp**: {}\n",
            summary.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        md.push_str(&format!(
            "- **Total Execution Time**: {:.1}s\n\n",
            summary.total_time_secs
        ));

        md.push_str("## Summary\n\n");
        md.push_str("| Metric | Value |\n|--------|-------|\n");
        md.push_str(&format!(
            "| Passed | {}/{} ({:.1}%) |\n",
            summary.passed,
            summary.total,
            summary.pass_rate() * 100.0
        ));
        md.push_str(&format!("| Failed | {} |\n", summary.failed));
        md.push_str(&format!("| Timed out | {} |\n", summary.timed_out));
        md.push_str(&format!("| Errors | {} |\n\n", summary.errors));

        md.push_str("## By Group\n\n");
        md.push_str("| Group | Cases | Passed | Rate |\n|-------|-------|--------|------|\n");
        for (name, stats) in &summary.by_group {
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}% |\n",
                name,
                stats.total,
                stats.passed,
                stats.pass_rate() * 100.0
            ));
        }
        md.push('\n');

        md.push_str("## Cases\n\n");
        md.push_str("| ID | Description | Status | Time |\n|----|-------------|--------|------|\n");
        for outcome in &summary.outcomes {
            md.push_str(&format!(
                "| {} | {} | {} | {:.2}s |\n",
                outcome.id,
                escape(&outcome.description),
                outcome.status,
                outcome.execution_time_secs
            ));
        }

        let failures: Vec<_> = summary.failures().collect();
        if !failures.is_empty() {
            md.push_str("\n## Failures\n\n");
            for outcome in failures {
                md.push_str(&format!("### {} - {}\n\n", outcome.id, outcome.description));
                md.push_str(&format!("- **Verdict**: {}\n", outcome.verdict.message));
                if let Some(details) = &outcome.verdict.details {
                    md.push_str(&format!("- **Details**: `{}`\n", details));
                }
                if let Some(error) = &outcome.error {
                    md.push_str(&format!("- **Error**: `{}`\n", error));
                }
                md.push('\n');
            }
        }

        Ok(md)
    }
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
