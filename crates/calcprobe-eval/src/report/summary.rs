//! Aggregated run results

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::runner::{CaseOutcome, CaseStatus};

/// Per-group counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    /// Cases run in the group
    pub total: usize,
    /// Cases that passed
    pub passed: usize,
    /// Summed execution time
    pub total_time_secs: f64,
}

impl GroupStats {
    /// Fraction of passing cases, 0 for an empty group
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }
}

/// Summary of a catalog run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Calculator the run was made against
    pub calculator: String,
    /// When the summary was produced
    pub timestamp: DateTime<Utc>,
    /// Cases run
    pub total: usize,
    /// Cases that passed
    pub passed: usize,
    /// Cases whose expectation did not hold
    pub failed: usize,
    /// Cases cut off by the guard without passing
    pub timed_out: usize,
    /// Cases where the calculator could not be driven
    pub errors: usize,
    /// Wall-clock time of the whole run
    pub total_time_secs: f64,
    /// Counts by group name
    pub by_group: BTreeMap<String, GroupStats>,
    /// Individual outcomes, sorted by id
    pub outcomes: Vec<CaseOutcome>,
}

impl RunSummary {
    /// Aggregate outcomes
    pub fn from_outcomes(calculator: &str, outcomes: Vec<CaseOutcome>, elapsed: Duration) -> Self {
        let count = |status: CaseStatus| outcomes.iter().filter(|o| o.status == status).count();

        let mut by_group: BTreeMap<String, GroupStats> = BTreeMap::new();
        for outcome in &outcomes {
            let stats = by_group.entry(outcome.group.name().to_string()).or_default();
            stats.total += 1;
            stats.total_time_secs += outcome.execution_time_secs;
            if outcome.passed() {
                stats.passed += 1;
            }
        }

        Self {
            calculator: calculator.to_string(),
            timestamp: Utc::now(),
            total: outcomes.len(),
            passed: count(CaseStatus::Passed),
            failed: count(CaseStatus::Failed),
            timed_out: count(CaseStatus::Timeout),
            errors: count(CaseStatus::Error),
            total_time_secs: elapsed.as_secs_f64(),
            by_group,
            outcomes,
        }
    }

    /// Whether every case passed
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// Fraction of passing cases, 0 for an empty run
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }

    /// Outcomes that did not pass
    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }
}
