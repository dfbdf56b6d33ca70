//! Runner configuration
//!
//! Selection filters and scheduling options for a catalog run.

use serde::{Deserialize, Serialize};

use crate::cases::{CaseGroup, TestCase};

/// Configuration for catalog runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Specific case ids to run (empty = all)
    #[serde(default)]
    pub ids: Vec<String>,

    /// Groups to run (empty = all)
    #[serde(default)]
    pub groups: Vec<CaseGroup>,

    /// Tags to filter by (empty = all)
    #[serde(default)]
    pub tags: Vec<String>,

    /// Maximum number of cases evaluated at once
    #[serde(default = "default_jobs")]
    pub jobs: usize,

    /// Whether to keep going after a case does not pass
    #[serde(default = "default_continue_on_failure")]
    pub continue_on_failure: bool,
}

fn default_jobs() -> usize {
    1
}

fn default_continue_on_failure() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            ids: Vec::new(),
            groups: Vec::new(),
            tags: Vec::new(),
            jobs: default_jobs(),
            continue_on_failure: default_continue_on_failure(),
        }
    }
}

impl RunnerConfig {
    /// Set specific case ids
    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = ids;
        self
    }

    /// Set groups to run
    pub fn with_groups(mut self, groups: Vec<CaseGroup>) -> Self {
        self.groups = groups;
        self
    }

    /// Set tags to filter by
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set concurrency; zero is treated as one
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Stop at the first case that does not pass
    pub fn fail_fast(mut self) -> Self {
        self.continue_on_failure = false;
        self
    }

    /// Whether `case` passes every configured filter
    pub fn selects(&self, case: &TestCase) -> bool {
        (self.ids.is_empty() || self.ids.iter().any(|id| *id == case.id))
            && (self.groups.is_empty() || self.groups.contains(&case.group))
            && (self.tags.is_empty() || self.tags.iter().any(|tag| case.has_tag(tag)))
    }

    /// Keep the selected cases, preserving order
    pub fn select(&self, cases: Vec<TestCase>) -> Vec<TestCase> {
        cases.into_iter().filter(|c| self.selects(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::catalog;

    #[test]
    fn test_default_config() {
        let config = RunnerConfig::default();
        assert_eq!(config.jobs, 1);
        assert!(config.continue_on_failure);
        assert_eq!(config.select(catalog::builtin()).len(), 26);
    }

    #[test]
    fn test_filters_combine() {
        let config = RunnerConfig::default()
            .with_groups(vec![CaseGroup::Behaviour])
            .with_tags(vec!["syntax".to_string()]);
        let ids: Vec<String> = config
            .select(catalog::builtin())
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["012", "015", "017"]);

        let config = RunnerConfig::default().with_ids(vec!["022".to_string(), "001".to_string()]);
        assert_eq!(config.select(catalog::builtin()).len(), 2);
    }

    #[test]
    fn test_builder() {
        let config = RunnerConfig::default().with_jobs(0).fail_fast();
        assert_eq!(config.jobs, 1);
        assert!(!config.continue_on_failure);
    }
}
