//! Case loading from YAML/JSON files
//!
//! A case file holds either a single case or a list of cases. A directory is
//! walked recursively and every `.yaml`, `.yml` and `.json` file is loaded.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use walkdir::WalkDir;

use super::{CaseGroup, TestCase, catalog};

/// Single case or list of cases in one file
#[derive(Deserialize)]
#[serde(untagged)]
enum CaseFile {
    Many(Vec<TestCase>),
    One(Box<TestCase>),
}

impl CaseFile {
    fn into_cases(self) -> Vec<TestCase> {
        match self {
            CaseFile::Many(cases) => cases,
            CaseFile::One(case) => vec![*case],
        }
    }
}

/// Source of cases
#[derive(Debug, Clone, Default)]
pub struct CaseLoader {
    /// File or directory to load from; `None` means the built-in catalog
    path: Option<PathBuf>,
}

impl CaseLoader {
    /// Load from a file or directory
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Use the built-in catalog
    pub fn builtin() -> Self {
        Self { path: None }
    }

    /// Load every case, sorted by id
    pub fn load_all(&self) -> Result<Vec<TestCase>> {
        let Some(path) = &self.path else {
            return Ok(catalog::builtin());
        };

        let mut cases = if path.is_dir() {
            load_dir(path)?
        } else if path.is_file() {
            load_file(path)?
        } else {
            bail!("Case path does not exist: {}", path.display());
        };

        cases.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(cases)
    }

    /// Load cases in any of `groups`
    pub fn load_groups(&self, groups: &[CaseGroup]) -> Result<Vec<TestCase>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|c| groups.contains(&c.group))
            .collect())
    }

    /// Load a single case by id
    pub fn load_by_id(&self, id: &str) -> Result<Option<TestCase>> {
        Ok(self.load_all()?.into_iter().find(|c| c.id == id))
    }
}

fn load_dir(dir: &Path) -> Result<Vec<TestCase>> {
    let mut cases = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !is_case_file(path) {
            continue;
        }
        match load_file(path) {
            Ok(loaded) => cases.extend(loaded),
            Err(e) => {
                tracing::warn!("Failed to load cases from {:?}: {:#}", path, e);
            }
        }
    }

    Ok(cases)
}

/// Load the cases in one YAML or JSON file
pub fn load_file(path: &Path) -> Result<Vec<TestCase>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read case file: {:?}", path))?;

    let file: CaseFile = if path
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
    {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML cases: {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON cases: {:?}", path))?
    };

    Ok(file.into_cases())
}

/// Parse cases from a YAML string
pub fn load_cases_from_yaml(yaml: &str) -> Result<Vec<TestCase>> {
    let file: CaseFile = serde_yaml::from_str(yaml)?;
    Ok(file.into_cases())
}

fn is_case_file(path: &Path) -> bool {
    path.is_file()
        && matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml") | Some("json")
        )
}
