//! Subcommand implementations

pub mod eval;
pub mod list;
pub mod run;

use anyhow::{Result, bail};
use calcprobe_eval::{CaseGroup, CaseLoader};
use std::path::Path;

/// Parse group names given on the command line
pub(crate) fn parse_groups(names: &[String]) -> Result<Vec<CaseGroup>> {
    names
        .iter()
        .map(|name| match CaseGroup::from_str(name) {
            Some(group) => Ok(group),
            None => {
                let known: Vec<&str> = CaseGroup::all().iter().map(|g| g.name()).collect();
                bail!("Unknown group '{}' (expected one of: {})", name, known.join(", "))
            }
        })
        .collect()
}

/// Case loader for an optional path
pub(crate) fn loader_for(path: Option<&Path>) -> CaseLoader {
    match path {
        Some(path) => CaseLoader::new(path),
        None => CaseLoader::builtin(),
    }
}
