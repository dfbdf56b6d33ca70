//! Catalog listing

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;

use super::{loader_for, parse_groups};

/// List catalog cases
pub fn list(groups: &[String], cases: Option<&Path>) -> Result<()> {
    let loader = loader_for(cases);
    let groups = parse_groups(groups)?;

    let cases = if groups.is_empty() {
        loader.load_all()?
    } else {
        loader.load_groups(&groups)?
    };

    if cases.is_empty() {
        println!("No cases found.");
        return Ok(());
    }

    println!("Available cases:\n");
    println!("{:<6} {:<10} {:<44} {:<30}", "ID", "Group", "Description", "Input");
    println!("{:-<92}", "");

    for case in &cases {
        let description = if case.description.chars().count() > 42 {
            let head: String = case.description.chars().take(39).collect();
            format!("{}...", head)
        } else {
            case.description.clone()
        };
        println!(
            "{:<6} {:<10} {:<44} {:<30}",
            case.id,
            case.group.name(),
            description,
            case.input.summary(28)
        );
    }

    println!("\nTotal: {} cases", cases.len());

    let mut counts = BTreeMap::new();
    for case in &cases {
        *counts.entry(case.group).or_insert(0usize) += 1;
    }
    println!("\nBy group:");
    for (group, count) in counts {
        println!("  {}: {}", group.display_name(), count);
    }

    Ok(())
}
