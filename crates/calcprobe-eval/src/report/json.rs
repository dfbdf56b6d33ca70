//! JSON report generation

use anyhow::Result;

use super::RunSummary;

/// JSON report generator
pub struct JsonReporter;

impl JsonReporter {
    /// Generate a JSON report
    pub fn generate(summary: &RunSummary) -> Result<String> {
        let json = serde_json::to_string_pretty(summary)?;
        Ok(json)
    }

    /// Generate a compact JSON report (no pretty printing)
    pub fn generate_compact(summary: &RunSummary) -> Result<String> {
        let json = serde_json::to_string(summary)?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::sample_summary;

    #[test]
    fn test_json_generation() {
        let json = JsonReporter::generate(&sample_summary()).unwrap();
        assert!(json.contains("\"calculator\": \"bc\""));
        assert!(json.contains("\"status\": \"timeout\""));

        let value: serde_json::Value =
            serde_json::from_str(&JsonReporter::generate_compact(&sample_summary()).unwrap())
                .unwrap();
        assert_eq!(value["total"], 3);
        assert_eq!(value["by_group"]["decimal"]["passed"], 1);
    }
}
