//! Case definitions
//!
//! A case pairs an input with an expectation and belongs to one group.

use std::fmt;

use calcprobe_core::EvaluationResult;
use serde::{Deserialize, Serialize};

use super::{Expectation, InputSpec, Verdict};

/// Group a case belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseGroup {
    /// Inputs near the calculator's practical limits
    Limits,
    /// Inputs far beyond those limits, relying on the timeout guard
    Heavy,
    /// Decimal arithmetic and scale handling
    Decimal,
    /// Empty, malformed and mixed inputs
    Behaviour,
}

impl CaseGroup {
    /// Identifier used in files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            CaseGroup::Limits => "limits",
            CaseGroup::Heavy => "heavy",
            CaseGroup::Decimal => "decimal",
            CaseGroup::Behaviour => "behaviour",
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CaseGroup::Limits => "Arithmetic Limits",
            CaseGroup::Heavy => "Heavy Inputs",
            CaseGroup::Decimal => "Decimal Behaviour",
            CaseGroup::Behaviour => "Execution Behaviour",
        }
    }

    /// All groups
    pub fn all() -> &'static [CaseGroup] {
        &[
            CaseGroup::Limits,
            CaseGroup::Heavy,
            CaseGroup::Decimal,
            CaseGroup::Behaviour,
        ]
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "limits" => Some(CaseGroup::Limits),
            "heavy" => Some(CaseGroup::Heavy),
            "decimal" => Some(CaseGroup::Decimal),
            "behaviour" | "behavior" => Some(CaseGroup::Behaviour),
            _ => None,
        }
    }
}

impl fmt::Display for CaseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

fn default_guarded() -> bool {
    true
}

/// A single calculator case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Short identifier, e.g. `"022"`
    pub id: String,

    /// What the case exercises
    pub description: String,

    /// Group
    pub group: CaseGroup,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Input fed to the calculator
    pub input: InputSpec,

    /// Expectation checked against the result
    pub expect: Expectation,

    /// Run under the timeout guard
    #[serde(default = "default_guarded")]
    pub guarded: bool,
}

impl TestCase {
    /// Create a guarded case
    pub fn new(
        id: impl Into<String>,
        group: CaseGroup,
        description: impl Into<String>,
        input: InputSpec,
        expect: Expectation,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            group,
            tags: Vec::new(),
            input,
            expect,
            guarded: true,
        }
    }

    /// Add tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Run without the timeout guard
    pub fn unguarded(mut self) -> Self {
        self.guarded = false;
        self
    }

    /// `ID: <id> - <description>`
    pub fn title(&self) -> String {
        format!("ID: {} - {}", self.id, self.description)
    }

    /// Whether the case carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Check the case's expectation
    pub fn check(&self, result: &EvaluationResult) -> Verdict {
        self.expect.check(result)
    }
}
