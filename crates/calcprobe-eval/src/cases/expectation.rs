//! Expectations checked against an evaluation result
//!
//! Expectations are declarative so they can live in YAML/JSON case files;
//! `all` and `any` combine them.

use calcprobe_core::EvaluationResult;
use serde::{Deserialize, Serialize};

/// Outcome of checking an expectation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Whether the expectation held
    pub passed: bool,
    /// Human-readable message
    pub message: String,
    /// Extra detail, e.g. the offending output
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Verdict {
    /// Create a passing verdict
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            passed: true,
            message: message.into(),
            details: None,
        }
    }

    /// Create a failing verdict
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            passed: false,
            message: message.into(),
            details: None,
        }
    }

    /// Attach details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn check(passed: bool, ok: impl Into<String>, failed: impl Into<String>) -> Self {
        if passed {
            Self::pass(ok)
        } else {
            Self::fail(failed)
        }
    }
}

/// Predicate over an [`EvaluationResult`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expectation {
    /// The evaluation succeeded (stderr empty)
    Succeeds,

    /// The evaluation failed
    Fails,

    /// Trimmed output equals `value`
    Equals {
        /// Expected output
        value: String,
    },

    /// Output has at least `digits` digits after the decimal point
    FractionDigitsAtLeast {
        /// Minimum number of fractional digits
        digits: usize,
    },

    /// Output is present and shorter than `chars`
    OutputShorterThan {
        /// Exclusive upper bound on the output length
        chars: usize,
    },

    /// Output is present and longer than `chars`
    OutputLongerThan {
        /// Exclusive lower bound on the output length
        chars: usize,
    },

    /// The last `count` characters of the output are decimal digits
    EndsWithDigits {
        /// Number of trailing digits required
        count: usize,
    },

    /// No output at all
    OutputMissing,

    /// Output is missing or whitespace only
    OutputBlank,

    /// Error is missing or whitespace only
    ErrorBlank,

    /// Error contains `text`
    ErrorContains {
        /// Text to search for
        text: String,
        /// Whether to ignore case
        #[serde(default)]
        ignore_case: bool,
    },

    /// Output is present and not blank
    HasOutput,

    /// Error is present and not blank
    HasError,

    /// The evaluation was cut off by the timeout guard
    TimedOut,

    /// All expectations must hold
    All {
        /// Nested expectations
        expectations: Vec<Expectation>,
    },

    /// At least one expectation must hold
    Any {
        /// Nested expectations
        expectations: Vec<Expectation>,
    },
}

impl Expectation {
    /// Exact output match
    pub fn equals(value: impl Into<String>) -> Self {
        Self::Equals {
            value: value.into(),
        }
    }

    /// Case-sensitive error substring match
    pub fn error_contains(text: impl Into<String>) -> Self {
        Self::ErrorContains {
            text: text.into(),
            ignore_case: false,
        }
    }

    /// All of `expectations`
    pub fn all(expectations: impl IntoIterator<Item = Expectation>) -> Self {
        Self::All {
            expectations: expectations.into_iter().collect(),
        }
    }

    /// Any of `expectations`
    pub fn any(expectations: impl IntoIterator<Item = Expectation>) -> Self {
        Self::Any {
            expectations: expectations.into_iter().collect(),
        }
    }

    /// Check this expectation against `result`
    pub fn check(&self, result: &EvaluationResult) -> Verdict {
        let output = result.output();
        let error = result.error().unwrap_or_default();

        match self {
            Expectation::Succeeds => Verdict::check(
                result.is_success(),
                "Evaluation succeeded",
                "Expected success",
            )
            .with_details_if_failed(result),

            Expectation::Fails => Verdict::check(
                !result.is_success(),
                "Evaluation failed as expected",
                "Expected a failure but the evaluation succeeded",
            )
            .with_details_if_failed(result),

            Expectation::Equals { value } => {
                let actual = result.trimmed_output();
                Verdict::check(
                    actual == value,
                    format!("Output equals {:?}", value),
                    format!("Expected output {:?}", value),
                )
                .with_details_if_failed(result)
            }

            Expectation::FractionDigitsAtLeast { digits } => {
                let actual = fraction_digits(result.trimmed_output());
                Verdict::check(
                    actual >= *digits,
                    format!("Output has {} fractional digits", actual),
                    format!(
                        "Expected at least {} fractional digits, found {}",
                        digits, actual
                    ),
                )
            }

            Expectation::OutputShorterThan { chars } => match output {
                Some(text) => {
                    let len = text.chars().count();
                    Verdict::check(
                        len < *chars,
                        format!("Output length {} is below {}", len, chars),
                        format!("Output length {} is not below {}", len, chars),
                    )
                }
                None => Verdict::fail("No output"),
            },

            Expectation::OutputLongerThan { chars } => match output {
                Some(text) => {
                    let len = text.chars().count();
                    Verdict::check(
                        len > *chars,
                        format!("Output length {} exceeds {}", len, chars),
                        format!("Output length {} does not exceed {}", len, chars),
                    )
                }
                None => Verdict::fail("No output"),
            },

            Expectation::EndsWithDigits { count } => {
                let trailing = result
                    .trimmed_output()
                    .chars()
                    .rev()
                    .take_while(char::is_ascii_digit)
                    .count();
                Verdict::check(
                    trailing >= *count,
                    format!("Output ends with {} digits", count),
                    format!("Expected output to end with {} digits", count),
                )
                .with_details_if_failed(result)
            }

            Expectation::OutputMissing => Verdict::check(
                output.is_none(),
                "No output",
                "Expected no output",
            ),

            Expectation::OutputBlank => Verdict::check(
                output.is_none_or(|text| text.trim().is_empty()),
                "Output is blank",
                "Expected blank output",
            )
            .with_details_if_failed(result),

            Expectation::ErrorBlank => Verdict::check(
                error.trim().is_empty(),
                "Error is blank",
                "Expected blank error",
            )
            .with_details_if_failed(result),

            Expectation::ErrorContains { text, ignore_case } => {
                let found = if *ignore_case {
                    error.to_lowercase().contains(&text.to_lowercase())
                } else {
                    error.contains(text.as_str())
                };
                Verdict::check(
                    found,
                    format!("Error contains {:?}", text),
                    format!("Expected error to contain {:?}", text),
                )
                .with_details_if_failed(result)
            }

            Expectation::HasOutput => Verdict::check(
                output.is_some_and(|text| !text.trim().is_empty()),
                "Output is present",
                "Expected some output",
            ),

            Expectation::HasError => Verdict::check(
                !error.trim().is_empty(),
                "Error is present",
                "Expected an error message",
            )
            .with_details_if_failed(result),

            Expectation::TimedOut => Verdict::check(
                result.is_timeout(),
                "Evaluation timed out",
                "Expected a timeout",
            )
            .with_details_if_failed(result),

            Expectation::All { expectations } => {
                for expectation in expectations {
                    let verdict = expectation.check(result);
                    if !verdict.passed {
                        return verdict;
                    }
                }
                Verdict::pass(format!("All {} expectations held", expectations.len()))
            }

            Expectation::Any { expectations } => {
                let mut misses = Vec::new();
                for expectation in expectations {
                    let verdict = expectation.check(result);
                    if verdict.passed {
                        return verdict;
                    }
                    misses.push(verdict.message);
                }
                Verdict::fail("None of the alternatives held").with_details(misses.join("; "))
            }
        }
    }
}

impl Verdict {
    fn with_details_if_failed(self, result: &EvaluationResult) -> Self {
        if self.passed {
            self
        } else {
            self.with_details(describe(result))
        }
    }
}

/// Digits after the decimal point in a `bc` number
fn fraction_digits(output: &str) -> usize {
    match output.split_once('.') {
        Some((_, fraction)) => fraction.chars().take_while(char::is_ascii_digit).count(),
        None => 0,
    }
}

fn describe(result: &EvaluationResult) -> String {
    const MAX: usize = 200;
    let clip = |text: &str| -> String {
        if text.chars().count() > MAX {
            let head: String = text.chars().take(MAX).collect();
            format!("{}...", head)
        } else {
            text.to_string()
        }
    };
    format!(
        "output: {}, error: {}",
        result
            .output()
            .map(|o| format!("{:?}", clip(o)))
            .unwrap_or_else(|| "none".to_string()),
        result
            .error()
            .map(|e| format!("{:?}", clip(e)))
            .unwrap_or_else(|| "none".to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(output: &str) -> EvaluationResult {
        EvaluationResult::new(Some(output.to_string()), Some(String::new()))
    }

    fn err(error: &str) -> EvaluationResult {
        EvaluationResult::new(None, Some(error.to_string()))
    }

    #[test]
    fn test_equals_uses_trimmed_output() {
        assert!(Expectation::equals("4").check(&ok(" 4 ")).passed);
        let verdict = Expectation::equals("4").check(&ok("5"));
        assert!(!verdict.passed);
        assert_eq!(verdict.details.as_deref(), Some("output: \"5\", error: \"\""));
    }

    #[test]
    fn test_fraction_digits() {
        let expectation = Expectation::FractionDigitsAtLeast { digits: 5 };
        assert!(expectation.check(&ok(".33333")).passed);
        assert!(expectation.check(&ok("1.333333")).passed);
        assert!(!expectation.check(&ok(".3333")).passed);
        assert!(!expectation.check(&ok("3")).passed);
    }

    #[test]
    fn test_length_bounds_require_output() {
        let shorter = Expectation::OutputShorterThan { chars: 100 };
        assert!(shorter.check(&ok("0")).passed);
        assert!(!shorter.check(&err("Timeout: bc evaluation exceeded 2s")).passed);

        let longer = Expectation::OutputLongerThan { chars: 3 };
        assert!(longer.check(&ok("12345")).passed);
        assert!(!longer.check(&ok("123")).passed);
    }

    #[test]
    fn test_ends_with_digits() {
        let expectation = Expectation::EndsWithDigits { count: 5 };
        assert!(expectation.check(&ok("99980001")).passed);
        assert!(!expectation.check(&ok("12a45")).passed);
    }

    #[test]
    fn test_blank_checks() {
        assert!(Expectation::OutputBlank.check(&err("boom")).passed);
        assert!(Expectation::OutputBlank.check(&ok("  ")).passed);
        assert!(Expectation::ErrorBlank.check(&ok("1")).passed);
        assert!(
            Expectation::ErrorBlank
                .check(&EvaluationResult::new(Some("1".to_string()), None))
                .passed
        );
        assert!(!Expectation::HasError.check(&ok("1")).passed);
        assert!(Expectation::HasError.check(&err("(standard_in) 1: syntax error")).passed);
    }

    #[test]
    fn test_error_contains_ignore_case() {
        let expectation = Expectation::ErrorContains {
            text: "divide by zero".to_string(),
            ignore_case: true,
        };
        assert!(expectation.check(&err("Runtime error: Divide by zero")).passed);
        assert!(!Expectation::error_contains("divide").check(&err("Divide")).passed);
    }

    #[test]
    fn test_timed_out() {
        assert!(Expectation::TimedOut.check(&err("Timeout: bc evaluation exceeded 2s")).passed);
        assert!(!Expectation::TimedOut.check(&err("Execution failed: boom")).passed);
    }

    #[test]
    fn test_combinators() {
        let tolerant = Expectation::any([Expectation::Fails, Expectation::equals("0")]);
        assert!(tolerant.check(&ok("0")).passed);
        assert!(tolerant.check(&err("overflow")).passed);
        let verdict = tolerant.check(&ok("1"));
        assert!(!verdict.passed);
        assert!(verdict.details.unwrap().contains("Expected output \"0\""));

        let strict = Expectation::all([Expectation::Succeeds, Expectation::equals("3")]);
        assert!(strict.check(&ok("3")).passed);
        assert_eq!(strict.check(&ok("4")).message, "Expected output \"3\"");
    }

    #[test]
    fn test_deserialize_nested() {
        let yaml = r#"
type: any
expectations:
  - type: fails
  - type: output_shorter_than
    chars: 100
"#;
        let expectation: Expectation = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            expectation,
            Expectation::any([
                Expectation::Fails,
                Expectation::OutputShorterThan { chars: 100 },
            ])
        );
    }
}
