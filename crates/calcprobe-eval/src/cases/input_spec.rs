//! Declarative description of a case's calculator input
//!
//! An [`InputSpec`] is data; [`InputSpec::build`] turns it into a fresh
//! [`InputSource`] for every run, so generated streams are never shared.

use calcprobe_core::InputSource;
use serde::{Deserialize, Serialize};

/// How to produce the input for a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputSpec {
    /// A complete expression, fed followed by a newline
    Literal {
        /// Expression text
        text: String,
    },

    /// In-memory text fed as a stream, without an added newline
    Stream {
        /// Stream content
        text: String,
    },

    /// `prefix`, then `unit` repeated `count` times, then `suffix`
    Repeated {
        /// Text before the repetitions
        #[serde(default)]
        prefix: String,
        /// Repeated unit
        unit: String,
        /// Number of repetitions
        count: u64,
        /// Text after the repetitions
        #[serde(default)]
        suffix: String,
    },

    /// `unit` repeated forever
    Unbounded {
        /// Repeated unit
        unit: String,
    },
}

impl InputSpec {
    /// Literal expression input
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal { text: text.into() }
    }

    /// Streamed text input
    pub fn stream(text: impl Into<String>) -> Self {
        Self::Stream { text: text.into() }
    }

    /// Generated repetition input
    pub fn repeated(
        prefix: impl Into<String>,
        unit: impl Into<String>,
        count: u64,
        suffix: impl Into<String>,
    ) -> Self {
        Self::Repeated {
            prefix: prefix.into(),
            unit: unit.into(),
            count,
            suffix: suffix.into(),
        }
    }

    /// Endless repetition input
    pub fn unbounded(unit: impl Into<String>) -> Self {
        Self::Unbounded { unit: unit.into() }
    }

    /// Build a fresh input source
    pub fn build(&self) -> InputSource {
        match self {
            Self::Literal { text } => InputSource::literal(text.clone()),
            Self::Stream { text } => InputSource::stream_text(text.clone()),
            Self::Repeated {
                prefix,
                unit,
                count,
                suffix,
            } => InputSource::repeated(prefix, unit, *count, suffix),
            Self::Unbounded { unit } => InputSource::unbounded(unit),
        }
    }

    /// Whether the input is fed as a stream
    pub fn is_streamed(&self) -> bool {
        !matches!(self, Self::Literal { .. })
    }

    /// Total input size in bytes, `None` when unbounded
    pub fn size_hint(&self) -> Option<u64> {
        match self {
            Self::Literal { text } => Some(text.len() as u64 + 1),
            Self::Stream { text } => Some(text.len() as u64),
            Self::Repeated {
                prefix,
                unit,
                count,
                suffix,
            } => Some(
                (prefix.len() as u64)
                    .saturating_add((unit.len() as u64).saturating_mul(*count))
                    .saturating_add(suffix.len() as u64),
            ),
            Self::Unbounded { .. } => None,
        }
    }

    /// Short human-readable summary, at most `max_chars` of any literal text
    pub fn summary(&self, max_chars: usize) -> String {
        match self {
            Self::Literal { text } => shorten(text, max_chars),
            Self::Stream { text } => format!("stream: {}", shorten(text, max_chars)),
            Self::Repeated { unit, count, .. } => {
                format!("{:?} x {}", unit, count)
            }
            Self::Unbounded { unit } => format!("{:?} forever", unit),
        }
    }
}

fn shorten(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', "\\n");
    if flat.chars().count() <= max_chars {
        flat
    } else {
        let head: String = flat.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_hint() {
        assert_eq!(InputSpec::literal("2+2").size_hint(), Some(4));
        assert_eq!(InputSpec::stream("2+2").size_hint(), Some(3));
        assert_eq!(
            InputSpec::repeated("scale=0; ", "9", 1_000_000_000, " + 1").size_hint(),
            Some(9 + 1_000_000_000 + 4)
        );
        assert_eq!(InputSpec::unbounded("1+").size_hint(), None);
    }

    #[test]
    fn test_build_keeps_input_kind() {
        assert!(!InputSpec::literal("1").build().is_streamed());
        assert!(InputSpec::stream("1").build().is_streamed());
        assert!(InputSpec::unbounded("1+").build().is_streamed());
    }

    #[test]
    fn test_summary_shortens_long_text() {
        let spec = InputSpec::literal("9".repeat(100));
        assert_eq!(spec.summary(10), "9999999...");
        assert_eq!(InputSpec::stream("1\n2").summary(20), "stream: 1\\n2");
        assert_eq!(InputSpec::unbounded("1+").summary(20), "\"1+\" forever");
    }

    #[test]
    fn test_deserialize_repeated_defaults() {
        let spec: InputSpec = serde_yaml::from_str("kind: repeated\nunit: \"1+\"\ncount: 3\n").unwrap();
        assert_eq!(spec, InputSpec::repeated("", "1+", 3, ""));
    }
}
