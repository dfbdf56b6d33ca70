//! Evaluator configuration
//!
//! Configuration is layered: defaults, then an optional JSON/TOML/YAML file
//! (format chosen by extension), then `CALCPROBE_*` environment variables.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, EvalResult};
use crate::logging::LoggingConfig;

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "CALCPROBE_";

/// Default calculator command
pub const DEFAULT_COMMAND: &str = "bc";

/// Default wall-clock budget for guarded evaluations
pub const DEFAULT_TIMEOUT_SECS: u64 = 2;

/// Default size of chunks copied from a streamed input to stdin
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// When output drainers start relative to input feeding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrainMode {
    /// Drainers start before input is fed; safe under pipe backpressure
    #[default]
    Concurrent,
    /// Drainers start only after stdin has been fully written and closed.
    /// Deadlocks when the calculator fills its stdout pipe before it has
    /// consumed all of its input.
    AfterInput,
}

impl DrainMode {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "concurrent" => Some(DrainMode::Concurrent),
            "after_input" | "after-input" | "sequential" => Some(DrainMode::AfterInput),
            _ => None,
        }
    }
}

/// Configuration for [`ProcessEvaluator`](crate::ProcessEvaluator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    /// Calculator program to spawn
    #[serde(default = "default_command")]
    pub command: String,

    /// Arguments passed to the calculator (empty for `bc`)
    #[serde(default)]
    pub args: Vec<String>,

    /// Extra environment variables for the calculator process
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Budget for `evaluate_with_timeout`
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Chunk size used when copying streamed input
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Ordering of output draining relative to input feeding
    #[serde(default)]
    pub drain_mode: DrainMode,

    /// Remove `\` line-continuation markers from stdout before joining lines
    #[serde(default = "default_strip_line_continuations")]
    pub strip_line_continuations: bool,

    /// Number of characters of output shown in log previews
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,
}

fn default_command() -> String {
    DEFAULT_COMMAND.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_strip_line_continuations() -> bool {
    true
}

fn default_preview_chars() -> usize {
    100
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: Vec::new(),
            env: HashMap::new(),
            timeout: default_timeout(),
            chunk_size: default_chunk_size(),
            drain_mode: DrainMode::default(),
            strip_line_continuations: default_strip_line_continuations(),
            preview_chars: default_preview_chars(),
        }
    }
}

impl EvaluatorConfig {
    /// Create a config for the given calculator command
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            ..Default::default()
        }
    }

    /// Set calculator arguments
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Add an environment variable for the calculator process
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the guarded evaluation budget
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the streamed input chunk size
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the drain mode
    pub fn with_drain_mode(mut self, mode: DrainMode) -> Self {
        self.drain_mode = mode;
        self
    }

    /// Label used in timeout messages, e.g. `bc evaluation`
    pub fn label(&self) -> String {
        let program = Path::new(&self.command)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.command.clone());
        format!("{} evaluation", program)
    }

    /// Check the configuration for values the evaluator cannot work with
    pub fn validate(&self) -> EvalResult<()> {
        if self.command.trim().is_empty() {
            return Err(EvalError::config("calculator command must not be empty"));
        }
        if self.chunk_size == 0 {
            return Err(EvalError::config("chunk_size must be greater than zero"));
        }
        if self.timeout.is_zero() {
            return Err(EvalError::config("timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Apply `CALCPROBE_*` overrides from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> EvalResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(command) = var("COMMAND") {
            self.command = command;
        }

        if let Some(secs) = var("TIMEOUT_SECS") {
            let secs: f64 = secs
                .parse()
                .map_err(|_| EvalError::config(format!("Invalid {}TIMEOUT_SECS value: {}", ENV_PREFIX, secs)))?;
            self.timeout = Duration::try_from_secs_f64(secs).map_err(|e| {
                EvalError::config(format!("Invalid {}TIMEOUT_SECS value: {}", ENV_PREFIX, e))
            })?;
        }

        if let Some(size) = var("CHUNK_SIZE") {
            self.chunk_size = size
                .parse()
                .map_err(|_| EvalError::config(format!("Invalid {}CHUNK_SIZE value: {}", ENV_PREFIX, size)))?;
        }

        if let Some(mode) = var("DRAIN_MODE") {
            self.drain_mode = DrainMode::from_str(&mode)
                .ok_or_else(|| EvalError::config(format!("Unknown drain mode: {}", mode)))?;
        }

        Ok(())
    }
}

/// Top-level configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Evaluator settings
    #[serde(default)]
    pub evaluator: EvaluatorConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> EvalResult<Self> {
        let mut config = match path {
            Some(path) => load_from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.evaluator.validate()?;
        Ok(config)
    }

    /// Apply `CALCPROBE_*` overrides from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> EvalResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(&format!("{}LOG_LEVEL", ENV_PREFIX)) {
            self.logging.level = level;
        }
        if let Some(format) = lookup(&format!("{}LOG_FORMAT", ENV_PREFIX)) {
            self.logging.format = format;
        }
        self.evaluator.apply_env(lookup)
    }
}

/// Load configuration from a file
///
/// Supports JSON, TOML, and YAML formats based on file extension.
/// Returns default config if file doesn't exist.
pub fn load_from_file(path: &Path) -> EvalResult<Config> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        EvalError::config(format!("Failed to read config file '{}': {}", path.display(), e))
    })?;

    let config: Config = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|e| {
            EvalError::config(format!("Failed to parse TOML config '{}': {}", path.display(), e))
        })?,
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| {
            EvalError::config(format!("Failed to parse YAML config '{}': {}", path.display(), e))
        })?,
        _ => serde_json::from_str(&content).map_err(|e| {
            EvalError::config(format!("Failed to parse JSON config '{}': {}", path.display(), e))
        })?,
    };

    Ok(config)
}
