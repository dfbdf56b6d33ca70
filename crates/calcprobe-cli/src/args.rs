//! CLI argument definitions using clap
//!
//! - calcprobe eval "2+2"          # Evaluate one expression
//! - calcprobe eval -              # Stream the expression from stdin
//! - calcprobe run --group decimal # Run catalog cases
//! - calcprobe list                # List catalog cases

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "calcprobe")]
#[command(about = "Drive the bc calculator as a subprocess and probe its behaviour")]
#[command(version)]
pub struct Cli {
    /// Path to a JSON, TOML or YAML configuration file
    #[arg(long, global = true, env = "CALCPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Calculator program to spawn (defaults to bc)
    #[arg(long = "command", global = true, value_name = "PROG")]
    pub calculator: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format: pretty, compact or json
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a single expression
    Eval {
        /// Expression to evaluate, or `-` to stream it from stdin
        expression: String,

        /// Timeout in seconds (overrides the configured timeout)
        #[arg(long, value_name = "SECS")]
        timeout: Option<f64>,

        /// Wait for the calculator without a deadline
        #[arg(long, conflicts_with = "timeout")]
        no_timeout: bool,
    },

    /// Run catalog cases against the calculator
    Run {
        /// Case ids to run (repeatable)
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,

        /// Groups to run: limits, heavy, decimal, behaviour (repeatable)
        #[arg(long = "group", value_name = "GROUP")]
        groups: Vec<String>,

        /// Tags to filter by (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Number of cases evaluated at once
        #[arg(long, short = 'j', default_value_t = 1)]
        jobs: usize,

        /// Report format: table, json or markdown
        #[arg(long, default_value = "table")]
        format: String,

        /// Load cases from a YAML/JSON file or directory instead of the built-in catalog
        #[arg(long, value_name = "PATH")]
        cases: Option<PathBuf>,

        /// Stop at the first case that does not pass
        #[arg(long)]
        fail_fast: bool,
    },

    /// List catalog cases
    List {
        /// Groups to list (repeatable)
        #[arg(long = "group", value_name = "GROUP")]
        groups: Vec<String>,

        /// Load cases from a YAML/JSON file or directory instead of the built-in catalog
        #[arg(long, value_name = "PATH")]
        cases: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_eval() {
        let cli = Cli::try_parse_from(["calcprobe", "eval", "2+2", "--timeout", "0.5"]).unwrap();
        match cli.command {
            Commands::Eval {
                expression,
                timeout,
                no_timeout,
            } => {
                assert_eq!(expression, "2+2");
                assert_eq!(timeout, Some(0.5));
                assert!(!no_timeout);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_timeout_flags_conflict() {
        let result =
            Cli::try_parse_from(["calcprobe", "eval", "1", "--timeout", "1", "--no-timeout"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_run_with_globals() {
        let cli = Cli::try_parse_from([
            "calcprobe", "run", "--id", "001", "--id", "022", "--group", "decimal", "-j", "4",
            "--command", "/usr/bin/bc", "-vv",
        ])
        .unwrap();

        assert_eq!(cli.calculator.as_deref(), Some("/usr/bin/bc"));
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                ids, groups, jobs, format, ..
            } => {
                assert_eq!(ids, vec!["001", "022"]);
                assert_eq!(groups, vec!["decimal"]);
                assert_eq!(jobs, 4);
                assert_eq!(format, "table");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
