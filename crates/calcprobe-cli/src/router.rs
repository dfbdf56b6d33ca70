//! Command routing logic for CLI

use std::process::ExitCode;

use anyhow::Result;
use calcprobe_core::Config;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::commands::run::RunOptions;

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: Config) -> Result<ExitCode> {
    let verbose = cli.verbose > 0;

    match cli.command {
        Commands::Eval {
            expression,
            timeout,
            no_timeout,
        } => commands::eval::eval(config.evaluator, &expression, timeout, no_timeout).await,

        Commands::Run {
            ids,
            groups,
            tags,
            jobs,
            format,
            cases,
            fail_fast,
        } => {
            let options = RunOptions {
                ids,
                groups,
                tags,
                jobs,
                format,
                cases,
                fail_fast,
                verbose,
            };
            commands::run::run(config.evaluator, options).await
        }

        Commands::List { groups, cases } => {
            commands::list::list(&groups, cases.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Apply command-line overrides on top of the loaded configuration
pub fn apply_overrides(cli: &Cli, config: &mut Config) {
    if let Some(command) = &cli.calculator {
        config.evaluator.command = command.clone();
    }

    match cli.verbose {
        0 => {}
        1 => config.logging.level = "debug".to_string(),
        _ => config.logging.level = "trace".to_string(),
    }

    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
}
