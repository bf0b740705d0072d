// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use globcopy_cli::commands;
use globcopy_cli::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "globcopy")]
#[command(author = "Maravilla Labs")]
#[command(version)]
#[command(about = "Copy files matching glob patterns into a directory", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Keep watching source directories and copy again on every change
    #[arg(short, long)]
    watch: bool,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Quiet mode: only show warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Configuration file
    #[arg(long, default_value = "globcopy.toml")]
    config: PathBuf,

    /// Glob patterns or file paths, followed by the output directory
    #[arg(required = true, value_name = "PATTERN... OUTPUT_DIR")]
    paths: Vec<String>,
}

impl Cli {
    /// Parses the process arguments.
    fn parse_args() -> Result<Self, clap::Error> {
        Self::try_parse().and_then(Self::validate)
    }

    /// Requires at least one pattern in front of the output directory.
    fn validate(self) -> Result<Self, clap::Error> {
        if self.paths.len() < 2 {
            return Err(Self::command().error(
                ErrorKind::TooFewValues,
                "expected at least one pattern followed by an output directory",
            ));
        }
        Ok(self)
    }

    /// Splits the positionals into patterns and the trailing output directory.
    fn patterns_and_output(&self) -> (&[String], &str) {
        let (output, patterns) = self
            .paths
            .split_last()
            .map(|(output, patterns)| (output.as_str(), patterns))
            .unwrap_or(("", &[]));
        (patterns, output)
    }
}

/// Exit status for a failed parse: explicit help and version succeed,
/// everything else (including a bare invocation) fails.
fn parse_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = match Cli::parse_args() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_code(e.kind()));
        }
    };

    // Initialize tracing with the specified log level
    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(&cli.config)?;
    let working_dir = std::env::current_dir()?;
    let (patterns, output) = cli.patterns_and_output();

    if cli.watch {
        commands::watch::run(&working_dir, patterns, output, &config, cli.quiet).await
    } else {
        commands::copy::run(&working_dir, patterns, output, &config, cli.quiet).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args).and_then(Cli::validate)
    }

    #[test]
    fn test_watch_flag_anywhere() {
        let cli = parse(&["globcopy", "icons/*.svg", "-w", "public"]).unwrap();
        assert!(cli.watch);
        let (patterns, output) = cli.patterns_and_output();
        assert_eq!(patterns, ["icons/*.svg".to_string()]);
        assert_eq!(output, "public");

        let cli = parse(&["globcopy", "a/*.txt", "b.txt", "out", "--watch"]).unwrap();
        assert!(cli.watch);
        assert_eq!(cli.patterns_and_output().0.len(), 2);
    }

    #[test]
    fn test_requires_pattern_and_output() {
        let err = parse(&["globcopy", "public"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TooFewValues);
        assert_eq!(parse_exit_code(err.kind()), 1);

        let err = parse(&["globcopy", "-w"]).unwrap_err();
        assert_eq!(parse_exit_code(err.kind()), 1);
    }

    #[test]
    fn test_help_exit_codes() {
        let err = parse(&["globcopy", "--help"]).unwrap_err();
        assert_eq!(parse_exit_code(err.kind()), 0);

        let err = parse(&["globcopy", "-h"]).unwrap_err();
        assert_eq!(parse_exit_code(err.kind()), 0);

        let err = parse(&["globcopy"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand);
        assert_eq!(parse_exit_code(err.kind()), 1);
    }
}
