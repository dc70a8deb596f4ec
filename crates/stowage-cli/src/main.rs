//! # stowage CLI entry point
//!
//! Parses command-line arguments, initializes logging and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stowage_cli::code::{run_code, CodeArgs};
use stowage_cli::plan::{run_plan, PlanArgs};
use stowage_cli::shell::run_shell_stdio;

/// Container stowage planner.
///
/// Validates container codes and places containers on deck under weight,
/// height, kind and accessibility rules.
#[derive(Parser, Debug)]
#[command(name = "stowage", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a voyage configuration file (.yaml, .yml or .json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate container codes.
    Code(CodeArgs),

    /// Run a loading plan and print the resulting deck.
    Plan(PlanArgs),

    /// Interactive loading session reading commands from stdin.
    Shell,
}

/// Log filter: `RUST_LOG` if set, otherwise derived from `-v`.
fn env_filter(verbose: u8) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(cli.verbose))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "stowage starting");

    let config = cli.config.as_deref();
    let result = match &cli.command {
        Commands::Code(args) => run_code(args),
        Commands::Plan(args) => run_plan(args, config),
        Commands::Shell => run_shell_stdio(config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_cli::code::SchemeArg;
    use stowage_cli::plan::OutputFormat;

    #[test]
    fn cli_parse_code_defaults() {
        let cli = Cli::try_parse_from(["stowage", "code", "MSCU6639871"]).unwrap();
        if let Commands::Code(args) = cli.command {
            assert_eq!(args.codes, vec!["MSCU6639871".to_string()]);
            assert_eq!(args.scheme, SchemeArg::Summed);
        } else {
            panic!("expected code subcommand");
        }
    }

    #[test]
    fn cli_parse_code_iso_scheme() {
        let cli = Cli::try_parse_from([
            "stowage",
            "code",
            "--scheme",
            "iso6346",
            "CSQU3054383",
            "MSCU6639871",
        ])
        .unwrap();
        if let Commands::Code(args) = cli.command {
            assert_eq!(args.codes.len(), 2);
            assert_eq!(args.scheme, SchemeArg::Iso6346);
        } else {
            panic!("expected code subcommand");
        }
    }

    #[test]
    fn cli_parse_code_requires_a_code() {
        assert!(Cli::try_parse_from(["stowage", "code"]).is_err());
    }

    #[test]
    fn cli_parse_plan_with_options() {
        let cli = Cli::try_parse_from([
            "stowage",
            "-vv",
            "--config",
            "voyage.yaml",
            "plan",
            "plan.json",
            "--format",
            "json",
            "--find",
            "INKU2633836",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("voyage.yaml")));
        if let Commands::Plan(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("plan.json"));
            assert_eq!(args.format, OutputFormat::Json);
            assert_eq!(args.find.as_deref(), Some("INKU2633836"));
        } else {
            panic!("expected plan subcommand");
        }
    }

    #[test]
    fn cli_parse_plan_defaults_to_text() {
        let cli = Cli::try_parse_from(["stowage", "plan", "plan.yaml"]).unwrap();
        if let Commands::Plan(args) = cli.command {
            assert_eq!(args.format, OutputFormat::Text);
            assert!(args.find.is_none());
        } else {
            panic!("expected plan subcommand");
        }
    }

    #[test]
    fn cli_parse_shell_with_global_flags_after() {
        let cli = Cli::try_parse_from(["stowage", "shell", "-v", "--config", "v.json"]).unwrap();
        assert!(matches!(cli.command, Commands::Shell));
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.config, Some(PathBuf::from("v.json")));
    }

    #[test]
    fn cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["stowage", "plan", "p.yaml", "--format", "xml"]).is_err());
    }
}
