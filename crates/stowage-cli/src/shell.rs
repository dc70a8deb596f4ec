//! # Shell Subcommand
//!
//! Line-oriented front end. Each line is tokenized with `shlex` (so quoted
//! arguments work) and parsed by a clap command; clap supplies `help` and
//! the usage messages. A rejected command prints its reason and the
//! session continues.
//!
//! On a terminal the shell reads through `rustyline` with line editing and
//! history; piped input is read line by line.

use std::io::{BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use stowage_core::IdentifierCode;
use stowage_manifest::Manifest;

use crate::config::{load_config, VoyageConfig};
use crate::render::render_deck;
use crate::session::{Session, Step};

const PROMPT: &str = "stowage> ";

// ─── Grammar ─────────────────────────────────────────────────────────

/// One shell line.
#[derive(Parser, Debug, PartialEq, Eq)]
#[command(
    name = "stowage shell",
    no_binary_name = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

/// Shell commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Start a new voyage with an empty deck.
    New {
        /// Number of stacks.
        #[arg(allow_negative_numbers = true)]
        stacks: i32,
        /// Maximum containers per stack.
        #[arg(allow_negative_numbers = true)]
        height: i32,
        /// Weight limit in tonnes.
        #[arg(allow_negative_numbers = true)]
        weight: i32,
    },

    /// Load a container.
    Load {
        #[command(subcommand)]
        container: LoadCommand,
    },

    /// Unload the container with this code.
    Unload {
        code: String,
    },

    /// Locate a container and print the deck with it highlighted.
    Find {
        code: String,
    },

    /// Print the deck.
    Show,

    /// Leave the shell.
    #[command(alias = "exit")]
    Quit,
}

/// Container kinds accepted by `load`, each with its own attributes.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum LoadCommand {
    /// General goods.
    General {
        code: String,
        /// Gross weight in tonnes.
        #[arg(allow_negative_numbers = true)]
        weight: i32,
    },

    /// Dangerous goods.
    #[command(alias = "dangerous_goods")]
    Dangerous {
        code: String,
        /// Gross weight in tonnes.
        #[arg(allow_negative_numbers = true)]
        weight: i32,
        /// Hazard category.
        #[arg(allow_negative_numbers = true)]
        category: i32,
    },

    /// Refrigerated goods.
    #[command(alias = "reefer")]
    Refrigerated {
        code: String,
        /// Gross weight in tonnes.
        #[arg(allow_negative_numbers = true)]
        weight: i32,
        /// Set-point temperature.
        #[arg(allow_negative_numbers = true)]
        temperature: i32,
    },
}

impl From<LoadCommand> for Step {
    fn from(command: LoadCommand) -> Self {
        let (kind, code, gross_weight, category, temperature) = match command {
            LoadCommand::General { code, weight } => ("general", code, weight, None, None),
            LoadCommand::Dangerous {
                code,
                weight,
                category,
            } => ("dangerous_goods", code, weight, Some(category), None),
            LoadCommand::Refrigerated {
                code,
                weight,
                temperature,
            } => ("refrigerated", code, weight, None, Some(temperature)),
        };
        Step::Load {
            kind: kind.to_string(),
            code,
            gross_weight,
            category,
            temperature,
        }
    }
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
///
/// # Errors
///
/// Returns the clap error for unbalanced quotes, unknown commands or bad
/// arguments. `help` also arrives as an error, of kind
/// [`ErrorKind::DisplayHelp`], whose text is the help message.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, clap::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let tokens = shlex::split(trimmed).ok_or_else(|| {
        clap::Error::raw(ErrorKind::InvalidValue, "unbalanced quotes in input\n")
    })?;
    if tokens.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(tokens).map(|line| Some(line.command))
}

// ─── Session loop ────────────────────────────────────────────────────

/// Whether the shell keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Execute one line against `session`, writing the response to `output`.
fn execute_line<W: Write>(session: &mut Session, line: &str, output: &mut W) -> Result<Flow> {
    let command = match parse_line(line) {
        Ok(Some(command)) => command,
        Ok(None) => return Ok(Flow::Continue),
        Err(e) => {
            // clap renders its own "error:" prefix; help text has none.
            write!(output, "{e}")?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        ShellCommand::New {
            stacks,
            height,
            weight,
        } => match Manifest::new(stacks, height, weight) {
            Ok(manifest) => {
                session.reset(manifest);
                tracing::debug!(stacks, height, weight, "new voyage");
                writeln!(
                    output,
                    "new voyage: {stacks} stacks, height {height}, limit {weight} t"
                )?;
            }
            Err(e) => writeln!(output, "error: {e}")?,
        },
        ShellCommand::Load { container } => {
            apply(session, &Step::from(container), output)?;
        }
        ShellCommand::Unload { code } => {
            apply(session, &Step::Unload { code }, output)?;
        }
        ShellCommand::Find { code } => {
            if apply(session, &Step::Find { code: code.clone() }, output)? {
                let highlight = IdentifierCode::parse(&code).ok();
                write!(output, "{}", render_deck(session.manifest(), highlight.as_ref()))?;
            }
        }
        ShellCommand::Show => {
            let manifest = session.manifest();
            write!(output, "{}", render_deck(manifest, None))?;
            writeln!(
                output,
                "total weight: {} / {} t",
                manifest.total_weight(),
                manifest.max_weight()
            )?;
        }
        ShellCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

/// Apply a step and report it. Returns whether it was accepted.
fn apply<W: Write>(session: &mut Session, step: &Step, output: &mut W) -> Result<bool> {
    match session.apply(step) {
        Ok(outcome) => {
            writeln!(output, "{outcome}")?;
            Ok(true)
        }
        Err(e) => {
            tracing::warn!(code = step.code(), "command rejected: {e}");
            writeln!(output, "error: {e}")?;
            Ok(false)
        }
    }
}

fn new_session(voyage: VoyageConfig) -> Result<Session> {
    let manifest = voyage
        .build_manifest()
        .context("invalid voyage parameters")?;
    Ok(Session::new(manifest))
}

/// Drive a session from piped `input`, writing responses to `output`.
pub fn run_shell<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    voyage: VoyageConfig,
) -> Result<()> {
    let mut session = new_session(voyage)?;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        if execute_line(&mut session, &line, output)? == Flow::Quit {
            break;
        }
    }
    output.flush()?;
    Ok(())
}

/// Drive a session interactively with line editing and history.
pub fn run_interactive<W: Write>(output: &mut W, voyage: VoyageConfig) -> Result<()> {
    let mut session = new_session(voyage)?;
    let mut editor = DefaultEditor::new().context("failed to initialize line editor")?;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                if execute_line(&mut session, &line, output)? == Flow::Quit {
                    break;
                }
                output.flush()?;
            }
            // Ctrl-C abandons the current line only.
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("failed to read input"),
        }
    }
    output.flush()?;
    Ok(())
}

/// Execute the shell subcommand on stdin/stdout.
pub fn run_shell_stdio(config: Option<&Path>) -> Result<u8> {
    let voyage = match config {
        Some(path) => load_config(path)?,
        None => VoyageConfig::default(),
    };
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    if stdin.is_terminal() {
        run_interactive(&mut stdout, voyage)?;
    } else {
        run_shell(stdin.lock(), &mut stdout, voyage)?;
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> String {
        let mut out = Vec::new();
        run_shell(script.as_bytes(), &mut out, VoyageConfig::default()).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn parsed(line: &str) -> ShellCommand {
        parse_line(line).unwrap().unwrap()
    }

    #[test]
    fn test_parse_load_variants() {
        assert_eq!(
            Step::from(match parsed("load dangerous MSCU6639871 20 1") {
                ShellCommand::Load { container } => container,
                other => panic!("unexpected {other:?}"),
            }),
            Step::Load {
                kind: "dangerous_goods".into(),
                code: "MSCU6639871".into(),
                gross_weight: 20,
                category: Some(1),
                temperature: None,
            }
        );
        assert_eq!(
            parsed("load reefer CSQU3054389 30 -5"),
            ShellCommand::Load {
                container: LoadCommand::Refrigerated {
                    code: "CSQU3054389".into(),
                    weight: 30,
                    temperature: -5,
                }
            }
        );
    }

    #[test]
    fn test_quoted_code_is_unquoted() {
        assert_eq!(
            parsed("find \"INKU2633836\""),
            ShellCommand::Find {
                code: "INKU2633836".into()
            }
        );
        assert_eq!(
            parsed("unload 'KOCU8090115'"),
            ShellCommand::Unload {
                code: "KOCU8090115".into()
            }
        );
    }

    #[test]
    fn test_each_kind_takes_its_own_arguments() {
        for line in [
            "load general INKU2633836 10 99",
            "load dangerous MSCU6639871 20",
            "load refrigerated CSQU3054389 30",
            "load dangerous MSCU6639871 20 1 5",
        ] {
            assert!(parse_line(line).is_err(), "{line} should be rejected");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# comment").unwrap(), None);
        assert_eq!(
            parse_line("launch").unwrap_err().kind(),
            ErrorKind::InvalidSubcommand
        );
        assert!(parse_line("new 3 2").is_err());
        assert_eq!(
            parse_line("new 3 two 120").unwrap_err().kind(),
            ErrorKind::ValueValidation
        );
        assert!(parse_line("find \"INKU2633836").is_err());
        assert_eq!(
            parse_line("help").unwrap_err().kind(),
            ErrorKind::DisplayHelp
        );
        assert_eq!(parsed("exit"), ShellCommand::Quit);
    }

    #[test]
    fn test_session_transcript() {
        let out = run("\
load general INKU2633836 10
load general KOCU8090115 10
unload INKU2633836
find KOCU8090115
quit
show
");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "loaded INKU2633836 on stack 0 at height 0");
        assert_eq!(lines[1], "loaded KOCU8090115 on stack 0 at height 1");
        assert!(lines[2].starts_with("error: container INKU2633836 is not accessible"));
        assert_eq!(lines[3], "KOCU8090115 is on stack 0 at height 1");
        assert_eq!(lines[4], "0: || INKU2633836 || *KOCU8090115* ||");
        // Nothing after quit.
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn test_extra_argument_does_not_load() {
        let out = run("load general INKU2633836 10 99\nshow\n");
        assert!(out.starts_with("error:"));
        assert!(!out.contains("loaded"));
        assert!(out.contains("0: ||\n1: ||\n2: ||\ntotal weight: 0 / 120 t\n"));
    }

    #[test]
    fn test_new_voyage_and_show() {
        let out = run("new 1 1 10\nnew 0 1 10\nshow\n");
        assert!(out.starts_with("new voyage: 1 stacks, height 1, limit 10 t\n"));
        assert!(out.contains("error: invalid manifest parameters"));
        assert!(out.ends_with("0: ||\ntotal weight: 0 / 10 t\n"));
    }

    #[test]
    fn test_help_lists_commands() {
        let out = run("help\n");
        for verb in ["new", "load", "unload", "find", "show", "quit"] {
            assert!(out.contains(verb), "help should mention {verb}");
        }
    }

    #[test]
    fn test_errors_do_not_end_session() {
        let out = run("load general BAD 10\nbogus\nload general INKU2633836 10\n");
        assert!(out.starts_with("error: invalid code"));
        assert!(out.contains("unrecognized subcommand"));
        assert!(out.ends_with("loaded INKU2633836 on stack 0 at height 0\n"));
    }
}
