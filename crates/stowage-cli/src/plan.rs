//! # Plan Subcommand
//!
//! Runs a loading plan from a YAML or JSON file against a fresh manifest and
//! prints every step's outcome followed by the final deck.
//!
//! ```yaml
//! voyage:
//!   stacks: 3
//!   max_height: 2
//!   max_weight: 120
//! steps:
//!   - op: load
//!     kind: general
//!     code: INKU2633836
//!     gross_weight: 10
//!   - op: unload
//!     code: INKU2633836
//! ```
//!
//! A rejected step is reported and the plan continues. The exit status is 1
//! if any step was rejected.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};

use stowage_core::IdentifierCode;
use stowage_manifest::DeckSnapshot;

use crate::config::{load_config, read_document, VoyageConfig};
use crate::render::render_deck;
use crate::session::{Outcome, Session, Step};

/// Arguments for the `stowage plan` subcommand.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the plan file (.yaml, .yml or .json).
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Highlight this container in the final deck (text output only).
    #[arg(long)]
    pub find: Option<String>,
}

/// Report format for `stowage plan`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// A loading plan as read from disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Voyage parameters; falls back to `--config`, then defaults.
    #[serde(default)]
    pub voyage: Option<VoyageConfig>,
    /// Operations in order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Outcome of one step in a [`PlanReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    /// Position of the step in the plan, from 1.
    pub index: usize,
    /// The step's raw code.
    pub code: String,
    /// Outcome if accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    /// Reason if rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepReport {
    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// Everything a plan run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanReport {
    pub voyage: VoyageConfig,
    pub steps: Vec<StepReport>,
    pub deck: DeckSnapshot,
}

impl PlanReport {
    pub fn rejected(&self) -> usize {
        self.steps.iter().filter(|s| s.is_rejected()).count()
    }
}

/// Resolve the voyage parameters: plan section, then config file, then defaults.
pub fn resolve_voyage(plan: &Plan, config: Option<&Path>) -> Result<VoyageConfig> {
    if let Some(voyage) = plan.voyage {
        return Ok(voyage);
    }
    match config {
        Some(path) => load_config(path),
        None => Ok(VoyageConfig::default()),
    }
}

/// Run every step of `plan` against a fresh manifest. Returns the session
/// for rendering along with the report.
pub fn execute_plan(plan: &Plan, voyage: VoyageConfig) -> Result<(Session, PlanReport)> {
    let manifest = voyage
        .build_manifest()
        .context("invalid voyage parameters")?;
    let mut session = Session::new(manifest);

    let mut steps = Vec::with_capacity(plan.steps.len());
    for (i, step) in plan.steps.iter().enumerate() {
        let index = i + 1;
        let report = match session.apply(step) {
            Ok(outcome) => {
                tracing::debug!(index, %outcome, "step applied");
                StepReport {
                    index,
                    code: step.code().to_string(),
                    outcome: Some(outcome),
                    error: None,
                }
            }
            Err(e) => {
                tracing::warn!(index, code = step.code(), "step rejected: {e}");
                StepReport {
                    index,
                    code: step.code().to_string(),
                    outcome: None,
                    error: Some(e.to_string()),
                }
            }
        };
        steps.push(report);
    }

    let report = PlanReport {
        voyage,
        steps,
        deck: session.manifest().snapshot(),
    };
    Ok((session, report))
}

/// Execute the plan subcommand.
pub fn run_plan(args: &PlanArgs, config: Option<&Path>) -> Result<u8> {
    let plan: Plan = read_document(&args.file)
        .with_context(|| format!("failed to load plan {}", args.file.display()))?;
    let voyage = resolve_voyage(&plan, config)?;
    tracing::debug!(
        stacks = voyage.stacks,
        max_height = voyage.max_height,
        max_weight = voyage.max_weight,
        "resolved voyage parameters"
    );

    let highlight = args
        .find
        .as_deref()
        .map(IdentifierCode::parse)
        .transpose()
        .context("invalid --find code")?;

    let (session, report) = execute_plan(&plan, voyage)?;
    tracing::info!(
        steps = report.steps.len(),
        rejected = report.rejected(),
        "plan complete"
    );

    match args.format {
        OutputFormat::Text => {
            for step in &report.steps {
                match (&step.outcome, &step.error) {
                    (Some(outcome), _) => println!("step {}: {outcome}", step.index),
                    (None, Some(error)) => println!("step {}: REJECTED: {error}", step.index),
                    (None, None) => {}
                }
            }
            println!();
            print!("{}", render_deck(session.manifest(), highlight.as_ref()));
            println!(
                "total weight: {} / {} t",
                report.deck.total_weight, report.deck.max_weight
            );
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("failed to serialize report")?;
            println!("{json}");
        }
    }

    Ok(if report.rejected() > 0 { 1 } else { 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_YAML: &str = "\
steps:
  - op: load
    kind: general
    code: INKU2633836
    gross_weight: 10
  - op: load
    kind: general
    code: KOCU8090115
    gross_weight: 10
  - op: load
    kind: dangerous
    code: MSCU6639871
    gross_weight: 20
    category: 1
  - op: load
    kind: refrigerated
    code: CSQU3054389
    gross_weight: 30
    temperature: 25
  - op: load
    kind: dangerous
    code: QUTU7200318
    gross_weight: 20
    category: 2
  - op: load
    kind: refrigerated
    code: IBMU4882351
    gross_weight: 30
    temperature: 35
";

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_execute_worked_example() {
        let plan: Plan = serde_yaml::from_str(PLAN_YAML).unwrap();
        let (session, report) = execute_plan(&plan, VoyageConfig::default()).unwrap();

        assert_eq!(report.rejected(), 0);
        assert_eq!(report.deck.total_weight, 120);
        let code = IdentifierCode::parse("IBMU4882351").unwrap();
        assert_eq!(session.manifest().which_stack(&code), Some(2));
        assert_eq!(session.manifest().how_high(&code), Some(1));
    }

    #[test]
    fn test_rejected_steps_do_not_abort() {
        let mut plan: Plan = serde_yaml::from_str(PLAN_YAML).unwrap();
        plan.steps.insert(
            0,
            Step::Unload {
                code: "INKU2633836".into(),
            },
        );
        plan.steps.push(Step::Load {
            kind: "general".into(),
            code: "HBMU4882350".into(),
            gross_weight: 5,
            category: None,
            temperature: None,
        });

        let (_, report) = execute_plan(&plan, VoyageConfig::default()).unwrap();
        assert_eq!(report.steps.len(), 8);
        assert_eq!(report.rejected(), 2);
        assert!(report.steps[0].error.as_deref().unwrap().contains("not on board"));
        assert!(report.steps[7].error.as_deref().unwrap().contains("weight limit"));
        assert_eq!(report.deck.total_weight, 120);
    }

    #[test]
    fn test_voyage_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let config = write(&dir, "voyage.yaml", "stacks: 5\nmax_height: 4\nmax_weight: 150\n");

        let mut plan = Plan {
            voyage: None,
            steps: Vec::new(),
        };
        assert_eq!(resolve_voyage(&plan, None).unwrap(), VoyageConfig::default());
        assert_eq!(resolve_voyage(&plan, Some(&config)).unwrap().stacks, 5);

        plan.voyage = Some(VoyageConfig {
            stacks: 1,
            max_height: 1,
            max_weight: 10,
        });
        assert_eq!(resolve_voyage(&plan, Some(&config)).unwrap().stacks, 1);
    }

    #[test]
    fn test_invalid_voyage_is_fatal() {
        let plan = Plan {
            voyage: None,
            steps: Vec::new(),
        };
        let voyage = VoyageConfig {
            max_weight: -1,
            ..VoyageConfig::default()
        };
        assert!(execute_plan(&plan, voyage).is_err());
    }

    #[test]
    fn test_run_plan_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(&dir, "good.yaml", PLAN_YAML);
        let args = PlanArgs {
            file: good,
            format: OutputFormat::Text,
            find: Some("MSCU6639871".into()),
        };
        assert_eq!(run_plan(&args, None).unwrap(), 0);

        let bad = write(
            &dir,
            "bad.json",
            r#"{"steps": [{"op": "find", "code": "KOCU8090117"}]}"#,
        );
        let args = PlanArgs {
            file: bad,
            format: OutputFormat::Json,
            find: None,
        };
        assert_eq!(run_plan(&args, None).unwrap(), 1);
    }

    #[test]
    fn test_run_plan_rejects_bad_find_code() {
        let dir = tempfile::tempdir().unwrap();
        let args = PlanArgs {
            file: write(&dir, "plan.yaml", PLAN_YAML),
            format: OutputFormat::Text,
            find: Some("nope".into()),
        };
        assert!(run_plan(&args, None).is_err());
    }

    #[test]
    fn test_report_serializes() {
        let plan: Plan = serde_yaml::from_str(PLAN_YAML).unwrap();
        let (_, report) = execute_plan(&plan, VoyageConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["steps"][0]["outcome"]["result"], "loaded");
        assert_eq!(json["steps"][0]["outcome"]["slot"]["stack"], 0);
        assert_eq!(json["deck"]["stacks"][2]["kind"], "refrigerated");
    }
}
