//! # Session
//!
//! Applies loading operations to a manifest one at a time. Both front ends
//! (`plan` and `shell`) parse their input into [`Step`]s and feed them to a
//! [`Session`], so both report outcomes and rejections identically.
//!
//! Steps carry raw strings for the code and the kind. A malformed code is a
//! rejected step, not a malformed plan.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stowage_core::{
    Container, ContainerKind, ContainerRecord, IdentifierCode, InvalidCode, StowageError,
};
use stowage_manifest::{Manifest, ManifestError, Slot};

// ─── Steps ───────────────────────────────────────────────────────────

/// One operation against the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Build a container and load it.
    Load {
        /// `general`, `dangerous_goods` (or `dangerous`), `refrigerated` (or `reefer`).
        kind: String,
        /// Container code.
        code: String,
        /// Gross weight in tonnes.
        gross_weight: i32,
        /// Hazard category, dangerous goods only.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<i32>,
        /// Set-point temperature, refrigerated only.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        temperature: Option<i32>,
    },
    /// Unload a container by code.
    Unload {
        /// Container code.
        code: String,
    },
    /// Report where a container sits.
    Find {
        /// Container code.
        code: String,
    },
}

impl Step {
    /// The raw code the step refers to.
    pub fn code(&self) -> &str {
        match self {
            Self::Load { code, .. } | Self::Unload { code } | Self::Find { code } => code,
        }
    }
}

/// Build a container from the raw fields of a load step.
pub fn build_container(
    kind: &str,
    code: &str,
    gross_weight: i32,
    category: Option<i32>,
    temperature: Option<i32>,
) -> Result<Container, StowageError> {
    let record = ContainerRecord {
        kind: ContainerKind::from_str(kind)?,
        code: IdentifierCode::parse(code)?,
        gross_weight,
        category,
        temperature,
    };
    Ok(Container::try_from(record)?)
}

// ─── Outcomes ────────────────────────────────────────────────────────

/// Why a step was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The container could not be built from the step's fields.
    #[error(transparent)]
    Input(#[from] StowageError),

    /// The manifest refused the operation.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl From<InvalidCode> for StepError {
    fn from(err: InvalidCode) -> Self {
        Self::Input(err.into())
    }
}

/// Result of an accepted step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// The container was placed at `slot`.
    Loaded { code: IdentifierCode, slot: Slot },
    /// The container was lifted off.
    Unloaded { code: IdentifierCode },
    /// Location query; `slot` is `None` if the container is not on board.
    Found {
        code: IdentifierCode,
        slot: Option<Slot>,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded { code, slot } => write!(
                f,
                "loaded {code} on stack {} at height {}",
                slot.stack, slot.height
            ),
            Self::Unloaded { code } => write!(f, "unloaded {code}"),
            Self::Found {
                code,
                slot: Some(slot),
            } => write!(
                f,
                "{code} is on stack {} at height {}",
                slot.stack, slot.height
            ),
            Self::Found { code, slot: None } => write!(f, "{code} is not on board"),
        }
    }
}

// ─── Session ─────────────────────────────────────────────────────────

/// A manifest plus the step interpreter that drives it.
#[derive(Debug, Clone)]
pub struct Session {
    manifest: Manifest,
}

impl Session {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Replace the manifest with a fresh one.
    pub fn reset(&mut self, manifest: Manifest) {
        self.manifest = manifest;
    }

    /// Apply one step. A rejected step leaves the manifest unchanged.
    pub fn apply(&mut self, step: &Step) -> Result<Outcome, StepError> {
        match step {
            Step::Load {
                kind,
                code,
                gross_weight,
                category,
                temperature,
            } => {
                let container =
                    build_container(kind, code, *gross_weight, *category, *temperature)?;
                let code = container.code().clone();
                let slot = self.manifest.load(container)?;
                Ok(Outcome::Loaded { code, slot })
            }
            Step::Unload { code } => {
                let code = IdentifierCode::parse(code)?;
                self.manifest.unload(&code)?;
                Ok(Outcome::Unloaded { code })
            }
            Step::Find { code } => {
                let code = IdentifierCode::parse(code)?;
                let slot = self.manifest.locate(&code);
                Ok(Outcome::Found { code, slot })
            }
        }
    }
}
