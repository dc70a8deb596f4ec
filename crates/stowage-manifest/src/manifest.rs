//! # Cargo Manifest
//!
//! Tracks the containers on a ship's deck for one voyage. The deck is a fixed
//! row of stacks; stack 0 is nearest the bridge. Each stack is ordered from
//! the bottom (height 0) upward.
//!
//! ## Loading Rules
//!
//! A container may be loaded only if:
//!
//! 1. the ship's total weight limit is not exceeded;
//! 2. no container with the same code is already on board;
//! 3. it goes as close to the bridge as possible;
//! 4. the receiving stack stays within the maximum height;
//! 5. the receiving stack stays homogeneous (one [`ContainerKind`] only).
//!
//! Placement is first-fit and non-backtracking: stacks are scanned from the
//! bridge outward and the first stack that is either empty, or non-full with
//! a top container of the same kind, receives the container. An empty stack
//! wins even if a later stack of the same kind still has room.
//!
//! ## Unloading
//!
//! Containers are moved by an overhead crane, so only the top container of a
//! stack is accessible.
//!
//! ## Failure Atomicity
//!
//! Every check runs before any mutation. A rejected `load` or `unload`
//! leaves the manifest exactly as it was.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stowage_core::{Container, ContainerKind, IdentifierCode};

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors raised by manifest construction, loading, unloading and queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// A construction parameter was zero or negative.
    #[error("invalid manifest parameters: {parameter} must be positive, got {value}")]
    InvalidParameters {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: i32,
    },

    /// Loading would push the total weight over the ship's limit.
    #[error("loading {code} ({weight} t) would exceed the weight limit: {current} t on board, limit {limit} t")]
    WeightExceeded {
        /// Code of the rejected container.
        code: IdentifierCode,
        /// Its gross weight.
        weight: i32,
        /// Total weight currently on board.
        current: i32,
        /// The ship's weight limit.
        limit: i32,
    },

    /// A container with the same code is already on board.
    #[error("a container with code {code} is already on board")]
    DuplicateCode {
        /// The duplicated code.
        code: IdentifierCode,
    },

    /// Every stack is full or holds a different kind of container.
    #[error("no suitable stack for {kind} container {code}")]
    NoSpace {
        /// Code of the rejected container.
        code: IdentifierCode,
        /// Its kind.
        kind: ContainerKind,
    },

    /// The container is not on board.
    #[error("container {code} is not on board")]
    NotFound {
        /// The code that was looked up.
        code: IdentifierCode,
    },

    /// The container is buried under other containers.
    #[error("container {code} is not accessible: stack {stack} has {above} container(s) on top of it")]
    NotAccessible {
        /// The code that was looked up.
        code: IdentifierCode,
        /// Stack holding it.
        stack: usize,
        /// Number of containers above it.
        above: usize,
    },

    /// The stack index is outside the deck.
    #[error("there is no stack {index} on the ship ({count} stacks)")]
    InvalidStackIndex {
        /// The requested index.
        index: usize,
        /// Number of stacks on deck.
        count: usize,
    },
}

// ─── Slot ────────────────────────────────────────────────────────────

/// Position of a container on deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Stack index, 0 nearest the bridge.
    pub stack: usize,
    /// Height within the stack, 0 at the bottom.
    pub height: usize,
}

// ─── Manifest ────────────────────────────────────────────────────────

/// A ship's cargo manifest for one voyage.
///
/// The manifest exclusively owns the containers on board. Queries hand out
/// copies or positions, never mutable references into the deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    stacks: Vec<Vec<Container>>,
    max_height: usize,
    max_weight: i32,
    current_weight: i32,
}

impl Manifest {
    /// Create an empty manifest for a voyage.
    ///
    /// `num_stacks` depends on the deck configuration, `max_height` on the
    /// expected weather, and `max_weight` (tonnes) on ballast and fuel.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidParameters`] if any parameter is zero
    /// or negative.
    pub fn new(num_stacks: i32, max_height: i32, max_weight: i32) -> Result<Self, ManifestError> {
        let num_stacks = require_positive("num_stacks", num_stacks)?;
        let max_height = require_positive("max_height", max_height)?;
        require_positive("max_weight", max_weight)?;

        Ok(Self {
            stacks: vec![Vec::new(); num_stacks],
            max_height,
            max_weight,
            current_weight: 0,
        })
    }

    /// Load a container onto the deck and return where it was placed.
    ///
    /// # Errors
    ///
    /// - [`ManifestError::WeightExceeded`] if the weight limit would be passed.
    /// - [`ManifestError::DuplicateCode`] if the code is already on board.
    /// - [`ManifestError::NoSpace`] if no stack can take the container.
    pub fn load(&mut self, container: Container) -> Result<Slot, ManifestError> {
        let weight = container.gross_weight();
        if i64::from(self.current_weight) + i64::from(weight) > i64::from(self.max_weight) {
            return Err(ManifestError::WeightExceeded {
                code: container.code().clone(),
                weight,
                current: self.current_weight,
                limit: self.max_weight,
            });
        }

        if self.locate(container.code()).is_some() {
            return Err(ManifestError::DuplicateCode {
                code: container.code().clone(),
            });
        }

        let kind = container.kind();
        let Some(stack) = self.first_fit(kind) else {
            return Err(ManifestError::NoSpace {
                code: container.code().clone(),
                kind,
            });
        };

        let height = self.stacks[stack].len();
        self.stacks[stack].push(container);
        self.current_weight += weight;
        Ok(Slot { stack, height })
    }

    /// Unload the container with the given code.
    ///
    /// # Errors
    ///
    /// - [`ManifestError::NotFound`] if the container is not on board.
    /// - [`ManifestError::NotAccessible`] if it is not on top of its stack.
    pub fn unload(&mut self, code: &IdentifierCode) -> Result<(), ManifestError> {
        let slot = self.locate(code).ok_or_else(|| ManifestError::NotFound {
            code: code.clone(),
        })?;

        let stack = &mut self.stacks[slot.stack];
        let above = stack.len() - slot.height - 1;
        if above > 0 {
            return Err(ManifestError::NotAccessible {
                code: code.clone(),
                stack: slot.stack,
                above,
            });
        }

        if let Some(removed) = stack.pop() {
            self.current_weight -= removed.gross_weight();
        }
        Ok(())
    }

    /// Index of the stack holding `code`, or `None` if it is not on board.
    pub fn which_stack(&self, code: &IdentifierCode) -> Option<usize> {
        self.locate(code).map(|slot| slot.stack)
    }

    /// Height of `code` within its stack (0 = bottom), or `None` if it is
    /// not on board.
    pub fn how_high(&self, code: &IdentifierCode) -> Option<usize> {
        self.locate(code).map(|slot| slot.height)
    }

    /// Stack and height of `code`, or `None` if it is not on board.
    pub fn locate(&self, code: &IdentifierCode) -> Option<Slot> {
        self.stacks.iter().enumerate().find_map(|(stack, containers)| {
            containers
                .iter()
                .position(|c| c.code() == code)
                .map(|height| Slot { stack, height })
        })
    }

    /// Copy of a stack's containers, bottom first.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidStackIndex`] if there is no such stack.
    pub fn stack_contents(&self, index: usize) -> Result<Vec<Container>, ManifestError> {
        self.stack(index).map(<[Container]>::to_vec)
    }

    /// Kind of container a stack holds, or `None` while it is empty.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::InvalidStackIndex`] if there is no such stack.
    pub fn stack_kind(&self, index: usize) -> Result<Option<ContainerKind>, ManifestError> {
        self.stack(index)
            .map(|containers| containers.first().map(Container::kind))
    }

    /// Number of stacks on deck.
    pub fn stack_count(&self) -> usize {
        self.stacks.len()
    }

    /// Maximum number of containers in any stack.
    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Weight limit in tonnes.
    pub fn max_weight(&self) -> i32 {
        self.max_weight
    }

    /// Total gross weight on board, in tonnes.
    pub fn total_weight(&self) -> i32 {
        self.current_weight
    }

    /// Tonnes that can still be loaded before the limit is reached.
    pub fn remaining_weight(&self) -> i32 {
        self.max_weight - self.current_weight
    }

    /// Number of containers on board.
    pub fn container_count(&self) -> usize {
        self.stacks.iter().map(Vec::len).sum()
    }

    /// Whether the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.stacks.iter().all(Vec::is_empty)
    }

    /// Every stack, bridge first, each bottom to top.
    pub fn stacks(&self) -> impl ExactSizeIterator<Item = &[Container]> + '_ {
        self.stacks.iter().map(Vec::as_slice)
    }

    fn stack(&self, index: usize) -> Result<&[Container], ManifestError> {
        self.stacks
            .get(index)
            .map(Vec::as_slice)
            .ok_or(ManifestError::InvalidStackIndex {
                index,
                count: self.stacks.len(),
            })
    }

    /// First stack, from the bridge outward, that is empty or is non-full
    /// with a top container of `kind`.
    fn first_fit(&self, kind: ContainerKind) -> Option<usize> {
        self.stacks.iter().position(|stack| match stack.last() {
            None => true,
            Some(top) => stack.len() < self.max_height && top.kind() == kind,
        })
    }
}

fn require_positive(parameter: &'static str, value: i32) -> Result<usize, ManifestError> {
    match usize::try_from(value) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ManifestError::InvalidParameters { parameter, value }),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
