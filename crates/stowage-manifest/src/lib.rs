//! # stowage-manifest — Deck Placement Engine
//!
//! Implements the cargo manifest: a fixed row of height-bounded stacks onto
//! which validated containers are loaded and from which they are unloaded.
//!
//! ## Rules Enforced
//!
//! - **Weight**: the total gross weight on board never exceeds the limit.
//! - **Uniqueness**: no two containers on board share a code.
//! - **Proximity**: containers go as close to the bridge (stack 0) as the
//!   other rules allow, first-fit.
//! - **Height**: no stack grows past the maximum height.
//! - **Homogeneity**: each stack holds one container kind.
//! - **Accessibility**: only the top container of a stack can be unloaded.
//!
//! ## Design
//!
//! [`Manifest`] is plain owned data. Mutation takes `&mut self`, so the
//! borrow checker supplies the exclusion a shared host would otherwise need
//! around `load`/`unload`. Queries return `Option` for absence and copies
//! for contents.

pub mod manifest;
pub mod snapshot;

pub use manifest::{Manifest, ManifestError, Slot};
pub use snapshot::{DeckSnapshot, StackSnapshot};
