//! # stowage-core — Foundational Types for Deck Stowage
//!
//! Defines the values every other crate in the workspace passes around:
//! container identifier codes and the containers that carry them. It depends
//! on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Validated newtypes.** [`IdentifierCode`] can only be obtained through
//!    `parse`, so a held code always has a matching check digit. Serde
//!    deserialization routes through the same constructor.
//!
//! 2. **Closed container enum.** [`Container`] has exactly three variants.
//!    Stack homogeneity compares [`ContainerKind`] tags, and every `match` is
//!    exhaustive.
//!
//! 3. **Fail at construction.** Out-of-range weights and categories are
//!    rejected when the container is built, never later.
//!
//! ## Crate Policy
//!
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No logging: every failure is returned to the caller.

pub mod code;
pub mod container;
pub mod error;

// Re-export primary types for ergonomic imports.
pub use code::{CheckDigitScheme, IdentifierCode, CODE_LENGTH};
pub use container::{
    Container, ContainerKind, ContainerRecord, DangerousGoods, GeneralGoods, Refrigerated,
    MAX_CATEGORY, MAX_GROSS_WEIGHT, MIN_CATEGORY, MIN_GROSS_WEIGHT,
};
pub use error::{InvalidCode, InvalidContainer, StowageError};
