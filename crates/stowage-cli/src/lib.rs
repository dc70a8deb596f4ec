//! # stowage-cli — Command-Line Front End
//!
//! Provides the `stowage` binary over `stowage-core` and `stowage-manifest`.
//!
//! ## Subcommands
//!
//! - `stowage code` — Validate container codes.
//! - `stowage plan` — Run a YAML/JSON loading plan and print the deck.
//! - `stowage shell` — Interactive loading session on stdin.
//!
//! ```bash
//! stowage code MSCU6639871 INKU2633836
//! stowage --config voyage.yaml plan plans/voyage.yaml --find CSQU3054389
//! stowage -v shell
//! ```
//!
//! Logging goes to stderr through `tracing`; the libraries underneath never
//! log.

pub mod code;
pub mod config;
pub mod plan;
pub mod render;
pub mod session;
pub mod shell;
