//! Core runschema library.
//!
//! `runschema` executes registered commands against one or more named schemas
//! (isolated namespaces within a shared backing store). For each target
//! schema, the dispatcher points the ambient connection at that schema, runs
//! the wrapped command, and restores the previous schema afterward on every
//! exit path.
//!
//! ## Layering
//!
//! The crate keeps the switching machinery thin and the seams explicit:
//! - `registry/` maps stable command names to typed handler constructors.
//! - `resolver/` turns selector options into an ordered schema list.
//! - `connection/` owns the single ambient active-schema cell.
//! - `dispatch/` sequences handler invocations across schemas with
//!   save/restore semantics.
//! - `config/` loads and validates the TOML schema declarations.
//!
//! The default flow is: CLI → registry + resolver → dispatch → connection.

pub mod command;
pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;
pub mod ids;
pub mod log;
pub mod registry;
pub mod resolver;

pub use error::Error;

///
/// Crate Version
///

pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
