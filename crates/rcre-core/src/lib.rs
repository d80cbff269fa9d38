//! # rcre-core
//!
//! Shared vocabulary for the rcre rule-compiler pipeline.
//!
//! Two concerns live here because every pass needs them:
//!
//! - [`error`]: the positional error carrier threaded through parsing,
//!   AST building, and compilation. A single [`ErrorKind`] taxonomy is
//!   exposed; passes wrap errors with source positions and rule identity
//!   but never substitute the underlying kind.
//! - [`schema`]: scope and node-type tags, severity levels, and the
//!   registry of known event sources.

pub mod error;
pub mod schema;

pub use error::{Error, ErrorKind, Pos, Result};
pub use schema::{NodeType, Scope};
