//! # rcre-compiler
//!
//! Passes 2 and 3 of the rcre rule compiler.
//!
//! - [`ast`] validates a parse tree and lowers it into an addressed
//!   semantic AST: every internal node becomes an explicit state
//!   machine (`machine_seq` / `machine_set`) owning its leaf log
//!   matchers (`log_seq` / `log_set`).
//! - [`compile`] walks the AST per scope and emits a flat, stably
//!   ordered vector of compiled [`Object`]s, each wrapping a concrete
//!   matcher primitive from `rcre-match` plus a callback supplied by
//!   the embedder's [`Runtime`] adapter.
//!
//! ## Quick start
//!
//! ```rust
//! use rcre_compiler::{compile, CompilerOpts};
//! use rcre_core::Scope;
//!
//! let yaml = br#"
//! rules:
//!   - cre:
//!       id: cre-2024-0007
//!     metadata:
//!       id: J7uRQTGpGMyL1iFpssnBeS
//!       hash: rdJLgqYgkEp8jg8Qks1qiq
//!     rule:
//!       sequence:
//!         window: 10s
//!         event:
//!           source: kafka
//!         order:
//!           - value: "io.vertx.core.VertxException: Thread blocked"
//!             count: 3
//! "#;
//!
//! let objs = compile(yaml, Scope::Node, CompilerOpts::new()).unwrap();
//! assert_eq!(objs.len(), 1);
//! ```

pub mod ast;
pub mod compile;
pub mod plugin;
pub mod runtime;

mod log;

pub use ast::{
    Ast, AstEvent, AstField, AstMetadata, AstNode, AstObject, LogMatcher, NodeAddress, SeqMatcher,
    SetMatcher,
};
pub use compile::{
    compile, compile_ast, compile_tree, Callback, CompilerOpts, ConcreteMatcher, Object, ObjectType,
};
pub use plugin::{obj_log_matcher, NodePlugin, Plugin};
pub use runtime::{AssertParams, CbAssert, CbMatch, MatchParams, NoopRuntime, Runtime};

pub use rcre_core::error::{Error, ErrorKind, Pos, Result};
pub use rcre_core::schema::{NodeType, Scope};
