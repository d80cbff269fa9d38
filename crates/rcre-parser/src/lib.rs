//! # rcre-parser
//!
//! Parse pass of the rcre rule compiler: lifts textual rule documents
//! into a positioned, typed [`ParseTree`].
//!
//! A rule document is a mapping with a `rules` sequence and an optional
//! `terms` table of named sub-expressions:
//!
//! ```yaml
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
//! ```
//!
//! The parser:
//!
//! - decodes documents with `serde_yaml` while walking a positioned
//!   node tree, so every node and every error carries (line, column)
//! - resolves named terms by in-place substitution
//! - validates rule identity (base58 rule id/hash, slug cre id) and the
//!   window grammar
//! - handles multi-document streams, skipping version footers and
//!   rejecting duplicate rule identities and term names
//!
//! ## Quick start
//!
//! ```rust
//! let yaml = br#"
//! rules:
//!   - cre:
//!       id: cre-2024-0007
//!     metadata:
//!       id: J7uRQTGpGMyL1iFpssnBeS
//!       hash: rdJLgqYgkEp8jg8Qks1qiq
//!     rule:
//!       set:
//!         event:
//!           source: kafka
//!         match:
//!           - "Thread blocked"
//! "#;
//!
//! let tree = rcre_parser::parse(yaml).unwrap();
//! assert_eq!(tree.nodes.len(), 1);
//! ```

pub mod doc;
pub mod raw;
pub mod render;
pub mod tree;

mod window;

pub use raw::{RawCre, RawDoc, RawRule, RawSequence, RawSet, RawTerm};
pub use render::render;
pub use tree::{
    parse, parse_cres, parse_rules, read, Event, Field, Matcher, NegateOpts, NodeMetadata,
    ParseChild, ParseNode, ParseTree, Rules,
};

pub use rcre_core::error::{Error, ErrorKind, Pos, Result};
