//! # rcre-match
//!
//! The matcher-primitive surface the rule compiler emits into.
//!
//! The compiler lowers each leaf log-matcher node to one of five
//! concrete primitives, selected by window, positive-term count, and
//! the presence of negations:
//!
//! - [`MatchSingle`] — one term, no window
//! - [`MatchSeq`] — ordered terms within a window
//! - [`InverseSeq`] — ordered terms within a window, reset by negations
//! - [`MatchSet`] — unordered terms within a window
//! - [`InverseSet`] — unordered terms within a window, reset by negations
//!
//! This crate only constructs and validates the primitives; the matching
//! algorithms that consume them belong to the runtime that loads the
//! compiled objects.

mod hits;
mod matchers;
mod term;

pub use hits::{Correlation, EntityMetadata, Entry, Hits};
pub use matchers::{InverseSeq, InverseSet, MatchSeq, MatchSet, MatchSingle};
pub use term::{Reset, Term, TermKind};

use thiserror::Error;

/// Construction-time validation failures.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("empty match term")]
    EmptyTerm,

    #[error("invalid regex term: {0}")]
    BadRegex(#[from] regex::Error),

    #[error("window must be positive")]
    ZeroWindow,

    #[error("need at least {want} terms, got {got}")]
    TooFewTerms { want: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, MatchError>;
