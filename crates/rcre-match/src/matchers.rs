//! The five concrete matcher primitives.
//!
//! Constructors validate shape (term counts, term contents, and window
//! positivity where a window is required) and store the data the
//! runtime needs to evaluate them. The inverse variants accept a zero
//! match window, since a single-positive set constrains time only
//! through its resets.

use crate::term::{Reset, Term};
use crate::{MatchError, Result};

fn validate_terms(terms: &[Term], want: usize) -> Result<()> {
    if terms.len() < want {
        return Err(MatchError::TooFewTerms {
            want,
            got: terms.len(),
        });
    }
    for term in terms {
        term.validate()?;
    }
    Ok(())
}

fn validate_resets(resets: &[Reset]) -> Result<()> {
    for reset in resets {
        reset.term.validate()?;
    }
    Ok(())
}

/// A single term with no temporal constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSingle {
    term: Term,
}

impl MatchSingle {
    pub fn new(term: Term) -> Result<Self> {
        term.validate()?;
        Ok(MatchSingle { term })
    }

    pub fn term(&self) -> &Term {
        &self.term
    }
}

/// Ordered terms that must all hit, in order, within the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSeq {
    window: i64,
    terms: Vec<Term>,
}

impl MatchSeq {
    pub fn new(window: i64, terms: Vec<Term>) -> Result<Self> {
        if window <= 0 {
            return Err(MatchError::ZeroWindow);
        }
        validate_terms(&terms, 2)?;
        Ok(MatchSeq { window, terms })
    }

    pub fn window(&self) -> i64 {
        self.window
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

/// An ordered sequence invalidated by any reset term firing inside its
/// configured negation window.
///
/// A zero window means the match itself carries no temporal constraint;
/// only the per-reset windows apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseSeq {
    window: i64,
    terms: Vec<Term>,
    resets: Vec<Reset>,
}

impl InverseSeq {
    pub fn new(window: i64, terms: Vec<Term>, resets: Vec<Reset>) -> Result<Self> {
        validate_terms(&terms, 1)?;
        validate_resets(&resets)?;
        Ok(InverseSeq {
            window,
            terms,
            resets,
        })
    }

    pub fn window(&self) -> i64 {
        self.window
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn resets(&self) -> &[Reset] {
        &self.resets
    }
}

/// Unordered terms that must all hit within the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    window: i64,
    terms: Vec<Term>,
}

impl MatchSet {
    pub fn new(window: i64, terms: Vec<Term>) -> Result<Self> {
        if window <= 0 {
            return Err(MatchError::ZeroWindow);
        }
        validate_terms(&terms, 2)?;
        Ok(MatchSet { window, terms })
    }

    pub fn window(&self) -> i64 {
        self.window
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }
}

/// An unordered set invalidated by any reset term firing inside its
/// configured negation window.
///
/// A zero window means the match itself carries no temporal constraint;
/// only the per-reset windows apply. A single-term set never carries a
/// window, so its inverse form always constructs with zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseSet {
    window: i64,
    terms: Vec<Term>,
    resets: Vec<Reset>,
}

impl InverseSet {
    pub fn new(window: i64, terms: Vec<Term>, resets: Vec<Reset>) -> Result<Self> {
        validate_terms(&terms, 1)?;
        validate_resets(&resets)?;
        Ok(InverseSet {
            window,
            terms,
            resets,
        })
    }

    pub fn window(&self) -> i64 {
        self.window
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn resets(&self) -> &[Reset] {
        &self.resets
    }
}
