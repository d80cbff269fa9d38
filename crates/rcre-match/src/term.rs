//! Match terms and negation resets.

use regex::Regex;

use crate::{MatchError, Result};

/// How a term's value is interpreted against a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TermKind {
    /// Raw substring match against the record text.
    #[default]
    Raw,
    /// jq predicate evaluated against the record parsed as JSON.
    JqJson,
    /// Regular expression match against the record text.
    Regex,
}

/// A single match term: a kind plus its pattern or predicate text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Term {
    pub kind: TermKind,
    pub value: String,
}

impl Term {
    pub fn raw(value: impl Into<String>) -> Self {
        Term {
            kind: TermKind::Raw,
            value: value.into(),
        }
    }

    pub fn jq(value: impl Into<String>) -> Self {
        Term {
            kind: TermKind::JqJson,
            value: value.into(),
        }
    }

    pub fn regex(value: impl Into<String>) -> Self {
        Term {
            kind: TermKind::Regex,
            value: value.into(),
        }
    }

    /// Validate the term at construction time. Regex terms must compile;
    /// all terms must be non-empty. jq predicates are carried opaquely
    /// and compiled by the runtime.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.value.is_empty() {
            return Err(MatchError::EmptyTerm);
        }
        if self.kind == TermKind::Regex {
            Regex::new(&self.value)?;
        }
        Ok(())
    }
}

/// A negation term plus its temporal relationship to the positives.
///
/// All durations are nanoseconds. Zero values mean "no tuning": the
/// negation applies across the whole match window.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reset {
    pub term: Term,
    pub window: i64,
    pub slide: i64,
    pub anchor: u32,
    pub absolute: bool,
}
