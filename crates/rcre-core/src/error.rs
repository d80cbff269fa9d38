//! Positional error carrier shared by all compiler passes.
//!
//! Every user-visible failure is an [`Error`]: an [`ErrorKind`] sentinel,
//! optionally wrapped one or more times with a source position and the
//! identity of the rule being processed. Wrapping adds context; it never
//! changes the kind, so callers can identify failures with
//! [`Error::kind`] regardless of wrapping depth and recover the deepest
//! attached position with [`Error::pos`].

use std::fmt;

use thiserror::Error as ThisError;

/// 1-based source position within a rule document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    pub fn new(line: u32, col: u32) -> Self {
        Pos { line, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// The single error taxonomy exposed by the compiler front-end.
#[derive(Debug, ThisError)]
pub enum ErrorKind {
    // ── Document errors ──────────────────────────────────────────────────
    #[error("rule not found")]
    RuleNotFound,
    #[error("not supported")]
    NotSupported,
    #[error("'terms' must be a mapping")]
    TermsMapping,
    #[error("duplicate term name")]
    DuplicateTerm,
    #[error("duplicate id={id} (cre={cre_id})")]
    DuplicateId { id: String, cre_id: String },

    // ── Identity errors ──────────────────────────────────────────────────
    #[error("missing rule id")]
    MissingRuleId,
    #[error("missing rule hash")]
    MissingRuleHash,
    #[error("missing cre id")]
    MissingCreId,
    #[error("invalid rule id (must be base58)")]
    InvalidRuleId,
    #[error("invalid rule hash (must be base58)")]
    InvalidRuleHash,
    #[error("invalid cre id")]
    InvalidCreId,

    // ── Shape errors ─────────────────────────────────────────────────────
    #[error("'sequence' missing 'order'")]
    MissingOrder,
    #[error("'set' missing 'match'")]
    MissingMatch,
    #[error("missing one or more positive conditions under an order statement")]
    MissingPositiveOrderCondition,
    #[error("missing one or more positive conditions under a match statement")]
    MissingPositiveMatchCondition,
    #[error("missing string, jq, or regex condition")]
    MissingScalar,
    #[error("invalid node type")]
    InvalidNodeType,

    // ── Window and term errors ───────────────────────────────────────────
    #[error("invalid 'window'")]
    InvalidWindow,
    #[error("sequences require two or more positive conditions")]
    SeqPosConditions,
    #[error("sequence with single match (use set instead)")]
    SequenceSingleMatch,
    #[error("term not found")]
    TermNotFound,
    #[error("unknown source field")]
    UnknownField,
    #[error("unknown source")]
    UnknownSrc,

    // ── Event errors ─────────────────────────────────────────────────────
    #[error("invalid event type")]
    InvalidEventType,
    #[error("root node has no event source")]
    RootNodeWithoutEventSrc,
    #[error("missing origin event")]
    MissingOrigin,

    // ── Negate errors ────────────────────────────────────────────────────
    #[error("invalid negate anchor")]
    InvalidAnchor,

    // ── Compiler errors ──────────────────────────────────────────────────
    #[error("unsupported scope")]
    UnsupportedScope,
    #[error("unsupported node type")]
    UnsupportedNodeType,
    #[error("invalid matcher")]
    InvalidMatcher,

    // ── External failures surfaced through the same taxonomy ─────────────
    #[error("yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("document: {0}")]
    Document(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What an [`Error`] wraps: either the sentinel itself or another
/// positioned error one level deeper.
#[derive(Debug)]
enum Cause {
    Kind(ErrorKind),
    Wrapped(Box<Error>),
}

/// A positional error: an [`ErrorKind`] plus however much context the
/// failing pass could attach.
#[derive(Debug)]
pub struct Error {
    pos: Option<Pos>,
    rule_id: String,
    rule_hash: String,
    cre_id: String,
    file: String,
    msg: String,
    cause: Cause,
}

impl Error {
    /// An error with no position attached (compiler-stage failures).
    pub fn new(kind: ErrorKind) -> Self {
        Error {
            pos: None,
            rule_id: String::new(),
            rule_hash: String::new(),
            cre_id: String::new(),
            file: String::new(),
            msg: String::new(),
            cause: Cause::Kind(kind),
        }
    }

    /// Wrap an error (or bare kind) with a position and rule identity.
    pub fn wrap(
        pos: Pos,
        rule_id: impl Into<String>,
        rule_hash: impl Into<String>,
        cre_id: impl Into<String>,
        err: impl Into<Error>,
    ) -> Self {
        let inner: Error = err.into();
        let cause = match inner.cause {
            // Avoid a pointless extra level when wrapping a bare kind
            // that carries no context of its own.
            Cause::Kind(kind) if inner.pos.is_none() && inner.msg.is_empty() => Cause::Kind(kind),
            _ => Cause::Wrapped(Box::new(inner)),
        };
        Error {
            pos: Some(pos),
            rule_id: rule_id.into(),
            rule_hash: rule_hash.into(),
            cre_id: cre_id.into(),
            file: String::new(),
            msg: String::new(),
            cause,
        }
    }

    /// Attach free-text detail rendered alongside the kind.
    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    /// Attach a file name to the outermost wrapper if it has none.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        if self.file.is_empty() {
            self.file = file.into();
        }
        self
    }

    /// The innermost sentinel, regardless of wrapping depth.
    pub fn kind(&self) -> &ErrorKind {
        match &self.cause {
            Cause::Kind(kind) => kind,
            Cause::Wrapped(inner) => inner.kind(),
        }
    }

    /// First attached position, walking the chain outermost inward.
    pub fn pos(&self) -> Option<Pos> {
        match (self.pos, &self.cause) {
            (Some(pos), _) => Some(pos),
            (None, Cause::Wrapped(inner)) => inner.pos(),
            (None, Cause::Kind(_)) => None,
        }
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn rule_hash(&self) -> &str {
        &self.rule_hash
    }

    pub fn cre_id(&self) -> &str {
        &self.cre_id
    }

    pub fn file(&self) -> &str {
        &self.file
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = match &self.cause {
            Cause::Kind(kind) => kind.to_string(),
            Cause::Wrapped(inner) => inner.to_string(),
        };
        let msg = if self.msg.is_empty() {
            cause
        } else {
            format!("{}: {}", self.msg, cause)
        };

        let pos = self.pos().unwrap_or_default();
        write!(f, "err=\"{}\", line={}, col={}", msg, pos.line, pos.col)?;

        if !self.cre_id.is_empty() {
            write!(f, ", cre_id={}", self.cre_id)?;
        }
        if !self.rule_id.is_empty() {
            write!(f, ", rule_id={}", self.rule_id)?;
        }
        if !self.rule_hash.is_empty() {
            write!(f, ", rule_hash={}", self.rule_hash)?;
        }
        if !self.file.is_empty() {
            write!(f, ", file={}", self.file)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.cause {
            Cause::Kind(kind) => Some(kind),
            Cause::Wrapped(inner) => Some(inner.as_ref()),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::new(ErrorKind::Yaml(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::new(ErrorKind::Io(err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
