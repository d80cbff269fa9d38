//! Plugin dispatch and the default node-scope plugin.

use std::time::Duration;

use tracing::{debug, error};

use rcre_core::error::{Error, ErrorKind, Result};
use rcre_core::schema::NodeType;
use rcre_match::{InverseSeq, InverseSet, MatchError, MatchSeq, MatchSet, MatchSingle, Reset, Term};

use crate::ast::{AstField, AstNode, AstObject, LogMatcher};
use crate::compile::{Callback, ConcreteMatcher, Object, ObjectType};
use crate::runtime::{MatchParams, Runtime};

/// Compiles the nodes routed to one scope.
pub trait Plugin {
    fn compile(&self, runtime: &dyn Runtime, node: &AstNode) -> Result<Vec<Object>>;
}

/// Default plugin: lowers leaf log matchers into concrete primitives.
/// Machine nodes belong to other scopes' plugins.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodePlugin;

impl Plugin for NodePlugin {
    fn compile(&self, runtime: &dyn Runtime, node: &AstNode) -> Result<Vec<Object>> {
        match node.metadata.kind {
            NodeType::LogSeq | NodeType::LogSet => Ok(vec![obj_log_matcher(runtime, node)?]),
            kind => {
                error!(kind = %kind, "unsupported node type");
                Err(Error::new(ErrorKind::UnsupportedNodeType))
            }
        }
    }
}

/// Lower one leaf log-matcher node into a compiled [`Object`].
///
/// Primitive selection:
///
/// | kind      | negatives | positives | primitive     |
/// |-----------|-----------|-----------|---------------|
/// | `log_seq` | yes       | any       | `InverseSeq`  |
/// | `log_seq` | no        | 1         | error         |
/// | `log_seq` | no        | ≥2        | `MatchSeq`    |
/// | `log_set` | yes       | any       | `InverseSet`  |
/// | `log_set` | no        | 1         | `MatchSingle` |
/// | `log_set` | no        | ≥2        | `MatchSet`    |
pub fn obj_log_matcher(runtime: &dyn Runtime, node: &AstNode) -> Result<Object> {
    let AstObject::Log(lm) = &node.object else {
        error!(address = %node.metadata.address, "failed to compile log matcher");
        return Err(Error::new(ErrorKind::InvalidMatcher));
    };

    let callback = runtime.new_cb_match(MatchParams {
        address: node.metadata.address.clone(),
        parent_address: node.metadata.parent_address.clone(),
        origin: lm.event.origin,
    });

    let matcher = match node.metadata.kind {
        NodeType::LogSeq => log_seq_matcher(lm, node.metadata.neg_idx)?,
        NodeType::LogSet => log_set_matcher(lm, node.metadata.neg_idx)?,
        kind => {
            error!(kind = %kind, "unsupported node type");
            return Err(Error::new(ErrorKind::UnsupportedNodeType));
        }
    };

    Ok(Object {
        rule_id: node.metadata.rule_id.clone(),
        address: node.metadata.address.clone(),
        parent_address: node.metadata.parent_address.clone(),
        scope: node.metadata.scope,
        abstract_type: node.metadata.kind,
        object_type: ObjectType::Matcher,
        event: lm.event.clone(),
        matcher,
        callback: Callback::Match(callback),
    })
}

fn log_seq_matcher(lm: &LogMatcher, neg_idx: i32) -> Result<ConcreteMatcher> {
    if neg_idx > 0 {
        debug!(terms = lm.match_fields.len(), "creating inverse match sequence");
        InverseSeq::new(
            window_ns(lm.window),
            to_terms(&lm.match_fields),
            to_resets(&lm.negate_fields),
        )
        .map(ConcreteMatcher::InverseSeq)
        .map_err(invalid_matcher)
    } else if lm.match_fields.len() == 1 {
        error!("sequence with single match (use set instead)");
        Err(Error::new(ErrorKind::SequenceSingleMatch))
    } else {
        debug!(terms = lm.match_fields.len(), "creating match sequence");
        MatchSeq::new(window_ns(lm.window), to_terms(&lm.match_fields))
            .map(ConcreteMatcher::Seq)
            .map_err(invalid_matcher)
    }
}

fn log_set_matcher(lm: &LogMatcher, neg_idx: i32) -> Result<ConcreteMatcher> {
    if neg_idx > 0 {
        debug!(terms = lm.match_fields.len(), "creating inverse match set");
        InverseSet::new(
            window_ns(lm.window),
            to_terms(&lm.match_fields),
            to_resets(&lm.negate_fields),
        )
        .map(ConcreteMatcher::InverseSet)
        .map_err(invalid_matcher)
    } else if lm.match_fields.len() == 1 {
        debug!("creating match single");
        MatchSingle::new(lm.match_fields[0].term.clone())
            .map(ConcreteMatcher::Single)
            .map_err(invalid_matcher)
    } else {
        debug!(terms = lm.match_fields.len(), "creating match set");
        MatchSet::new(window_ns(lm.window), to_terms(&lm.match_fields))
            .map(ConcreteMatcher::Set)
            .map_err(invalid_matcher)
    }
}

fn invalid_matcher(err: MatchError) -> Error {
    Error::new(ErrorKind::InvalidMatcher).with_msg(err.to_string())
}

fn window_ns(window: Duration) -> i64 {
    window.as_nanos() as i64
}

fn to_terms(fields: &[AstField]) -> Vec<Term> {
    fields.iter().map(|f| f.term.clone()).collect()
}

fn to_resets(fields: &[AstField]) -> Vec<Reset> {
    fields
        .iter()
        .map(|f| match &f.negate_opts {
            None => Reset {
                term: f.term.clone(),
                ..Reset::default()
            },
            Some(opts) => Reset {
                term: f.term.clone(),
                window: opts.window.as_nanos() as i64,
                slide: opts.slide.as_nanos() as i64,
                anchor: opts.anchor,
                absolute: opts.absolute,
            },
        })
        .collect()
}
