//! Leaf lowering: parse-tree matcher children into [`LogMatcher`] nodes.

use tracing::error;

use rcre_core::error::{ErrorKind, Result};
use rcre_core::schema::{
    NodeType, Scope, EVENT_SRC_K8S, K8S_FIELD_REASON, K8S_FIELD_REASON_DETAIL, K8S_FIELD_TYPE,
};
use rcre_match::Term;
use rcre_parser::{Field, ParseChild, ParseNode};

use crate::ast::{AstEvent, AstField, AstMetadata, AstNode, AstObject, Builder, LogMatcher, NodeAddress};

pub(crate) fn build_log_matcher_node(
    builder: &mut Builder,
    pn: &ParseNode,
    machine_address: &NodeAddress,
    term_idx: u32,
    force_origin: bool,
) -> Result<AstNode> {
    let Some(event) = &pn.metadata.event else {
        return Err(pn.wrap_error(ErrorKind::InvalidEventType));
    };
    let src = event.source.as_str();

    let mut match_fields = Vec::new();
    let mut negate_fields = Vec::new();

    for child in &pn.children {
        let ParseChild::Matcher(matcher) = child else {
            error!(address = %machine_address, "expected scalar value");
            return Err(pn.wrap_error(ErrorKind::MissingScalar));
        };

        // count expands a field into that many identical terms.
        for field in &matcher.match_fields {
            for _ in 0..field.count.max(1) {
                let term = new_match_term(src, field).map_err(|kind| {
                    error!(address = %machine_address, "invalid match field term");
                    pn.wrap_error(kind)
                })?;
                match_fields.push(term);
            }
        }

        for field in &matcher.negate_fields {
            for _ in 0..field.count.max(1) {
                let term = new_negate_term(src, field).map_err(|kind| {
                    error!(address = %machine_address, "invalid negate field term");
                    pn.wrap_error(kind)
                })?;
                negate_fields.push(term);
            }
        }
    }

    // Anchors index among all sibling terms, positive and negative,
    // the same bound nested machine children are held to.
    let sibling_len = (match_fields.len() + negate_fields.len()) as u32;
    for field in &negate_fields {
        if let Some(opts) = &field.negate_opts {
            if opts.anchor > sibling_len {
                error!(
                    anchor = opts.anchor,
                    siblings = sibling_len,
                    "negate anchor out of range"
                );
                return Err(pn.wrap_error(ErrorKind::InvalidAnchor));
            }
        }
    }

    match pn.metadata.kind {
        NodeType::LogSeq => {
            validate_log_seq(pn, match_fields.len()).map_err(|kind| pn.wrap_error(kind))?
        }
        NodeType::LogSet => validate_log_set(pn, match_fields.len(), negate_fields.len())
            .map_err(|kind| pn.wrap_error(kind))?,
        _ => {
            error!(kind = %pn.metadata.kind, "invalid node type");
            return Err(pn.wrap_error(ErrorKind::InvalidNodeType));
        }
    }

    let address = builder.next_address(&pn.metadata.rule_hash, pn.metadata.kind.as_str(), term_idx);

    Ok(AstNode {
        metadata: AstMetadata {
            kind: pn.metadata.kind,
            address,
            parent_address: Some(machine_address.clone()),
            negate_opts: None,
            rule_id: pn.metadata.rule_id.clone(),
            scope: log_match_scope(src),
            neg_idx: pn.neg_idx,
        },
        object: AstObject::Log(LogMatcher {
            event: AstEvent {
                origin: event.origin || force_origin,
                source: event.source.clone(),
            },
            match_fields,
            negate_fields,
            window: pn.metadata.window,
        }),
        children: Vec::new(),
    })
}

// TODO: move scope assignment onto data-source definitions once those
// carry their own scope.
fn log_match_scope(src: &str) -> Scope {
    if src == EVENT_SRC_K8S {
        Scope::Cluster
    } else {
        Scope::Node
    }
}

fn validate_log_seq(pn: &ParseNode, matches: usize) -> std::result::Result<(), ErrorKind> {
    if matches == 0 {
        error!("sequences require at least one order term");
        return Err(ErrorKind::MissingPositiveOrderCondition);
    }
    if matches == 1 {
        error!("sequences require two or more positive conditions");
        return Err(ErrorKind::SeqPosConditions);
    }
    if pn.metadata.window.is_zero() {
        error!("sequences require a window");
        return Err(ErrorKind::InvalidWindow);
    }
    Ok(())
}

fn validate_log_set(
    pn: &ParseNode,
    matches: usize,
    negates: usize,
) -> std::result::Result<(), ErrorKind> {
    if negates > 0 && matches == 0 {
        error!("sets require one or more positive conditions under a match statement");
        return Err(ErrorKind::MissingPositiveMatchCondition);
    }
    if matches > 1 && pn.metadata.window.is_zero() {
        error!("sets with two or more positive conditions require a window");
        return Err(ErrorKind::InvalidWindow);
    }
    if matches == 1 && !pn.metadata.window.is_zero() {
        error!("sets with a single positive condition take no window");
        return Err(ErrorKind::InvalidWindow);
    }
    Ok(())
}

/// Registry lookup for sources with well-known field names. Only
/// consulted when the field names one (`field:` is set); bare-valued
/// terms never route through here.
fn known_src_field(src: &str, field: &Field) -> std::result::Result<Option<AstField>, ErrorKind> {
    if field.field.is_empty() {
        return Ok(None);
    }

    match src {
        EVENT_SRC_K8S => match field.field.as_str() {
            K8S_FIELD_REASON | K8S_FIELD_TYPE | K8S_FIELD_REASON_DETAIL => Ok(Some(AstField {
                field: field.field.clone(),
                term: Term::jq(format!(
                    "select(.{} == \"{}\")",
                    field.field, field.str_value
                )),
                negate_opts: None,
            })),
            other => {
                error!(field = other, "unknown k8s event field");
                Err(ErrorKind::UnknownField)
            }
        },
        // No field registry for this source: the scalar values apply
        // as-is.
        _ => Ok(None),
    }
}

fn new_match_term(src: &str, field: &Field) -> std::result::Result<AstField, ErrorKind> {
    if let Some(term) = known_src_field(src, field)? {
        return Ok(term);
    }

    let mut term = None;
    let mut set_values = 0;

    if !field.str_value.is_empty() {
        term = Some(Term::raw(field.str_value.clone()));
        set_values += 1;
    }
    if !field.jq_value.is_empty() {
        term = Some(Term::jq(field.jq_value.clone()));
        set_values += 1;
    }
    if !field.regex_value.is_empty() {
        term = Some(Term::regex(field.regex_value.clone()));
        set_values += 1;
    }

    match (set_values, term) {
        (1, Some(term)) => Ok(AstField {
            field: field.field.clone(),
            term,
            negate_opts: None,
        }),
        (0, _) => Err(ErrorKind::MissingScalar),
        _ => {
            error!("only one of value, jq, or regex may be set");
            Err(ErrorKind::InvalidNodeType)
        }
    }
}

fn new_negate_term(src: &str, field: &Field) -> std::result::Result<AstField, ErrorKind> {
    let mut term = new_match_term(src, field)?;
    term.negate_opts = field.negate_opts.clone();
    Ok(term)
}
