//! Parse pass: lift a rule document into a typed [`ParseTree`].
//!
//! Construction is a pre-order walk pairing the serde-decoded document
//! ([`crate::raw`]) with its positioned node tree ([`crate::doc`]), so
//! every node — and every error — carries the line and column it came
//! from. Named terms are resolved here by in-place substitution: the
//! referenced body replaces the referring site, and the referring
//! site's inline negate options overlay the resolved body.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::error;

use rcre_core::error::{Error, ErrorKind, Pos, Result};
use rcre_core::schema::NodeType;

use crate::doc::{self, DocNode, DocValue};
use crate::raw::{RawCre, RawDoc, RawEvent, RawRule, RawSequence, RawSet, RawTerm};
use crate::window::parse_duration;

static BASE58_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[1-9A-HJ-NP-Za-km-z]+$").unwrap());
static CRE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new("^[A-Za-z0-9-]+$").unwrap());

const DOC_RULE: &str = "rule";
const DOC_RULES: &str = "rules";
const DOC_SEQ: &str = "sequence";
const DOC_SET: &str = "set";
const DOC_ORDER: &str = "order";
const DOC_MATCH: &str = "match";
const DOC_NEGATE: &str = "negate";
const DOC_WINDOW: &str = "window";
const DOC_TERMS: &str = "terms";
const DOC_SECTION: &str = "section";
const DOC_VERSION: &str = "version";

/// Output of the parse pass: one node per top-level rule.
#[derive(Debug, Clone)]
pub struct ParseTree {
    pub nodes: Vec<ParseNode>,
}

/// An internal node of the parse tree: a `sequence` or `set` body,
/// typed by [`NodeType`], with ordered children (positives first).
#[derive(Debug, Clone)]
pub struct ParseNode {
    pub metadata: NodeMetadata,
    /// Index of the first negation child; -1 when there are none.
    pub neg_idx: i32,
    pub children: Vec<ParseChild>,
}

/// A child is either a nested body or a leaf scalar matcher.
#[derive(Debug, Clone)]
pub enum ParseChild {
    Node(ParseNode),
    Matcher(Matcher),
}

#[derive(Debug, Clone)]
pub struct NodeMetadata {
    pub rule_id: String,
    pub rule_hash: String,
    pub cre_id: String,
    pub kind: NodeType,
    pub window: Duration,
    pub event: Option<Event>,
    pub correlations: Vec<String>,
    pub negate_opts: Option<NegateOpts>,
    pub pos: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: String,
    pub origin: bool,
}

impl Event {
    fn from_raw(raw: &RawEvent) -> Self {
        Event {
            source: raw.source.clone().unwrap_or_default(),
            origin: raw.origin,
        }
    }
}

/// Parsed negate tuning. Durations resolved against the window grammar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NegateOpts {
    pub window: Duration,
    pub slide: Duration,
    pub anchor: u32,
    pub absolute: bool,
}

/// Leaf matcher: the scalar fields of a single resolved term.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    pub match_fields: Vec<Field>,
    pub negate_fields: Vec<Field>,
    pub window: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct Field {
    pub field: String,
    pub str_value: String,
    pub jq_value: String,
    pub regex_value: String,
    /// Expands the field into this many identical terms downstream.
    pub count: u32,
    pub negate_opts: Option<NegateOpts>,
}

impl ParseNode {
    /// Wrap an error with this node's position and rule identity.
    pub fn wrap_error(&self, err: impl Into<Error>) -> Error {
        Error::wrap(
            self.metadata.pos,
            self.metadata.rule_id.as_str(),
            self.metadata.rule_hash.as_str(),
            self.metadata.cre_id.as_str(),
            err,
        )
    }
}

/// Accumulated multi-document ingestion state: typed rules and terms
/// alongside their positioned document nodes.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    pub rules: Vec<RawRule>,
    pub rule_nodes: Vec<DocNode>,
    pub terms: HashMap<String, RawTerm>,
    pub term_nodes: HashMap<String, DocNode>,
}

/// Ingest a (possibly multi-document) rule stream.
///
/// Documents whose `section` key equals `version` are skipped. Rule
/// ids, hashes, and cre ids are deduplicated stream-wide, as are term
/// names.
pub fn read(data: &[u8]) -> Result<Rules> {
    let text = std::str::from_utf8(data)
        .map_err(|e| Error::new(ErrorKind::Document(e.to_string())))?;

    let mut all = Rules::default();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (base_line, chunk) in doc::split_documents(text) {
        if doc::is_blank(chunk) {
            continue;
        }

        let doc_node = doc::load_document(chunk, base_line)?;

        if let Some(section) = doc_node.find_child(DOC_SECTION).and_then(DocNode::as_scalar) {
            if section == DOC_VERSION {
                continue;
            }
        }

        let Some(rules_node) = doc_node.find_child(DOC_RULES) else {
            error!("rules not found");
            return Err(Error::new(ErrorKind::RuleNotFound));
        };

        if let Some(terms_node) = doc_node.find_child(DOC_TERMS) {
            if !matches!(terms_node.value, DocValue::Mapping(_)) {
                error!("terms node is not a mapping");
                return Err(Error::new(ErrorKind::TermsMapping));
            }
        }

        let raw: RawDoc = serde_yaml::from_str(chunk)?;

        for rule in &raw.rules {
            for id in [&rule.metadata.hash, &rule.metadata.id, &rule.cre.id] {
                if !seen_ids.insert(id.clone()) {
                    return Err(Error::new(ErrorKind::DuplicateId {
                        id: id.clone(),
                        cre_id: rule.cre.id.clone(),
                    }));
                }
            }
        }

        for i in 0..raw.rules.len() {
            let Some(node) = rules_node.seq_item(i) else {
                error!(index = i, "rule node not found");
                return Err(Error::new(ErrorKind::RuleNotFound));
            };
            all.rule_nodes.push(node.clone());
        }
        all.rules.extend(raw.rules);

        if let Some(mut typed) = raw.terms {
            if let Some(terms_node) = doc_node.find_child(DOC_TERMS) {
                for (name, node) in terms_node.entries() {
                    if all.term_nodes.contains_key(name) {
                        return Err(Error::new(ErrorKind::DuplicateTerm).with_msg(name.clone()));
                    }
                    all.term_nodes.insert(name.clone(), node.clone());
                    if let Some(term) = typed.remove(name) {
                        all.terms.insert(name.clone(), term);
                    }
                }
            }
        }
    }

    Ok(all)
}

/// Parse a rule stream into a [`ParseTree`].
pub fn parse(data: &[u8]) -> Result<ParseTree> {
    let rules = read(data)?;
    parse_rules(&rules)
}

/// Lower previously ingested [`Rules`] into a [`ParseTree`].
pub fn parse_rules(rules: &Rules) -> Result<ParseTree> {
    let mut tree = ParseTree { nodes: Vec::new() };

    for (i, rule) in rules.rules.iter().enumerate() {
        let Some(rule_node) = rules.rule_nodes.get(i) else {
            error!(index = i, "rule not found");
            return Err(Error::new(ErrorKind::RuleNotFound));
        };
        tree.nodes
            .push(build_rule_tree(&rules.terms, rule, rule_node, &rules.term_nodes)?);
    }

    Ok(tree)
}

/// Extract the CRE metadata of every rule in the stream, keyed by rule
/// hash.
pub fn parse_cres(data: &[u8]) -> Result<HashMap<String, RawCre>> {
    let rules = read(data)?;
    Ok(rules
        .rules
        .iter()
        .map(|r| (r.metadata.hash.clone(), r.cre.clone()))
        .collect())
}

fn build_rule_tree(
    terms: &HashMap<String, RawTerm>,
    rule: &RawRule,
    rule_node: &DocNode,
    term_nodes: &HashMap<String, DocNode>,
) -> Result<ParseNode> {
    let Some(n) = rule_node.find_child(DOC_RULE) else {
        return Err(Error::wrap(
            rule_node.pos,
            rule.metadata.id.as_str(),
            rule.metadata.hash.as_str(),
            rule.cre.id.as_str(),
            ErrorKind::RuleNotFound,
        ));
    };

    if let Some(seq) = &rule.rule.sequence {
        let body = n.find_child(DOC_SEQ).unwrap_or(n);
        let root = init_node(&rule.metadata.id, &rule.metadata.hash, &rule.cre.id, body)
            .map_err(|kind| {
                Error::wrap(
                    n.pos,
                    rule.metadata.id.as_str(),
                    rule.metadata.hash.as_str(),
                    rule.cre.id.as_str(),
                    kind,
                )
            })?;
        build_sequence_tree(root, terms, seq, body, term_nodes)
    } else if let Some(set) = &rule.rule.set {
        let body = n.find_child(DOC_SET).unwrap_or(n);
        let root = init_node(&rule.metadata.id, &rule.metadata.hash, &rule.cre.id, body)
            .map_err(|kind| {
                Error::wrap(
                    n.pos,
                    rule.metadata.id.as_str(),
                    rule.metadata.hash.as_str(),
                    rule.cre.id.as_str(),
                    kind,
                )
            })?;
        build_set_tree(root, terms, set, body, term_nodes)
    } else {
        Err(Error::wrap(
            n.pos,
            rule.metadata.id.as_str(),
            rule.metadata.hash.as_str(),
            rule.cre.id.as_str(),
            ErrorKind::NotSupported,
        ))
    }
}

fn init_node(
    rule_id: &str,
    rule_hash: &str,
    cre_id: &str,
    yn: &DocNode,
) -> std::result::Result<ParseNode, ErrorKind> {
    if rule_id.is_empty() {
        return Err(ErrorKind::MissingRuleId);
    }
    if !BASE58_ID.is_match(rule_id) {
        return Err(ErrorKind::InvalidRuleId);
    }
    if rule_hash.is_empty() {
        return Err(ErrorKind::MissingRuleHash);
    }
    if !BASE58_ID.is_match(rule_hash) {
        return Err(ErrorKind::InvalidRuleHash);
    }
    if cre_id.is_empty() {
        return Err(ErrorKind::MissingCreId);
    }
    if !CRE_ID.is_match(cre_id) {
        return Err(ErrorKind::InvalidCreId);
    }

    Ok(ParseNode {
        metadata: NodeMetadata {
            rule_id: rule_id.to_string(),
            rule_hash: rule_hash.to_string(),
            cre_id: cre_id.to_string(),
            kind: NodeType::MachineSeq,
            window: Duration::ZERO,
            event: None,
            correlations: Vec::new(),
            negate_opts: None,
            pos: yn.pos,
        },
        neg_idx: -1,
        children: Vec::new(),
    })
}

/// A top-level rule with a `sequence` body.
fn build_sequence_tree(
    mut root: ParseNode,
    terms: &HashMap<String, RawTerm>,
    seq: &RawSequence,
    body: &DocNode,
    term_nodes: &HashMap<String, DocNode>,
) -> Result<ParseNode> {
    let Some(order_node) = body.find_child(DOC_ORDER) else {
        return Err(root.wrap_error(ErrorKind::MissingOrder));
    };
    let negate_node = body.find_child(DOC_NEGATE).unwrap_or(body);

    let (pos_children, neg_children) = build_groups(
        &root,
        terms,
        seq.order.as_deref(),
        seq.negate.as_deref(),
        order_node,
        negate_node,
        term_nodes,
    )?;

    seq_node_props(&mut root, seq, seq.order.is_some(), order_node)?;
    finish_children(&mut root, pos_children, neg_children);
    Ok(root)
}

/// A top-level rule with a `set` body.
fn build_set_tree(
    mut root: ParseNode,
    terms: &HashMap<String, RawTerm>,
    set: &RawSet,
    body: &DocNode,
    term_nodes: &HashMap<String, DocNode>,
) -> Result<ParseNode> {
    let Some(match_node) = body.find_child(DOC_MATCH) else {
        return Err(root.wrap_error(ErrorKind::MissingMatch));
    };
    let negate_node = body.find_child(DOC_NEGATE).unwrap_or(body);

    let (pos_children, neg_children) = build_groups(
        &root,
        terms,
        set.matches.as_deref(),
        set.negate.as_deref(),
        match_node,
        negate_node,
        term_nodes,
    )?;

    set_node_props(&mut root, set, set.matches.is_some(), body)?;
    finish_children(&mut root, pos_children, neg_children);
    Ok(root)
}

fn finish_children(node: &mut ParseNode, pos: Vec<ParseChild>, neg: Vec<ParseChild>) {
    if !neg.is_empty() {
        node.neg_idx = pos.len() as i32;
    }
    node.children = pos;
    node.children.extend(neg);
}

fn seq_node_props(
    node: &mut ParseNode,
    seq: &RawSequence,
    order_present: bool,
    yn: &DocNode,
) -> Result<()> {
    node.metadata.kind = NodeType::MachineSeq;

    if !order_present {
        return Err(node.wrap_error(ErrorKind::MissingOrder));
    }

    if let Some(event) = &seq.event {
        node.metadata.kind = NodeType::LogSeq;
        node.metadata.event = Some(Event::from_raw(event));
    }

    if !seq.window.is_empty() {
        if let Some(win) = yn.find_child(DOC_WINDOW) {
            node.metadata.pos = win.pos;
        }
        node.metadata.window =
            parse_duration(&seq.window).ok_or_else(|| node.wrap_error(ErrorKind::InvalidWindow))?;
    }

    if let Some(corr) = &seq.correlations {
        node.metadata.correlations = corr.clone();
    }

    Ok(())
}

fn set_node_props(
    node: &mut ParseNode,
    set: &RawSet,
    match_present: bool,
    yn: &DocNode,
) -> Result<()> {
    node.metadata.kind = NodeType::MachineSet;

    if !match_present {
        return Err(node.wrap_error(ErrorKind::MissingMatch));
    }

    if let Some(event) = &set.event {
        node.metadata.kind = NodeType::LogSet;
        node.metadata.event = Some(Event::from_raw(event));
    }

    if !set.window.is_empty() {
        if let Some(win) = yn.find_child(DOC_WINDOW) {
            node.metadata.pos = win.pos;
        }
        node.metadata.window =
            parse_duration(&set.window).ok_or_else(|| node.wrap_error(ErrorKind::InvalidWindow))?;
    }

    if let Some(corr) = &set.correlations {
        node.metadata.correlations = corr.clone();
    }

    Ok(())
}

/// Build the positive and negative child groups of a node.
fn build_groups(
    node: &ParseNode,
    terms: &HashMap<String, RawTerm>,
    matches: Option<&[RawTerm]>,
    negates: Option<&[RawTerm]>,
    match_yn: &DocNode,
    negate_yn: &DocNode,
    term_nodes: &HashMap<String, DocNode>,
) -> Result<(Vec<ParseChild>, Vec<ParseChild>)> {
    let mut pos = Vec::new();
    let mut neg = Vec::new();

    if let Some(list) = matches {
        if !list.is_empty() {
            pos = build_children(node, terms, list, false, match_yn, term_nodes)?;
        }
    }
    if let Some(list) = negates {
        if !list.is_empty() {
            neg = build_children(node, terms, list, true, negate_yn, term_nodes)?;
        }
    }

    Ok((pos, neg))
}

fn build_children(
    parent: &ParseNode,
    terms: &HashMap<String, RawTerm>,
    list: &[RawTerm],
    parent_negate: bool,
    yn: &DocNode,
    term_nodes: &HashMap<String, DocNode>,
) -> Result<Vec<ParseChild>> {
    let mut children = Vec::with_capacity(list.len());

    for term in list {
        let mut t = term;
        let mut n = yn;
        let resolved: RawTerm;

        // A bare string naming an entry in the terms table resolves to
        // that body; otherwise it stays a literal value.
        if !term.value.is_empty() {
            if let Some(rt) = terms.get(&term.value) {
                let Some(node) = term_nodes.get(&term.value) else {
                    return Err(parent.wrap_error(ErrorKind::TermNotFound));
                };
                if term.negate_opts.is_some() {
                    resolved = RawTerm {
                        negate_opts: term.negate_opts.clone(),
                        ..rt.clone()
                    };
                    t = &resolved;
                } else {
                    t = rt;
                }
                n = node;
            }
        }

        children.push(node_from_term(parent, terms, t, parent_negate, n, term_nodes)?);
    }

    Ok(children)
}

fn node_from_term(
    parent: &ParseNode,
    terms: &HashMap<String, RawTerm>,
    term: &RawTerm,
    parent_negate: bool,
    yn: &DocNode,
    term_nodes: &HashMap<String, DocNode>,
) -> Result<ParseChild> {
    if let Some(seq) = &term.sequence {
        let n = yn.find_child(DOC_SEQ).unwrap_or(yn);
        let mut node = build_sequence_node(parent, terms, seq, n, term_nodes)?;
        if term.negate_opts.is_some() {
            node.metadata.negate_opts =
                parse_negate_opts(term).map_err(|kind| node.wrap_error(kind))?;
        }
        Ok(ParseChild::Node(node))
    } else if let Some(set) = &term.set {
        let n = yn.find_child(DOC_SET).unwrap_or(yn);
        let mut node = build_set_node(parent, terms, set, n, term_nodes)?;
        if term.negate_opts.is_some() {
            node.metadata.negate_opts =
                parse_negate_opts(term).map_err(|kind| node.wrap_error(kind))?;
        }
        Ok(ParseChild::Node(node))
    } else if !term.value.is_empty() || !term.jq.is_empty() || !term.regex.is_empty() {
        parse_value(term, parent_negate)
            .map(ParseChild::Matcher)
            .map_err(|kind| parent.wrap_error(kind))
    } else {
        Err(Error::wrap(
            yn.pos,
            parent.metadata.rule_id.as_str(),
            parent.metadata.rule_hash.as_str(),
            parent.metadata.cre_id.as_str(),
            ErrorKind::TermNotFound,
        ))
    }
}

/// A nested `sequence` body inside a term.
fn build_sequence_node(
    parent: &ParseNode,
    terms: &HashMap<String, RawTerm>,
    seq: &RawSequence,
    yn: &DocNode,
    term_nodes: &HashMap<String, DocNode>,
) -> Result<ParseNode> {
    let mut node = init_node(
        &parent.metadata.rule_id,
        &parent.metadata.rule_hash,
        &parent.metadata.cre_id,
        yn,
    )
    .map_err(|kind| parent.wrap_error(kind))?;

    let (pos_children, neg_children) = build_groups(
        &node,
        terms,
        seq.order.as_deref(),
        seq.negate.as_deref(),
        yn,
        yn,
        term_nodes,
    )?;

    seq_node_props(&mut node, seq, seq.order.is_some(), yn)?;
    finish_children(&mut node, pos_children, neg_children);
    Ok(node)
}

/// A nested `set` body inside a term.
fn build_set_node(
    parent: &ParseNode,
    terms: &HashMap<String, RawTerm>,
    set: &RawSet,
    yn: &DocNode,
    term_nodes: &HashMap<String, DocNode>,
) -> Result<ParseNode> {
    let mut node = init_node(
        &parent.metadata.rule_id,
        &parent.metadata.rule_hash,
        &parent.metadata.cre_id,
        yn,
    )
    .map_err(|kind| parent.wrap_error(kind))?;

    let (pos_children, neg_children) = build_groups(
        &node,
        terms,
        set.matches.as_deref(),
        set.negate.as_deref(),
        yn,
        yn,
        term_nodes,
    )?;

    set_node_props(&mut node, set, set.matches.is_some(), yn)?;
    finish_children(&mut node, pos_children, neg_children);
    Ok(node)
}

/// A scalar term becomes a leaf [`Matcher`] with a single field on the
/// side selected by `negate`.
fn parse_value(term: &RawTerm, negate: bool) -> std::result::Result<Matcher, ErrorKind> {
    let mut matcher = Matcher::default();
    let mut field = Field {
        field: term.field.clone(),
        str_value: term.value.clone(),
        jq_value: term.jq.clone(),
        regex_value: term.regex.clone(),
        count: term.count,
        negate_opts: None,
    };

    if negate {
        field.negate_opts = parse_negate_opts(term)?;
        matcher.negate_fields.push(field);
    } else {
        matcher.match_fields.push(field);
    }

    Ok(matcher)
}

fn parse_negate_opts(term: &RawTerm) -> std::result::Result<Option<NegateOpts>, ErrorKind> {
    let Some(raw) = &term.negate_opts else {
        return Ok(None);
    };

    let mut opts = NegateOpts {
        anchor: raw.anchor,
        absolute: raw.absolute,
        ..NegateOpts::default()
    };
    if !raw.window.is_empty() {
        opts.window = parse_duration(&raw.window).ok_or(ErrorKind::InvalidWindow)?;
    }
    if !raw.slide.is_empty() {
        opts.slide = parse_duration(&raw.slide).ok_or(ErrorKind::InvalidWindow)?;
    }

    Ok(Some(opts))
}
