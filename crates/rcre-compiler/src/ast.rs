//! AST pass: validate a [`ParseTree`] and lower it into an addressed,
//! typed [`Ast`].
//!
//! Every internal parse node becomes an explicit state-machine node
//! (`machine_seq` / `machine_set`) whose children are either nested
//! machines or leaf log matchers (`log_seq` / `log_set`). Each node is
//! assigned a [`NodeAddress`] that is globally unique within its rule
//! tree, built from a per-rule monotonic node counter, the traversal
//! depth, and the node's index among its siblings.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use tracing::error;

use rcre_core::error::{ErrorKind, Result};
use rcre_core::schema::{NodeType, Scope, AST_VERSION};
use rcre_parser::{NegateOpts, ParseChild, ParseNode, ParseTree};

use crate::log::build_log_matcher_node;

/// Output of the AST pass: one addressed subtree per rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
    pub nodes: Vec<AstNode>,
}

/// Globally unique address of a node within a rule tree.
///
/// Rendered as `v<V>.<name>.<rule_hash>.d<depth>.n<node_id>[.t<term_idx>]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeAddress {
    pub version: String,
    pub name: String,
    pub rule_hash: String,
    pub depth: u32,
    pub node_id: u32,
    /// Index of this node in its parent's ordered children.
    pub term_idx: Option<u32>,
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.d{}.n{}",
            self.version, self.name, self.rule_hash, self.depth, self.node_id
        )?;
        if let Some(term_idx) = self.term_idx {
            write!(f, ".t{term_idx}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub metadata: AstMetadata,
    pub object: AstObject,
    pub children: Vec<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AstMetadata {
    pub kind: NodeType,
    pub address: NodeAddress,
    pub parent_address: Option<NodeAddress>,
    pub negate_opts: Option<NegateOpts>,
    pub rule_id: String,
    pub scope: Scope,
    /// Index into children where negative conditions begin; -1 if none.
    pub neg_idx: i32,
}

/// Node payload, discriminated by the node's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AstObject {
    Log(LogMatcher),
    Seq(SeqMatcher),
    Set(SetMatcher),
}

/// Leaf payload: the flattened terms of a log matcher.
#[derive(Debug, Clone, PartialEq)]
pub struct LogMatcher {
    pub event: AstEvent,
    pub match_fields: Vec<AstField>,
    pub negate_fields: Vec<AstField>,
    pub window: Duration,
}

/// Machine payload for sequences: ordered child references.
#[derive(Debug, Clone, PartialEq)]
pub struct SeqMatcher {
    pub order: Vec<NodeAddress>,
    pub negate: Vec<NodeAddress>,
    pub correlations: Vec<String>,
    pub window: Duration,
}

/// Machine payload for sets: unordered child references.
#[derive(Debug, Clone, PartialEq)]
pub struct SetMatcher {
    pub matches: Vec<NodeAddress>,
    pub negate: Vec<NodeAddress>,
    pub correlations: Vec<String>,
    pub window: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AstEvent {
    pub origin: bool,
    pub source: String,
}

/// A resolved term: the field it came from, its runtime term value, and
/// any negate tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct AstField {
    pub field: String,
    pub term: rcre_match::Term,
    pub negate_opts: Option<NegateOpts>,
}

/// Per-rule builder state. Reset between rules so node ids, depths, and
/// the origin flag never leak across rule trees.
pub(crate) struct Builder {
    node_id: u32,
    depth: u32,
    has_origin: bool,
}

/// Build an AST straight from document bytes.
pub fn build(data: &[u8]) -> Result<Ast> {
    let tree = rcre_parser::parse(data).map_err(|e| {
        error!(err = %e, "parser failed");
        e
    })?;
    build_tree(&tree)
}

/// Build an AST from an existing [`ParseTree`], pre-order DFS per rule.
pub fn build_tree(tree: &ParseTree) -> Result<Ast> {
    let mut ast = Ast { nodes: Vec::new() };

    for parser_node in &tree.nodes {
        let mut builder = Builder::new();
        let rule = builder.build_node(parser_node, None, 0)?;

        if !builder.has_origin {
            return Err(parser_node.wrap_error(ErrorKind::MissingOrigin));
        }

        ast.nodes.push(rule);
    }

    Ok(ast)
}

impl Builder {
    fn new() -> Self {
        Builder {
            node_id: 0,
            depth: 0,
            has_origin: false,
        }
    }

    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    /// Allocate the next address; the node-id counter is per rule.
    pub(crate) fn next_address(
        &mut self,
        rule_hash: &str,
        name: &str,
        term_idx: u32,
    ) -> NodeAddress {
        let address = NodeAddress {
            version: format!("v{AST_VERSION}"),
            name: name.to_string(),
            rule_hash: rule_hash.to_string(),
            depth: self.depth,
            node_id: self.node_id,
            term_idx: Some(term_idx),
        };
        self.node_id += 1;
        address
    }

    pub(crate) fn mark_origin(&mut self) {
        self.has_origin = true;
    }

    fn build_node(
        &mut self,
        pn: &ParseNode,
        parent: Option<&NodeAddress>,
        term_idx: u32,
    ) -> Result<AstNode> {
        let machine_address =
            self.next_address(&pn.metadata.rule_hash, pn.metadata.kind.as_str(), term_idx);

        // A node whose children are all scalar matchers produces a
        // single log-matcher child; anything else recurses per child.
        let children = if is_matcher_node(pn) {
            vec![self.build_matcher_children(pn, &machine_address, term_idx)?]
        } else {
            self.build_machine_children(pn, &machine_address)?
        };

        self.build_state_machine(pn, parent, machine_address, children)
    }

    fn build_matcher_children(
        &mut self,
        pn: &ParseNode,
        machine_address: &NodeAddress,
        term_idx: u32,
    ) -> Result<AstNode> {
        let Some(event) = &pn.metadata.event else {
            return Err(pn.wrap_error(ErrorKind::RootNodeWithoutEventSrc));
        };
        if event.source.is_empty() {
            error!(address = %machine_address, "event missing source");
            return Err(pn.wrap_error(ErrorKind::InvalidEventType));
        }

        // A matcher root is implicitly the origin of its rule subtree.
        self.mark_origin();

        self.descend(|b| b.build_matcher_nodes(pn, machine_address, term_idx, true))
    }

    fn build_matcher_nodes(
        &mut self,
        pn: &ParseNode,
        machine_address: &NodeAddress,
        term_idx: u32,
        force_origin: bool,
    ) -> Result<AstNode> {
        match pn.metadata.kind {
            NodeType::LogSeq | NodeType::LogSet => {}
            _ => return Err(pn.wrap_error(ErrorKind::InvalidNodeType)),
        }

        build_log_matcher_node(self, pn, machine_address, term_idx, force_origin)
    }

    fn build_machine_children(
        &mut self,
        pn: &ParseNode,
        machine_address: &NodeAddress,
    ) -> Result<Vec<AstNode>> {
        let mut children = Vec::with_capacity(pn.children.len());

        for (i, child) in pn.children.iter().enumerate() {
            let ParseChild::Node(child_node) = child else {
                return Err(pn.wrap_error(ErrorKind::InvalidNodeType));
            };

            let negate_opts = child_node.metadata.negate_opts.clone();
            if let Some(opts) = &negate_opts {
                if opts.anchor as usize > pn.children.len() {
                    error!("negate anchor is greater than the number of siblings");
                    return Err(pn.wrap_error(ErrorKind::InvalidAnchor));
                }
            }

            let term_idx = i as u32;
            let mut node = match &child_node.metadata.event {
                // No event source: a nested state machine.
                None => {
                    self.descend(|b| b.build_node(child_node, Some(machine_address), term_idx))?
                }
                // An event source makes the child a log matcher.
                Some(event) => {
                    if event.origin {
                        self.mark_origin();
                    }
                    if event.source.is_empty() {
                        error!(address = %machine_address, "event missing source");
                        return Err(child_node.wrap_error(ErrorKind::InvalidEventType));
                    }
                    self.descend(|b| {
                        b.build_matcher_nodes(child_node, machine_address, term_idx, false)
                    })?
                }
            };

            node.metadata.negate_opts = negate_opts;
            children.push(node);
        }

        Ok(children)
    }

    fn build_state_machine(
        &mut self,
        pn: &ParseNode,
        parent: Option<&NodeAddress>,
        machine_address: NodeAddress,
        children: Vec<AstNode>,
    ) -> Result<AstNode> {
        match pn.metadata.kind {
            NodeType::MachineSeq | NodeType::LogSeq => {
                if pn.metadata.window.is_zero() {
                    error!(address = %machine_address, "window is required for sequences");
                    return Err(pn.wrap_error(ErrorKind::InvalidWindow));
                }
            }
            NodeType::MachineSet | NodeType::LogSet => {}
            _ => {
                error!(address = %machine_address, kind = %pn.metadata.kind, "invalid node type");
                return Err(pn.wrap_error(ErrorKind::InvalidNodeType));
            }
        }

        let machine_kind = match pn.metadata.kind {
            NodeType::MachineSeq | NodeType::LogSeq => NodeType::MachineSeq,
            _ => NodeType::MachineSet,
        };

        // Children before neg_idx are positive references, the rest
        // negative.
        let mut positive = Vec::new();
        let mut negative = Vec::new();
        for (i, child) in children.iter().enumerate() {
            if pn.neg_idx > 0 && i >= pn.neg_idx as usize {
                negative.push(child.metadata.address.clone());
            } else {
                positive.push(child.metadata.address.clone());
            }
        }

        let object = match machine_kind {
            NodeType::MachineSeq => AstObject::Seq(SeqMatcher {
                order: positive,
                negate: negative,
                correlations: pn.metadata.correlations.clone(),
                window: pn.metadata.window,
            }),
            _ => AstObject::Set(SetMatcher {
                matches: positive,
                negate: negative,
                correlations: pn.metadata.correlations.clone(),
                window: pn.metadata.window,
            }),
        };

        Ok(AstNode {
            metadata: AstMetadata {
                kind: machine_kind,
                address: machine_address,
                parent_address: parent.cloned(),
                negate_opts: None,
                rule_id: pn.metadata.rule_id.clone(),
                scope: Scope::Cluster,
                neg_idx: pn.neg_idx,
            },
            object,
            children,
        })
    }
}

fn is_matcher_node(pn: &ParseNode) -> bool {
    pn.children
        .iter()
        .all(|c| matches!(c, ParseChild::Matcher(_)))
}

/// Dump the AST as an indented textual tree, one line per node,
/// pre-order DFS.
pub fn draw_tree(ast: &Ast, path: impl AsRef<Path>) -> Result<()> {
    let mut file = File::create(path)?;
    for node in &ast.nodes {
        draw_node(&mut file, node, 0)?;
    }
    Ok(())
}

fn draw_node(w: &mut impl Write, node: &AstNode, depth: usize) -> Result<()> {
    let parent = node
        .metadata
        .parent_address
        .as_ref()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "nil".to_string());

    writeln!(
        w,
        "depth_{}: {}addr={} parent={} scope={}",
        depth,
        "  ".repeat(depth),
        node.metadata.address,
        parent,
        node.metadata.scope,
    )?;

    for child in &node.children {
        draw_node(w, child, depth + 1)?;
    }

    Ok(())
}
