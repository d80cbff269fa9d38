//! Compile pass: lower an [`Ast`] into a scope-ordered vector of
//! compiled [`Object`]s.
//!
//! The traversal is post-order per rule and scope-filtered: a node is
//! handed to the plugin registered for the target scope only when the
//! node's own scope matches. Plugin outputs are concatenated, then
//! stably reordered so `machine_set` objects come first, `machine_seq`
//! objects next, and leaves last — the load order the downstream
//! runtime relies on.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use tracing::{error, info};

use rcre_core::error::{Error, ErrorKind, Result};
use rcre_core::schema::{NodeType, Scope};
use rcre_match::{InverseSeq, InverseSet, MatchSeq, MatchSet, MatchSingle};
use rcre_parser::ParseTree;

use crate::ast::{self, Ast, AstEvent, AstNode, NodeAddress};
use crate::plugin::{NodePlugin, Plugin};
use crate::runtime::{CbAssert, CbMatch, NoopRuntime, Runtime};

/// How a compiled object participates at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Matcher,
    Assert,
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectType::Matcher => f.write_str("match"),
            ObjectType::Assert => f.write_str("assert"),
        }
    }
}

/// The concrete matcher primitive selected for a node.
#[derive(Debug, Clone, PartialEq)]
pub enum ConcreteMatcher {
    Single(MatchSingle),
    Seq(MatchSeq),
    InverseSeq(InverseSeq),
    Set(MatchSet),
    InverseSet(InverseSet),
}

/// Callback handed back by the runtime adapter, opaque to the compiler.
pub enum Callback {
    Match(CbMatch),
    Assert(CbAssert),
}

/// One compiled object: a concrete matcher plus everything the runtime
/// needs to load and dispatch it.
pub struct Object {
    pub rule_id: String,
    pub address: NodeAddress,
    pub parent_address: Option<NodeAddress>,
    pub scope: Scope,
    pub abstract_type: NodeType,
    pub object_type: ObjectType,
    pub event: AstEvent,
    pub matcher: ConcreteMatcher,
    pub callback: Callback,
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("rule_id", &self.rule_id)
            .field("address", &self.address)
            .field("parent_address", &self.parent_address)
            .field("scope", &self.scope)
            .field("abstract_type", &self.abstract_type)
            .field("object_type", &self.object_type)
            .field("event", &self.event)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

/// Compiler options: debug output, the runtime adapter, and the
/// scope → plugin registry. The default registry handles the `node`
/// scope with [`NodePlugin`]; other scopes must be registered by the
/// embedder.
pub struct CompilerOpts {
    debug_tree: Option<PathBuf>,
    runtime: Box<dyn Runtime>,
    plugins: HashMap<Scope, Box<dyn Plugin>>,
}

impl Default for CompilerOpts {
    fn default() -> Self {
        let mut plugins: HashMap<Scope, Box<dyn Plugin>> = HashMap::new();
        plugins.insert(Scope::Node, Box::new(NodePlugin));
        CompilerOpts {
            debug_tree: None,
            runtime: Box::new(NoopRuntime),
            plugins,
        }
    }
}

impl CompilerOpts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dump the AST to `path` before compiling.
    pub fn with_debug_tree(mut self, path: impl Into<PathBuf>) -> Self {
        self.debug_tree = Some(path.into());
        self
    }

    /// Use `runtime` to materialize callbacks.
    pub fn with_runtime(mut self, runtime: Box<dyn Runtime>) -> Self {
        self.runtime = runtime;
        self
    }

    /// Register (or replace) the plugin handling `scope`.
    pub fn with_plugin(mut self, scope: Scope, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.insert(scope, plugin);
        self
    }
}

/// Compile document bytes for `scope`.
pub fn compile(data: &[u8], scope: Scope, opts: CompilerOpts) -> Result<Vec<Object>> {
    let tree = ast::build(data)?;
    compile_built(&opts, &tree, scope)
}

/// Compile an existing [`ParseTree`] for `scope`.
pub fn compile_tree(tree: &ParseTree, scope: Scope, opts: CompilerOpts) -> Result<Vec<Object>> {
    let built = ast::build_tree(tree)?;
    compile_built(&opts, &built, scope)
}

/// Compile an existing [`Ast`] for `scope`.
pub fn compile_ast(tree: &Ast, scope: Scope, opts: CompilerOpts) -> Result<Vec<Object>> {
    compile_built(&opts, tree, scope)
}

fn compile_built(opts: &CompilerOpts, tree: &Ast, scope: Scope) -> Result<Vec<Object>> {
    if let Some(path) = &opts.debug_tree {
        ast::draw_tree(tree, path)?;
    }

    let mut objs = Vec::new();
    for node in &tree.nodes {
        compile_node(opts, node, scope, &mut objs)?;
    }

    // Two stable passes: after them, machine_set objects lead, then
    // machine_seq, then everything else in traversal order.
    sort_objs(&mut objs, NodeType::MachineSeq);
    sort_objs(&mut objs, NodeType::MachineSet);

    for obj in &objs {
        info!(
            abstract_type = %obj.abstract_type,
            address = %obj.address,
            object_type = %obj.object_type,
            "compiled object"
        );
    }

    Ok(objs)
}

fn compile_node(
    opts: &CompilerOpts,
    node: &AstNode,
    scope: Scope,
    objs: &mut Vec<Object>,
) -> Result<()> {
    for child in &node.children {
        compile_node(opts, child, scope, objs)?;
    }

    if node.metadata.scope != scope {
        return Ok(());
    }

    let Some(plugin) = opts.plugins.get(&scope) else {
        error!(scope = %scope, "no plugin found");
        return Err(Error::new(ErrorKind::UnsupportedScope));
    };

    let compiled = plugin.compile(opts.runtime.as_ref(), node).map_err(|e| {
        error!(err = %e, scope = %scope, "failed to compile");
        e
    })?;
    objs.extend(compiled);

    Ok(())
}

fn sort_objs(objs: &mut [Object], kind: NodeType) {
    objs.sort_by_key(|obj| obj.abstract_type != kind);
}
