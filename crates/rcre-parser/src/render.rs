//! Render a [`ParseTree`] back into rule-document YAML.
//!
//! The output is shape-preserving rather than byte-preserving: resolved
//! named terms stay inlined and formatting is canonical, but parsing the
//! rendered text yields the same node kinds and tree shape.

use serde_yaml::{Mapping, Value};

use rcre_core::error::Result;
use rcre_core::schema::NodeType;

use crate::tree::{Field, NegateOpts, ParseChild, ParseNode, ParseTree};
use crate::window::format_duration;

pub fn render(tree: &ParseTree) -> Result<String> {
    let rules: Vec<Value> = tree.nodes.iter().map(render_rule).collect();

    let mut doc = Mapping::new();
    doc.insert(Value::from("rules"), Value::Sequence(rules));
    Ok(serde_yaml::to_string(&Value::Mapping(doc))?)
}

fn render_rule(node: &ParseNode) -> Value {
    let mut cre = Mapping::new();
    cre.insert(Value::from("id"), Value::from(node.metadata.cre_id.clone()));

    let mut metadata = Mapping::new();
    metadata.insert(Value::from("id"), Value::from(node.metadata.rule_id.clone()));
    metadata.insert(
        Value::from("hash"),
        Value::from(node.metadata.rule_hash.clone()),
    );

    let mut rule = Mapping::new();
    rule.insert(Value::from(body_key(node)), render_body(node));

    let mut out = Mapping::new();
    out.insert(Value::from("cre"), Value::Mapping(cre));
    out.insert(Value::from("metadata"), Value::Mapping(metadata));
    out.insert(Value::from("rule"), Value::Mapping(rule));
    Value::Mapping(out)
}

fn body_key(node: &ParseNode) -> &'static str {
    match node.metadata.kind {
        NodeType::MachineSeq | NodeType::LogSeq => "sequence",
        _ => "set",
    }
}

fn render_body(node: &ParseNode) -> Value {
    let mut body = Mapping::new();

    if !node.metadata.window.is_zero() {
        body.insert(
            Value::from("window"),
            Value::from(format_duration(node.metadata.window)),
        );
    }

    if let Some(event) = &node.metadata.event {
        let mut ev = Mapping::new();
        ev.insert(Value::from("source"), Value::from(event.source.clone()));
        if event.origin {
            ev.insert(Value::from("origin"), Value::from(true));
        }
        body.insert(Value::from("event"), Value::Mapping(ev));
    }

    if !node.metadata.correlations.is_empty() {
        let corr: Vec<Value> = node
            .metadata
            .correlations
            .iter()
            .map(|c| Value::from(c.clone()))
            .collect();
        body.insert(Value::from("correlations"), Value::Sequence(corr));
    }

    let split = if node.neg_idx >= 0 {
        node.neg_idx as usize
    } else {
        node.children.len()
    };

    let pos_key = match node.metadata.kind {
        NodeType::MachineSeq | NodeType::LogSeq => "order",
        _ => "match",
    };
    let pos_terms: Vec<Value> = node.children[..split]
        .iter()
        .map(|c| render_term(c, false))
        .collect();
    body.insert(Value::from(pos_key), Value::Sequence(pos_terms));

    if split < node.children.len() {
        let neg_terms: Vec<Value> = node.children[split..]
            .iter()
            .map(|c| render_term(c, true))
            .collect();
        body.insert(Value::from("negate"), Value::Sequence(neg_terms));
    }

    Value::Mapping(body)
}

fn render_term(child: &ParseChild, negate: bool) -> Value {
    match child {
        ParseChild::Node(node) => {
            let mut term = Mapping::new();
            term.insert(Value::from(body_key(node)), render_body(node));
            if let Some(opts) = &node.metadata.negate_opts {
                render_negate_opts(&mut term, opts);
            }
            Value::Mapping(term)
        }
        ParseChild::Matcher(matcher) => {
            let fields = if negate {
                &matcher.negate_fields
            } else {
                &matcher.match_fields
            };
            match fields.first() {
                Some(field) => render_field(field),
                None => Value::Null,
            }
        }
    }
}

fn render_field(field: &Field) -> Value {
    // A plain string value with nothing else renders back as the bare
    // scalar form rule authors write.
    if !field.str_value.is_empty()
        && field.field.is_empty()
        && field.count == 0
        && field.negate_opts.is_none()
    {
        return Value::from(field.str_value.clone());
    }

    let mut term = Mapping::new();
    if !field.field.is_empty() {
        term.insert(Value::from("field"), Value::from(field.field.clone()));
    }
    if !field.str_value.is_empty() {
        term.insert(Value::from("value"), Value::from(field.str_value.clone()));
    }
    if !field.jq_value.is_empty() {
        term.insert(Value::from("jq"), Value::from(field.jq_value.clone()));
    }
    if !field.regex_value.is_empty() {
        term.insert(Value::from("regex"), Value::from(field.regex_value.clone()));
    }
    if field.count > 0 {
        term.insert(Value::from("count"), Value::from(field.count));
    }
    if let Some(opts) = &field.negate_opts {
        render_negate_opts(&mut term, opts);
    }
    Value::Mapping(term)
}

fn render_negate_opts(term: &mut Mapping, opts: &NegateOpts) {
    if !opts.window.is_zero() {
        term.insert(
            Value::from("window"),
            Value::from(format_duration(opts.window)),
        );
    }
    if !opts.slide.is_zero() {
        term.insert(
            Value::from("slide"),
            Value::from(format_duration(opts.slide)),
        );
    }
    if opts.anchor > 0 {
        term.insert(Value::from("anchor"), Value::from(opts.anchor));
    }
    if opts.absolute {
        term.insert(Value::from("absolute"), Value::from(true));
    }
}
