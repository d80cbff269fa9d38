//! Positioned document loading.
//!
//! The parser never walks raw YAML: an external loader (`marked-yaml`)
//! delivers a positioned node tree, which this module converts into an
//! owned [`DocNode`] tree with a 1-based [`Pos`] on every node. Typed
//! decoding happens separately through serde; the `DocNode` tree exists
//! purely so every error can point at the offending line and column.
//!
//! Multi-document streams are split here, tracking each document's line
//! offset so positions stay absolute in the original buffer.

use marked_yaml::types::Marker;
use marked_yaml::Node;

use rcre_core::error::{Error, ErrorKind, Pos, Result};

/// One node of a positioned document tree.
#[derive(Debug, Clone)]
pub struct DocNode {
    pub pos: Pos,
    pub value: DocValue,
}

/// Payload of a [`DocNode`]. Scalars are kept as text; typed
/// interpretation is serde's job.
#[derive(Debug, Clone)]
pub enum DocValue {
    Scalar(String),
    Sequence(Vec<DocNode>),
    Mapping(Vec<(String, DocNode)>),
}

impl DocNode {
    /// Value node under `key`, if this node is a mapping containing it.
    pub fn find_child(&self, key: &str) -> Option<&DocNode> {
        match &self.value {
            DocValue::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Item at `idx`, if this node is a sequence that long.
    pub fn seq_item(&self, idx: usize) -> Option<&DocNode> {
        match &self.value {
            DocValue::Sequence(items) => items.get(idx),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            DocValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Mapping entries in document order.
    pub fn entries(&self) -> &[(String, DocNode)] {
        match &self.value {
            DocValue::Mapping(entries) => entries,
            _ => &[],
        }
    }
}

/// Split a stream into documents. Returns `(line_offset, chunk)` pairs
/// where `line_offset` is the number of lines preceding the chunk.
pub(crate) fn split_documents(data: &str) -> Vec<(u32, &str)> {
    let mut docs = Vec::new();
    let mut chunk_start = 0usize;
    let mut chunk_line = 0u32;
    let mut offset = 0usize;
    let mut line_no = 0u32;

    for line in data.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." || trimmed.starts_with("--- ") {
            docs.push((chunk_line, &data[chunk_start..offset]));
            chunk_start = offset + line.len();
            chunk_line = line_no + 1;
        }
        offset += line.len();
        line_no += 1;
    }
    docs.push((chunk_line, &data[chunk_start..]));
    docs
}

/// A chunk with no content: only blank lines and comments.
pub(crate) fn is_blank(chunk: &str) -> bool {
    chunk.lines().all(|line| {
        let t = line.trim();
        t.is_empty() || t.starts_with('#')
    })
}

/// Load one document chunk into a positioned tree. Positions are shifted
/// by `base_line` so they index into the original stream.
pub(crate) fn load_document(chunk: &str, base_line: u32) -> Result<DocNode> {
    let node = marked_yaml::parse_yaml(0, chunk)
        .map_err(|e| Error::new(ErrorKind::Document(e.to_string())))?;
    Ok(convert(&node, base_line))
}

fn marker_pos(marker: Option<&Marker>, base_line: u32) -> Pos {
    match marker {
        Some(m) => Pos::new(m.line() as u32 + base_line, m.column() as u32),
        None => Pos::default(),
    }
}

fn convert(node: &Node, base_line: u32) -> DocNode {
    match node {
        Node::Scalar(scalar) => {
            let text: &str = scalar;
            DocNode {
                pos: marker_pos(scalar.span().start(), base_line),
                value: DocValue::Scalar(text.to_string()),
            }
        }
        Node::Sequence(seq) => {
            let items = seq.iter().map(|item| convert(item, base_line)).collect();
            DocNode {
                pos: marker_pos(seq.span().start(), base_line),
                value: DocValue::Sequence(items),
            }
        }
        Node::Mapping(map) => {
            let entries = map
                .iter()
                .map(|(k, v)| {
                    let key: &str = k;
                    (key.to_string(), convert(v, base_line))
                })
                .collect();
            DocNode {
                pos: marker_pos(map.span().start(), base_line),
                value: DocValue::Mapping(entries),
            }
        }
    }
}
