//! Typed document model.
//!
//! These are the serde shapes of a rule document, decoded with
//! `serde_yaml` before tree construction. Unknown keys are ignored,
//! matching how rule authors mix tool-specific metadata into documents.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// One YAML document: rules plus an optional named-term table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDoc {
    pub rules: Vec<RawRule>,
    pub terms: Option<HashMap<String, RawTerm>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRule {
    pub metadata: RawRuleMetadata,
    pub cre: RawCre,
    pub rule: RawRuleData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRuleMetadata {
    pub name: String,
    pub id: String,
    pub hash: String,
    pub generation: u32,
    pub kind: String,
    pub version: String,
}

/// Full CRE metadata block. Only `id` participates in compilation; the
/// rest is carried for catalog consumers via [`crate::parse_cres`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCre {
    pub id: String,
    /// 0 (critical) through 4 (info); see `rcre_core::schema::severity`.
    pub severity: u8,
    pub title: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub description: String,
    pub impact: String,
    pub impact_score: u32,
    pub cause: String,
    pub mitigation: String,
    pub mitigation_score: u32,
    pub references: Vec<String>,
    pub reports: u32,
    pub applications: Vec<RawApplication>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawApplication {
    pub name: String,
    pub process_name: String,
    pub process_path: String,
    pub container_name: String,
    pub image_url: String,
    pub repo_url: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRuleData {
    pub sequence: Option<RawSequence>,
    pub set: Option<RawSet>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSequence {
    pub window: String,
    pub correlations: Option<Vec<String>>,
    pub event: Option<RawEvent>,
    pub order: Option<Vec<RawTerm>>,
    pub negate: Option<Vec<RawTerm>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSet {
    pub window: String,
    pub correlations: Option<Vec<String>>,
    pub event: Option<RawEvent>,
    #[serde(rename = "match")]
    pub matches: Option<Vec<RawTerm>>,
    pub negate: Option<Vec<RawTerm>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawEvent {
    pub source: Option<String>,
    pub origin: bool,
}

/// Inline negate options on a term. Window and slide stay textual here;
/// they are parsed against the window grammar during tree construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNegateOpts {
    pub window: String,
    pub slide: String,
    pub anchor: u32,
    pub absolute: bool,
}

/// A term: either a bare scalar (a literal value or the name of an
/// entry in the `terms` table) or a mapping carrying scalar fields,
/// inline negate options, or a nested `sequence`/`set` body.
#[derive(Debug, Clone, Default)]
pub struct RawTerm {
    pub field: String,
    pub value: String,
    pub jq: String,
    pub regex: String,
    pub count: u32,
    pub set: Option<RawSet>,
    pub sequence: Option<RawSequence>,
    pub negate_opts: Option<RawNegateOpts>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawTermBody {
    field: String,
    value: String,
    jq: String,
    regex: String,
    count: u32,
    set: Option<RawSet>,
    sequence: Option<RawSequence>,
    window: String,
    slide: String,
    anchor: u32,
    absolute: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTermRepr {
    Scalar(String),
    Body(RawTermBody),
}

impl<'de> Deserialize<'de> for RawTerm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawTermRepr::deserialize(deserializer)? {
            RawTermRepr::Scalar(value) => Ok(RawTerm {
                value,
                ..RawTerm::default()
            }),
            RawTermRepr::Body(body) => {
                // "No options" and "zeroed options" must stay
                // distinguishable for negate stamping downstream.
                let has_opts = !body.window.is_empty()
                    || !body.slide.is_empty()
                    || body.anchor != 0
                    || body.absolute;
                Ok(RawTerm {
                    field: body.field,
                    value: body.value,
                    jq: body.jq,
                    regex: body.regex,
                    count: body.count,
                    set: body.set,
                    sequence: body.sequence,
                    negate_opts: has_opts.then(|| RawNegateOpts {
                        window: body.window,
                        slide: body.slide,
                        anchor: body.anchor,
                        absolute: body.absolute,
                    }),
                })
            }
        }
    }
}
