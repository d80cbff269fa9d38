//! Schema constants: scopes, node-type tags, severities, and the
//! registry of known event sources.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, ErrorKind};

/// Version prefix baked into every node address.
pub const AST_VERSION: u32 = 1;

/// Routing tag selecting which plugin handles a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Cluster,
    Node,
    Organization,
}

impl Scope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Cluster => "cluster",
            Scope::Node => "node",
            Scope::Organization => "organization",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cluster" => Ok(Scope::Cluster),
            "node" => Ok(Scope::Node),
            "organization" => Ok(Scope::Organization),
            _ => Err(Error::new(ErrorKind::UnsupportedScope).with_msg(s.to_string())),
        }
    }
}

/// Node-type tags. These appear in node addresses and debug output, so
/// the string forms are part of the external surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    MachineSeq,
    MachineSet,
    LogSeq,
    LogSet,
    Desc,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::MachineSeq => "machine_seq",
            NodeType::MachineSet => "machine_set",
            NodeType::LogSeq => "log_seq",
            NodeType::LogSet => "log_set",
            NodeType::Desc => "desc",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule severities, most severe first.
pub mod severity {
    pub const CRITICAL: u8 = 0;
    pub const HIGH: u8 = 1;
    pub const MEDIUM: u8 = 2;
    pub const LOW: u8 = 3;
    pub const INFO: u8 = 4;
}

/// Event source with a registered field-name mapping.
pub const EVENT_SRC_K8S: &str = "k8s";

/// Well-known k8s event fields accepted by the field registry.
pub const K8S_FIELD_REASON: &str = "reason";
pub const K8S_FIELD_TYPE: &str = "type";
pub const K8S_FIELD_REASON_DETAIL: &str = "reason_detail";
