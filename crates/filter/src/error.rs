//! Errors raised while building the audience closure.

use serde::Serialize;
use std::fmt;

/// The kind of graph node a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Type,
    Error,
    Endpoint,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Type => "type",
            NodeKind::Error => "error",
            NodeKind::Endpoint => "endpoint",
        };
        f.write_str(s)
    }
}

/// Errors raised while computing the audience closure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// A needed or referenced id has no registered node. The IR (or the pass
    /// that populated the graph from it) is inconsistent; retrying cannot help.
    #[error("failed to find {kind} node with id {id}")]
    DanglingReference { kind: NodeKind, id: String },
}

impl FilterError {
    pub(crate) fn dangling(kind: NodeKind, id: impl fmt::Display) -> Self {
        FilterError::DanglingReference {
            kind,
            id: id.to_string(),
        }
    }
}
