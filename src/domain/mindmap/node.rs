//! Mind-map node types.
//!
//! A context node is one factor that fed into a decision. Nodes are
//! constructed per decision request, laid out once, and discarded.

use serde::{Deserialize, Serialize};

/// One input factor feeding a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextNode {
    /// Display text, expected non-empty.
    pub label: String,
    /// Controls visual styling only.
    pub kind: NodeKind,
}

impl ContextNode {
    /// Creates a new context node.
    pub fn new(label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }
}

/// Visual category of a node.
///
/// `Final` is reserved for the central anchor the layout engine
/// synthesizes; callers never put it in the node list themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Direct user input (the query, an uploaded photo).
    Input,
    /// Ambient context (time of day, weather, budget).
    Context,
    /// Derived observation the assistant produced.
    Analysis,
    /// The decision itself; anchor only.
    Final,
}

/// Semantic color key for a rendered marker.
///
/// Tokens are resolved to concrete colors by the presentation surface,
/// never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorToken {
    #[serde(rename = "accentA")]
    AccentA,
    #[serde(rename = "accentB")]
    AccentB,
    #[serde(rename = "anchorColor")]
    Anchor,
}

impl ColorToken {
    /// Fixed kind-to-token mapping for context nodes.
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Input => ColorToken::AccentA,
            _ => ColorToken::AccentB,
        }
    }

    /// Token name as sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorToken::AccentA => "accentA",
            ColorToken::AccentB => "accentB",
            ColorToken::Anchor => "anchorColor",
        }
    }
}
