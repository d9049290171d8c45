//! Raw graph records produced by parsers
//!
//! These carry no domain meaning yet. A parser creates them once and
//! nothing mutates them afterwards.

use std::fmt;

use super::StyleFlags;

/// A shape cell that qualified as an entity candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNode {
    pub id: String,
    /// Display value with markup stripped and whitespace trimmed
    pub display_value: String,
    pub style: StyleFlags,
}

impl RawNode {
    pub fn new(id: impl Into<String>, display_value: impl Into<String>, style: StyleFlags) -> Self {
        Self {
            id: id.into(),
            display_value: display_value.into(),
            style,
        }
    }
}

/// Kind of connector, decided from its arrowhead style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Hollow triangle arrowhead: source is-a target
    Inheritance,
    /// Any other connector: source has-a target
    Association,
}

impl EdgeKind {
    pub fn from_style(style: &StyleFlags) -> Self {
        if style.is_hollow_triangle() {
            EdgeKind::Inheritance
        } else {
            EdgeKind::Association
        }
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EdgeKind::Inheritance => write!(f, "inheritance"),
            EdgeKind::Association => write!(f, "association"),
        }
    }
}

/// A connector between two cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEdge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    /// Resolved label text, empty when the connector carries none
    pub label: String,
    pub kind: EdgeKind,
    pub style: StyleFlags,
}

impl RawEdge {
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        style: StyleFlags,
    ) -> Self {
        let kind = EdgeKind::from_style(&style);
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            label: String::new(),
            kind,
            style,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn is_inheritance(&self) -> bool {
        self.kind == EdgeKind::Inheritance
    }
}

/// A label cell attached to a connector through its parent reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLabel {
    /// Id of the connector this label belongs to
    pub parent_id: String,
    /// Cleaned text, newline entities decoded
    pub text: String,
}

impl RawLabel {
    pub fn new(parent_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            parent_id: parent_id.into(),
            text: text.into(),
        }
    }
}
