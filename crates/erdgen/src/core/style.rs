//! Structured draw.io cell styles
//!
//! A draw.io style is a `;`-separated list whose entries are either bare
//! flags (`edgeLabel`, `ellipse`) or `key=value` pairs (`endArrow=block`).
//! Parsing it once per cell lets the classifiers compare whole keys and
//! values, so a marker embedded in an unrelated token never matches.

use std::collections::{HashMap, HashSet};

/// Parsed style of a single cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleFlags {
    flags: HashSet<String>,
    properties: HashMap<String, String>,
}

impl StyleFlags {
    /// Parse a raw style string
    ///
    /// Empty entries are ignored. For repeated keys the last value wins,
    /// which is how draw.io itself resolves them.
    pub fn parse(style: &str) -> Self {
        let mut parsed = Self::default();
        for entry in style.split(';') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            match entry.split_once('=') {
                Some((key, value)) => {
                    parsed
                        .properties
                        .insert(key.trim().to_string(), value.trim().to_string());
                }
                None => {
                    parsed.flags.insert(entry.to_string());
                }
            }
        }
        parsed
    }

    /// True if the style carries the bare flag `name`
    pub fn has_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    /// Value of the `key=value` entry, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// True if `key` is present with exactly `value`
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Shapes with wrapped text are the boxes that model entities
    pub fn is_wrapped_text(&self) -> bool {
        self.is("whiteSpace", "wrap")
    }

    /// Label cells attached to a connector
    pub fn is_edge_label(&self) -> bool {
        self.has_flag("edgeLabel") || self.properties.contains_key("edgeLabel")
    }

    /// Hollow triangle arrowhead: a block arrow with no fill
    pub fn is_hollow_triangle(&self) -> bool {
        self.is("endArrow", "block") && self.is("endFill", "0")
    }
}
