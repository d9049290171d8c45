//! Domain model resolved from a raw diagram graph
//!
//! Entities are the classes to generate. Fields come from association
//! edges and are typed by the edge's cardinality annotation.

use std::fmt;

use serde::{Serialize, Serializer};

use super::{to_camel_case, EdgeKind, RawEdge};

/// Cardinality assumed when a label does not carry one
pub const DEFAULT_CARDINALITY: &str = "1 : 1";

/// Relationship name assumed when an edge has no label at all
pub const DEFAULT_RELATIONSHIP_NAME: &str = "related";

/// Declared type of a generated field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// A single reference: `Target`
    Scalar(String),
    /// An ordered, growable collection: `List<Target>`
    List(String),
    /// A fixed-size collection: `Target[]`
    Array(String),
}

impl FieldType {
    /// Derive the field type from a `"left : right"` cardinality.
    ///
    /// Only the right-hand side matters: `*` gives a list, `1` a single
    /// reference, any other digit run a fixed-size array. Anything that
    /// does not split into exactly two parts falls back to a single
    /// reference.
    ///
    /// # Example
    /// ```
    /// use erdgen::core::FieldType;
    ///
    /// assert_eq!(FieldType::from_cardinality("Player", "1 : *").to_string(), "List<Player>");
    /// assert_eq!(FieldType::from_cardinality("Team", "* : 2").to_string(), "Team[]");
    /// ```
    pub fn from_cardinality(target: &str, cardinality: &str) -> Self {
        let parts: Vec<&str> = cardinality.split(':').collect();
        let [_, right] = parts.as_slice() else {
            return FieldType::Scalar(target.to_string());
        };

        match right.trim() {
            "*" => FieldType::List(target.to_string()),
            "1" => FieldType::Scalar(target.to_string()),
            digits if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) => {
                FieldType::Array(target.to_string())
            }
            _ => FieldType::Scalar(target.to_string()),
        }
    }

    /// Name of the referenced entity
    pub fn target(&self) -> &str {
        match self {
            FieldType::Scalar(target) | FieldType::List(target) | FieldType::Array(target) => {
                target
            }
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldType::List(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Scalar(target) => write!(f, "{}", target),
            FieldType::List(target) => write!(f, "List<{}>", target),
            FieldType::Array(target) => write!(f, "{}[]", target),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A field of a generated class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// camelCase identifier
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub target_entity: String,
    /// Original `"left : right"` annotation
    pub cardinality: String,
}

impl Field {
    pub fn new(
        name: impl Into<String>,
        field_type: FieldType,
        cardinality: impl Into<String>,
    ) -> Self {
        let target_entity = field_type.target().to_string();
        Self {
            name: name.into(),
            field_type,
            target_entity,
            cardinality: cardinality.into(),
        }
    }
}

/// A modeled class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    #[serde(rename = "parent", skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    pub children: Vec<String>,
    pub fields: Vec<Field>,
}

impl Entity {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_name: None,
            children: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a field. Same-named fields are kept side by side.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    pub fn has_list_field(&self) -> bool {
        self.fields.iter().any(|field| field.field_type.is_list())
    }
}

/// Split an edge label into relationship name and cardinality.
///
/// Labels follow a two-line `name\ncardinality` convention. Without a
/// line break the whole label is the name. A missing or blank
/// cardinality becomes `"1 : 1"`; a blank name becomes `"related"`.
///
/// # Example
/// ```
/// use erdgen::core::decompose_label;
///
/// assert_eq!(decompose_label("has\n1 : *"), ("has".to_string(), "1 : *".to_string()));
/// assert_eq!(decompose_label(""), ("related".to_string(), "1 : 1".to_string()));
/// ```
pub fn decompose_label(label: &str) -> (String, String) {
    let (name, cardinality) = match label.split_once('\n') {
        // Only the second line is the cardinality
        Some((name, rest)) => (name, rest.split('\n').next().unwrap_or_default()),
        None => (label, ""),
    };
    let (name, cardinality) = (name.trim(), cardinality.trim());

    let name = if name.is_empty() {
        DEFAULT_RELATIONSHIP_NAME
    } else {
        name
    };
    let cardinality = if cardinality.is_empty() {
        DEFAULT_CARDINALITY
    } else {
        cardinality
    };
    (name.to_string(), cardinality.to_string())
}

/// A classified edge with its label decomposed
///
/// Lives only while the builder applies it to the entity graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub source_id: String,
    pub target_id: String,
    pub label: String,
    pub kind: EdgeKind,
    pub relationship_name: String,
    pub cardinality: String,
}

impl Relationship {
    pub fn new(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        label: impl Into<String>,
        kind: EdgeKind,
    ) -> Self {
        let label = label.into();
        let (relationship_name, cardinality) = decompose_label(&label);
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            label,
            kind,
            relationship_name,
            cardinality,
        }
    }

    pub fn is_inheritance(&self) -> bool {
        self.kind == EdgeKind::Inheritance
    }

    /// camelCase field name for an association
    pub fn field_name(&self) -> String {
        to_camel_case(&self.relationship_name)
    }

    /// Field produced by this association when it points at `target_name`
    pub fn to_field(&self, target_name: &str) -> Field {
        Field::new(
            self.field_name(),
            FieldType::from_cardinality(target_name, &self.cardinality),
            self.cardinality.clone(),
        )
    }
}

impl From<&RawEdge> for Relationship {
    fn from(edge: &RawEdge) -> Self {
        Relationship::new(&edge.source_id, &edge.target_id, &edge.label, edge.kind)
    }
}
