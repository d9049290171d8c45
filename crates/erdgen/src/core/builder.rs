//! Model builder: raw graph in, resolved class model out
//!
//! Entities are materialized from nodes in encounter order. Inheritance
//! edges are applied first, then associations, each in edge order. Edges
//! whose endpoints are not entities are skipped and counted in the
//! [`ResolutionReport`]; diagrams routinely connect scaffolding cells with
//! the same arrow styles.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, span, trace, warn, Level};

use super::{Database, Entity, RawEdge, RawNode, Relationship};

/// Display values draw.io uses for its root and default layer cells
const PLACEHOLDER_NAMES: [&str; 2] = ["0", "1"];

/// True if `name` can name an entity
pub fn is_entity_name(name: &str) -> bool {
    !name.is_empty() && !PLACEHOLDER_NAMES.contains(&name)
}

/// A parent replaced by a later inheritance edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParentOverride {
    pub child: String,
    pub previous: String,
    pub current: String,
}

/// Two or more fields with the same name on one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateField {
    pub entity: String,
    pub field: String,
}

/// What the builder did with each edge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionReport {
    pub entities: usize,
    pub inheritance_links: usize,
    pub fields_added: usize,
    pub skipped_inheritance: usize,
    pub skipped_associations: usize,
    pub overwritten_parents: Vec<ParentOverride>,
    pub duplicate_fields: Vec<DuplicateField>,
}

impl ResolutionReport {
    /// Total number of edges that referenced an unknown id
    pub fn skipped_edges(&self) -> usize {
        self.skipped_inheritance + self.skipped_associations
    }

    /// True if nothing was skipped, overwritten or duplicated
    pub fn is_clean(&self) -> bool {
        self.skipped_edges() == 0
            && self.overwritten_parents.is_empty()
            && self.duplicate_fields.is_empty()
    }
}

/// Entities keyed by cell id, plus the report of how they were resolved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedModel {
    pub entities: IndexMap<String, Entity>,
    pub report: ResolutionReport,
}

impl ResolvedModel {
    /// Look up an entity by its class name
    pub fn entity_named(&self, name: &str) -> Option<&Entity> {
        self.entities.values().find(|entity| entity.name == name)
    }

    /// Entities in encounter order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

/// Resolves raw graph records into a class model
#[derive(Debug, Default)]
pub struct ModelBuilder;

impl ModelBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build from any database holding raw nodes and edges
    pub fn build_from<D>(&self, database: &D) -> ResolvedModel
    where
        D: Database<Node = RawNode, Edge = RawEdge>,
    {
        self.build(database.nodes(), database.edges())
    }

    /// Build the class model from raw nodes and edges
    pub fn build<'a>(
        &self,
        nodes: impl IntoIterator<Item = &'a RawNode>,
        edges: impl IntoIterator<Item = &'a RawEdge>,
    ) -> ResolvedModel {
        let build_span = span!(Level::INFO, "build_model");
        let _enter = build_span.enter();

        let mut model = ResolvedModel {
            entities: Self::materialize(nodes),
            report: ResolutionReport::default(),
        };
        model.report.entities = model.entities.len();
        debug!(entity_count = model.entities.len(), "Materialized entities");

        let (inheritance, associations): (Vec<Relationship>, Vec<Relationship>) = edges
            .into_iter()
            .map(Relationship::from)
            .partition(Relationship::is_inheritance);

        for rel in &inheritance {
            Self::apply_inheritance(&mut model, rel);
        }
        debug!(
            links = model.report.inheritance_links,
            skipped = model.report.skipped_inheritance,
            "Processed inheritance"
        );

        for rel in &associations {
            Self::apply_association(&mut model, rel);
        }
        debug!(
            fields = model.report.fields_added,
            skipped = model.report.skipped_associations,
            "Processed associations"
        );

        model.report.duplicate_fields = Self::find_duplicate_fields(&model.entities);
        for duplicate in &model.report.duplicate_fields {
            warn!(
                entity = %duplicate.entity,
                field = %duplicate.field,
                "Entity declares the same field more than once"
            );
        }

        model
    }

    fn materialize<'a>(nodes: impl IntoIterator<Item = &'a RawNode>) -> IndexMap<String, Entity> {
        let mut entities = IndexMap::new();
        for node in nodes {
            if !is_entity_name(&node.display_value) {
                trace!(id = %node.id, "Skipping placeholder node");
                continue;
            }
            info!(name = %node.display_value, id = %node.id, "Found entity");
            entities.insert(node.id.clone(), Entity::new(&node.id, &node.display_value));
        }
        entities
    }

    fn apply_inheritance(model: &mut ResolvedModel, rel: &Relationship) {
        let (Some(child), Some(parent)) = (
            model.entities.get(&rel.source_id),
            model.entities.get(&rel.target_id),
        ) else {
            trace!(source = %rel.source_id, target = %rel.target_id, "Skipping dangling inheritance edge");
            model.report.skipped_inheritance += 1;
            return;
        };

        let child_name = child.name.clone();
        let parent_name = parent.name.clone();
        let previous = child.parent_name.clone();

        if previous.as_deref() == Some(parent_name.as_str()) {
            debug!(child = %child_name, parent = %parent_name, "Repeated inheritance edge");
            return;
        }

        if let Some(previous) = previous {
            warn!(
                child = %child_name,
                previous = %previous,
                current = %parent_name,
                "Inheritance edge replaces an earlier parent"
            );
            // Keep `children` in step with `parent_name`
            for entity in model.entities.values_mut() {
                if entity.name == previous {
                    if let Some(pos) = entity.children.iter().position(|c| *c == child_name) {
                        entity.children.remove(pos);
                    }
                }
            }
            model.report.overwritten_parents.push(ParentOverride {
                child: child_name.clone(),
                previous,
                current: parent_name.clone(),
            });
        }

        if let Some(child) = model.entities.get_mut(&rel.source_id) {
            child.parent_name = Some(parent_name.clone());
        }
        if let Some(parent) = model.entities.get_mut(&rel.target_id) {
            parent.children.push(child_name.clone());
        }
        model.report.inheritance_links += 1;
        info!(child = %child_name, parent = %parent_name, "Inheritance: {} extends {}", child_name, parent_name);
    }

    fn apply_association(model: &mut ResolvedModel, rel: &Relationship) {
        let Some(target_name) = model
            .entities
            .get(&rel.target_id)
            .map(|target| target.name.clone())
        else {
            trace!(source = %rel.source_id, target = %rel.target_id, "Skipping dangling association edge");
            model.report.skipped_associations += 1;
            return;
        };
        let Some(source) = model.entities.get_mut(&rel.source_id) else {
            trace!(source = %rel.source_id, target = %rel.target_id, "Skipping dangling association edge");
            model.report.skipped_associations += 1;
            return;
        };

        let field = rel.to_field(&target_name);
        info!(
            entity = %source.name,
            field = %field.name,
            field_type = %field.field_type,
            "Field: {}.{} : {}",
            source.name,
            field.name,
            field.field_type
        );
        source.add_field(field);
        model.report.fields_added += 1;
    }

    fn find_duplicate_fields(entities: &IndexMap<String, Entity>) -> Vec<DuplicateField> {
        let mut duplicates: Vec<DuplicateField> = Vec::new();
        for entity in entities.values() {
            for (index, field) in entity.fields.iter().enumerate() {
                let first = entity.fields.iter().position(|f| f.name == field.name);
                let already_reported = duplicates
                    .iter()
                    .any(|d| d.entity == entity.name && d.field == field.name);
                if first != Some(index) && !already_reported {
                    duplicates.push(DuplicateField {
                        entity: entity.name.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldType, StyleFlags};

    fn node(id: &str, name: &str) -> RawNode {
        RawNode::new(id, name, StyleFlags::parse("whiteSpace=wrap;html=1;"))
    }

    fn association(id: &str, from: &str, to: &str, label: &str) -> RawEdge {
        RawEdge::new(id, from, to, StyleFlags::parse("endArrow=classic;html=1;")).with_label(label)
    }

    fn inheritance(id: &str, from: &str, to: &str) -> RawEdge {
        RawEdge::new(id, from, to, StyleFlags::parse("endArrow=block;endFill=0;html=1;"))
    }

    #[test]
    fn test_entities_keep_encounter_order() {
        let nodes = vec![node("t1", "Team"), node("p1", "Player"), node("c1", "Coach")];
        let model = ModelBuilder::new().build(&nodes, std::iter::empty());

        let names: Vec<_> = model.entities().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Team", "Player", "Coach"]);
        assert_eq!(model.report.entities, 3);
    }

    #[test]
    fn test_placeholder_nodes_are_not_entities() {
        let nodes = vec![node("0", "0"), node("1", "1"), node("x", ""), node("p1", "Player")];
        let model = ModelBuilder::new().build(&nodes, std::iter::empty());

        assert_eq!(model.entity_count(), 1);
        assert!(model.entities.contains_key("p1"));
    }

    #[test]
    fn test_inheritance_links_parent_and_child() {
        let nodes = vec![node("g1", "Goalkeeper"), node("p1", "Player")];
        let edges = vec![inheritance("e1", "g1", "p1")];
        let model = ModelBuilder::new().build(&nodes, &edges);

        assert_eq!(model.entities["g1"].parent_name.as_deref(), Some("Player"));
        assert_eq!(model.entities["p1"].children, vec!["Goalkeeper".to_string()]);
        assert!(model.entities["p1"].parent_name.is_none());
        assert_eq!(model.report.inheritance_links, 1);
        assert!(model.report.is_clean());
    }

    #[test]
    fn test_dangling_edges_are_counted_not_applied() {
        let nodes = vec![node("p1", "Player"), node("t1", "Team")];
        let edges = vec![
            inheritance("e1", "p1", "missing"),
            association("e2", "ghost", "t1", "playsFor\n1 : 1"),
            association("e3", "p1", "ghost", "playsFor\n1 : 1"),
        ];
        let model = ModelBuilder::new().build(&nodes, &edges);

        assert!(model.entities["p1"].parent_name.is_none());
        assert!(model.entities["p1"].fields.is_empty());
        assert!(model.entities["t1"].fields.is_empty());
        assert_eq!(model.report.skipped_inheritance, 1);
        assert_eq!(model.report.skipped_associations, 2);
        assert_eq!(model.report.skipped_edges(), 3);
    }

    #[test]
    fn test_later_parent_wins_and_is_reported() {
        let nodes = vec![node("g1", "Goalkeeper"), node("p1", "Player"), node("s1", "Staff")];
        let edges = vec![inheritance("e1", "g1", "p1"), inheritance("e2", "g1", "s1")];
        let model = ModelBuilder::new().build(&nodes, &edges);

        assert_eq!(model.entities["g1"].parent_name.as_deref(), Some("Staff"));
        assert!(model.entities["p1"].children.is_empty());
        assert_eq!(model.entities["s1"].children, vec!["Goalkeeper".to_string()]);
        assert_eq!(
            model.report.overwritten_parents,
            vec![ParentOverride {
                child: "Goalkeeper".to_string(),
                previous: "Player".to_string(),
                current: "Staff".to_string(),
            }]
        );
    }

    #[test]
    fn test_repeated_inheritance_edge_links_once() {
        let nodes = vec![node("g1", "Goalkeeper"), node("p1", "Player")];
        let edges = vec![inheritance("e1", "g1", "p1"), inheritance("e2", "g1", "p1")];
        let model = ModelBuilder::new().build(&nodes, &edges);

        assert_eq!(model.entities["p1"].children.len(), 1);
        assert_eq!(model.report.inheritance_links, 1);
        assert!(model.report.overwritten_parents.is_empty());
    }

    #[test]
    fn test_associations_become_fields_in_edge_order() {
        let nodes = vec![
            node("t1", "SoccerTeam"),
            node("p1", "Player"),
            node("c1", "Coach"),
            node("s1", "Stadium"),
        ];
        let edges = vec![
            association("e1", "t1", "p1", "has\n1 : *"),
            association("e2", "t1", "c1", "employs\n1 : 1"),
            association("e3", "t1", "s1", "home_ground\n* : 1"),
        ];
        let model = ModelBuilder::new().build(&nodes, &edges);

        let team = &model.entities["t1"];
        let fields: Vec<_> = team
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.field_type.to_string()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("has", "List<Player>".to_string()),
                ("employs", "Coach".to_string()),
                ("homeGround", "Stadium".to_string()),
            ]
        );
        assert_eq!(model.report.fields_added, 3);
    }

    #[test]
    fn test_unlabeled_association_is_related() {
        let nodes = vec![node("a", "Match"), node("b", "Referee")];
        let edges = vec![association("e1", "a", "b", "")];
        let model = ModelBuilder::new().build(&nodes, &edges);

        let field = &model.entities["a"].fields[0];
        assert_eq!(field.name, "related");
        assert_eq!(field.field_type, FieldType::Scalar("Referee".to_string()));
        assert_eq!(field.cardinality, "1 : 1");
    }

    #[test]
    fn test_duplicate_field_names_coexist() {
        let nodes = vec![node("a", "Match"), node("b", "SoccerTeam")];
        let edges = vec![
            association("e1", "a", "b", "involves\n* : 2"),
            association("e2", "a", "b", "involves\n1 : 1"),
            association("e3", "a", "b", "involves\n1 : *"),
        ];
        let model = ModelBuilder::new().build(&nodes, &edges);

        assert_eq!(model.entities["a"].fields.len(), 3);
        assert_eq!(
            model.report.duplicate_fields,
            vec![DuplicateField {
                entity: "Match".to_string(),
                field: "involves".to_string(),
            }]
        );
    }

    #[test]
    fn test_inheritance_is_applied_before_associations() {
        let nodes = vec![node("g1", "Goalkeeper"), node("p1", "Player"), node("t1", "Team")];
        let edges = vec![
            association("e1", "g1", "t1", "playsFor\n1 : 1"),
            inheritance("e2", "g1", "p1"),
        ];
        let model = ModelBuilder::new().build(&nodes, &edges);

        let keeper = &model.entities["g1"];
        assert_eq!(keeper.parent_name.as_deref(), Some("Player"));
        assert_eq!(keeper.fields[0].name, "playsFor");
    }
}
