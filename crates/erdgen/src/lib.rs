//! erdgen - Generate Java classes from draw.io entity-relationship diagrams
//!
//! Boxes become classes, hollow-triangle arrows become `extends`, and
//! labeled arrows become fields typed by their cardinality.
//!
//! # Quick Start
//!
//! ```rust
//! let diagram = r#"<mxGraphModel><root>
//!   <mxCell id="p1" value="Player" style="whiteSpace=wrap;html=1;" vertex="1"/>
//!   <mxCell id="t1" value="Team" style="whiteSpace=wrap;html=1;" vertex="1"/>
//!   <mxCell id="e1" value="playsFor&#xa;1 : 1" style="endArrow=classic;" edge="1" source="p1" target="t1"/>
//! </root></mxGraphModel>"#;
//!
//! let generation = erdgen::generate(diagram).unwrap();
//! let player = generation.class("Player").unwrap();
//! assert!(player.source.contains("private Team playsFor;"));
//! ```
//!
//! # Stages
//!
//! Each stage can be run on its own:
//!
//! ```rust
//! use erdgen::prelude::*;
//!
//! let diagram = r#"<mxGraphModel><root>
//!   <mxCell id="g1" value="Goalkeeper" style="whiteSpace=wrap;" vertex="1"/>
//!   <mxCell id="p1" value="Player" style="whiteSpace=wrap;" vertex="1"/>
//!   <mxCell id="e1" style="endArrow=block;endFill=0;" edge="1" source="g1" target="p1"/>
//! </root></mxGraphModel>"#;
//!
//! let graph = erdgen::parse(diagram).unwrap();
//! assert_eq!(graph.node_count(), 2);
//!
//! let model = ModelBuilder::new().build_from(&graph);
//! let keeper = model.entity_named("Goalkeeper").unwrap();
//! assert_eq!(keeper.parent_name.as_deref(), Some("Player"));
//!
//! let source = JavaRenderer::new().render_entity(keeper);
//! assert!(source.starts_with("public class Goalkeeper extends Player {"));
//! ```

pub mod core;
pub mod plugins;

pub use crate::core::*;
pub use plugins::orchestrator::{Generation, Orchestrator};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, Entity, Field, FieldType, ModelBuilder, Parser, RawEdge, RawNode, Renderer,
        ResolutionReport, ResolvedModel,
    };
    pub use crate::plugins::drawio::{DiagramGraph, DrawioParser};
    pub use crate::plugins::java::{GeneratedClass, JavaRenderer};
    pub use crate::plugins::orchestrator::{Generation, Orchestrator};
}

/// Parse a draw.io document into its raw node/edge graph
///
/// Fails with [`GeneratorError::MalformedDocument`] if the document is not
/// well-formed XML.
pub fn parse(input: &str) -> anyhow::Result<plugins::drawio::DiagramGraph> {
    Orchestrator::new().parse(input)
}

/// Parse a document and resolve it into entities, without rendering
///
/// # Example
/// ```rust
/// let model = erdgen::build(r#"<mxGraphModel><root>
///   <mxCell id="t1" value="Team" style="whiteSpace=wrap;" vertex="1"/>
///   <mxCell id="e1" value="has&#xa;1 : *" style="endArrow=classic;" edge="1" source="t1" target="gone"/>
/// </root></mxGraphModel>"#).unwrap();
///
/// assert_eq!(model.entity_count(), 1);
/// assert_eq!(model.report.skipped_associations, 1);
/// ```
pub fn build(input: &str) -> anyhow::Result<ResolvedModel> {
    Orchestrator::new().resolve(input)
}

/// Run the whole pipeline and return one generated class per entity
pub fn generate(input: &str) -> anyhow::Result<Generation> {
    Orchestrator::new().process(input)
}
