//! Pipeline orchestrator
//!
//! Runs the stages in order with no feedback between them:
//! Parser → DiagramGraph → ModelBuilder → ResolvedModel → Renderer

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use crate::core::{
    Database, ModelBuilder, Parser, Renderer, ResolutionReport, ResolvedModel,
};
use crate::plugins::drawio::{DiagramGraph, DrawioParser};
use crate::plugins::java::{GeneratedClass, JavaRenderer};

/// Classes generated from one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub classes: Vec<GeneratedClass>,
    pub report: ResolutionReport,
}

impl Generation {
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn class(&self, name: &str) -> Option<&GeneratedClass> {
        self.classes.iter().find(|class| class.name == name)
    }
}

/// Wires a parser, the model builder and a renderer together
pub struct Orchestrator {
    parser: DrawioParser,
    builder: ModelBuilder,
    renderer: JavaRenderer,
}

impl Orchestrator {
    /// Orchestrator with the draw.io parser and Java renderer
    pub fn new() -> Self {
        Self {
            parser: DrawioParser::new(),
            builder: ModelBuilder::new(),
            renderer: JavaRenderer::new(),
        }
    }

    /// Parse a document into its raw graph
    pub fn parse(&self, input: &str) -> Result<DiagramGraph> {
        let mut graph = DiagramGraph::new();
        self.parser.parse(input, &mut graph)?;
        Ok(graph)
    }

    /// Parse and resolve a document without rendering
    pub fn resolve(&self, input: &str) -> Result<ResolvedModel> {
        let graph = self.parse(input)?;
        debug!(
            node_count = graph.node_count(),
            edge_count = graph.edge_count(),
            "Parsed diagram"
        );

        let model = self.builder.build_from(&graph);
        Self::log_report(&model.report);
        Ok(model)
    }

    /// Run the full pipeline
    pub fn process(&self, input: &str) -> Result<Generation> {
        let process_span = span!(Level::INFO, "process_diagram", input_len = input.len());
        let _enter = process_span.enter();

        info!(parser = self.parser.name(), renderer = self.renderer.name(), "Starting generation pipeline");

        if !self.parser.can_parse(input) {
            // Not fatal: a bare <root> fragment still parses
            warn!("Input does not look like a draw.io document");
        }

        let model = self.resolve(input)?;
        if model.entity_count() == 0 {
            warn!("No entities found in diagram");
        }

        let classes = self.renderer.render(&model)?;
        info!(class_count = classes.len(), "Pipeline completed successfully");

        Ok(Generation {
            classes,
            report: model.report,
        })
    }

    fn log_report(report: &ResolutionReport) {
        info!(
            entities = report.entities,
            inheritance_links = report.inheritance_links,
            fields = report.fields_added,
            "Resolved model"
        );
        if report.skipped_edges() > 0 {
            debug!(
                skipped_inheritance = report.skipped_inheritance,
                skipped_associations = report.skipped_associations,
                "Edges referencing non-entity cells were skipped"
            );
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
