//! Core parser trait for diagram documents
//!
//! A parser turns a document into raw records stored in a database. It
//! assigns no domain meaning to them; that is the model builder's job.

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use erdgen::core::{Database, Parser};
/// use erdgen::plugins::drawio::{DiagramGraph, DrawioParser};
///
/// let parser = DrawioParser::new();
/// let mut graph = DiagramGraph::new();
/// parser
///     .parse(
///         r#"<mxGraphModel><root>
///              <mxCell id="p1" value="Player" style="rounded=0;whiteSpace=wrap;" vertex="1"/>
///            </root></mxGraphModel>"#,
///         &mut graph,
///     )
///     .unwrap();
/// assert_eq!(graph.node_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse a document into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input looks like something this parser understands
    fn can_parse(&self, input: &str) -> bool;
}
