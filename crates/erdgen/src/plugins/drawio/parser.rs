//! draw.io document parser
//!
//! Reads the `mxCell` elements of an uncompressed draw.io document and
//! records three things:
//!
//! 1. entity candidates: cells with a display value, a `whiteSpace=wrap`
//!    style and an id
//! 2. edge labels: `edgeLabel` cells, keyed by the connector id in their
//!    `parent` reference
//! 3. connectors: cells with both a `source` and a `target`
//!
//! Cells wrapped in `<UserObject>`/`<object>` take their id and display
//! value from the wrapper, which is where draw.io stores them.

use std::collections::HashMap;

use anyhow::Result;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::{debug, info, span, trace, warn, Level};

use super::database::DiagramGraph;
use crate::core::{
    clean_label, is_entity_name, strip_markup, Database, GeneratorError, Parser, RawEdge,
    RawLabel, RawNode, StyleFlags,
};

/// Element names that wrap a cell and carry its id and label
const WRAPPER_ELEMENTS: [&[u8]; 2] = [b"UserObject", b"object"];

/// One `mxCell` with the attributes the pipeline reads
#[derive(Debug, Clone, Default, PartialEq)]
struct Cell {
    id: Option<String>,
    value: Option<String>,
    style: StyleFlags,
    parent: Option<String>,
    source: Option<String>,
    target: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct Wrapper {
    id: Option<String>,
    label: Option<String>,
}

enum Frame {
    Wrapper(Wrapper),
    Element,
}

/// Parser for draw.io (mxGraph) XML documents
#[derive(Debug, Default)]
pub struct DrawioParser;

impl DrawioParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a document into a fresh graph
    pub fn parse_document(&self, input: &str) -> Result<DiagramGraph> {
        let mut graph = DiagramGraph::new();
        self.parse(input, &mut graph)?;
        Ok(graph)
    }

    /// Collect every cell of the document in document order
    fn scan_cells(&self, input: &str) -> Result<Vec<Cell>, GeneratorError> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(true);

        let mut cells = Vec::new();
        let mut stack: Vec<Frame> = Vec::new();
        let mut saw_root = false;
        let mut in_diagram = false;
        let mut compressed = false;

        loop {
            let position = reader.buffer_position();
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    saw_root = true;
                    let name = e.local_name();
                    if name.as_ref() == b"mxCell" {
                        cells.push(Self::read_cell(&e, Self::current_wrapper(&stack), position)?);
                        stack.push(Frame::Element);
                    } else if WRAPPER_ELEMENTS.contains(&name.as_ref()) {
                        let attrs = Self::read_attributes(&e, position)?;
                        stack.push(Frame::Wrapper(Wrapper {
                            id: non_empty(attrs.get("id").cloned()),
                            label: attrs.get("label").cloned(),
                        }));
                    } else {
                        in_diagram |= name.as_ref() == b"diagram";
                        stack.push(Frame::Element);
                    }
                }
                Ok(Event::Empty(e)) => {
                    saw_root = true;
                    if e.local_name().as_ref() == b"mxCell" {
                        cells.push(Self::read_cell(&e, Self::current_wrapper(&stack), position)?);
                    }
                }
                Ok(Event::End(e)) => {
                    if e.local_name().as_ref() == b"diagram" {
                        in_diagram = false;
                    }
                    stack.pop();
                }
                Ok(Event::Text(_)) => {
                    // A <diagram> whose only content is text holds a deflated payload
                    if in_diagram && matches!(stack.last(), Some(Frame::Element)) {
                        compressed = true;
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(GeneratorError::malformed_document(
                        e.to_string(),
                        reader.error_position(),
                    ));
                }
                _ => {}
            }
        }

        if !saw_root {
            return Err(GeneratorError::malformed_document(
                "document has no root element",
                reader.buffer_position(),
            ));
        }
        if !stack.is_empty() {
            return Err(GeneratorError::malformed_document(
                format!("{} unclosed element(s) at end of document", stack.len()),
                reader.buffer_position(),
            ));
        }
        if compressed && cells.is_empty() {
            warn!("Diagram content is compressed; save it uncompressed to generate classes");
        }

        Ok(cells)
    }

    fn current_wrapper(stack: &[Frame]) -> Option<&Wrapper> {
        match stack.last() {
            Some(Frame::Wrapper(wrapper)) => Some(wrapper),
            _ => None,
        }
    }

    fn read_cell(
        e: &BytesStart<'_>,
        wrapper: Option<&Wrapper>,
        position: u64,
    ) -> Result<Cell, GeneratorError> {
        let mut attrs = Self::read_attributes(e, position)?;
        let mut cell = Cell {
            id: non_empty(attrs.remove("id")),
            value: attrs.remove("value"),
            style: attrs
                .get("style")
                .map(|style| StyleFlags::parse(style))
                .unwrap_or_default(),
            parent: non_empty(attrs.remove("parent")),
            source: non_empty(attrs.remove("source")),
            target: non_empty(attrs.remove("target")),
        };

        if let Some(wrapper) = wrapper {
            if cell.id.is_none() {
                cell.id = wrapper.id.clone();
            }
            if cell.value.is_none() {
                cell.value = wrapper.label.clone();
            }
        }

        Ok(cell)
    }

    /// Read all attributes, unescaped, after XML attribute-value normalization
    fn read_attributes(
        e: &BytesStart<'_>,
        position: u64,
    ) -> Result<HashMap<String, String>, GeneratorError> {
        let mut attrs = HashMap::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| {
                GeneratorError::malformed_document(format!("attribute error: {err}"), position)
            })?;
            let key = std::str::from_utf8(attr.key.as_ref()).map_err(|err| {
                GeneratorError::malformed_document(format!("attribute name: {err}"), position)
            })?;
            let raw = std::str::from_utf8(&attr.value).map_err(|err| {
                GeneratorError::malformed_document(format!("attribute `{key}`: {err}"), position)
            })?;
            let normalized: String = raw
                .replace("\r\n", "\n")
                .chars()
                .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
                .collect();
            let value = quick_xml::escape::unescape(&normalized).map_err(|err| {
                GeneratorError::malformed_document(format!("attribute `{key}`: {err}"), position)
            })?;
            attrs.insert(key.to_string(), value.into_owned());
        }
        Ok(attrs)
    }

    fn entity_candidate(cell: &Cell) -> Option<RawNode> {
        let id = cell.id.as_ref()?;
        let value = cell.value.as_deref().filter(|v| !v.is_empty())?;
        if !cell.style.is_wrapped_text() {
            return None;
        }
        let name = strip_markup(value);
        if !is_entity_name(&name) {
            trace!(id = %id, "Skipping scaffolding cell");
            return None;
        }
        Some(RawNode::new(id, name, cell.style.clone()))
    }

    fn label_cell(cell: &Cell) -> Option<RawLabel> {
        if !cell.style.is_edge_label() {
            return None;
        }
        let parent = cell.parent.as_ref()?;
        let value = cell.value.as_deref().filter(|v| !v.is_empty())?;
        Some(RawLabel::new(parent, clean_label(value)))
    }

    /// Map connector id to label text; later label cells win
    fn edge_labels(cells: &[Cell]) -> HashMap<String, String> {
        cells
            .iter()
            .filter_map(Self::label_cell)
            .map(|label| (label.parent_id, label.text))
            .collect()
    }

    fn connector(cell: &Cell, labels: &HashMap<String, String>) -> Option<RawEdge> {
        let (source, target) = (cell.source.as_ref()?, cell.target.as_ref()?);
        let id = cell.id.clone().unwrap_or_default();

        let attached = labels.get(&id).filter(|label| !label.is_empty()).cloned();
        let label = attached
            .or_else(|| cell.value.as_deref().map(clean_label))
            .unwrap_or_default();

        Some(RawEdge::new(id, source, target, cell.style.clone()).with_label(label))
    }
}

impl Parser<DiagramGraph> for DrawioParser {
    fn parse(&self, input: &str, database: &mut DiagramGraph) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_drawio", input_len = input.len());
        let _enter = parse_span.enter();

        let cells = self.scan_cells(input)?;
        debug!(cell_count = cells.len(), "Scanned cells");

        for node in cells.iter().filter_map(Self::entity_candidate) {
            debug!(id = %node.id, value = %node.display_value, "Entity candidate");
            database.add_node(node)?;
        }

        let labels = Self::edge_labels(&cells);
        debug!(label_count = labels.len(), "Collected edge labels");

        for edge in cells.iter().filter_map(|cell| Self::connector(cell, &labels)) {
            if edge.is_inheritance() {
                info!("Found inheritance: {} -> {}", edge.source_id, edge.target_id);
            } else {
                info!(
                    "Found relationship: {} -> {} ({})",
                    edge.source_id,
                    edge.target_id,
                    edge.label.replace('\n', " ")
                );
            }
            database.add_edge(edge)?;
        }

        debug!(
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            "Parsing completed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "drawio"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        input.contains("<mxGraphModel") || input.contains("<mxfile")
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
