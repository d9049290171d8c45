//! Raw graph extracted from a draw.io document
//!
//! Stores entity candidates and connectors exactly as the parser found
//! them. Edges may reference ids that are not nodes here; resolving that
//! is left to the model builder.

use std::collections::HashMap;

use anyhow::Result;

use crate::core::{Database, RawEdge, RawNode};

/// Node and edge records of one diagram document
#[derive(Debug, Clone, Default)]
pub struct DiagramGraph {
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
    node_index: HashMap<String, usize>,
}

impl DiagramGraph {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Database for DiagramGraph {
    type Node = RawNode;
    type Edge = RawEdge;

    fn add_node(&mut self, node: Self::Node) -> Result<()> {
        // Duplicate ids keep the first position and take the newer record
        match self.node_index.get(&node.id) {
            Some(&index) => self.nodes[index] = node,
            None => {
                self.node_index.insert(node.id.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
        Ok(())
    }

    fn add_edge(&mut self, edge: Self::Edge) -> Result<()> {
        self.edges.push(edge);
        Ok(())
    }

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.node_index.get(id).map(|&index| &self.nodes[index])
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
