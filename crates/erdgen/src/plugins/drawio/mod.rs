//! draw.io input plugin
//!
//! Extracts the raw node/edge graph from draw.io XML documents.

mod database;
mod parser;

pub use database::DiagramGraph;
pub use parser::DrawioParser;
