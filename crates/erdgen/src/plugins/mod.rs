//! Input format and target language plugins
//!
//! Each plugin implements the core traits for one format: `drawio` is a
//! parser into the raw graph, `java` a renderer of resolved entities.

pub mod drawio;
pub mod java;
pub mod orchestrator;

pub use drawio::*;
pub use java::*;
pub use orchestrator::*;
