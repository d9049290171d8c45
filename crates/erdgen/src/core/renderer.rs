//! Core renderer trait for source output
//!
//! A renderer turns a resolved model into generated source for one
//! target language.

use anyhow::Result;

/// Core trait for source renderers
///
/// Unlike parsers, renderers read a resolved model rather than a raw
/// database, so the input type is left fully generic.
pub trait Renderer<M>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the model into the output format
    fn render(&self, model: &M) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the file extension of generated sources
    fn format(&self) -> &'static str;
}
