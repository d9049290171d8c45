//! Core abstractions and format-independent pipeline stages
//!
//! The traits here are what input formats and target languages plug into.
//! The model types and the builder are shared by all of them.

mod builder;
mod database;
mod error;
pub mod logging;
mod model;
mod parser;
mod renderer;
mod style;
mod text;
mod types;

pub use builder::*;
pub use database::*;
pub use error::*;
pub use logging::*;
pub use model::*;
pub use parser::*;
pub use renderer::*;
pub use style::*;
pub use text::*;
pub use types::*;
