//! Java output plugin
//!
//! Renders resolved entities as flat Java classes.

mod renderer;

pub use renderer::{GeneratedClass, JavaRenderer};
