//! Document input handling

pub mod reader;

pub use reader::{DocumentReader, SourceFormat};
