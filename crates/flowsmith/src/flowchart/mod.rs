//! Flowchart editor
//!
//! The editing store plus the concrete Mermaid serializer, the built-in
//! layered layout and the JSON document format it persists to.

pub mod document;
mod layout;
mod ordering;
mod serializer;
mod store;
mod topology;

pub use layout::*;
pub use serializer::*;
pub use store::*;
