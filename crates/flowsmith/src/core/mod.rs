//! Core abstractions for diagram editing
//!
//! This module defines the graph model, the undo history and the trait seams
//! (layout, serializer) that the flowchart editor plugs into.

mod config;
mod error;
mod history;
mod layout;
pub mod logging;
mod model;
mod serializer;
mod types;

pub use config::*;
pub use error::*;
pub use history::*;
pub use layout::*;
pub use logging::*;
pub use model::*;
pub use serializer::*;
pub use types::*;
