//! JSON file adapters
//!
//! The declaration store and the analysis configuration are both plain JSON documents,
//! typically exported by a compiler plugin next to the build outputs.

mod config;
mod source;

pub use config::{JsonConfigSource, load_config};
pub use source::JsonDeclarationSource;
