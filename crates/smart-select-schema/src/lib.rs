mod config;
mod error;
mod paths;
mod registry;
mod schema;

pub use config::{ConfigOptions, EmbedDecl, FieldDecl, ModelConfig, ModelsConfig, RefDecl};
pub use error::SchemaError;
pub use paths::other_child_paths;
pub use registry::{ModelRegistry, Models};
pub use schema::{PathInfo, Schema, SchemaBuilder};
