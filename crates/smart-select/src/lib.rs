mod error;
mod plan;
mod resolver;

pub use error::SelectError;
pub use plan::{ParseResult, PopulateSpec};
pub use resolver::{ResolveOptions, Resolver, smart_select};
pub use smart_select_query::{MAX_DEPTH, RawField, RawSelect, SelectParseError, parse_select};
pub use smart_select_schema::{
    ModelRegistry, Models, ModelsConfig, PathInfo, Schema, SchemaBuilder, SchemaError,
    other_child_paths,
};
