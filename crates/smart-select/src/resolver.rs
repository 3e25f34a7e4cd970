use serde::{Deserialize, Serialize};
use smart_select_query::{RawSelect, parse_select};
use smart_select_schema::{ModelRegistry, PathInfo, Schema, other_child_paths};
use tracing::{debug, trace, warn};

use crate::error::SelectError;
use crate::plan::{ParseResult, PopulateSpec};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    /// Reject expanded names that match no declared path instead of treating
    /// them as implicit nested objects.
    #[serde(default)]
    pub strict: bool,
}

/// Walks a [`RawSelect`] against a schema and produces a [`ParseResult`].
///
/// Recursion follows the selection tree, never the schema graph: every
/// nested call consumes one brace level of the input, so self-referencing
/// and mutually-referencing models resolve to exactly the requested depth.
pub struct Resolver<'r> {
    registry: &'r dyn ModelRegistry,
    options: ResolveOptions,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r dyn ModelRegistry) -> Self {
        Self {
            registry,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve selection text against a registered model.
    ///
    /// Blank text selects nothing and is never parsed.
    pub fn select(&self, model: &str, text: &str) -> Result<ParseResult, SelectError> {
        if text.trim().is_empty() {
            return Ok(ParseResult::default());
        }
        debug!(model, text, "resolving smart select");

        let select = parse_select(text).map_err(SelectError::InvalidText)?;
        let schema = self.registry.schema(model)?;
        self.resolve(&schema, &select)
    }

    /// Resolve a parsed selection against `schema`.
    pub fn resolve(&self, schema: &Schema, select: &RawSelect) -> Result<ParseResult, SelectError> {
        let all_paths: Vec<&str> = schema.paths().collect();
        let mut result = ParseResult::default();

        if select.all {
            result
                .select
                .extend(other_child_paths(all_paths.iter().copied(), "", &select.names()));
        }

        for field in &select.fields {
            let resolved =
                self.resolve_field(schema, &all_paths, &field.name, field.select.as_ref())?;
            result.extend(resolved);
        }

        result.dedup();
        Ok(result)
    }

    /// Resolve one dotted `path` of `schema`, expanded by `select` if given.
    ///
    /// The first matching rule wins: whole unit, virtual relation, reference,
    /// embedded schema, plain scalar, then implicit nested object.
    pub fn resolve_field(
        &self,
        schema: &Schema,
        all_paths: &[&str],
        path: &str,
        select: Option<&RawSelect>,
    ) -> Result<ParseResult, SelectError> {
        let Some(select) = select else {
            trace!(path, kind = "unit", "classified field");
            return Ok(ParseResult::unit(path));
        };

        if let Some(model) = schema.virtual_ref(path) {
            trace!(path, kind = "virtual", model, "classified field");
            return self.populate(path, model, select);
        }

        match schema.path(path) {
            Some(PathInfo::Reference(model) | PathInfo::Virtual(model)) => {
                trace!(path, kind = "reference", model = model.as_str(), "classified field");
                self.populate(path, model, select)
            }
            Some(PathInfo::Embedded(sub)) => {
                trace!(path, kind = "embedded", "classified field");
                let resolved = self.resolve(sub, select).map_err(|e| e.under(path))?;
                Ok(resolved.rerooted(path))
            }
            Some(PathInfo::Scalar) => {
                trace!(path, kind = "scalar", "classified field");
                Ok(ParseResult::unit(path))
            }
            None => {
                trace!(path, kind = "object", "classified field");
                self.resolve_object(schema, all_paths, path, select)
            }
        }
    }

    /// Expand a relation: resolve the target model against `select` and
    /// attach it as one populate entry at `path`.
    fn populate(
        &self,
        path: &str,
        model: &str,
        select: &RawSelect,
    ) -> Result<ParseResult, SelectError> {
        let schema = self.registry.schema(model).inspect_err(|error| {
            warn!(path, model, %error, "relation target not registered");
        })?;
        let related = self.resolve(&schema, select).map_err(|e| e.under(path))?;

        Ok(ParseResult {
            select: vec![path.to_string()],
            populate: vec![PopulateSpec {
                path: path.to_string(),
                select: related.select,
                populate: related.populate,
            }],
        })
    }

    /// A path with no declaration of its own, taken as a plain object whose
    /// children are the `path.child` entries of the same schema.
    fn resolve_object(
        &self,
        schema: &Schema,
        all_paths: &[&str],
        path: &str,
        select: &RawSelect,
    ) -> Result<ParseResult, SelectError> {
        if self.options.strict && !schema.has_descendants(path) {
            return Err(SelectError::UnknownField(path.to_string()));
        }

        let mut result = ParseResult::default();

        if select.all {
            result.select.extend(other_child_paths(
                all_paths.iter().copied(),
                path,
                &select.names(),
            ));
        }

        for child in &select.fields {
            let child_path = format!("{path}.{}", child.name);
            let resolved =
                self.resolve_field(schema, all_paths, &child_path, child.select.as_ref())?;
            result.extend(resolved);
        }

        Ok(result)
    }
}

/// Resolve `text` against `model` with default options.
pub fn smart_select(
    registry: &dyn ModelRegistry,
    model: &str,
    text: &str,
) -> Result<ParseResult, SelectError> {
    Resolver::new(registry).select(model, text)
}
