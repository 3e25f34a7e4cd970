use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SchemaError;
use crate::registry::Models;
use crate::schema::{Schema, SchemaBuilder};

/// Scalar type names accepted in a model file.
const SCALAR_TYPES: &[&str] = &[
    "string", "number", "boolean", "date", "id", "mixed", "array", "buffer", "decimal", "map",
];

/// Declarative model definitions, loadable from JSON or YAML.
///
/// ```yaml
/// models:
///   - name: Post
///     fields:
///       name: string
///       date: { month: number, year: number }
///       address: { schema: Address }
///       category: { ref: Category }
///       tags: [{ ref: Tag }]
///     virtuals:
///       comments: { ref: Comment }
/// schemas:
///   - name: Address
///     fields:
///       street: string
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelsConfig {
    #[serde(default)]
    pub models: Vec<ModelConfig>,
    /// Named sub-schemas that models embed with `{ schema: Name }`.
    #[serde(default)]
    pub schemas: Vec<ModelConfig>,
    #[serde(default)]
    pub options: ConfigOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub name: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDecl>,
    #[serde(default)]
    pub virtuals: BTreeMap<String, RefDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOptions {
    /// Add `_id` (and `__v` on models) the way the document mapper does.
    #[serde(default = "default_document_keys")]
    pub document_keys: bool,
}

fn default_document_keys() -> bool {
    true
}

impl Default for ConfigOptions {
    fn default() -> Self {
        Self {
            document_keys: default_document_keys(),
        }
    }
}

/// One field declaration.
///
/// A bare string is a scalar type, `{ ref: Model }` a reference,
/// `{ schema: Name }` an embedded named schema, a one-element list an array
/// of that element, and any other map a nested plain object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldDecl {
    Type(String),
    // Before the struct variants: serde structs also accept sequences.
    Array(Vec<FieldDecl>),
    Ref(RefDecl),
    Embed(EmbedDecl),
    Object(BTreeMap<String, FieldDecl>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefDecl {
    #[serde(rename = "ref")]
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EmbedDecl {
    pub schema: String,
}

impl ModelsConfig {
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a model file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text),
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            other => Err(SchemaError::Config(format!(
                "unsupported model file extension: {}",
                other.unwrap_or("<none>")
            ))),
        }
    }

    /// Compile every model into a registry.
    pub fn build(&self) -> Result<Models, SchemaError> {
        let mut compiler = Compiler {
            config: self,
            embedded: HashMap::new(),
            in_progress: HashSet::new(),
        };

        let mut models = Models::new();
        for model in &self.models {
            let schema = compiler.model(model)?;
            models.register(model.name.clone(), schema);
        }

        debug!(models = models.len(), "built model registry from config");
        Ok(models)
    }
}

struct Compiler<'a> {
    config: &'a ModelsConfig,
    embedded: HashMap<String, Arc<Schema>>,
    in_progress: HashSet<String>,
}

impl Compiler<'_> {
    fn model(&mut self, model: &ModelConfig) -> Result<Schema, SchemaError> {
        let keys = self.config.options.document_keys;
        let mut builder = Schema::builder();
        if keys {
            builder = builder.id_key();
        }
        builder = self.fields(builder, "", &model.fields)?;
        if keys {
            builder = builder.scalar("__v");
        }
        for (name, target) in &model.virtuals {
            builder = builder.virtual_ref(name.clone(), target.model.clone());
        }
        Ok(builder.build())
    }

    /// A named schema embedded as a sub-document. Compiled once.
    fn named(&mut self, name: &str) -> Result<Arc<Schema>, SchemaError> {
        if let Some(schema) = self.embedded.get(name) {
            return Ok(Arc::clone(schema));
        }

        let config = self.config;
        let decl = config
            .schemas
            .iter()
            .chain(config.models.iter())
            .find(|s| s.name == name)
            .ok_or_else(|| SchemaError::UnknownSchema(name.to_string()))?;

        if !self.in_progress.insert(name.to_string()) {
            return Err(SchemaError::Config(format!("schema {name} embeds itself")));
        }
        let schema = Arc::new(self.sub_document(&decl.fields, &decl.virtuals)?);
        self.in_progress.remove(name);

        self.embedded.insert(name.to_string(), Arc::clone(&schema));
        Ok(schema)
    }

    fn sub_document(
        &mut self,
        fields: &BTreeMap<String, FieldDecl>,
        virtuals: &BTreeMap<String, RefDecl>,
    ) -> Result<Schema, SchemaError> {
        let mut builder = Schema::builder();
        if self.config.options.document_keys {
            builder = builder.id_key();
        }
        builder = self.fields(builder, "", fields)?;
        for (name, target) in virtuals {
            builder = builder.virtual_ref(name.clone(), target.model.clone());
        }
        Ok(builder.build())
    }

    fn fields(
        &mut self,
        mut builder: SchemaBuilder,
        prefix: &str,
        fields: &BTreeMap<String, FieldDecl>,
    ) -> Result<SchemaBuilder, SchemaError> {
        for (name, decl) in fields {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{prefix}.{name}")
            };
            builder = self.field(builder, path, decl)?;
        }
        Ok(builder)
    }

    fn field(
        &mut self,
        builder: SchemaBuilder,
        path: String,
        decl: &FieldDecl,
    ) -> Result<SchemaBuilder, SchemaError> {
        match decl {
            FieldDecl::Type(ty) => {
                if !SCALAR_TYPES.contains(&ty.as_str()) {
                    return Err(SchemaError::Config(format!("unknown type {ty:?} for {path}")));
                }
                Ok(builder.scalar(path))
            }
            FieldDecl::Ref(target) => Ok(builder.reference(path, target.model.clone())),
            FieldDecl::Embed(embed) => {
                let schema = self.named(&embed.schema)?;
                Ok(builder.embedded(path, schema))
            }
            // Mixed: no declared children.
            FieldDecl::Object(children) if children.is_empty() => Ok(builder.scalar(path)),
            FieldDecl::Object(children) => self.fields(builder, &path, children),
            FieldDecl::Array(items) => match items.as_slice() {
                [] => Ok(builder.scalar(path)),
                [FieldDecl::Object(children)] if !children.is_empty() => {
                    let schema = self.sub_document(children, &BTreeMap::new())?;
                    Ok(builder.embedded(path, schema))
                }
                [FieldDecl::Array(_)] | [FieldDecl::Object(_)] => Ok(builder.scalar(path)),
                [item] => self.field(builder, path, item),
                _ => Err(SchemaError::Config(format!(
                    "array {path} declares more than one element type"
                ))),
            },
        }
    }
}
