use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// What a declared path holds. Built once when the schema is constructed.
#[derive(Clone)]
pub enum PathInfo {
    /// A leaf value (string, number, date, id without a target, array of scalars).
    Scalar,
    /// A sub-document with its own schema.
    Embedded(Arc<Schema>),
    /// A stored identifier of a record in the named model.
    Reference(String),
    /// A computed relation to the named model. Not physically stored.
    Virtual(String),
}

impl PathInfo {
    pub fn kind(&self) -> &'static str {
        match self {
            PathInfo::Scalar => "scalar",
            PathInfo::Embedded(_) => "embedded",
            PathInfo::Reference(_) => "reference",
            PathInfo::Virtual(_) => "virtual",
        }
    }

    /// Target model for relation paths.
    pub fn target(&self) -> Option<&str> {
        match self {
            PathInfo::Reference(model) | PathInfo::Virtual(model) => Some(model),
            _ => None,
        }
    }
}

// Embedded schemas print by name only; full recursion is noisy.
impl fmt::Debug for PathInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathInfo::Scalar => write!(f, "Scalar"),
            PathInfo::Embedded(schema) => f
                .debug_tuple("Embedded")
                .field(&schema.paths().collect::<Vec<_>>())
                .finish(),
            PathInfo::Reference(model) => f.debug_tuple("Reference").field(model).finish(),
            PathInfo::Virtual(model) => f.debug_tuple("Virtual").field(model).finish(),
        }
    }
}

/// The declared shape of one record type.
///
/// `paths` holds every physically declared dotted path in declaration order.
/// Nested plain objects are flattened (`date.month`, `date.time.h`); embedded
/// sub-schemas appear as a single path carrying their own [`Schema`].
/// Virtual relations live in a separate map and never show up in `paths`.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    order: Vec<String>,
    paths: HashMap<String, PathInfo>,
    virtuals: HashMap<String, PathInfo>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Declared paths in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn path(&self, path: &str) -> Option<&PathInfo> {
        self.paths.get(path)
    }

    /// Target model of a virtual relation.
    pub fn virtual_ref(&self, name: &str) -> Option<&str> {
        self.virtuals.get(name).and_then(PathInfo::target)
    }

    pub fn virtual_names(&self) -> impl Iterator<Item = &str> {
        self.virtuals.keys().map(String::as_str)
    }

    /// Whether any declared path or virtual lies strictly under `prefix`.
    pub fn has_descendants(&self, prefix: &str) -> bool {
        self.order
            .iter()
            .chain(self.virtuals.keys())
            .any(|p| {
                p.strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('.'))
            })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Incrementally declares a [`Schema`].
///
/// Redeclaring a path replaces its [`PathInfo`] but keeps its original position.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    schema: Schema,
}

impl SchemaBuilder {
    pub fn scalar(self, path: impl Into<String>) -> Self {
        self.declare(path.into(), PathInfo::Scalar)
    }

    pub fn embedded(self, path: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        self.declare(path.into(), PathInfo::Embedded(schema.into()))
    }

    pub fn reference(self, path: impl Into<String>, model: impl Into<String>) -> Self {
        self.declare(path.into(), PathInfo::Reference(model.into()))
    }

    pub fn virtual_ref(mut self, name: impl Into<String>, model: impl Into<String>) -> Self {
        self.schema
            .virtuals
            .insert(name.into(), PathInfo::Virtual(model.into()));
        self
    }

    /// Declare a path with already-built metadata. Virtuals go to the virtual map.
    pub fn declare(mut self, path: String, info: PathInfo) -> Self {
        if matches!(info, PathInfo::Virtual(_)) {
            self.schema.virtuals.insert(path, info);
            return self;
        }
        if !self.schema.paths.contains_key(&path) {
            self.schema.order.push(path.clone());
        }
        self.schema.paths.insert(path, info);
        self
    }

    /// Add the `_id` key a stored sub-document carries.
    pub fn id_key(self) -> Self {
        self.scalar("_id")
    }

    /// Add the `_id` and `__v` keys every stored top-level document carries.
    pub fn document_keys(self) -> Self {
        self.scalar("_id").scalar("__v")
    }

    pub fn build(self) -> Schema {
        self.schema
    }
}

impl From<SchemaBuilder> for Schema {
    fn from(builder: SchemaBuilder) -> Self {
        builder.build()
    }
}

impl From<SchemaBuilder> for Arc<Schema> {
    fn from(builder: SchemaBuilder) -> Self {
        Arc::new(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Schema {
        Schema::builder()
            .document_keys()
            .scalar("name")
            .scalar("date.month")
            .scalar("date.time.h")
            .embedded("address", Schema::builder().id_key().scalar("street"))
            .reference("category", "Category")
            .virtual_ref("comments", "Comment")
            .build()
    }

    #[test]
    fn paths_keep_declaration_order() {
        let schema = post();
        assert_eq!(
            schema.paths().collect::<Vec<_>>(),
            vec!["_id", "__v", "name", "date.month", "date.time.h", "address", "category"]
        );
    }

    #[test]
    fn virtuals_are_not_declared_paths() {
        let schema = post();
        assert!(schema.path("comments").is_none());
        assert_eq!(schema.virtual_ref("comments"), Some("Comment"));
        assert_eq!(schema.virtual_ref("category"), None);
    }

    #[test]
    fn path_kinds() {
        let schema = post();
        assert_eq!(schema.path("name").unwrap().kind(), "scalar");
        assert_eq!(schema.path("address").unwrap().kind(), "embedded");
        assert_eq!(schema.path("category").unwrap().target(), Some("Category"));
    }

    #[test]
    fn redeclare_keeps_position() {
        let schema = Schema::builder()
            .scalar("a")
            .scalar("b")
            .reference("a", "Other")
            .build();
        assert_eq!(schema.paths().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(schema.path("a").unwrap().target(), Some("Other"));
    }

    #[test]
    fn declare_routes_virtuals() {
        let schema = Schema::builder()
            .declare("posts".into(), PathInfo::Virtual("Post".into()))
            .build();
        assert!(schema.is_empty());
        assert_eq!(schema.virtual_ref("posts"), Some("Post"));
    }

    #[test]
    fn descendants_match_whole_segments() {
        let schema = post();
        assert!(schema.has_descendants("date"));
        assert!(schema.has_descendants("date.time"));
        assert!(!schema.has_descendants("dat"));
        assert!(!schema.has_descendants("name"));
        assert!(!schema.has_descendants("missing"));
    }
}
