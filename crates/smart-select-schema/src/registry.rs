use std::collections::HashMap;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::schema::Schema;

/// Resolves a model name to its schema.
///
/// Consumers implement this trait to connect the resolver to whatever
/// document mapper owns the models. It is only ever read during a
/// resolution; an unknown name is a hard failure.
pub trait ModelRegistry: Send + Sync {
    fn schema(&self, model: &str) -> Result<Arc<Schema>, SchemaError>;
}

/// In-memory model registry. Cheap to share; schemas are `Arc`ed.
#[derive(Debug, Clone, Default)]
pub struct Models {
    models: HashMap<String, Arc<Schema>>,
}

impl Models {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a model.
    pub fn register(&mut self, name: impl Into<String>, schema: impl Into<Arc<Schema>>) {
        self.models.insert(name.into(), schema.into());
    }

    pub fn with(mut self, name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        self.register(name, schema);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<Schema>> {
        self.models.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl ModelRegistry for Models {
    fn schema(&self, model: &str) -> Result<Arc<Schema>, SchemaError> {
        self.models
            .get(model)
            .cloned()
            .ok_or_else(|| SchemaError::ModelNotFound(model.to_string()))
    }
}

impl<R: ModelRegistry + ?Sized> ModelRegistry for Arc<R> {
    fn schema(&self, model: &str) -> Result<Arc<Schema>, SchemaError> {
        (**self).schema(model)
    }
}
