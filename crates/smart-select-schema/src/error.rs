#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("model not registered: {0}")]
    ModelNotFound(String),

    #[error("unknown embedded schema: {0}")]
    UnknownSchema(String),

    #[error("invalid model config: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
