use smart_select_query::SelectParseError;
use smart_select_schema::SchemaError;

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("smart select text invalid")]
    InvalidText(#[source] SelectParseError),

    #[error(transparent)]
    Lookup(#[from] SchemaError),

    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl SelectError {
    /// Prefix an unknown field with the path it was reached through, so the
    /// reported name matches the dotted path written in the text.
    pub(crate) fn under(self, prefix: &str) -> Self {
        match self {
            SelectError::UnknownField(path) => {
                SelectError::UnknownField(format!("{prefix}.{path}"))
            }
            other => other,
        }
    }
}
