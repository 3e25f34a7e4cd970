use serde::{Deserialize, Serialize};

/// A parsed selection body: the fields named at one nesting level, plus
/// whether the remaining fields at that level were requested too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSelect {
    pub all: bool,
    pub fields: Vec<RawField>,
}

/// A single named entry in a selection body.
///
/// `select` is `None` when the field is taken as a whole unit (`name`), and
/// `Some` when the field is expanded (`name{...}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawField {
    pub name: String,
    pub select: Option<RawSelect>,
}

impl RawSelect {
    /// A body that requests every field at its level (`{}` or `{...}`).
    pub fn everything() -> Self {
        Self {
            all: true,
            fields: Vec::new(),
        }
    }

    /// Names of the explicitly requested fields, in order.
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

impl RawField {
    pub fn unit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            select: None,
        }
    }

    pub fn nested(name: impl Into<String>, select: RawSelect) -> Self {
        Self {
            name: name.into(),
            select: Some(select),
        }
    }
}
