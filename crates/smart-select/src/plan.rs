use std::collections::HashSet;

use bson::{Document, doc};
use serde::{Deserialize, Serialize};

/// The projection plan for one record type: paths to select plus the
/// relations to expand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub select: Vec<String>,
    pub populate: Vec<PopulateSpec>,
}

/// Expand the relation at `path`, selecting `select` on the related record
/// and expanding `populate` there in turn. Paths are relative to the related
/// record's root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulateSpec {
    pub path: String,
    pub select: Vec<String>,
    pub populate: Vec<PopulateSpec>,
}

impl ParseResult {
    /// Select `path` as a whole unit.
    pub fn unit(path: &str) -> Self {
        Self {
            select: vec![path.to_string()],
            populate: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.select.is_empty() && self.populate.is_empty()
    }

    /// Append `other`'s paths and populate entries after ours.
    pub(crate) fn extend(&mut self, other: ParseResult) {
        self.select.extend(other.select);
        self.populate.extend(other.populate);
    }

    /// Drop repeated select paths, keeping the first occurrence.
    pub(crate) fn dedup(&mut self) {
        let mut seen = HashSet::new();
        self.select.retain(|path| seen.insert(path.clone()));
    }

    /// Re-root every select path and top-level populate path under `prefix`.
    ///
    /// Nested populate entries are relative to their related record and stay
    /// as they are.
    pub(crate) fn rerooted(self, prefix: &str) -> Self {
        Self {
            select: self
                .select
                .into_iter()
                .map(|path| format!("{prefix}.{path}"))
                .collect(),
            populate: self
                .populate
                .into_iter()
                .map(|spec| PopulateSpec {
                    path: format!("{prefix}.{}", spec.path),
                    ..spec
                })
                .collect(),
        }
    }

    /// Canonical ordering at every level, for order-independent comparison.
    pub fn sorted(mut self) -> Self {
        self.select.sort();
        self.populate = sort_specs(self.populate);
        self
    }

    /// A find projection: `{ "<path>": 1, ... }`.
    pub fn projection(&self) -> Document {
        let mut projection = Document::new();
        for path in &self.select {
            projection.insert(path.clone(), 1_i32);
        }
        projection
    }

    pub fn to_document(&self) -> Document {
        doc! {
            "select": self.select.clone(),
            "populate": self.populate.iter().map(PopulateSpec::to_document).collect::<Vec<_>>(),
        }
    }
}

impl PopulateSpec {
    /// The populate option shape: `{ path, select: "a b", populate: [...] }`.
    pub fn to_document(&self) -> Document {
        doc! {
            "path": self.path.as_str(),
            "select": self.select.join(" "),
            "populate": self.populate.iter().map(PopulateSpec::to_document).collect::<Vec<_>>(),
        }
    }
}

fn sort_specs(specs: Vec<PopulateSpec>) -> Vec<PopulateSpec> {
    let mut specs: Vec<PopulateSpec> = specs
        .into_iter()
        .map(|mut spec| {
            spec.select.sort();
            spec.populate = sort_specs(spec.populate);
            spec
        })
        .collect();
    specs.sort_by(|a, b| a.path.cmp(&b.path));
    specs
}
