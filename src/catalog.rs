//! Texture catalog: entries parsed from the source list and the filtered view.
//!
//! The catalog is built once per load from a flat JSON array of path strings
//! and never mutated afterwards. Filtering produces a [`FilteredView`] that
//! refers back into the catalog by position, so duplicate paths stay distinct.

use thiserror::Error;

use crate::path::file_name;

/// Failure to obtain or decode the catalog source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog must be a JSON array of path strings")]
    NotAnArray,

    #[error("Catalog entry {0} is not a string")]
    NonStringEntry(usize),
}

/// One texture resource in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    /// Full catalog-relative path, e.g. `textures/blocks/stone.png`
    pub path: String,
    /// Final path segment including extension, e.g. `stone.png`
    pub name: String,
}

impl TextureEntry {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = file_name(&path).to_string();
        Self { path, name }
    }
}

/// Ordered, immutable list of texture entries in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<TextureEntry>,
}

impl Catalog {
    /// Build a catalog from raw path strings, preserving their order.
    pub fn load<I, S>(raw_paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: raw_paths.into_iter().map(TextureEntry::new).collect(),
        }
    }

    pub fn entries(&self) -> &[TextureEntry] {
        &self.entries
    }

    /// Entry at catalog position `idx`.
    pub fn get(&self, idx: usize) -> Option<&TextureEntry> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Derive the view of entries whose path contains `query`, ignoring case.
    pub fn filter(&self, query: &str) -> FilteredView<'_> {
        FilteredView {
            catalog: self,
            positions: filter_positions(&self.entries, query),
        }
    }
}

/// Parse a JSON payload into a catalog.
///
/// The payload must be a flat array of strings; anything else is a load failure.
pub fn parse_catalog(json: &str) -> Result<Catalog, LoadError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let items = value.as_array().ok_or(LoadError::NotAnArray)?;

    let mut paths = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let path = item.as_str().ok_or(LoadError::NonStringEntry(i))?;
        paths.push(path.to_string());
    }

    Ok(Catalog::load(paths))
}

/// Catalog positions of entries matching `query`, in catalog order.
///
/// The query is trimmed first; an empty query matches every entry. Matching is
/// literal substring containment on the lowercased full path.
pub fn filter_positions(entries: &[TextureEntry], query: &str) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return (0..entries.len()).collect();
    }

    let needle = query.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.path.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// Order-preserving subsequence of a catalog matching a query.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    catalog: &'a Catalog,
    positions: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Catalog positions of the matching entries.
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Matching entries in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = &'a TextureEntry> + '_ {
        let catalog = self.catalog;
        self.positions.iter().filter_map(move |&i| catalog.get(i))
    }
}
