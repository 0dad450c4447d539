//! Thumbnail descriptors for the preview panel.
//!
//! The terminal cannot draw the image itself; the panel shows where the 32x32
//! preview comes from and whether a local asset is actually present.

use std::path::Path;

use crate::catalog::TextureEntry;

/// Fixed preview edge length in pixels.
pub const THUMBNAIL_SIZE: u16 = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    /// Resolved image location (file path or URL)
    pub src: String,
    /// Alternate text, the entry's file name
    pub alt: String,
    pub width: u16,
    pub height: u16,
}

impl Thumbnail {
    /// Describe the preview of `entry` with paths resolved against `asset_base`.
    ///
    /// Without a base the catalog path is used as a site-root-relative location.
    pub fn for_entry(entry: &TextureEntry, asset_base: Option<&str>) -> Self {
        let src = match asset_base {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), entry.path),
            None => format!("/{}", entry.path),
        };

        Self {
            src,
            alt: entry.name.clone(),
            width: THUMBNAIL_SIZE,
            height: THUMBNAIL_SIZE,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.src.starts_with("http://") || self.src.starts_with("https://")
    }

    /// Whether a local asset exists. `None` for remote sources.
    pub fn local_exists(&self) -> Option<bool> {
        if self.is_remote() {
            None
        } else {
            Some(Path::new(&self.src).is_file())
        }
    }
}
