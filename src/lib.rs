//! Texture Explorer library.
//!
//! Exposes the catalog, pagination and copy-acknowledgment engine plus the
//! terminal front end pieces, for the `tex` binary, tests and benchmarks.

pub mod catalog;
pub mod clipboard;
pub mod handlers;
pub mod paginate;
pub mod path;
pub mod preview;
pub mod render;
pub mod source;
pub mod state;
pub mod view;
