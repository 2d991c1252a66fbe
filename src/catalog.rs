//! Catalog module: folder manifests and playlist resolution.
//!
//! A catalog is a root directory whose subfolders each carry a JSON
//! manifest naming their tracks. This module probes those folders for the
//! index view, resolves a chosen folder into an ordered playlist, and runs
//! the I/O on worker threads so the UI never waits on a slow read.

mod error;
mod manifest;
mod model;
mod resolver;
mod source;

pub use error::CatalogError;
pub use manifest::Manifest;
pub use model::{FolderIndex, FolderRef, Playlist, SkippedFolder, Track};
pub use resolver::{CatalogEvent, CatalogResolver};
pub use source::{FsCatalog, ManifestSource};
