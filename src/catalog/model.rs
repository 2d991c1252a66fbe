use std::path::PathBuf;

use super::error::CatalogError;

/// One playable entry from a folder manifest.
#[derive(Debug, Clone)]
pub struct Track {
    /// Filename exactly as listed in the manifest.
    pub name: String,
    /// Location the engine should open, resolved against the catalog root
    /// and the source folder at catalog time.
    pub path: PathBuf,
    /// List/title text: extension stripped, percent-encoding decoded.
    pub display_title: String,
}

/// Ordered tracks resolved from one folder's manifest.
///
/// The manifest order is the playback order. Empty playlists are a valid
/// resolved state, not an error.
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    /// Folder id this playlist was resolved from.
    pub source_folder: String,
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// A browsable folder for the index view.
#[derive(Debug, Clone)]
pub struct FolderRef {
    pub id: String,
    /// Manifest `title`, falling back to the folder id.
    pub title: String,
    /// Manifest `description`, when present.
    pub description: Option<String>,
}

/// A candidate folder left out of the index, and why.
#[derive(Debug)]
pub struct SkippedFolder {
    pub id: String,
    pub reason: CatalogError,
}

/// Result of probing the candidate folders: the usable index plus the
/// candidates that were dropped, with their reasons.
#[derive(Debug, Default)]
pub struct FolderIndex {
    pub folders: Vec<FolderRef>,
    pub skipped: Vec<SkippedFolder>,
}
