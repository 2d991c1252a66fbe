use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::error::CatalogError;
use super::manifest::{display_title, is_supported_name};
use super::model::{FolderIndex, FolderRef, Playlist, SkippedFolder, Track};
use super::source::ManifestSource;

/// Replies from catalog workers, drained by the event loop.
#[derive(Debug)]
pub enum CatalogEvent {
    /// The candidate probe finished.
    Folders(FolderIndex),
    /// One folder's resolution finished.
    Resolved {
        generation: u64,
        folder: String,
        result: Result<Playlist, CatalogError>,
    },
}

/// Hands catalog I/O to short-lived worker threads.
///
/// Every resolve request is stamped with a monotonically increasing
/// generation number; replies carry it back, and only the most recently
/// issued generation may be applied. A slow fetch finishing after a newer
/// selection is therefore recognizably stale instead of clobbering it.
pub struct CatalogResolver {
    source: Arc<dyn ManifestSource>,
    candidates: Vec<String>,
    extensions: Vec<String>,
    events_tx: Sender<CatalogEvent>,
    events_rx: Receiver<CatalogEvent>,
    issued: u64,
}

impl CatalogResolver {
    pub fn new(
        source: Arc<dyn ManifestSource>,
        candidates: Vec<String>,
        extensions: Vec<String>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::channel();
        Self {
            source,
            candidates,
            extensions,
            events_tx,
            events_rx,
            issued: 0,
        }
    }

    /// Probe every candidate folder in the background; the reply arrives
    /// later as `CatalogEvent::Folders`.
    pub fn request_folders(&self) {
        let source = self.source.clone();
        let candidates = self.candidates.clone();
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let index = probe_folders(source.as_ref(), &candidates);
            let _ = tx.send(CatalogEvent::Folders(index));
        });
    }

    /// Resolve one folder in the background and return the generation its
    /// reply will carry.
    pub fn request_playlist(&mut self, folder: &str) -> u64 {
        self.issued += 1;
        let generation = self.issued;

        let source = self.source.clone();
        let extensions = self.extensions.clone();
        let folder = folder.to_string();
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = resolve_playlist(source.as_ref(), &folder, &extensions);
            let _ = tx.send(CatalogEvent::Resolved {
                generation,
                folder,
                result,
            });
        });

        generation
    }

    /// Whether a resolve reply belongs to a superseded request.
    pub fn is_stale(&self, generation: u64) -> bool {
        generation != self.issued
    }

    /// Non-blocking poll for the next worker reply.
    pub fn try_event(&self) -> Option<CatalogEvent> {
        self.events_rx.try_recv().ok()
    }
}

/// Probe `candidates` in order. Folders without a usable manifest are
/// expected (sparse catalogs); they become structured skip entries rather
/// than silently disappearing.
pub(super) fn probe_folders(source: &dyn ManifestSource, candidates: &[String]) -> FolderIndex {
    let candidates: Vec<String> = if candidates.is_empty() {
        source.discover_folders()
    } else {
        candidates.to_vec()
    };

    let mut index = FolderIndex::default();
    for id in candidates {
        match source.load_manifest(&id) {
            Ok(manifest) => index.folders.push(FolderRef {
                title: manifest
                    .title
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| id.clone()),
                description: manifest.description,
                id,
            }),
            Err(reason) => index.skipped.push(SkippedFolder { id, reason }),
        }
    }
    index
}

/// Load `folder`'s manifest and keep only entries with a supported
/// extension, preserving manifest order.
pub(super) fn resolve_playlist(
    source: &dyn ManifestSource,
    folder: &str,
    extensions: &[String],
) -> Result<Playlist, CatalogError> {
    let manifest = source.load_manifest(folder)?;

    let tracks = manifest
        .songs
        .iter()
        .filter(|name| is_supported_name(name, extensions))
        .map(|name| Track {
            name: name.clone(),
            path: source.track_location(folder, name),
            display_title: display_title(name),
        })
        .collect();

    Ok(Playlist {
        source_folder: folder.to_string(),
        tracks,
    })
}
