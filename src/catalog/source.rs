use std::fs;
use std::path::PathBuf;

use walkdir::WalkDir;

use super::error::CatalogError;
use super::manifest::Manifest;

/// Where manifests come from.
///
/// The resolver only talks to this seam, so the filesystem layout lives in
/// one place and tests can substitute a scripted source.
pub trait ManifestSource: Send + Sync {
    /// Load and parse the manifest for `folder`.
    fn load_manifest(&self, folder: &str) -> Result<Manifest, CatalogError>;

    /// Resolve a manifest entry to the location the engine should open.
    fn track_location(&self, folder: &str, name: &str) -> PathBuf;

    /// Candidate folder ids to probe when none are configured.
    fn discover_folders(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Filesystem catalog: manifests live at `<root>/<folder>/<manifest_name>`.
pub struct FsCatalog {
    root: PathBuf,
    manifest_name: String,
}

impl FsCatalog {
    pub fn new(root: impl Into<PathBuf>, manifest_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            manifest_name: manifest_name.into(),
        }
    }

    fn manifest_path(&self, folder: &str) -> PathBuf {
        self.root.join(folder).join(&self.manifest_name)
    }
}

impl ManifestSource for FsCatalog {
    fn load_manifest(&self, folder: &str) -> Result<Manifest, CatalogError> {
        let body =
            fs::read_to_string(self.manifest_path(folder)).map_err(|e| CatalogError::Unavailable {
                folder: folder.to_string(),
                source: e,
            })?;

        serde_json::from_str(&body).map_err(|e| CatalogError::Malformed {
            folder: folder.to_string(),
            source: e,
        })
    }

    fn track_location(&self, folder: &str, name: &str) -> PathBuf {
        self.root.join(folder).join(name)
    }

    /// Immediate subdirectories of the root, sorted, dotdirs excluded.
    fn discover_folders(&self) -> Vec<String> {
        let mut folders: Vec<String> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_dir())
            .filter_map(|e| e.file_name().to_str().map(str::to_string))
            .filter(|name| !name.starts_with('.'))
            .collect();
        folders.sort();
        folders
    }
}
