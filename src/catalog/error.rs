use thiserror::Error;

/// Failure modes of loading one folder's manifest.
///
/// Both variants are recoverable: the folder index records them as skip
/// reasons, and a user-initiated resolve reports them once and moves on.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The manifest could not be read at all (missing folder, missing
    /// file, permission problem).
    #[error("manifest for `{folder}` is unavailable: {source}")]
    Unavailable {
        folder: String,
        #[source]
        source: std::io::Error,
    },

    /// The manifest was read but is not the expected JSON shape.
    #[error("manifest for `{folder}` is malformed: {source}")]
    Malformed {
        folder: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// The folder id this error refers to.
    pub fn folder(&self) -> &str {
        match self {
            CatalogError::Unavailable { folder, .. } => folder,
            CatalogError::Malformed { folder, .. } => folder,
        }
    }
}
