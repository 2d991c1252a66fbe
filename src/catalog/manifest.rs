use percent_encoding::percent_decode_str;
use serde::Deserialize;

/// Per-folder manifest: `{ "title"?, "description"?, "songs": [...] }`.
///
/// `songs` entries are filenames relative to the folder. `title` and
/// `description` feed the folder index; a missing `songs` array makes the
/// manifest malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub songs: Vec<String>,
}

/// Case-insensitive suffix match of `name` against the configured
/// extension list. Extensions are accepted with or without a leading dot.
pub(super) fn is_supported_name(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_ascii_lowercase();
    extensions.iter().any(|e| {
        let ext = e.trim().trim_start_matches('.').to_ascii_lowercase();
        !ext.is_empty() && lower.ends_with(&format!(".{ext}"))
    })
}

/// Title text for a manifest entry: drop the trailing extension, then
/// decode percent-escapes (lossy, so broken escapes stay displayable).
pub(super) fn display_title(name: &str) -> String {
    let stem = match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name,
    };
    percent_decode_str(stem).decode_utf8_lossy().into_owned()
}
