use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/dacapo/config.toml` or `~/.config/dacapo/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DACAPO__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub playback: PlaybackSettings,
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog: CatalogSettings::default(),
            playback: PlaybackSettings::default(),
            audio: AudioSettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Directory that folder ids resolve against.
    pub root: String,

    /// Folder ids to probe, in presentation order.
    ///
    /// An empty list means "discover the subdirectories of the root".
    pub folders: Vec<String>,

    /// Name of the per-folder manifest file.
    pub manifest_name: String,

    /// File extensions accepted from manifests (case-insensitive, without dot).
    pub extensions: Vec<String>,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            root: "songs".to_string(),
            folders: Vec::new(),
            manifest_name: "manifest.json".to_string(),
            extensions: vec!["mp3".into(), "m4a".into()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Initial output volume (0.0 to 1.0).
    pub volume: f32,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Number of seconds to scrub when pressing `H` / `L`.
    pub scrub_seconds: u64,
    /// Volume change applied per `+` / `-` press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            scrub_seconds: 5,
            volume_step: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,

    /// Whether the folder pane also lists folders whose manifest failed.
    pub show_skipped: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ da capo, from the top ~ ".to_string(),
            show_skipped: true,
        }
    }
}
