use std::env;

use crate::config;

/// Load settings, falling back to defaults when the config is broken.
pub fn load_settings() -> config::Settings {
    let mut settings = match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                eprintln!("dacapo: invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; failures should not prevent the app from starting.
            eprintln!("dacapo: failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    };

    // A single positional argument overrides the configured catalog root.
    if let Some(root) = env::args().nth(1) {
        settings.catalog.root = root;
    }

    settings
}
