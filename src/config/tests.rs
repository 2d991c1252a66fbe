use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_dacapo_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("DACAPO_CONFIG_PATH", "/tmp/dacapo-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/dacapo-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("dacapo")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("dacapo")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[catalog]
root = "/srv/music"
folders = ["tagion", "misc"]
manifest_name = "info.json"
extensions = ["mp3"]

[playback]
volume = 0.4

[audio]
quit_fade_out_ms = 123

[controls]
scrub_seconds = 9
volume_step = 0.1

[ui]
header_text = "hello"
show_skipped = false
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("DACAPO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("DACAPO__PLAYBACK__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.catalog.root, "/srv/music");
    assert_eq!(s.catalog.folders, vec!["tagion".to_string(), "misc".to_string()]);
    assert_eq!(s.catalog.manifest_name, "info.json");
    assert_eq!(s.catalog.extensions, vec!["mp3".to_string()]);
    assert_eq!(s.playback.volume, 0.4);
    assert_eq!(s.audio.quit_fade_out_ms, 123);
    assert_eq!(s.controls.scrub_seconds, 9);
    assert_eq!(s.controls.volume_step, 0.1);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_skipped);
}

#[test]
fn settings_missing_sections_fall_back_to_defaults() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 0.7
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("DACAPO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("DACAPO__CATALOG__ROOT");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 0.7);
    assert_eq!(s.catalog.root, "songs");
    assert!(s.catalog.folders.is_empty());
    assert_eq!(s.catalog.manifest_name, "manifest.json");
    assert_eq!(
        s.catalog.extensions,
        vec!["mp3".to_string(), "m4a".to_string()]
    );
    assert_eq!(s.controls.scrub_seconds, 5);
    assert!(s.ui.show_skipped);
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[playback]
volume = 0.9
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("DACAPO_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("DACAPO__PLAYBACK__VOLUME", "0.25");

    let s = Settings::load().unwrap();
    assert_eq!(s.playback.volume, 0.25);
}

#[test]
fn validate_flags_bad_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.playback.volume = 1.5;
    assert!(s.validate().is_err());
    s.playback.volume = 1.0;

    s.controls.volume_step = 0.0;
    assert!(s.validate().is_err());
    s.controls.volume_step = 0.05;

    s.catalog.extensions.clear();
    assert!(s.validate().is_err());
    s.catalog.extensions = vec!["mp3".into()];

    s.catalog.manifest_name = "   ".into();
    assert!(s.validate().is_err());
}
