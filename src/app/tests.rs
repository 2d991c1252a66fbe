use super::*;
use crate::catalog::{CatalogError, FolderIndex, FolderRef, Playlist, Track};
use crate::session::{MediaEngine, PlaybackSession};
use std::path::PathBuf;

struct NullEngine;

impl MediaEngine for NullEngine {
    fn set_source(&self, _path: &std::path::Path) {}
    fn play(&self) {}
    fn pause(&self) {}
    fn seek_to(&self, _position: std::time::Duration) {}
    fn set_volume(&self, _volume: f32) {}
}

fn app() -> App {
    App::new(PlaybackSession::new(Box::new(NullEngine), 1.0))
}

fn folder(id: &str) -> FolderRef {
    FolderRef {
        id: id.to_string(),
        title: id.to_string(),
        description: None,
    }
}

fn index_of(ids: &[&str]) -> FolderIndex {
    FolderIndex {
        folders: ids.iter().map(|id| folder(id)).collect(),
        skipped: Vec::new(),
    }
}

fn playlist(names: &[&str]) -> Playlist {
    Playlist {
        source_folder: "demo".to_string(),
        tracks: names
            .iter()
            .map(|n| Track {
                name: n.to_string(),
                path: PathBuf::from("/music/demo").join(n),
                display_title: n.to_string(),
            })
            .collect(),
    }
}

#[test]
fn folders_loaded_clamps_cursor() {
    let mut app = app();
    app.on_folders_loaded(index_of(&["a", "b", "c"]));
    app.select_last();
    assert_eq!(app.folder_selected, 2);

    app.on_folders_loaded(index_of(&["a"]));
    assert_eq!(app.folder_selected, 0);

    app.on_folders_loaded(index_of(&[]));
    assert_eq!(app.folder_selected, 0);
}

#[test]
fn resolved_playlist_switches_to_tracks_pane() {
    let mut app = app();
    app.notice = Some("stale".into());

    app.on_playlist_resolved(playlist(&["one.mp3", "two.mp3"]));

    assert_eq!(app.pane, Pane::Tracks);
    assert_eq!(app.track_selected, 0);
    assert!(app.notice.is_none());
    assert!(app.loading_folder.is_none());
    assert_eq!(app.session.playlist().len(), 2);
    assert_eq!(app.session.current_index(), Some(0));
}

#[test]
fn resolve_failure_keeps_playlist_and_sets_notice() {
    let mut app = app();
    app.on_playlist_resolved(playlist(&["one.mp3"]));
    app.begin_loading("misc".into());

    let err = CatalogError::Unavailable {
        folder: "misc".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    };
    app.on_resolve_failed(&err);

    assert!(app.loading_folder.is_none());
    assert!(app.notice.as_deref().unwrap().contains("misc"));
    assert_eq!(app.session.playlist().len(), 1);
}

#[test]
fn cursor_wraps_in_active_pane() {
    let mut app = app();
    app.on_folders_loaded(index_of(&["a", "b"]));

    app.move_down();
    assert_eq!(app.folder_selected, 1);
    app.move_down();
    assert_eq!(app.folder_selected, 0);
    app.move_up();
    assert_eq!(app.folder_selected, 1);

    app.on_playlist_resolved(playlist(&["x.mp3", "y.mp3", "z.mp3"]));
    assert_eq!(app.pane, Pane::Tracks);
    app.select_last();
    assert_eq!(app.track_selected, 2);
    app.move_down();
    assert_eq!(app.track_selected, 0);
}

#[test]
fn cursor_is_inert_when_pane_is_empty() {
    let mut app = app();
    app.move_down();
    app.move_up();
    app.select_last();
    assert_eq!(app.folder_selected, 0);
}

#[test]
fn toggle_pane_flips_focus() {
    let mut app = app();
    assert_eq!(app.pane, Pane::Folders);
    app.toggle_pane();
    assert_eq!(app.pane, Pane::Tracks);
    app.toggle_pane();
    assert_eq!(app.pane, Pane::Folders);
}

#[test]
fn scrub_clamps_at_track_edges() {
    let mut app = app();
    app.on_playlist_resolved(playlist(&["one.mp3"]));

    app.session.tick(2.0, 100.0);
    app.scrub_by(-10.0);
    assert_eq!(app.session.position_secs(), 0.0);

    app.session.tick(95.0, 100.0);
    app.scrub_by(10.0);
    assert_eq!(app.session.position_secs(), 100.0);
}

#[test]
fn scrub_without_duration_is_ignored() {
    let mut app = app();
    app.on_playlist_resolved(playlist(&["one.mp3"]));

    app.scrub_by(5.0);
    assert_eq!(app.session.position_secs(), 0.0);
}

#[test]
fn seek_to_tenth_maps_digit_keys() {
    let mut app = app();
    app.on_playlist_resolved(playlist(&["one.mp3"]));
    app.session.tick(0.0, 200.0);

    app.seek_to_tenth(3);
    assert_eq!(app.session.position_secs(), 60.0);

    app.seek_to_tenth(0);
    assert_eq!(app.session.position_secs(), 0.0);

    // Out-of-range digits saturate at nine tenths.
    app.seek_to_tenth(12);
    assert_eq!(app.session.position_secs(), 180.0);
}

#[test]
fn bump_volume_clamps_at_bounds() {
    let mut app = app();

    app.bump_volume(0.05);
    assert_eq!(app.session.volume(), 1.0);

    app.bump_volume(-0.3);
    assert!((app.session.volume() - 0.7).abs() < 1e-6);

    app.bump_volume(-2.0);
    assert_eq!(app.session.volume(), 0.0);
    assert!(app.session.is_muted());

    app.bump_volume(2.0);
    assert_eq!(app.session.volume(), 1.0);
}

#[test]
fn play_selected_track_starts_under_cursor() {
    let mut app = app();
    app.on_playlist_resolved(playlist(&["x.mp3", "y.mp3", "z.mp3"]));

    app.move_down();
    app.play_selected_track();

    assert_eq!(app.session.current_index(), Some(1));
    assert!(app.session.is_playing());
}

#[test]
fn selected_folder_id_follows_cursor() {
    let mut app = app();
    assert!(app.selected_folder_id().is_none());

    app.on_folders_loaded(index_of(&["first", "second"]));
    assert_eq!(app.selected_folder_id(), Some("first"));

    app.move_down();
    assert_eq!(app.selected_folder_id(), Some("second"));
}
