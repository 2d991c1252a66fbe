//! Application model types: `App` and `Pane`.
//!
//! The `App` struct holds the catalog view (folders plus skip notices),
//! the cursor state for both panes and the playback session. It performs
//! no I/O itself: the runtime feeds it resolver events and reads back
//! which folder to resolve next.

use crate::catalog::{CatalogError, FolderIndex, FolderRef, Playlist, SkippedFolder};
use crate::session::PlaybackSession;

/// Which pane currently owns the cursor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pane {
    Folders,
    Tracks,
}

/// The main application model.
pub struct App {
    pub session: PlaybackSession,

    pub folders: Vec<FolderRef>,
    pub skipped: Vec<SkippedFolder>,

    pub pane: Pane,
    pub folder_selected: usize,
    pub track_selected: usize,

    /// One-line message shown in the status area (resolve failures and the like).
    pub notice: Option<String>,
    /// Folder id currently being resolved, if any.
    pub loading_folder: Option<String>,
}

impl App {
    /// Create a new `App` around an idle playback session.
    pub fn new(session: PlaybackSession) -> Self {
        Self {
            session,
            folders: Vec::new(),
            skipped: Vec::new(),
            pane: Pane::Folders,
            folder_selected: 0,
            track_selected: 0,
            notice: None,
            loading_folder: None,
        }
    }

    /// Replace the folder listing after a probe pass finished.
    pub fn on_folders_loaded(&mut self, index: FolderIndex) {
        self.folders = index.folders;
        self.skipped = index.skipped;
        if self.folder_selected >= self.folders.len() {
            self.folder_selected = self.folders.len().saturating_sub(1);
        }
        self.notice = None;
    }

    /// Remember which folder a resolve request is in flight for.
    pub fn begin_loading(&mut self, folder: String) {
        self.loading_folder = Some(folder);
    }

    /// Swap in a freshly resolved playlist and move focus to the tracks pane.
    pub fn on_playlist_resolved(&mut self, playlist: Playlist) {
        self.loading_folder = None;
        self.notice = None;
        self.track_selected = 0;
        self.pane = Pane::Tracks;
        self.session.replace_playlist(playlist);
    }

    /// Surface a resolve failure without touching the current playlist.
    pub fn on_resolve_failed(&mut self, err: &CatalogError) {
        self.loading_folder = None;
        self.notice = Some(err.to_string());
    }

    /// Folder id under the cursor, used by the runtime to issue resolves.
    pub fn selected_folder_id(&self) -> Option<&str> {
        self.folders.get(self.folder_selected).map(|f| f.id.as_str())
    }

    /// Handle `Enter` on the tracks pane: start the track under the cursor.
    pub fn play_selected_track(&mut self) {
        self.session.load(self.track_selected, true);
    }

    pub fn toggle_play_pause(&mut self) {
        self.session.toggle_play_pause();
    }

    pub fn next_track(&mut self) {
        self.session.next();
    }

    pub fn previous_track(&mut self) {
        self.session.previous();
    }

    /// Scrub relative to the current position, clamped to the track edges.
    pub fn scrub_by(&mut self, delta_secs: f64) {
        let duration = self.session.duration_secs();
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        let target = (self.session.position_secs() + delta_secs) / duration;
        self.session.seek_to_fraction(target.clamp(0.0, 1.0));
    }

    /// Jump to a tenth of the track, as selected by the digit keys.
    pub fn seek_to_tenth(&mut self, digit: u32) {
        self.session.seek_to_fraction(f64::from(digit.min(9)) / 10.0);
    }

    /// Nudge the volume by `delta`, clamped to the 0.0..=1.0 range.
    pub fn bump_volume(&mut self, delta: f32) {
        let next = (self.session.volume() + delta).clamp(0.0, 1.0);
        self.session.set_volume(next);
    }

    pub fn toggle_mute(&mut self) {
        self.session.toggle_mute();
    }

    /// Switch the cursor between the folders and tracks panes.
    pub fn toggle_pane(&mut self) {
        self.pane = match self.pane {
            Pane::Folders => Pane::Tracks,
            Pane::Tracks => Pane::Folders,
        };
    }

    pub fn focus_folders(&mut self) {
        self.pane = Pane::Folders;
    }

    pub fn focus_tracks(&mut self) {
        self.pane = Pane::Tracks;
    }

    /// Move the cursor down in the active pane, wrapping at the end.
    pub fn move_down(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let cur = self.active_cursor();
        self.set_active_cursor((cur + 1) % len);
    }

    /// Move the cursor up in the active pane, wrapping at the start.
    pub fn move_up(&mut self) {
        let len = self.active_len();
        if len == 0 {
            return;
        }
        let cur = self.active_cursor();
        self.set_active_cursor(if cur == 0 { len - 1 } else { cur - 1 });
    }

    pub fn select_first(&mut self) {
        if self.active_len() > 0 {
            self.set_active_cursor(0);
        }
    }

    pub fn select_last(&mut self) {
        let len = self.active_len();
        if len > 0 {
            self.set_active_cursor(len - 1);
        }
    }

    fn active_len(&self) -> usize {
        match self.pane {
            Pane::Folders => self.folders.len(),
            Pane::Tracks => self.session.playlist().len(),
        }
    }

    fn active_cursor(&self) -> usize {
        match self.pane {
            Pane::Folders => self.folder_selected,
            Pane::Tracks => self.track_selected,
        }
    }

    fn set_active_cursor(&mut self, idx: usize) {
        match self.pane {
            Pane::Folders => self.folder_selected = idx,
            Pane::Tracks => self.track_selected = idx,
        }
    }
}
