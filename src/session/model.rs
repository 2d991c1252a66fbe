//! The transport state machine and its read model.

use std::time::Duration;

use crate::catalog::{Playlist, Track};

use super::engine::MediaEngine;

/// Volume restored by an unmute when no level was ever saved.
const DEFAULT_UNMUTE_VOLUME: f32 = 0.1;

/// Owns the active playlist, current index and transport state.
///
/// Exactly one session exists per run. All mutation happens through the
/// methods below on the event-loop thread, so readers of the accessors
/// never observe a half-applied change (an index moved but the position
/// not yet reset, say).
pub struct PlaybackSession {
    playlist: Playlist,
    current: Option<usize>,
    playing: bool,
    position_secs: f64,
    /// NaN until the engine reports real metadata for the loaded track.
    duration_secs: f64,
    volume: f32,
    muted_restore: f32,
    engine: Box<dyn MediaEngine>,
}

impl PlaybackSession {
    /// A session with an empty playlist and the given starting volume.
    pub fn new(engine: Box<dyn MediaEngine>, volume: f32) -> Self {
        engine.set_volume(volume);
        Self {
            playlist: Playlist::default(),
            current: None,
            playing: false,
            position_secs: 0.0,
            duration_secs: f64::NAN,
            volume,
            muted_restore: DEFAULT_UNMUTE_VOLUME,
            engine,
        }
    }

    /// Install a freshly resolved playlist and auto-load, without
    /// auto-playing, its first track. An empty playlist leaves the
    /// session in the defined empty state with the engine paused.
    pub fn replace_playlist(&mut self, playlist: Playlist) {
        self.playlist = playlist;
        if self.playlist.is_empty() {
            self.current = None;
            self.playing = false;
            self.position_secs = 0.0;
            self.duration_secs = f64::NAN;
            self.engine.pause();
        } else {
            self.load(0, false);
        }
    }

    /// Load the track at `index` from the current playlist. Out-of-range
    /// indices are ignored. Resets the position, forgets the previous
    /// duration, and starts playback only when `autoplay` asks for it;
    /// otherwise the track sits loaded but paused.
    pub fn load(&mut self, index: usize, autoplay: bool) {
        let Some(track) = self.playlist.tracks.get(index) else {
            return;
        };
        self.current = Some(index);
        self.position_secs = 0.0;
        self.duration_secs = f64::NAN;
        self.playing = autoplay;
        self.engine.set_source(&track.path);
        if autoplay {
            self.engine.play();
        }
    }

    /// Flip play/pause. The flag flips even with nothing loaded, so the
    /// transport indicator always answers the key press.
    pub fn toggle_play_pause(&mut self) {
        self.playing = !self.playing;
        if self.playing {
            self.engine.play();
        } else {
            self.engine.pause();
        }
    }

    /// Advance to the next track and play it. No wraparound: at the end
    /// of the playlist this does nothing.
    pub fn next(&mut self) {
        if let Some(i) = self.current {
            if i + 1 < self.playlist.len() {
                self.load(i + 1, true);
            }
        }
    }

    /// Step back to the previous track and play it. No wraparound: at
    /// the first track this does nothing.
    pub fn previous(&mut self) {
        if let Some(i) = self.current {
            if i > 0 {
                self.load(i - 1, true);
            }
        }
    }

    /// Seek to a normalized position within the known duration. Callers
    /// clamp `fraction` to `[0, 1]`; the session does not re-clamp. While
    /// the duration is still unknown there is no target position to
    /// compute and the seek is silently dropped.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if !self.duration_secs.is_finite() {
            return;
        }
        let target = fraction * self.duration_secs;
        self.position_secs = target;
        self.engine.seek_to(Duration::from_secs_f64(target.max(0.0)));
    }

    /// Set the output volume directly. Zero reads as muted without
    /// disturbing the saved unmute level; that path belongs to
    /// [`toggle_mute`](Self::toggle_mute).
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.engine.set_volume(volume);
    }

    /// Mute, remembering the current level; unmute restores it (or the
    /// default level when nothing was ever saved).
    pub fn toggle_mute(&mut self) {
        if self.volume > 0.0 {
            self.muted_restore = self.volume;
            self.volume = 0.0;
        } else {
            self.volume = self.muted_restore;
        }
        self.engine.set_volume(self.volume);
    }

    /// Progress report from the engine. The position is taken as-is; the
    /// duration only once it is a real number.
    pub fn tick(&mut self, position_secs: f64, duration_secs: f64) {
        self.position_secs = position_secs;
        if duration_secs.is_finite() {
            self.duration_secs = duration_secs;
        }
    }

    /// The engine ran out of source; park the transport in pause.
    pub fn mark_ended(&mut self) {
        self.playing = false;
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.playlist.tracks.get(i))
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Muted means "volume is zero", whichever path set it.
    pub fn is_muted(&self) -> bool {
        self.volume == 0.0
    }

    pub fn position_secs(&self) -> f64 {
        self.position_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    /// `"mm:ss / mm:ss"`, each side independently falling back to
    /// `"00:00"` while its value is unknown.
    pub fn position_text(&self) -> String {
        format!(
            "{} / {}",
            format_clock(self.position_secs),
            format_clock(self.duration_secs)
        )
    }

    /// Normalized progress for the seek gauge; `None` until the duration
    /// is known and positive (the renderer decides what that draws as).
    pub fn progress_fraction(&self) -> Option<f64> {
        if self.duration_secs.is_finite() && self.duration_secs > 0.0 {
            Some(self.position_secs / self.duration_secs)
        } else {
            None
        }
    }
}

/// Render seconds as a zero-padded `mm:ss` clock. Negative or
/// non-numeric input renders as `"00:00"`.
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "00:00".to_string();
    }
    let total = seconds as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
