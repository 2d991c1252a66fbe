//! Audio-related small types and handles.
//!
//! This module defines the command enum understood by the audio thread
//! and the shared progress snapshot it publishes for the event loop.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum EngineCmd {
    /// Swap in a new source file, parked paused at the start.
    SetSource(PathBuf),
    /// Start or resume playback of the current source.
    Play,
    /// Pause playback, keeping the current position.
    Pause,
    /// Jump to an absolute position within the current source.
    SeekTo(Duration),
    /// Set the output volume (0.0 to 1.0).
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone)]
/// Runtime playback progress shared with the event loop.
pub struct ProgressInfo {
    /// Elapsed playback time for the current source.
    pub elapsed: Duration,
    /// Total length of the current source, when the probe knows it.
    pub duration: Option<Duration>,
    /// Whether the engine is actively playing.
    pub playing: bool,
    /// Set once the current source drains on its own.
    pub finished: bool,
}

impl Default for ProgressInfo {
    fn default() -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: None,
            playing: false,
            finished: false,
        }
    }
}

pub type ProgressHandle = Arc<Mutex<ProgressInfo>>;
