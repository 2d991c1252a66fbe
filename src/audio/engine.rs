use std::path::Path;
use std::sync::mpsc::{self, SendError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::session::MediaEngine;

use super::thread::spawn_audio_thread;
use super::types::{EngineCmd, ProgressHandle, ProgressInfo};

/// Handle to the audio worker thread.
///
/// Clones are cheap and share the command channel, the progress state and
/// the join handle, so any clone can drive playback and exactly one
/// `quit_softly` call reaps the thread.
#[derive(Clone)]
pub struct AudioEngine {
    tx: Sender<EngineCmd>,
    progress: ProgressHandle,
    join: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl AudioEngine {
    pub fn new(initial_volume: f32) -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let progress: ProgressHandle = Arc::new(Mutex::new(ProgressInfo::default()));
        let handle = spawn_audio_thread(rx, progress.clone(), initial_volume);

        Self {
            tx,
            progress,
            join: Arc::new(Mutex::new(Some(handle))),
        }
    }

    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    pub fn send(&self, cmd: EngineCmd) -> Result<(), SendError<EngineCmd>> {
        self.tx.send(cmd)
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(EngineCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl MediaEngine for AudioEngine {
    fn set_source(&self, path: &Path) {
        let _ = self.send(EngineCmd::SetSource(path.to_path_buf()));
    }

    fn play(&self) {
        let _ = self.send(EngineCmd::Play);
    }

    fn pause(&self) {
        let _ = self.send(EngineCmd::Pause);
    }

    fn seek_to(&self, position: Duration) {
        let _ = self.send(EngineCmd::SeekTo(position));
    }

    fn set_volume(&self, volume: f32) {
        let _ = self.send(EngineCmd::SetVolume(volume));
    }
}
