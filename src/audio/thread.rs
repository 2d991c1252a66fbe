use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use rodio::{OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{EngineCmd, ProgressHandle};

/// Read the total length of an audio file from its container metadata.
fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<EngineCmd>,
    progress: ProgressHandle,
    initial_volume: f32,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut current: Option<PathBuf> = None;
        let mut sink: Option<Sink> = None;
        let mut paused = true;
        let mut volume = initial_volume;
        let mut duration: Option<Duration> = None;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(from * (1.0 - t));
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    EngineCmd::SetSource(path) => {
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        duration = probe_duration(&path);
                        let new_sink = create_sink_at(&stream, &path, Duration::ZERO);
                        if let Some(s) = new_sink.as_ref() {
                            s.set_volume(volume);
                        }
                        sink = new_sink;
                        current = Some(path);
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        if let Ok(mut info) = progress.lock() {
                            info.elapsed = Duration::ZERO;
                            info.duration = duration;
                            info.playing = false;
                            info.finished = false;
                        }
                    }

                    EngineCmd::Play => {
                        // A drained sink cannot be resumed; restart the file from the top.
                        let drained = sink.as_ref().is_none_or(|s| s.empty());
                        if drained {
                            let Some(path) = current.as_ref() else {
                                continue;
                            };
                            if let Some(s) = sink.take() {
                                s.stop();
                            }
                            accumulated = Duration::ZERO;
                            let new_sink = create_sink_at(&stream, path, Duration::ZERO);
                            if let Some(s) = new_sink.as_ref() {
                                s.set_volume(volume);
                            }
                            sink = new_sink;
                        }
                        if let Some(s) = sink.as_ref() {
                            s.play();
                            paused = false;
                            started_at = Some(Instant::now());
                            if let Ok(mut info) = progress.lock() {
                                info.elapsed = accumulated;
                                info.playing = true;
                                info.finished = false;
                            }
                        }
                    }

                    EngineCmd::Pause => {
                        if let Some(s) = sink.as_ref() {
                            s.pause();
                        }
                        if !paused {
                            if let Some(st) = started_at.take() {
                                accumulated += st.elapsed();
                            }
                            paused = true;
                            if let Ok(mut info) = progress.lock() {
                                info.elapsed = accumulated;
                                info.playing = false;
                            }
                        }
                    }

                    EngineCmd::SeekTo(position) => {
                        // Scrubbing: rebuild the current sink and skip into the file.
                        // This uses `Source::skip_duration` (works for common formats).
                        let Some(path) = current.as_ref() else {
                            continue;
                        };
                        if let Some(s) = sink.take() {
                            s.stop();
                        }
                        let new_sink = create_sink_at(&stream, path, position);
                        if let Some(s) = new_sink.as_ref() {
                            s.set_volume(volume);
                            if paused {
                                started_at = None;
                            } else {
                                s.play();
                                started_at = Some(Instant::now());
                            }
                        }
                        sink = new_sink;
                        accumulated = position;
                        if let Ok(mut info) = progress.lock() {
                            info.elapsed = position;
                            info.finished = false;
                        }
                    }

                    EngineCmd::SetVolume(v) => {
                        volume = v;
                        if let Some(s) = sink.as_ref() {
                            s.set_volume(v);
                        }
                    }

                    EngineCmd::Quit { fade_out_ms } => {
                        if let Some(ref s) = sink {
                            // Fade out gently before stopping.
                            if !paused {
                                fade_out_sink(s, volume, fade_out_ms);
                            }
                            s.stop();
                        }
                        // Update shared state so the UI doesn't keep showing Playing.
                        if let Ok(mut info) = progress.lock() {
                            info.playing = false;
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic bookkeeping: notice a source that drained on its own,
                    // otherwise publish a fresh elapsed reading.
                    if !paused && sink.as_ref().is_some_and(|s| s.empty()) {
                        paused = true;
                        started_at = None;
                        if let Some(total) = duration {
                            accumulated = total;
                        }
                        if let Ok(mut info) = progress.lock() {
                            info.elapsed = accumulated;
                            info.playing = false;
                            info.finished = true;
                        }
                    } else if !paused {
                        let elapsed =
                            accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                        if let Ok(mut info) = progress.lock() {
                            info.elapsed = elapsed;
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
