use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedValue, Value};

use crate::catalog::Track;

#[derive(Clone, Debug)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
    SetVolume(f64),
}

/// Playback state as exposed on the bus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackStatus,
    title: Option<String>,
    url: Option<String>,
    length_micros: Option<u64>,
    track_id: Option<ObjectPath<'static>>,
    volume: f64,
}

/// App-side handle for publishing state to the MPRIS service.
///
/// Every setter diffs against the shared state and only nudges the bus
/// thread when something actually changed, so callers may invoke them on
/// every event-loop iteration.
pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<()>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackStatus) {
        let changed = match self.state.lock() {
            Ok(mut s) if s.playback != playback => {
                s.playback = playback;
                true
            }
            _ => false,
        };
        if changed {
            let _ = self.notify.send(());
        }
    }

    /// Publish the current track, or clear the metadata with `(None, None)`.
    pub fn set_track_metadata(&self, index: Option<usize>, track: Option<&Track>) {
        let title = track.map(|t| t.display_title.clone());
        let url = track.map(|t| file_url(&t.path));
        let track_id = index
            .and_then(|i| ObjectPath::try_from(format!("/org/mpris/MediaPlayer2/track/{i}")).ok());

        let changed = match self.state.lock() {
            Ok(mut s) => {
                if s.title == title && s.url == url && s.track_id == track_id {
                    false
                } else {
                    s.title = title;
                    s.url = url;
                    s.track_id = track_id;
                    // Length belongs to the previous track until set again.
                    s.length_micros = None;
                    true
                }
            }
            Err(_) => false,
        };
        if changed {
            let _ = self.notify.send(());
        }
    }

    pub fn set_length(&self, length: Option<Duration>) {
        let micros = length.map(|d| d.as_micros() as u64);
        let changed = match self.state.lock() {
            Ok(mut s) if s.length_micros != micros => {
                s.length_micros = micros;
                true
            }
            _ => false,
        };
        if changed {
            let _ = self.notify.send(());
        }
    }

    pub fn set_volume(&self, volume: f64) {
        let changed = match self.state.lock() {
            Ok(mut s) if s.volume != volume => {
                s.volume = volume;
                true
            }
            _ => false,
        };
        if changed {
            let _ = self.notify.send(());
        }
    }
}

/// Percent-encode a filesystem path into a `file://` URL.
fn file_url(path: &Path) -> String {
    const UNSAFE: &AsciiSet = &CONTROLS
        .add(b' ')
        .add(b'%')
        .add(b'"')
        .add(b'<')
        .add(b'>')
        .add(b'`')
        .add(b'#')
        .add(b'?')
        .add(b'{')
        .add(b'}');
    format!("file://{}", utf8_percent_encode(&path.to_string_lossy(), UNSAFE))
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "dacapo"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        // NOTE: This returns a &'static str; we map state into static strings.
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackStatus::Stopped => "Stopped",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn volume(&self) -> f64 {
        self.state.lock().map(|s| s.volume).unwrap_or(1.0)
    }

    #[zbus(property)]
    fn set_volume(&mut self, volume: f64) {
        let _ = self.tx.send(ControlCmd::SetVolume(volume));
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(track_id) = &s.track_id {
            if let Ok(v) = OwnedValue::try_from(Value::from(track_id.clone())) {
                map.insert("mpris:trackid".to_string(), v);
            }
        }
        if let Some(title) = &s.title {
            if let Ok(v) = OwnedValue::try_from(Value::from(title.clone())) {
                map.insert("xesam:title".to_string(), v);
            }
        }
        if let Some(url) = &s.url {
            if let Ok(v) = OwnedValue::try_from(Value::from(url.clone())) {
                map.insert("xesam:url".to_string(), v);
            }
        }
        if let Some(length) = s.length_micros {
            if let Ok(v) = OwnedValue::try_from(Value::from(length as i64)) {
                map.insert("mpris:length".to_string(), v);
            }
        }
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = std::sync::mpsc::channel::<()>();

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let path = "/org/mpris/MediaPlayer2";

            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection
                .request_name("org.mpris.MediaPlayer2.dacapo")
                .await
            {
                eprintln!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server.at(path, RootIface { tx: tx.clone() }).await {
                eprintln!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    path,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                eprintln!("MPRIS: failed to register player iface: {e}");
                return;
            }

            let player_ref = match object_server.interface::<_, PlayerIface>(path).await {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("MPRIS: failed to look up player iface: {e}");
                    return;
                }
            };

            // Keep the service alive, forwarding state changes from the app
            // thread as PropertiesChanged signals.
            loop {
                Timer::after(Duration::from_millis(200)).await;

                let mut dirty = false;
                while notify_rx.try_recv().is_ok() {
                    dirty = true;
                }
                if !dirty {
                    continue;
                }

                let player = player_ref.get().await;
                let emitter = player_ref.signal_emitter();
                let _ = player.playback_status_changed(emitter).await;
                let _ = player.metadata_changed(emitter).await;
                let _ = player.volume_changed(emitter).await;
            }
        });
    });

    MprisHandle {
        state,
        notify: notify_tx,
    }
}

#[cfg(test)]
mod tests;
