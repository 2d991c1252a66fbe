use super::*;
use std::path::PathBuf;
use std::sync::mpsc;

fn make_track() -> Track {
    Track {
        name: "Love%20Story.mp3".to_string(),
        path: PathBuf::from("/tmp/music/Love Story.mp3"),
        display_title: "Love Story".to_string(),
    }
}

fn make_handle() -> (MprisHandle, Arc<Mutex<SharedState>>, mpsc::Receiver<()>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();
    let handle = MprisHandle {
        state: state.clone(),
        notify: notify_tx,
    };
    (handle, state, notify_rx)
}

#[test]
fn set_track_metadata_sets_and_clears_shared_state() {
    let (handle, state, _notify_rx) = make_handle();

    let track = make_track();
    handle.set_track_metadata(Some(7), Some(&track));
    handle.set_length(Some(Duration::from_micros(1_234_567)));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Love Story"));
        assert_eq!(s.url.as_deref(), Some("file:///tmp/music/Love%20Story.mp3"));
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_track_metadata(None, None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }
}

#[test]
fn setters_notify_only_on_change() {
    let (handle, _state, notify_rx) = make_handle();

    handle.set_playback(PlaybackStatus::Playing);
    assert!(notify_rx.try_recv().is_ok());

    handle.set_playback(PlaybackStatus::Playing);
    assert!(notify_rx.try_recv().is_err());

    handle.set_volume(0.5);
    assert!(notify_rx.try_recv().is_ok());
    handle.set_volume(0.5);
    assert!(notify_rx.try_recv().is_err());

    let track = make_track();
    handle.set_track_metadata(Some(0), Some(&track));
    assert!(notify_rx.try_recv().is_ok());
    handle.set_track_metadata(Some(0), Some(&track));
    assert!(notify_rx.try_recv().is_err());
}

#[test]
fn playback_status_maps_state_to_bus_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackStatus::Stopped;
    }
    assert_eq!(iface.playback_status(), "Stopped");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackStatus::Playing;
    }
    assert_eq!(iface.playback_status(), "Playing");

    {
        let mut s = state.lock().unwrap();
        s.playback = PlaybackStatus::Paused;
    }
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    {
        let mut s = state.lock().unwrap();
        s.title = Some("Title".to_string());
        s.url = Some("file:///tmp/test.mp3".to_string());
        s.length_micros = Some(42);
        s.track_id = ObjectPath::try_from("/org/mpris/MediaPlayer2/track/1")
            .ok()
            .map(|p| p.to_owned());
    }

    let map = iface.metadata();
    for k in ["mpris:trackid", "xesam:title", "xesam:url", "mpris:length"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn volume_setter_forwards_a_control_command() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let mut iface = PlayerIface { tx, state };

    iface.set_volume(0.5);
    assert!(matches!(rx.try_recv(), Ok(ControlCmd::SetVolume(v)) if v == 0.5));
}

#[test]
fn file_url_percent_encodes_reserved_characters() {
    let url = file_url(std::path::Path::new("/music/100% Pure/a b.mp3"));
    assert_eq!(url, "file:///music/100%25%20Pure/a%20b.mp3");
}
