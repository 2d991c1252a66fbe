use std::time::Duration;

use crate::app::App;
use crate::mpris::{MprisHandle, PlaybackStatus};

/// Push the session's status, track metadata and volume to the MPRIS
/// service. The handle diffs every setter against its shared state, so
/// calling this on every event-loop iteration is fine.
pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let session = &app.session;

    let status = if session.current_track().is_none() {
        PlaybackStatus::Stopped
    } else if session.is_playing() {
        PlaybackStatus::Playing
    } else {
        PlaybackStatus::Paused
    };

    mpris.set_playback(status);
    mpris.set_track_metadata(session.current_index(), session.current_track());

    let duration = session.duration_secs();
    let length = if duration.is_finite() && duration >= 0.0 {
        Some(Duration::from_secs_f64(duration))
    } else {
        None
    };
    mpris.set_length(length);

    mpris.set_volume(f64::from(session.volume()));
}
