use std::path::Path;
use std::time::Duration;

/// The media engine seam the session drives.
///
/// Calls are fire-and-forget; progress flows back through the runtime as
/// [`PlaybackSession::tick`](super::PlaybackSession::tick) updates rather
/// than return values, so implementations are free to hand the work to a
/// thread.
pub trait MediaEngine {
    /// Begin loading `path`, replacing any current source. The new source
    /// starts paused at position zero.
    fn set_source(&self, path: &Path);

    /// Start or resume playback of the current source.
    fn play(&self);

    /// Pause playback, keeping the position.
    fn pause(&self);

    /// Jump to an absolute position in the current source.
    fn seek_to(&self, position: Duration);

    /// Apply an output volume in `[0.0, 1.0]`.
    fn set_volume(&self, volume: f32);
}
