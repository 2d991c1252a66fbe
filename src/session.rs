//! Playback session: the single owner of transport state.
//!
//! Everything the user does to playback goes through
//! [`PlaybackSession`]; the UI and MPRIS layers only read the state it
//! exposes and never mutate it directly.

mod engine;
mod model;

pub use engine::MediaEngine;
pub use model::{PlaybackSession, format_clock};
