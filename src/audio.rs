//! Audio playback behind a dedicated worker thread.
//!
//! The `AudioEngine` handle owns a command channel into the worker, which
//! holds the `rodio` output stream and the currently loaded sink. Progress
//! flows back through a shared snapshot the event loop polls each tick.

mod engine;
mod sink;
mod thread;
mod types;

pub use engine::AudioEngine;
pub use types::{EngineCmd, ProgressHandle, ProgressInfo};
