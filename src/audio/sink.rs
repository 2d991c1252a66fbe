//! Utilities for creating `rodio` sinks from source files.
//!
//! The helper here encapsulates opening/decoding a file and preparing a
//! paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

/// Create a paused `Sink` for the file at `path`, positioned at `start_at`.
///
/// Manifest entries are never checked against the filesystem up front, so a
/// missing or undecodable file yields `None` here.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Option<Sink> {
    let file = File::open(path).ok()?;

    let source = Decoder::new(BufReader::new(file))
        .ok()?
        // `skip_duration` is our seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(source);
    sink.pause();
    Some(sink)
}
