//! Configuration loader and schema types.
//!
//! This module exposes the settings schema (catalog, playback, audio,
//! controls, ui) and the helpers that load it from disk and environment.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
