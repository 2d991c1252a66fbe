use std::sync::Arc;

use crate::app::App;
use crate::audio::AudioEngine;
use crate::catalog::{CatalogResolver, FsCatalog};
use crate::config;
use crate::session::PlaybackSession;

/// Wire the catalog source, audio engine and playback session together and
/// fire the initial folder probe. The probe reply arrives later through the
/// resolver's event channel.
pub fn build(settings: &config::Settings) -> (App, AudioEngine, CatalogResolver) {
    let source = Arc::new(FsCatalog::new(
        settings.catalog.root.as_str(),
        settings.catalog.manifest_name.as_str(),
    ));

    let resolver = CatalogResolver::new(
        source,
        settings.catalog.folders.clone(),
        settings.catalog.extensions.clone(),
    );

    let engine = AudioEngine::new(settings.playback.volume);
    let session = PlaybackSession::new(Box::new(engine.clone()), settings.playback.volume);
    let app = App::new(session);

    resolver.request_folders();

    (app, engine, resolver)
}
