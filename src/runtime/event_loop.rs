use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Pane};
use crate::audio::AudioEngine;
use crate::catalog::{CatalogEvent, CatalogResolver};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self { pending_gg: false }
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the
/// catalog workers, the audio thread and MPRIS. Returns `Ok(())` when
/// shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    engine: &AudioEngine,
    resolver: &mut CatalogResolver,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let progress = engine.progress_handle();

    loop {
        // Apply catalog worker replies. A resolve that lost to a newer
        // selection is dropped here rather than clobbering it.
        while let Some(ev) = resolver.try_event() {
            match ev {
                CatalogEvent::Folders(index) => app.on_folders_loaded(index),
                CatalogEvent::Resolved {
                    generation, result, ..
                } => {
                    if resolver.is_stale(generation) {
                        continue;
                    }
                    match result {
                        Ok(playlist) => app.on_playlist_resolved(playlist),
                        Err(err) => app.on_resolve_failed(&err),
                    }
                }
            }
        }

        // Sync playback progress from the audio thread.
        if app.session.current_track().is_some() {
            let snapshot = progress
                .lock()
                .ok()
                .map(|info| (info.elapsed, info.duration, info.finished));
            if let Some((elapsed, duration, finished)) = snapshot {
                app.session.tick(
                    elapsed.as_secs_f64(),
                    duration.map_or(f64::NAN, |d| d.as_secs_f64()),
                );
                if finished && app.session.is_playing() {
                    app.session.mark_ended();
                }
            }
        }

        // The MPRIS handle diffs internally, so this runs every iteration.
        update_mpris(mpris, app);

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, settings, app, engine) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, engine, resolver, control_tx, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_control_cmd(
    cmd: ControlCmd,
    settings: &config::Settings,
    app: &mut App,
    engine: &AudioEngine,
) -> bool {
    match cmd {
        ControlCmd::Quit => {
            engine.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return true;
        }
        ControlCmd::Play => {
            if !app.session.is_playing() {
                app.toggle_play_pause();
            }
        }
        // The session has no stopped-without-a-track transition, so Stop
        // parks the transport in pause.
        ControlCmd::Pause | ControlCmd::Stop => {
            if app.session.is_playing() {
                app.toggle_play_pause();
            }
        }
        ControlCmd::PlayPause => app.toggle_play_pause(),
        ControlCmd::Next => app.next_track(),
        ControlCmd::Prev => app.previous_track(),
        ControlCmd::SetVolume(v) => {
            app.session.set_volume(v.clamp(0.0, 1.0) as f32);
        }
    }

    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    engine: &AudioEngine,
    resolver: &mut CatalogResolver,
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            engine.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
            return true;
        }
        KeyCode::Tab => {
            state.pending_gg = false;
            app.toggle_pane();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.move_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.move_up();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            match app.pane {
                Pane::Folders => {
                    if let Some(id) = app.selected_folder_id().map(str::to_string) {
                        app.begin_loading(id.clone());
                        resolver.request_playlist(&id);
                    }
                }
                Pane::Tracks => app.play_selected_track(),
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            state.pending_gg = false;
            // Behave like MPRIS PlayPause.
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('h') => {
            state.pending_gg = false;
            app.focus_folders();
        }
        KeyCode::Char('l') => {
            state.pending_gg = false;
            app.focus_tracks();
        }
        KeyCode::Char('n') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('b') => {
            state.pending_gg = false;
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            state.pending_gg = false;
            app.scrub_by(settings.controls.scrub_seconds as f64);
        }
        KeyCode::Char('H') => {
            state.pending_gg = false;
            app.scrub_by(-(settings.controls.scrub_seconds as f64));
        }
        KeyCode::Char('m') => {
            state.pending_gg = false;
            app.toggle_mute();
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            state.pending_gg = false;
            app.bump_volume(settings.controls.volume_step);
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            state.pending_gg = false;
            app.bump_volume(-settings.controls.volume_step);
        }
        KeyCode::Char('R') => {
            state.pending_gg = false;
            resolver.request_folders();
        }
        KeyCode::Char(c) => {
            if let Some(digit) = c.to_digit(10) {
                app.seek_to_tenth(digit);
            }
            // g pending should clear on any other printable char.
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}
