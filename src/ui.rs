//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::{App, Pane};
use crate::catalog::CatalogError;
use crate::config::{ControlsSettings, UiSettings};

static CONTROLS_MAP: LazyLock<BTreeMap<String, String>> = LazyLock::new(|| {
    let mut map: BTreeMap<String, String> = BTreeMap::new();
    map.insert("j/k".to_string(), "up/down".to_string());
    map.insert("gg/G".to_string(), "top/bottom".to_string());
    map.insert("tab/h/l".to_string(), "switch pane".to_string());
    map.insert("enter".to_string(), "open/play".to_string());
    map.insert("space/p".to_string(), "play/pause".to_string());
    map.insert("b/n".to_string(), "prev/next song".to_string());
    // H/L and +/- are filled dynamically from config.
    map.insert("0-9".to_string(), "jump".to_string());
    map.insert("m".to_string(), "mute".to_string());
    map.insert("R".to_string(), "reload folders".to_string());
    map.insert("q".to_string(), "quit".to_string());
    map
});

/// Render the controls help text, incorporating the configured step sizes.
fn controls_text(controls: &ControlsSettings) -> String {
    let volume_pct = (controls.volume_step * 100.0).round() as u32;
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "gg/G", "tab/h/l", "enter", "space/p", "b/n", "H/L", "0-9", "+/-", "m", "R", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] scrub -/+{}s", controls.scrub_seconds)),
            "+/-" => Some(format!("[+/-] vol -/+{}%", volume_pct)),
            _ => CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Window `total` items into `height` rows, keeping `selected` centered when
/// possible. Returns `(start, end, selected_within_window)`.
///
/// Important: callers only build `ListItem`s for the returned window, which
/// avoids allocating widgets for the entire list on every redraw.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = if selected > half { selected - half } else { 0 };
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(
    frame: &mut Frame,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" dacapo ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box: one text line plus a progress gauge underneath.
    let status = {
        let mut parts: Vec<String> = Vec::new();

        let state = if app.session.current_track().is_none() {
            "Stopped"
        } else if app.session.is_playing() {
            "Playing"
        } else {
            "Paused"
        };
        parts.push(format!(" {}", state));

        if let Some(track) = app.session.current_track() {
            parts.push(format!("Song: {}", track.display_title));
        }

        if app.session.is_muted() {
            parts.push("Vol: muted".to_string());
        } else {
            parts.push(format!(
                "Vol: {}%",
                (app.session.volume() * 100.0).round() as u32
            ));
        }

        if let Some(folder) = &app.loading_folder {
            parts.push(format!("Loading: {}", folder));
        }

        if !app.skipped.is_empty() {
            parts.push(format!("Skipped: {}", app.skipped.len()));
        }

        if let Some(notice) = &app.notice {
            parts.push(format!("! {}", notice));
        }

        parts.join(" • ")
    };

    let status_block = Block::bordered()
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
        .title(" status ");
    let status_inner = status_block.inner(chunks[1]);
    frame.render_widget(status_block, chunks[1]);

    let status_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(status_inner);

    let status_par = Paragraph::new(status).slow_blink().wrap(Wrap { trim: true });
    frame.render_widget(status_par, status_rows[0]);

    let ratio = app
        .session
        .progress_fraction()
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .ratio(ratio)
        .label(app.session.position_text())
        .gauge_style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(gauge, status_rows[1]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(chunks[2]);

    // Folders pane
    {
        let height = panes[0].height.saturating_sub(2) as usize;
        let (start, end, selected_in_view) =
            visible_window(app.folders.len(), height, app.folder_selected);

        let mut items: Vec<ListItem> = app.folders[start..end]
            .iter()
            .map(|f| {
                let mut label = f.title.clone();
                if app.loading_folder.as_deref() == Some(f.id.as_str()) {
                    label.push_str(" (loading)");
                }
                match f.description.as_deref() {
                    Some(desc) => ListItem::new(Line::from(vec![
                        Span::raw(label),
                        Span::styled(
                            format!("  {}", desc),
                            Style::default().add_modifier(Modifier::DIM),
                        ),
                    ])),
                    None => ListItem::new(label),
                }
            })
            .collect();

        // Skipped folders render greyed out below the selectable entries.
        if ui_settings.show_skipped && end == app.folders.len() {
            for s in &app.skipped {
                let reason = match s.reason {
                    CatalogError::Unavailable { .. } => "unavailable",
                    CatalogError::Malformed { .. } => "malformed",
                };
                items.push(
                    ListItem::new(format!("{} ({})", s.id, reason))
                        .style(Style::default().add_modifier(Modifier::DIM)),
                );
            }
        }

        let mut list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" folders "))
            .highlight_symbol("> ");
        if app.pane == Pane::Folders {
            list = list.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        }
        let mut state = ListState::default();
        if !app.folders.is_empty() {
            state.select(Some(selected_in_view));
        }
        frame.render_stateful_widget(list, panes[0], &mut state);
    }

    // Tracks pane
    {
        let playlist = app.session.playlist();
        let height = panes[1].height.saturating_sub(2) as usize;
        let (start, end, selected_in_view) =
            visible_window(playlist.len(), height, app.track_selected);

        let items: Vec<ListItem> = playlist.tracks[start..end]
            .iter()
            .enumerate()
            .map(|(offset, track)| {
                let item = ListItem::new(track.display_title.as_str());
                if app.session.current_index() == Some(start + offset) {
                    item.style(Style::default().add_modifier(Modifier::BOLD))
                } else {
                    item
                }
            })
            .collect();

        let title = if playlist.source_folder.is_empty() {
            " tracks ".to_string()
        } else {
            format!(" {} ", playlist.source_folder)
        };

        let mut list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_symbol("> ");
        if app.pane == Pane::Tracks {
            list = list.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        }
        let mut state = ListState::default();
        if !playlist.is_empty() {
            state.select(Some(selected_in_view));
        }
        frame.render_stateful_widget(list, panes[1], &mut state);
    }

    let footer_text = controls_text(controls_settings);
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[3]);
}
