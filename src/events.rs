use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};

use crate::app::{App, View};

/// File written by the in-app export key.
const EXPORT_FILE: &str = "task_duration_chart.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Any key closes the help overlay
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        KeyCode::Tab | KeyCode::BackTab => app.next_view(),
        KeyCode::Char('1') => app.set_view(View::Chart),
        KeyCode::Char('2') => app.set_view(View::Table),

        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Char('r') => {
            if !app.reload_data() && app.load_error.is_none() {
                app.set_status_message("No new data".to_string());
            }
        }
        KeyCode::Char('a') => app.toggle_auto_refresh(),
        KeyCode::Char('u') => app.cycle_unit(),

        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(EXPORT_FILE);
            match app.export_chart(&export_path) {
                Ok(()) => app.set_status_message(format!("Exported to {}", export_path.display())),
                Err(e) => app.set_status_message(format!("Export failed: {}", e)),
            }
        }

        _ => {}
    }
}

/// Handle mouse events: the wheel moves the task selection
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),
        _ => {}
    }
}
