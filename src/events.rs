use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, EXPORT_PATH};

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
    // Ignore key releases on terminals that report them
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Raw mode swallows SIGINT, so Ctrl-C arrives as a key
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),

        // Fetch now instead of waiting out the interval
        KeyCode::Char('r') => app.request_refresh(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = Path::new(EXPORT_PATH);
            match app.export_state(export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::app_with;
    use std::time::Instant;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app_with(vec![]);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = app_with(vec![]);
        press(&mut app, KeyCode::Esc);
        assert!(!app.running);

        let mut app = app_with(vec![]);
        handle_key_event(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn test_any_key_closes_help() {
        let mut app = app_with(vec![]);
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        // 'q' closes help rather than quitting
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_refresh_key_makes_fetch_due() {
        let mut app = app_with(vec![Ok(vec![0x01, 0x00])]);
        app.reload_data().unwrap();
        assert!(!app.fetch_due(Instant::now()));

        press(&mut app, KeyCode::Char('r'));
        assert!(app.fetch_due(Instant::now()));
    }

    #[test]
    fn test_export_without_data_reports_failure() {
        let mut app = app_with(vec![]);
        press(&mut app, KeyCode::Char('e'));
        let msg = app.get_status_message().unwrap();
        assert!(msg.starts_with("Export failed"));
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut app = app_with(vec![]);
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key_event(&mut app, key);
        assert!(app.running);
    }
}
