use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Run `service.fetch`(...) for the configured address
    Reload,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App, today: NaiveDate) -> Action {
    use KeyCode::{BackTab, Char, Down, Home, Tab, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    // No navigation while a request is in flight
    if app.is_loading {
        return Action::None;
    }

    let mut action = Action::None;

    match key.code {
        Up | Char('k') => app.select_previous(),
        Down | Char('j') => {
            let rows = app.row_count(today);
            app.select_next(rows);
        }
        Home | Char('g') => app.list_index = 0,
        Tab | BackTab => app.toggle_screen(),
        Char('s') if app.screen == Screen::Schedule => app.toggle_sort(),
        Char('r') => action = Action::Reload,
        _ => {}
    }

    action
}
