/*
[INPUT]:  Crossterm key and mouse events
[OUTPUT]: TUI event routing to modal, query panel, or list views
[POS]:    TUI event module
[UPDATE]: When adding hotkeys or changing event routing
*/

use crossterm::event::{KeyCode, MouseEvent};

use super::app::{AppState, Tab};
use super::ui::modal::ModalAction;

/// Handles key events for the TUI.
///
/// Returns `true` if quit is requested, `false` otherwise.
pub(super) fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    if app.session_expired {
        return matches!(key, KeyCode::Char('q') | KeyCode::Esc);
    }

    if app.query_panel.is_some() {
        handle_panel_key_event(app, key);
        return false;
    }

    if app.add_account_modal.is_some() {
        handle_modal_key_event(app, key);
        return false;
    }

    match key {
        KeyCode::Char('q') => true,
        KeyCode::Tab => {
            app.next_tab();
            false
        }
        KeyCode::Char('1') => {
            app.set_tab(Tab::Accounts);
            false
        }
        KeyCode::Char('2') => {
            app.set_tab(Tab::Jobs);
            false
        }
        KeyCode::Char('3') => {
            app.set_tab(Tab::Logs);
            false
        }
        KeyCode::Char('a') => {
            if app.current_tab == Tab::Accounts {
                app.open_add_account();
            }
            false
        }
        KeyCode::Enter => {
            if app.current_tab == Tab::Accounts {
                app.open_query_panel();
            }
            false
        }
        KeyCode::Up => {
            app.move_selection(-1);
            false
        }
        KeyCode::Down => {
            app.move_selection(1);
            false
        }
        _ => false,
    }
}

fn handle_panel_key_event(app: &mut AppState, key: KeyCode) {
    // A closing panel is inert until the unmount delay elapses.
    if app.query_panel.as_ref().is_none_or(|panel| panel.is_closing()) {
        return;
    }
    match key {
        KeyCode::Esc => app.begin_close_panel(),
        KeyCode::Enter => app.submit_panel_query(),
        KeyCode::Backspace => {
            if let Some(panel) = app.query_panel.as_mut() {
                panel.input_backspace();
            }
        }
        KeyCode::Char(ch) => {
            if let Some(panel) = app.query_panel.as_mut() {
                panel.input_char(ch);
            }
        }
        _ => {}
    }
}

fn handle_modal_key_event(app: &mut AppState, key: KeyCode) {
    let Some(modal) = app.add_account_modal.as_mut() else {
        return;
    };
    match modal.handle_key(key) {
        ModalAction::Cancel => app.close_modal(),
        ModalAction::Submit => app.submit_add_account(),
        ModalAction::None => {}
    }
}

/// Mouse input only drives the query panel's column resize; everything else
/// ignores it.
pub(super) fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent) {
    if app.session_expired {
        return;
    }
    if let Some(panel) = app.query_panel.as_mut() {
        if !panel.is_closing() {
            panel.handle_mouse(mouse);
        }
    }
}
