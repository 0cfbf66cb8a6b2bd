use crate::app::AppState;
use crate::domain::{Screen, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C quits from anywhere, including text fields
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Capturing => handle_capture_mode(app, key),
        UiMode::AssigningNext => handle_form_mode(app, key),
        UiMode::Normal if app.screen == Screen::AddTask => handle_form_mode(app, key),
        UiMode::Normal => handle_list_mode(app, key),
    }
}

/// Handle keys on the list screens (Inbox, Projects, Next Actions)
fn handle_list_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),

        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Screen navigation
        KeyCode::Tab => app.next_screen(),
        KeyCode::BackTab => app.previous_screen(),
        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            app.switch_screen(Screen::all()[index]);
        }

        // Capture into inbox
        KeyCode::Char('a') => app.start_capture(),

        // Inbox: assign project & context, or move to projects
        KeyCode::Char('n') | KeyCode::Enter => {
            if app.screen == Screen::Inbox {
                app.open_assign_form();
            } else {
                app.move_selected_to_next_action();
            }
        }
        KeyCode::Char('p') => app.move_selected_to_project(),

        // Projects / Next Actions: mark done
        KeyCode::Char('d') | KeyCode::Char(' ') => app.complete_selected(Instant::now()),

        KeyCode::Char('x') | KeyCode::Delete => app.delete_selected(),

        _ => {}
    }
    Ok(false)
}

/// Handle keys while typing an inbox title
fn handle_capture_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_capture(),
        KeyCode::Esc => app.cancel_capture(),
        KeyCode::Backspace => app.capture_backspace(),
        KeyCode::Char(c) => app.capture_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the Add Task screen form and the assign form
fn handle_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let assigning = app.ui_mode == UiMode::AssigningNext;

    match key.code {
        KeyCode::Enter => {
            if assigning {
                app.submit_assign_form();
            } else {
                app.submit_add_form();
            }
        }
        KeyCode::Esc => {
            if assigning {
                app.cancel_assign_form();
            } else {
                app.add_form.clear();
                app.switch_screen(Screen::Inbox);
            }
        }
        KeyCode::Tab | KeyCode::Down => {
            if let Some(form) = app.active_form_mut() {
                form.next_field();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if let Some(form) = app.active_form_mut() {
                form.previous_field();
            }
        }
        KeyCode::Backspace => {
            if let Some(form) = app.active_form_mut() {
                form.backspace();
            }
        }
        KeyCode::Char(c) => {
            if let Some(form) = app.active_form_mut() {
                form.add_char(c);
            }
        }
        _ => {}
    }
    Ok(false)
}
