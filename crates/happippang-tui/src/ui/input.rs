//! Keyboard input handling for the TUI.
//!
//! This module handles all keyboard events and translates them into
//! application state changes.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{
    can_add_password_char, can_add_username_char, App, AppState, InventoryFocus, LoginFocus,
    PageView, PAGE_SCROLL_SIZE,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Handle quit confirmation
    if matches!(app.state, AppState::ConfirmingQuit) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                app.state = AppState::Quitting;
                return Ok(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.state = AppState::Normal;
            }
            _ => {}
        }
        return Ok(false);
    }

    match app.view {
        PageView::Login => handle_login_input(app, key).await,
        PageView::Inventory(_) => handle_inventory_input(app, key).await,
        PageView::Placeholder | PageView::Blank => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                app.state = AppState::ConfirmingQuit;
            }
            Ok(false)
        }
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Esc => {
            // Quit if on login screen
            app.state = AppState::Quitting;
            return Ok(true);
        }
        KeyCode::Down | KeyCode::Tab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Username,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            app.login_focus = match app.login_focus {
                LoginFocus::Username => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Username,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match app.login_focus {
            LoginFocus::Username => app.login_focus = LoginFocus::Password,
            // Submitting from the password field is the common path
            LoginFocus::Password | LoginFocus::Button => app.attempt_login().await,
        },
        KeyCode::Backspace => match app.login_focus {
            LoginFocus::Username => {
                app.login_username.pop();
            }
            LoginFocus::Password => {
                app.login_password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match app.login_focus {
            LoginFocus::Username => {
                if can_add_username_char(app.login_username.len(), c) {
                    app.login_username.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(app.login_password.len(), c) {
                    app.login_password.push(c);
                }
            }
            LoginFocus::Button => {}
        },
        _ => {}
    }
    Ok(false)
}

async fn handle_inventory_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if app.inventory_focus == InventoryFocus::Date {
        handle_date_input(app, key);
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => {
            app.commit_edit();
            app.state = AppState::ConfirmingQuit;
        }
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(-1),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Enter => app.move_selection(1),
        KeyCode::PageUp => app.move_selection(-(PAGE_SCROLL_SIZE as isize)),
        KeyCode::PageDown => app.move_selection(PAGE_SCROLL_SIZE as isize),
        KeyCode::Home => {
            let selection = app.grid_selection as isize;
            app.move_selection(-selection);
        }
        KeyCode::End => app.move_selection(isize::MAX),
        KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => app.switch_field(),
        KeyCode::Char(']') => app.next_store(),
        KeyCode::Char('[') => app.prev_store(),
        KeyCode::Char('>') => {
            app.commit_edit();
            app.form.shift_date(1);
        }
        KeyCode::Char('<') => {
            app.commit_edit();
            app.form.shift_date(-1);
        }
        KeyCode::Char('d') => app.start_date_edit(),
        KeyCode::Char('s') => app.submit_inventory(),
        KeyCode::Char('x') => app.logout().await,
        KeyCode::Backspace => app.pop_digit(),
        KeyCode::Char(c) if c.is_ascii_digit() => app.push_digit(c),
        _ => {}
    }
    Ok(false)
}

fn handle_date_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_date_edit(),
        KeyCode::Enter => app.finish_date_edit(),
        KeyCode::Backspace => {
            app.date_input.pop();
        }
        KeyCode::Char(c) => app.push_date_char(c),
        _ => {}
    }
}
