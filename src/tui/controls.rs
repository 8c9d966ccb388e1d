//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::{App, Page};

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }
    match app.page {
        Page::Overview => handle_overview(app, key),
        Page::NewProject => handle_form(app, key),
        Page::Detail { .. } => handle_detail(app, key),
    }
}

fn handle_overview(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('n') => app.open_form(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Enter => app.open_detail(),
        _ => {}
    }
}

fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.back_to_overview(),
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.add_anlage_row();
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.remove_current_anlage_row();
        }
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.submit_form();
        }
        KeyCode::Tab | KeyCode::Down => app.focus_move(1),
        KeyCode::BackTab | KeyCode::Up => app.focus_move(-1),
        KeyCode::Enter => app.focus_move(1),
        KeyCode::Left => app.cycle_selector(-1),
        KeyCode::Right => app.cycle_selector(1),
        KeyCode::Backspace => app.input_backspace(),
        KeyCode::Char(c) => app.input_char(c),
        _ => {}
    }
}

fn handle_detail(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.back_to_overview(),
        KeyCode::Right | KeyCode::Tab => app.cycle_tab(1),
        KeyCode::Left | KeyCode::BackTab => app.cycle_tab(-1),
        _ => {}
    }
}
