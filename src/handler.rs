use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, Focus};

/// Handle a key event, dispatching on the focused pane.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl+C always quits, regardless of focus
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }
    match app.focus {
        Focus::List => handle_list_key(app, key),
        Focus::Search => handle_search_key(app, key),
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.activate_selected(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => app.navigate_up(),
        KeyCode::Char('/') => app.focus = Focus::Search,
        KeyCode::Esc => app.clear_search(),
        KeyCode::Tab => app.toggle_scope(),
        KeyCode::Char(']') | KeyCode::Char('n') => app.cycle_root(1),
        KeyCode::Char('[') | KeyCode::Char('p') => app.cycle_root(-1),
        KeyCode::Char('m') | KeyCode::PageDown => app.load_more(),
        KeyCode::Char('r') => app.reload_library(),
        _ => {}
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.clear_search();
            app.focus = Focus::List;
        }
        KeyCode::Enter => {
            app.commit_search();
            app.focus = Focus::List;
        }
        KeyCode::Tab => app.toggle_scope(),
        KeyCode::Backspace => {
            app.input.delete_char();
            app.on_query_input();
        }
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => app.input.move_home(),
        KeyCode::End => app.input.move_end(),
        KeyCode::Down => app.focus = Focus::List,
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
        KeyCode::Char(c) => {
            // With the recent-searches overlay open, digits recall entries.
            if app.show_history() && c.is_ascii_digit() && c != '0' {
                let index = (c as usize) - ('1' as usize);
                app.use_history_entry(index);
                app.focus = Focus::List;
            } else {
                app.input.insert_char(c);
                app.on_query_input();
            }
        }
        _ => {}
    }
}

/// Handle a mouse event: the wheel moves the list selection.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.select_next(),
        MouseEventKind::ScrollUp => app.select_previous(),
        _ => {}
    }
}
