use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::state::{AppState, InputMode, Tab, GRID_COLUMNS};

/// Main event handler that dispatches to the appropriate mode handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            state.mark_dirty();
            if key_event.modifiers.contains(KeyModifiers::CONTROL)
                && key_event.code == KeyCode::Char('c')
            {
                state.should_quit = true;
                return;
            }

            match state.mode {
                InputMode::Search => handle_search_input(key_event, state),
                InputMode::Browse => handle_browse(key_event, state),
            }
        }
        Event::Resize(_, _) => state.mark_dirty(),
        _ => {}
    }
}

fn handle_search_input(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Char(c) => state.insert_search_char(c),
        KeyCode::Backspace => state.delete_search_char_before_cursor(),
        KeyCode::Delete => state.delete_search_char_at_cursor(),
        KeyCode::Left => state.move_search_cursor_left(),
        KeyCode::Right => state.move_search_cursor_right(),
        KeyCode::Home => state.move_search_cursor_home(),
        KeyCode::End => state.move_search_cursor_end(),
        KeyCode::Enter | KeyCode::Esc => {
            state.mode = InputMode::Browse;
        }
        _ => {}
    }
}

fn handle_browse(event: KeyEvent, state: &mut AppState) {
    // Keys shared by every tab.
    match event.code {
        KeyCode::Char('q') => {
            state.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            state.next_tab();
            return;
        }
        KeyCode::BackTab => {
            state.previous_tab();
            return;
        }
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            state.select_tab(Tab::ALL[index]);
            return;
        }
        _ => {}
    }

    match state.tab {
        Tab::Home => handle_home(event, state),
        Tab::NearbyShops => handle_nearby_shops(event, state),
        Tab::QrCode | Tab::Community | Tab::Profile => {}
    }
}

fn handle_home(event: KeyEvent, state: &mut AppState) {
    let columns = GRID_COLUMNS as isize;
    match event.code {
        KeyCode::Char('/') | KeyCode::Char('s') => {
            state.mode = InputMode::Search;
            state.move_search_cursor_end();
        }
        KeyCode::Char('c') => state.next_category(),
        KeyCode::Char('r') => state.request_reload(),
        KeyCode::Esc => state.clear_search(),
        KeyCode::Up => state.move_product_selection(-columns),
        KeyCode::Down => state.move_product_selection(columns),
        KeyCode::Left => state.move_product_selection(-1),
        KeyCode::Right => state.move_product_selection(1),
        _ => {}
    }
}

fn handle_nearby_shops(event: KeyEvent, state: &mut AppState) {
    match event.code {
        KeyCode::Up => state.move_location_selection(-1),
        KeyCode::Down => state.move_location_selection(1),
        _ => {}
    }
}
