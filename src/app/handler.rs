use crate::app::event::AppEvent;
use crate::app::state::*;
use crate::bingo::presenter::Draw;
use crate::ui::layout;
use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Rect;
use std::time::Instant;

pub fn handle_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Terminal(CEvent::Key(key)) if key.kind == KeyEventKind::Press => {
            state.dirty = true;
            handle_key(state, key);
        }
        AppEvent::Terminal(CEvent::Mouse(mouse)) => handle_mouse(state, mouse),
        AppEvent::Terminal(CEvent::Resize(width, height)) => {
            state.area = Rect::new(0, 0, width, height);
            state.dirty = true;
        }
        AppEvent::Terminal(_) => {}
        AppEvent::Tick => {
            if state.expire_status(Instant::now()) {
                state.dirty = true;
            }
        }
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    if state.editing.is_some() {
        handle_edit_key(state, key);
        return;
    }

    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            state.view = state.view.other();
            return;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
            return;
        }
        _ => {}
    }

    match state.view {
        View::Board => handle_board_key(state, key),
        View::Presenter => handle_presenter_key(state, key),
    }
}

fn handle_board_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => state.move_cursor(0, -1),
        KeyCode::Right | KeyCode::Char('l') => state.move_cursor(0, 1),
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor(-1, 0),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor(1, 0),
        KeyCode::Char(' ') | KeyCode::Enter => {
            let index = state.cursor;
            toggle(state, index);
        }
        KeyCode::Char('r') => {
            if let Err(e) = state.session.reset_highlights() {
                state.error(e.to_string());
            }
        }
        KeyCode::Char('s') => {
            if let Err(e) = state.session.reshuffle() {
                state.error(e.to_string());
            }
        }
        KeyCode::Char('e') => {
            let current = state
                .session
                .board()
                .and_then(|mgr| mgr.board().cell(state.cursor))
                .map(str::to_string);
            match current {
                Some(text) => state.editing = Some(CellEdit::new(state.cursor, &text)),
                None => state.error("The board is not available"),
            }
        }
        _ => {}
    }
}

fn handle_presenter_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Enter => match state.session.draw_next() {
            Ok(Draw::Item(_)) => state.presenter_notice = None,
            Ok(Draw::Exhausted) => state.presenter_notice = Some("All items have been shown!"),
            Err(e) => state.error(e.to_string()),
        },
        KeyCode::Char('r') => match state.session.reset_presenter() {
            Ok(()) => state.presenter_notice = None,
            Err(e) => state.error(e.to_string()),
        },
        _ => {}
    }
}

fn handle_edit_key(state: &mut AppState, key: KeyEvent) {
    let Some(edit) = state.editing.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            edit.insert_char(c)
        }
        KeyCode::Backspace => edit.delete_back(),
        KeyCode::Delete => edit.delete_forward(),
        KeyCode::Left => edit.move_left(),
        KeyCode::Right => edit.move_right(),
        KeyCode::Home => edit.move_home(),
        KeyCode::End => edit.move_end(),
        KeyCode::Esc => state.editing = None,
        KeyCode::Enter => {
            if let Some(edit) = state.editing.take() {
                let text = edit.text.trim().to_string();
                if let Err(e) = state.session.edit_cell(edit.index, text) {
                    state.error(e.to_string());
                }
            }
        }
        _ => {}
    }
}

fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.view != View::Board || state.editing.is_some() {
        return;
    }
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let hit = layout::cell_at(
        state.area,
        state.config.ui.show_help,
        mouse.column,
        mouse.row,
    );
    if let Some(index) = hit {
        state.cursor = index;
        state.dirty = true;
        toggle(state, index);
    }
}

fn toggle(state: &mut AppState, index: usize) {
    if let Err(e) = state.session.toggle_cell(index) {
        state.error(e.to_string());
    }
}
