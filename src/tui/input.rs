use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::board::drag::DropOutcome;
use crate::board::edit::CommitOutcome;
use crate::model::task::{Priority, Status};

use super::app::{App, FormField, FormState, Mode, ToastKind};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match app.mode {
        Mode::Normal => handle_normal(app, key),
        Mode::Search => handle_search(app, key),
        Mode::Create | Mode::Edit => handle_form(app, key),
        Mode::MoveTask => handle_move(app, key),
        Mode::ConfirmClear => handle_confirm_clear(app, key),
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
        }

        KeyCode::Char('/') => app.mode = Mode::Search,

        KeyCode::Char('a') => {
            app.form = FormState::default();
            app.mode = Mode::Create;
        }

        KeyCode::Char('e') | KeyCode::Enter => {
            if let Some(id) = app.selected_id()
                && app.edit.open(&app.board, &id)
                && let Some(draft) = app.edit.draft()
            {
                app.form = FormState::from_draft(draft);
                app.mode = Mode::Edit;
            }
        }

        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(id) = app.selected_id() {
                match app.board.delete(&id) {
                    Ok(true) => {
                        app.clamp_cursor();
                        app.notify("Task deleted", ToastKind::Error);
                    }
                    Ok(false) => {}
                    Err(e) => app.notify(e.to_string(), ToastKind::Error),
                }
            }
        }

        KeyCode::Char('m') | KeyCode::Char(' ') => {
            if let Some(id) = app.selected_id() {
                app.drag.start(id);
                app.mode = Mode::MoveTask;
            }
        }

        KeyCode::Char('t') => app.toggle_theme(),

        KeyCode::Char('C') => {
            if app.board.is_empty() {
                app.notify("The board is already empty", ToastKind::Info);
            } else {
                app.mode = Mode::ConfirmClear;
            }
        }

        KeyCode::Left | KeyCode::Char('h') => {
            app.column = app.column.saturating_sub(1);
            app.clamp_cursor();
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.column + 1 < Status::ALL.len() {
                app.column += 1;
            }
            app.clamp_cursor();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.cursor += 1;
            app.clamp_cursor();
        }

        KeyCode::Esc => {
            if !app.query.is_empty() {
                app.query.clear();
                app.clamp_cursor();
            }
        }

        _ => {}
    }
}

fn handle_search(app: &mut App, key: KeyEvent) {
    match key.code {
        // Keep the query applied
        KeyCode::Enter => app.mode = Mode::Normal,
        // Cancel: drop the query
        KeyCode::Esc => {
            app.query.clear();
            app.clamp_cursor();
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            app.query.pop();
            app.clamp_cursor();
        }
        KeyCode::Char(c) => {
            app.query.push(c);
            app.clamp_cursor();
        }
        _ => {}
    }
}

fn handle_form(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if app.mode == Mode::Edit {
                app.edit.discard();
            }
            app.mode = Mode::Normal;
        }

        KeyCode::Tab | KeyCode::Down => app.form.focus = app.form.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus = app.form.focus.prev(),

        KeyCode::Left if app.form.focus == FormField::Prio => {
            app.form.prio = match app.form.prio {
                Priority::P1 => Priority::P1,
                Priority::P2 => Priority::P1,
                Priority::P3 => Priority::P2,
            };
        }
        KeyCode::Right if app.form.focus == FormField::Prio => {
            app.form.prio = match app.form.prio {
                Priority::P1 => Priority::P2,
                Priority::P2 => Priority::P3,
                Priority::P3 => Priority::P3,
            };
        }

        KeyCode::Backspace => {
            if let Some(text) = app.form.focused_text_mut() {
                text.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(text) = app.form.focused_text_mut() {
                text.push(c);
            } else {
                // Priority row: set directly by number
                match c {
                    '1' => app.form.prio = Priority::P1,
                    '2' => app.form.prio = Priority::P2,
                    '3' => app.form.prio = Priority::P3,
                    _ => {}
                }
            }
        }

        KeyCode::Enter => submit_form(app),

        _ => {}
    }
}

fn submit_form(app: &mut App) {
    let draft = match app.form.to_draft() {
        Ok(draft) => draft,
        Err(msg) => {
            app.notify(msg, ToastKind::Error);
            return;
        }
    };

    match app.mode {
        Mode::Create => match app.board.create(draft) {
            Ok(_) => {
                app.notify("Task added", ToastKind::Success);
                app.mode = Mode::Normal;
            }
            Err(crate::board::BoardError::EmptyTitle) => {
                app.notify("Title cannot be empty", ToastKind::Error);
            }
            Err(e) => app.notify(e.to_string(), ToastKind::Error),
        },
        Mode::Edit => {
            if let Some(session_draft) = app.edit.draft_mut() {
                *session_draft = draft;
            }
            match app.edit.commit(&mut app.board) {
                Ok(CommitOutcome::Updated) => {
                    app.notify("Task updated", ToastKind::Success);
                    app.mode = Mode::Normal;
                }
                Ok(CommitOutcome::TaskGone) => {
                    app.clamp_cursor();
                    app.notify("Task no longer exists", ToastKind::Info);
                    app.mode = Mode::Normal;
                }
                Ok(CommitOutcome::RejectedEmptyTitle) => {
                    app.notify("Title cannot be empty", ToastKind::Error);
                }
                Ok(CommitOutcome::NotEditing) => app.mode = Mode::Normal,
                Err(e) => app.notify(e.to_string(), ToastKind::Error),
            }
        }
        _ => {}
    }
}

fn handle_move(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => {
            app.column = app.column.saturating_sub(1);
        }
        KeyCode::Right | KeyCode::Char('l') => {
            if app.column + 1 < Status::ALL.len() {
                app.column += 1;
            }
        }

        // Drop onto the selected column
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('m') => {
            let target = app.status();
            let outcome = app.drag.drop_on(&mut app.board, target, None);
            app.drag.end();
            app.mode = Mode::Normal;
            app.clamp_cursor();
            match outcome {
                Ok(DropOutcome::Moved) => app.notify("Task moved", ToastKind::Success),
                Ok(DropOutcome::Ignored) => {}
                Err(e) => app.notify(e.to_string(), ToastKind::Error),
            }
        }

        KeyCode::Esc => {
            app.drag.end();
            app.mode = Mode::Normal;
        }

        _ => {}
    }
}

fn handle_confirm_clear(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            match app.board.clear_all() {
                Ok(()) => {
                    app.cursor = 0;
                    app.notify("All tasks cleared", ToastKind::Info);
                }
                Err(e) => app.notify(e.to_string(), ToastKind::Error),
            }
            app.mode = Mode::Normal;
        }
        _ => app.mode = Mode::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::repo::Board;
    use crate::io::store::Store;
    use crate::model::task::TaskDraft;
    use crate::model::theme::ThemeChoice;
    use tempfile::TempDir;

    fn app_with(dir: &TempDir, titles: &[&str]) -> App {
        let mut board = Board::open(Store::open(dir.path()).unwrap());
        for title in titles {
            board
                .create(TaskDraft {
                    title: (*title).into(),
                    ..Default::default()
                })
                .unwrap();
        }
        App::new(board, None, ThemeChoice::Light)
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::from(code));
    }

    #[test]
    fn move_mode_drops_on_the_selected_column() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["Draft"]);
        let id = app.selected_id().unwrap();

        press(&mut app, KeyCode::Char('m'));
        assert_eq!(app.mode, Mode::MoveTask);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.board.get(&id).unwrap().status, Status::InProgress);
        assert!(app.drag.dragging().is_none());
    }

    #[test]
    fn move_mode_escape_cancels_the_gesture() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["Draft"]);
        let id = app.selected_id().unwrap();

        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, Mode::Normal);
        assert!(app.drag.dragging().is_none());
        assert_eq!(app.board.get(&id).unwrap().status, Status::Todo);
    }

    #[test]
    fn create_form_adds_a_task() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &[]);

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.mode, Mode::Create);
        for c in "Ship it".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.board.len(), 1);
        assert_eq!(app.board.tasks().next().unwrap().title, "Ship it");
    }

    #[test]
    fn create_form_rejects_empty_title_and_stays_open() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &[]);

        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Create);
        assert!(app.board.is_empty());
    }

    #[test]
    fn edit_form_commits_through_the_session() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["Old"]);
        let id = app.selected_id().unwrap();

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.mode, Mode::Edit);
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "New".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.board.get(&id).unwrap().title, "New");
    }

    #[test]
    fn edit_escape_discards() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["Keep"]);
        let id = app.selected_id().unwrap();

        press(&mut app, KeyCode::Char('e'));
        for c in "changed".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode, Mode::Normal);
        assert!(!app.edit.is_editing());
        assert_eq!(app.board.get(&id).unwrap().title, "Keep");
    }

    #[test]
    fn search_filters_as_typed_and_esc_clears() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["Alpha", "Beta"]);

        press(&mut app, KeyCode::Char('/'));
        for c in "bet".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        assert_eq!(app.visible_in(Status::Todo).len(), 1);

        press(&mut app, KeyCode::Esc);
        assert!(app.query.is_empty());
        assert_eq!(app.visible_in(Status::Todo).len(), 2);
    }

    #[test]
    fn confirm_clear_requires_a_yes() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["Alpha"]);

        press(&mut app, KeyCode::Char('C'));
        assert_eq!(app.mode, Mode::ConfirmClear);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.board.len(), 1);

        press(&mut app, KeyCode::Char('C'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.board.is_empty());
    }

    #[test]
    fn delete_clamps_the_cursor() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with(&dir, &["Alpha", "Beta"]);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, 1);

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.board.len(), 1);
        assert_eq!(app.cursor, 0);
    }
}
