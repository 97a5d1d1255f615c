use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::time::Duration;

use crate::app::form::{EmployeeForm, FormField, FormMode};
use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, ModalState};
use crate::backend::Employee;
use crate::directory::{Answer, DeleteOutcome};
use crate::search::StatusFilter;
use crate::ui;
use crate::ui::columns::RowActions;

/// Whether the loop keeps going after a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) == Flow::Quit {
                    break;
                }
            }
        }
    }

    tracing::info!(uptime = ?app.started_at.elapsed(), "leaving event loop");
    Ok(())
}

/// Dispatch one key press according to the current input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Flow {
    match app.input_mode {
        InputMode::Normal => return handle_normal_key(app, key),
        InputMode::Search => handle_search_key(app, key),
        InputMode::Modal => handle_modal_key(app, key.code),
    }
    Flow::Continue
}

impl RowActions for AppState {
    fn on_edit(&mut self, employee: &Employee) {
        self.open_modal(ModalState::Form(EmployeeForm::edit(employee)));
    }

    fn on_delete(&mut self, id: &str) {
        let name = match self.directory.get(id) {
            Some(e) => e.name.clone(),
            None => return,
        };
        self.open_modal(ModalState::DeleteConfirm {
            id: id.to_string(),
            name,
            selected: 1,
        });
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> Flow {
    let Some(action) = app.keymap.resolve(&key) else {
        return Flow::Continue;
    };
    match action {
        KeyAction::Quit => return Flow::Quit,
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::OpenFilterMenu => {
            let current = app.directory.status_filter();
            let selected = StatusFilter::CHOICES
                .iter()
                .position(|c| *c == current)
                .unwrap_or(0);
            app.open_modal(ModalState::FilterMenu { selected });
        }
        KeyAction::OpenHelp => app.open_modal(ModalState::Help { scroll: 0 }),
        KeyAction::AddEmployee => app.open_modal(ModalState::Form(EmployeeForm::add())),
        KeyAction::EditSelection => {
            if let Some(e) = app.selected_employee() {
                app.on_edit(&e);
            }
        }
        KeyAction::DeleteSelection => {
            if let Some(e) = app.selected_employee() {
                app.on_delete(&e.id);
            }
        }
        KeyAction::SortBy(field) => {
            app.directory.toggle_sort(field);
            app.selected_row = 0;
        }
        KeyAction::ReverseSort => {
            app.directory.reverse_sort();
            app.selected_row = 0;
        }
        KeyAction::Reload => match app.directory.load() {
            Ok(n) => {
                app.status_message = Some(format!("Loaded {n} employees"));
                app.clamp_selection();
            }
            Err(e) => {
                app.selected_row = 0;
                app.report_error("Reload failed", &e);
            }
        },
        KeyAction::MoveUp => {
            app.selected_row = app.selected_row.saturating_sub(1);
        }
        KeyAction::MoveDown => {
            let len = app.directory.view().rows.len();
            if app.selected_row + 1 < len {
                app.selected_row += 1;
            }
        }
        KeyAction::PrevPage => {
            if app.directory.prev_page() {
                app.selected_row = 0;
            }
        }
        KeyAction::NextPage => {
            if app.directory.next_page() {
                app.selected_row = 0;
            }
        }
        KeyAction::FirstPage => {
            app.directory.first_page();
            app.selected_row = 0;
        }
        KeyAction::LastPage => {
            app.directory.last_page();
            app.selected_row = 0;
        }
        KeyAction::Ignore => {}
    }
    Flow::Continue
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Down => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.directory.set_query("");
            app.selected_row = 0;
        }
        KeyCode::Backspace => {
            let mut q = app.directory.query().to_string();
            q.pop();
            app.directory.set_query(q);
            app.selected_row = 0;
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut q = app.directory.query().to_string();
            q.push(c);
            app.directory.set_query(q);
            app.selected_row = 0;
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::Form(form)) => match code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Tab | KeyCode::Down => form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
            KeyCode::Left | KeyCode::Right if form.focus == FormField::Status => {
                form.toggle_status();
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.input_char(c),
            KeyCode::Enter => {
                if form.focus == FormField::Cancel {
                    app.close_modal();
                } else if let Some(draft) = form.submit() {
                    let mode = form.mode.clone();
                    app.close_modal();
                    apply_form(app, mode, draft);
                }
            }
            _ => {}
        },
        Some(ModalState::DeleteConfirm { id, selected, .. }) => match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h') | KeyCode::Char('l') => {
                *selected = 1 - (*selected).min(1);
            }
            KeyCode::Char('y') => {
                let id = id.clone();
                resolve_delete(app, &id, true);
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                let id = id.clone();
                resolve_delete(app, &id, false);
            }
            KeyCode::Enter => {
                let yes = *selected == 0;
                let id = id.clone();
                resolve_delete(app, &id, yes);
            }
            _ => {}
        },
        Some(ModalState::FilterMenu { selected }) => match code {
            KeyCode::Esc => app.close_modal(),
            KeyCode::Up | KeyCode::Char('k') => {
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if *selected + 1 < StatusFilter::CHOICES.len() {
                    *selected += 1;
                }
            }
            KeyCode::Enter => {
                let choice = StatusFilter::CHOICES
                    .get(*selected)
                    .copied()
                    .unwrap_or_default();
                app.directory.set_status_filter(choice);
                app.selected_row = 0;
                app.close_modal();
            }
            _ => {}
        },
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_modal();
            }
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            _ => {}
        },
        Some(ModalState::Info { .. }) => match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => app.close_modal(),
            _ => {}
        },
        None => app.close_modal(),
    }
}

fn apply_form(app: &mut AppState, mode: FormMode, draft: crate::backend::EmployeeDraft) {
    match mode {
        FormMode::Add => match app.directory.add(&draft) {
            Ok(saved) => {
                app.selected_row = 0;
                app.status_message = Some(format!("Added {}", saved.name));
            }
            Err(e) => app.report_error("Add failed", &e),
        },
        FormMode::Edit { id } => match app.directory.update(&id, &draft) {
            Ok(saved) => {
                app.status_message = Some(format!("Updated {}", saved.name));
                app.clamp_selection();
            }
            Err(e) => app.report_error("Update failed", &e),
        },
    }
}

fn resolve_delete(app: &mut AppState, id: &str, yes: bool) {
    app.close_modal();
    match app.directory.delete(id, &mut Answer(yes)) {
        Ok(DeleteOutcome::Cancelled) => {}
        Ok(DeleteOutcome::Deleted) => {
            app.status_message = Some("Employee deleted".to_string());
            app.clamp_selection();
        }
        Ok(DeleteOutcome::Rejected) => {
            app.report_error("Delete failed", &"the backend did not delete the record");
        }
        Err(e) => app.report_error("Delete failed", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{EmployeeDraft, EmployeeSource, MemoryAdapter};
    use crate::directory::Directory;

    fn app() -> AppState {
        let mut d = Directory::new(Box::new(MemoryAdapter::seeded()));
        d.load().unwrap();
        AppState::new(d)
    }

    fn press(app: &mut AppState, code: KeyCode) -> Flow {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn q_quits_only_in_normal_mode() {
        let mut a = app();
        press(&mut a, KeyCode::Char('/'));
        assert_eq!(press(&mut a, KeyCode::Char('q')), Flow::Continue);
        assert_eq!(a.directory.query(), "q");
        press(&mut a, KeyCode::Esc);
        assert_eq!(a.directory.query(), "");
        assert_eq!(press(&mut a, KeyCode::Char('q')), Flow::Quit);
    }

    #[test]
    fn control_chords_do_not_type_into_search() {
        let mut a = app();
        press(&mut a, KeyCode::Char('/'));
        type_str(&mut a, "em");
        handle_key(&mut a, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(a.directory.query(), "em");
        assert_eq!(a.input_mode, InputMode::Search);
    }

    #[test]
    fn reload_failure_opens_info_and_empties_table() {
        struct Offline;
        impl EmployeeSource for Offline {
            fn describe(&self) -> String {
                "offline".into()
            }
            fn list(&mut self) -> crate::error::Result<Vec<Employee>> {
                Err(crate::error::simple_error("connection refused"))
            }
            fn create(&mut self, _: &EmployeeDraft) -> crate::error::Result<Employee> {
                Err(crate::error::simple_error("connection refused"))
            }
            fn update(&mut self, _: &str, _: &EmployeeDraft) -> crate::error::Result<Employee> {
                Err(crate::error::simple_error("connection refused"))
            }
            fn delete(&mut self, _: &str) -> crate::error::Result<bool> {
                Err(crate::error::simple_error("connection refused"))
            }
        }

        let mut a = AppState::new(Directory::new(Box::new(Offline)));
        press(&mut a, KeyCode::Char('R'));
        match &a.modal {
            Some(ModalState::Info { message }) => assert!(message.starts_with("Reload failed")),
            other => panic!("expected info modal, got {other:?}"),
        }
        assert!(a.directory.records().is_empty());
        assert_eq!(a.directory.page_index(), 0);
        press(&mut a, KeyCode::Enter);
        assert!(a.modal.is_none());
    }

    #[test]
    fn add_flow_through_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Char('a'));
        type_str(&mut a, "Jane Doe");
        press(&mut a, KeyCode::Tab);
        type_str(&mut a, "jane@co.com");
        press(&mut a, KeyCode::Enter);
        assert!(a.modal.is_none());
        assert_eq!(a.input_mode, InputMode::Normal);
        assert_eq!(a.directory.records()[0].name, "Jane Doe");
        assert_eq!(a.directory.records().len(), 25);
    }

    #[test]
    fn invalid_form_stays_open() {
        let mut a = app();
        press(&mut a, KeyCode::Char('n'));
        press(&mut a, KeyCode::Enter);
        match &a.modal {
            Some(ModalState::Form(form)) => {
                assert!(form.errors.name.is_some());
                assert!(form.errors.email.is_some());
            }
            other => panic!("expected form modal, got {other:?}"),
        }
        assert_eq!(a.directory.records().len(), 24);
    }

    #[test]
    fn delete_defaults_to_no() {
        let mut a = app();
        press(&mut a, KeyCode::Char('d'));
        assert!(matches!(a.modal, Some(ModalState::DeleteConfirm { .. })));
        press(&mut a, KeyCode::Enter);
        assert!(a.modal.is_none());
        assert_eq!(a.directory.records().len(), 24);

        let target = a.selected_employee().unwrap();
        press(&mut a, KeyCode::Delete);
        press(&mut a, KeyCode::Char('y'));
        assert_eq!(a.directory.records().len(), 23);
        assert!(a.directory.get(&target.id).is_none());
    }

    #[test]
    fn filter_menu_applies_choice() {
        let mut a = app();
        press(&mut a, KeyCode::Right);
        press(&mut a, KeyCode::Char('f'));
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Enter);
        assert_eq!(
            a.directory.status_filter(),
            StatusFilter::Only(crate::backend::Status::Passive)
        );
        assert_eq!(a.directory.page_index(), 0);
    }

    #[test]
    fn cursor_stays_inside_page() {
        let mut a = app();
        for _ in 0..20 {
            press(&mut a, KeyCode::Down);
        }
        assert_eq!(a.selected_row, 9);
        press(&mut a, KeyCode::End);
        assert_eq!(a.selected_row, 0);
        for _ in 0..20 {
            press(&mut a, KeyCode::Down);
        }
        assert_eq!(a.selected_row, 3);
    }
}
