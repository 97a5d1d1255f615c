pub mod columns;
pub mod components;
pub mod forms;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{AppState, ModalState};

pub fn render(f: &mut Frame, app: &AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    let view = app.directory.view();
    components::render_header(f, root[0], app);
    columns::render_table(f, root[1], app, &view);
    components::render_pagination(f, root[2], app, &view);
    components::render_status_bar(f, root[3], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.modal {
        Some(ModalState::Form(form)) => forms::render_form_modal(f, area, app, form),
        Some(ModalState::DeleteConfirm { name, selected, .. }) => {
            forms::render_delete_modal(f, area, app, name, *selected);
        }
        Some(ModalState::FilterMenu { selected }) => {
            components::render_filter_modal(f, area, app, *selected);
        }
        Some(ModalState::Info { message }) => components::render_info_modal(f, area, app, message),
        Some(ModalState::Help { scroll }) => components::render_help_modal(f, area, app, *scroll),
        None => {}
    }
}
