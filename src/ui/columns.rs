//! Employee table: column definitions, cell formatting and the table widget.

use chrono::NaiveDate;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Row, Table, TableState};

use crate::app::{AppState, Theme};
use crate::backend::{Employee, Status};
use crate::search::{SortDirection, SortField, SortSpec, TableView};

/// Callbacks the row action buttons trigger.
pub trait RowActions {
    fn on_edit(&mut self, employee: &Employee);
    fn on_delete(&mut self, id: &str);
}

/// One table column. `field` is `None` for columns that cannot sort.
#[derive(Clone, Copy, Debug)]
pub struct Column {
    pub title: &'static str,
    pub field: Option<SortField>,
    pub width: Constraint,
}

pub const COLUMNS: [Column; 7] = [
    Column { title: "Full Name", field: Some(SortField::Name), width: Constraint::Percentage(18) },
    Column { title: "Email Address", field: Some(SortField::Email), width: Constraint::Percentage(24) },
    Column { title: "Status", field: Some(SortField::Status), width: Constraint::Length(9) },
    Column { title: "Phone", field: Some(SortField::Phone), width: Constraint::Percentage(14) },
    Column { title: "Department", field: Some(SortField::Department), width: Constraint::Percentage(14) },
    Column { title: "Last Updated", field: Some(SortField::Updated), width: Constraint::Length(14) },
    Column { title: "Actions", field: None, width: Constraint::Length(15) },
];

pub const EMPTY_MESSAGE: &str = "No records found.";

/// Header label with the active sort arrow, e.g. `Full Name ▲`.
pub fn header_label(column: &Column, sort: SortSpec) -> String {
    match column.field {
        Some(field) if field == sort.field => {
            let arrow = match sort.direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            };
            format!("{} {arrow}", column.title)
        }
        _ => column.title.to_string(),
    }
}

/// Display form of the last-updated date.
pub fn format_updated(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_department(department: &str) -> &str {
    if department.trim().is_empty() { "-" } else { department }
}

fn status_badge(status: Status, theme: &Theme) -> Span<'static> {
    let color = match status {
        Status::Active => theme.badge_active,
        Status::Passive => theme.badge_inactive,
    };
    Span::styled(
        format!(" {} ", status.as_str()),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}

fn employee_row(e: &Employee, theme: &Theme) -> Row<'static> {
    Row::new(vec![
        Cell::from(e.name.clone()),
        Cell::from(e.email.clone()),
        Cell::from(Line::from(status_badge(e.status, theme))),
        Cell::from(e.phone.clone()),
        Cell::from(format_department(&e.department).to_string()),
        Cell::from(format_updated(e.updated)),
        Cell::from(Line::from(vec![
            Span::styled("[Edit]", Style::default().fg(theme.title)),
            Span::raw(" "),
            Span::styled("[Delete]", Style::default().fg(theme.error)),
        ])),
    ])
    .style(Style::default().fg(theme.text))
}

/// Render the visible page. An empty page gets a single placeholder row.
pub fn render_table(f: &mut Frame, area: Rect, app: &AppState, view: &TableView) {
    let sort = app.directory.sort();
    let header = Row::new(
        COLUMNS
            .iter()
            .map(|c| Cell::from(header_label(c, sort)))
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(app.theme.title).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = if view.rows.is_empty() {
        vec![Row::new(vec![Cell::from(EMPTY_MESSAGE)]).style(Style::default().fg(app.theme.muted))]
    } else {
        view.rows.iter().map(|e| employee_row(e, &app.theme)).collect()
    };

    let widths = COLUMNS.map(|c| c.width);
    let title = format!("Employees ({})", view.matched);
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ")
        .column_spacing(1);

    let mut state = TableState::default();
    if !view.rows.is_empty() {
        state.select(Some(app.selected_row.min(view.rows.len() - 1)));
    }
    f.render_stateful_widget(table, area, &mut state);
}
