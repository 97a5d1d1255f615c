//! Add/Edit form modal and the delete confirmation dialog.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::AppState;
use crate::app::form::{EmployeeForm, FormField};
use crate::ui::components::centered_rect;

/// Render the employee form. Invalid fields get their message underneath.
pub fn render_form_modal(f: &mut Frame, area: Rect, app: &AppState, form: &EmployeeForm) {
    let width = 60u16.min(area.width.saturating_sub(4)).max(40);
    let height = 18u16.min(area.height.saturating_sub(2)).max(12);
    let rect = centered_rect(width, height, area);

    let focus_style = Style::default()
        .fg(app.theme.highlight_fg)
        .add_modifier(Modifier::BOLD);
    let error_style = Style::default().fg(app.theme.error);

    let mut lines: Vec<Line> = Vec::new();
    for field in FormField::ORDER.iter().copied().filter(|f| !matches!(f, FormField::Submit | FormField::Cancel)) {
        let marker = if form.focus == field { "▶ " } else { "  " };
        let value = if field == FormField::Status {
            format!("< {} >", form.value(field))
        } else if form.focus == field {
            format!("{}_", form.value(field))
        } else {
            form.value(field).to_string()
        };
        let label_style = if form.focus == field {
            focus_style
        } else {
            Style::default().fg(app.theme.text)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}{:<14}", field.label()), label_style),
            Span::styled(value, Style::default().fg(app.theme.text)),
        ]));
        let err = match field {
            FormField::Name => form.errors.name.as_deref(),
            FormField::Email => form.errors.email.as_deref(),
            _ => None,
        };
        if let Some(msg) = err {
            lines.push(Line::from(Span::styled(format!("{:16}{msg}", ""), error_style)));
        }
    }

    lines.push(Line::raw(""));
    let button = |field: FormField, label: &str| {
        if form.focus == field {
            Span::styled(format!("▶ [{label}]"), focus_style)
        } else {
            Span::styled(format!("  [{label}]"), Style::default().fg(app.theme.text))
        }
    };
    lines.push(Line::from(vec![
        button(FormField::Submit, form.submit_label()),
        Span::raw("   "),
        button(FormField::Cancel, "Cancel"),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Tab/Up/Down: move  Space/Left/Right: status  Enter: submit  Esc: cancel",
        Style::default().fg(app.theme.muted),
    )));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(form.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Yes/No dialog shown before a delete reaches the backend.
pub fn render_delete_modal(f: &mut Frame, area: Rect, app: &AppState, name: &str, selected: usize) {
    let width = 50u16.min(area.width.saturating_sub(4)).max(36);
    let rect = centered_rect(width, 7, area);
    let options = ["Yes", "No"];
    let mut buttons = Vec::new();
    for (idx, label) in options.iter().enumerate() {
        if idx == selected {
            buttons.push(Span::styled(
                format!("▶ {label}"),
                Style::default().fg(app.theme.highlight_fg).add_modifier(Modifier::BOLD),
            ));
        } else {
            buttons.push(Span::raw(format!("  {label}")));
        }
        buttons.push(Span::raw("    "));
    }
    let lines = vec![
        Line::raw(format!("Are you sure you want to delete {name}?")),
        Line::raw(""),
        Line::from(buttons),
    ];
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Delete employee")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
