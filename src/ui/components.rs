//! Shared UI components (header, pagination, status bar, modal helpers).
//!
//! Small building blocks reused around the employee table.
//!
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode};
use crate::search::{SortField, StatusFilter, TableView};

/// Render the search box, the status dropdown and the source label.
pub fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(22), Constraint::Length(28)])
        .split(area);

    let searching = app.input_mode == InputMode::Search;
    let query = app.directory.query();
    let search_text = if query.is_empty() && !searching {
        Span::styled("Search...", Style::default().fg(app.theme.muted))
    } else if searching {
        Span::styled(format!("{query}_"), Style::default().fg(app.theme.text))
    } else {
        Span::styled(query.to_string(), Style::default().fg(app.theme.text))
    };
    let search_border = if searching { app.theme.highlight_fg } else { app.theme.border };
    let search = Paragraph::new(Line::from(search_text)).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(search_border)),
    );
    f.render_widget(search, cols[0]);

    let status = Paragraph::new(format!("{} ▾", app.directory.status_filter().label()))
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("Status")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(status, cols[1]);

    let source = Paragraph::new(app.directory.source_label())
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg))
        .block(
            Block::default()
                .title("employee-directory")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(source, cols[2]);
}

/// Text of the pagination control. The page count shown is at least 1.
pub fn pagination_label(view: &TableView) -> String {
    format!(
        "Page {} of {}",
        view.page_index + 1,
        view.page_count.max(1)
    )
}

/// Render `< Previous  Page X of Y  Next >`; unavailable moves are dimmed.
pub fn render_pagination(f: &mut Frame, area: Rect, app: &AppState, view: &TableView) {
    let enabled = Style::default().fg(app.theme.text);
    let disabled = Style::default().fg(app.theme.muted).add_modifier(Modifier::DIM);
    let line = Line::from(vec![
        Span::styled("< Previous", if view.has_prev() { enabled } else { disabled }),
        Span::raw("   "),
        Span::styled(pagination_label(view), Style::default().fg(app.theme.title)),
        Span::raw("   "),
        Span::styled("Next >", if view.has_next() { enabled } else { disabled }),
    ]);
    f.render_widget(Paragraph::new(line).alignment(ratatui::layout::Alignment::Center), area);
}

/// Render the bottom status bar with mode, counts and the last message.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let sort = app.directory.sort();
    let mut msg = format!(
        "mode: {mode}  employees:{}  sort:{}/{}",
        app.directory.records().len(),
        sort.field.key(),
        sort.direction.key()
    );
    if let Some(m) = &app.status_message {
        msg.push_str("  ");
        msg.push_str(m);
    }
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    // Wrap long text; height grows with the message
    let max_w = area.width.saturating_sub(6).max(30);
    let min_w = 50u16.min(max_w);
    let chars = u16::try_from(message.chars().count()).unwrap_or(u16::MAX);
    let approx_lines = (chars / min_w.saturating_sub(4).max(10)).max(1);
    let max_h = area.height.saturating_sub(6).max(5);
    let height = approx_lines.saturating_add(4).min(max_h).max(5);
    let rect = centered_rect(min_w, height, area);
    let p = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.error)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

fn key_line(app: &AppState, label: &str, action: KeyAction) -> Line<'static> {
    let keys = app.keymap.keys_for(action);
    let keys = if keys.is_empty() { "(unbound)".to_string() } else { keys.join(", ") };
    Line::from(vec![
        Span::raw(format!("{label}: ")),
        Span::styled(keys, Style::default().add_modifier(Modifier::ITALIC)),
    ])
}

/// Render the help modal listing the active key bindings.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 80u16.min(area.width.saturating_sub(4)).max(60);
    let height = 24u16.min(area.height.saturating_sub(2)).max(14);
    let rect = centered_rect(width, height, area);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = vec![Line::from(Span::styled("Table", bold))];
    lines.push(key_line(app, "Move up", KeyAction::MoveUp));
    lines.push(key_line(app, "Move down", KeyAction::MoveDown));
    lines.push(key_line(app, "Previous page", KeyAction::PrevPage));
    lines.push(key_line(app, "Next page", KeyAction::NextPage));
    lines.push(key_line(app, "First page", KeyAction::FirstPage));
    lines.push(key_line(app, "Last page", KeyAction::LastPage));
    lines.push(Line::raw(""));

    lines.push(Line::from(Span::styled("Search and filter", bold)));
    lines.push(Line::from(vec![
        Span::raw("Search: "),
        Span::styled(
            app.keymap.keys_for(KeyAction::StartSearch).join(", "),
            Style::default().add_modifier(Modifier::ITALIC),
        ),
        Span::raw(" then type; Enter keeps the query; Esc clears it"),
    ]));
    lines.push(key_line(app, "Status filter", KeyAction::OpenFilterMenu));
    for field in SortField::ALL {
        let label = format!("Sort by {}", field.key());
        lines.push(key_line(app, &label, KeyAction::SortBy(field)));
    }
    lines.push(key_line(app, "Reverse sort", KeyAction::ReverseSort));
    lines.push(Line::raw(""));

    lines.push(Line::from(Span::styled("Records", bold)));
    lines.push(key_line(app, "Add employee", KeyAction::AddEmployee));
    lines.push(key_line(app, "Edit selected", KeyAction::EditSelection));
    lines.push(key_line(app, "Delete selected", KeyAction::DeleteSelection));
    lines.push(key_line(app, "Reload from source", KeyAction::Reload));
    lines.push(Line::raw(""));

    lines.push(key_line(app, "Open this help", KeyAction::OpenHelp));
    lines.push(key_line(app, "Quit", KeyAction::Quit));
    lines.push(Line::from(vec![
        Span::raw("Close help: "),
        Span::styled("Esc / Enter", Style::default().add_modifier(Modifier::ITALIC)),
    ]));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Render the status dropdown as a small menu.
pub fn render_filter_modal(f: &mut Frame, area: Rect, app: &AppState, selected: usize) {
    let rect = centered_rect(30, 7, area);
    let current = app.directory.status_filter();
    let mut text = String::new();
    for (idx, choice) in StatusFilter::CHOICES.iter().enumerate() {
        let marker = if idx == selected { "▶" } else { " " };
        let check = if *choice == current { "(•)" } else { "( )" };
        text.push_str(&format!("{marker} {check} {}\n", choice.label()));
    }
    let p = Paragraph::new(text).block(
        Block::default()
            .title("Filter by status")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
