use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use happippang_core::inventory::{QtyField, DATE_FORMAT};
use happippang_core::models::User;

use crate::app::{App, AppState, InventoryFocus, LoginFocus, PageView};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(8),    // Page
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    match app.view {
        PageView::Blank => {}
        PageView::Login => render_login(frame, app, chunks[1]),
        PageView::Placeholder => render_placeholder(frame, chunks[1]),
        PageView::Inventory(_) => render_inventory(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);

    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }
}

fn signed_in_user(app: &App) -> Option<&User> {
    match app.view {
        PageView::Inventory(ref user) => Some(user),
        _ => None,
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  Happippang Daily Input";
    let right = match signed_in_user(app) {
        Some(user) => format!("{} ({}) ", user.display_name(), if user.is_admin() { "admin" } else { "user" }),
        None => String::new(),
    };

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize)
                .saturating_sub(title.len() + right.chars().count() + 2),
        )),
        Span::styled(right, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = match app.view {
        PageView::Inventory(_) if app.inventory_focus == InventoryFocus::Date => {
            "[Enter] set date | [Esc] cancel"
        }
        PageView::Inventory(_) => "[[/]] shop | [d]ate | [s]ave | [x] logout | [q]uit",
        PageView::Login => "[Tab] next field | [Enter] login | [Esc] quit",
        _ => "[q]uit",
    };

    let left_text = if app.submitting {
        " Saving... ".to_string()
    } else if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        String::new()
    };
    let right_text = format!(" {} ", shortcuts);

    let padding_len = (area.width as usize)
        .saturating_sub(left_text.chars().count())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::highlight_style()),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(right_text, styles::muted_style()),
    ]);
    let paragraph = Paragraph::new(status_line).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn render_placeholder(frame: &mut Frame, area: Rect) {
    let area = centered_rect_fixed(20, 3, area);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        "    Loading...",
        styles::muted_style(),
    )))
    .block(Block::default().borders(Borders::ALL).border_style(styles::border_style(false)));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Login
// ============================================================================

fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let height = if app.login_error.is_some() { 11 } else { 9 };
    let area = centered_rect_fixed(46, height, area);

    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("            Happippang Inventory", styles::title_style())),
        Line::from(""),
    ];

    let username_focused = app.login_focus == LoginFocus::Username;
    let username_style = if username_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let username_display = format!("{:<16}", app.login_username);
    let cursor = if username_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("Username: [", styles::muted_style()),
        Span::styled(format!("{}{}", username_display, cursor), username_style),
        Span::styled("]", styles::muted_style()),
    ]));

    let password_focused = app.login_focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let password_masked: String = "*".repeat(app.login_password.chars().count().min(16));
    let password_display = format!("{:<16}", password_masked);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{}{}", password_display, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    let button_focused = app.login_focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::selected_style()
    } else {
        styles::list_item_style()
    };
    let button_label = if button_focused { " ▶ Login ◀ " } else { "   Login   " };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("            ["),
        Span::styled(button_label, button_style),
        Span::raw("]"),
    ]));

    if let Some(ref error) = app.login_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", error),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

// ============================================================================
// Inventory
// ============================================================================

fn render_inventory(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Shop and date
            Constraint::Min(5),    // Quantity grid
        ])
        .split(area);

    render_inventory_header(frame, app, chunks[0]);
    render_inventory_table(frame, app, chunks[1]);
}

fn render_inventory_header(frame: &mut Frame, app: &App, area: Rect) {
    let shop = app
        .form
        .store()
        .map(|store| store.name.clone())
        .unwrap_or_else(|| "(no shops)".to_string());

    let date_span = if app.inventory_focus == InventoryFocus::Date {
        Span::styled(format!("{:<10}▌", app.date_input), styles::editing_style())
    } else {
        Span::styled(app.form.date().format(DATE_FORMAT).to_string(), styles::list_item_style())
    };

    let (total_in, total_out) = app.form.totals();
    let line = Line::from(vec![
        Span::styled(" Shop: ", styles::muted_style()),
        Span::styled("◀ ", styles::help_key_style()),
        Span::styled(shop, styles::selected_style()),
        Span::styled(" ▶", styles::help_key_style()),
        Span::styled("    Date: ", styles::muted_style()),
        date_span,
        Span::styled("    Total in ", styles::muted_style()),
        Span::styled(total_in.to_string(), styles::success_style()),
        Span::styled("  out ", styles::muted_style()),
        Span::styled(total_out.to_string(), styles::success_style()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(app.inventory_focus == InventoryFocus::Date));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_inventory_table(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.inventory_focus == InventoryFocus::Grid;

    let header = Row::new([
        Cell::from("Item"),
        Cell::from(format!("{:>8}", "In")),
        Cell::from(format!("{:>8}", "Out")),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = app.form.items().iter().enumerate().map(|(i, item)| {
        let quantities = app.form.row(&item.id);
        let selected = focused && i == app.grid_selection;

        let cell = |field: QtyField| {
            let active = selected && app.grid_field == field;
            let qty = quantities.get(field);
            let text = match app.edit_buffer {
                Some(ref buffer) if active => format!("{}▌", buffer),
                _ => qty.to_string(),
            };
            let style = if active {
                styles::editing_style()
            } else {
                styles::quantity_style(qty)
            };
            Cell::from(format!("{:>8}", text)).style(style)
        };

        Row::new(vec![
            Cell::from(item.label()),
            cell(QtyField::In),
            cell(QtyField::Out),
        ])
    }).collect();

    let widths = [
        Constraint::Fill(1),    // Item
        Constraint::Length(10), // In
        Constraint::Length(10), // Out
    ];

    let title = format!(" Items ({}) ", app.form.items().len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(focused))
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    state.select(Some(app.grid_selection));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());

    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
