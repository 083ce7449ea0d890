use chrono::{Local, NaiveDate};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};

use crate::app::{App, Screen, summarize};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new(app.address.to_string()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("{} – waste collection schedule", app.service.provider().name)),
    );
    frame.render_widget(header, *header_area);

    let today = Local::now().date_naive();

    // Main screen
    match app.screen {
        Screen::Schedule => draw_schedule(frame, app, *content_area, today),
        Screen::Summary => draw_summary(frame, app, *content_area, today),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::Schedule => "↑/↓ move · s sort by date · Tab summary · r reload · q/Ctrl-C quit",
        Screen::Summary => "↑/↓ move · Tab schedule · r reload · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_schedule(frame: &mut Frame<'_>, app: &App, area: Rect, today: NaiveDate) {
    let order = if app.sort_by_date {
        "by date"
    } else {
        "as published"
    };
    let title = format!("Pickups ({order})");

    if let Some(placeholder) = placeholder(app, "No pickups scheduled for this address.") {
        let paragraph = Paragraph::new(placeholder)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = app.visible_events().into_iter().map(|event| {
        let date = event.date.format("%Y-%m-%d").to_string();
        let weekday = event.date.format("%a").to_string();
        let relative = relative_day_label(event.date, today);

        let mut style = Style::default().fg(waste_color(event.icon.as_deref()));
        if event.date < today {
            style = style.add_modifier(Modifier::DIM);
        } else if event.date == today {
            style = style.add_modifier(Modifier::BOLD);
        }

        Row::new(vec![
            Cell::from(date),
            Cell::from(weekday),
            Cell::from(relative),
            Cell::from(event.waste_type),
            Cell::from(event.icon.unwrap_or_default()),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Length(12),
        Constraint::Length(5),
        Constraint::Length(14),
        Constraint::Min(16),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Date", "Day", "In", "Waste type", "Icon"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .column_spacing(1);

    let mut state = TableState::default().with_selected(Some(app.list_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_summary(frame: &mut Frame<'_>, app: &App, area: Rect, today: NaiveDate) {
    let title = "Waste types";

    if let Some(placeholder) = placeholder(app, "No waste objects found for this address.") {
        let paragraph = Paragraph::new(placeholder)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = summarize(&app.events, today).into_iter().map(|summary| {
        let next = summary.next_pickup.map_or_else(
            || "–".to_owned(),
            |date| format!("{} ({})", date.format("%Y-%m-%d"), relative_day_label(date, today)),
        );

        Row::new(vec![
            Cell::from(summary.waste_type),
            Cell::from(next),
            Cell::from(summary.pickups.to_string()),
        ])
        .style(Style::default().fg(waste_color(summary.icon.as_deref())))
    });

    let column_widths = [
        Constraint::Min(16),
        Constraint::Length(28),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Waste type", "Next pickup", "Pickups"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .column_spacing(1);

    let mut state = TableState::default().with_selected(Some(app.list_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn placeholder(app: &App, empty_text: &'static str) -> Option<&'static str> {
    if app.is_loading {
        Some("Loading schedule…")
    } else if app.events.is_empty() {
        Some(empty_text)
    } else {
        None
    }
}

fn waste_color(icon: Option<&str>) -> Color {
    match icon {
        Some("mdi:trash-can") => Color::Gray,
        Some("mdi:recycle") => Color::Yellow,
        Some("mdi:glass-fragile") => Color::Cyan,
        Some("mdi:leaf") => Color::Green,
        _ => Color::Magenta,
    }
}

fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (date - today).num_days();
    match delta {
        0 => "today".to_owned(),
        1 => "tomorrow".to_owned(),
        days if days > 1 => format!("in {days} days"),
        -1 => "yesterday".to_owned(),
        days => format!("{} days ago", days.abs()),
    }
}
