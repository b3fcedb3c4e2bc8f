use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::model::task::{Priority, Status, Task};

use super::app::{App, FormField, Mode, ToastKind};
use super::theme::Palette;

/// Render the whole screen
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::for_choice(app.theme);
    let area = frame.area();

    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background)),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    draw_title_bar(frame, app, &palette, chunks[0]);
    draw_search(frame, app, &palette, chunks[1]);
    draw_board(frame, app, &palette, chunks[2]);
    draw_footer(frame, app, &palette, chunks[3]);

    match app.mode {
        Mode::Create => draw_form_popup(frame, app, &palette, "New Task"),
        Mode::Edit => draw_form_popup(frame, app, &palette, "Edit Task"),
        Mode::ConfirmClear => draw_confirm_popup(frame, app, &palette),
        _ => {}
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let total = app.board.len();
    let line = Line::from(vec![
        Span::styled(
            " taskdeck ",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} task{}", total, if total == 1 { "" } else { "s" }),
            Style::default().fg(palette.dim),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_search(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let active = app.mode == Mode::Search;
    let border = if active { palette.accent } else { palette.border };
    let content = if app.query.is_empty() && !active {
        Span::styled("press / to search", Style::default().fg(palette.dim))
    } else {
        Span::styled(app.query.clone(), Style::default().fg(palette.text))
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Search ");
    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);

    if active {
        let x = area.x + 1 + app.query.chars().count() as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn draw_board(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (idx, status) in Status::ALL.into_iter().enumerate() {
        draw_column(frame, app, palette, columns[idx], idx, status);
    }
}

fn draw_column(
    frame: &mut Frame,
    app: &App,
    palette: &Palette,
    area: Rect,
    idx: usize,
    status: Status,
) {
    let tasks = app.visible_in(status);
    let selected_column = idx == app.column;
    let move_target = selected_column && app.mode == Mode::MoveTask;

    let border = if move_target {
        palette.accent
    } else if selected_column {
        palette.text
    } else {
        palette.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ({}) ", status.label(), tasks.len()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let mut y = inner.y;
    for (row, task) in tasks.iter().enumerate() {
        if y >= inner.bottom() {
            break;
        }
        let selected = selected_column && row == app.cursor && app.mode != Mode::Search;
        let lines = card_lines(task, palette, width, selected);
        for line in lines {
            if y >= inner.bottom() {
                break;
            }
            frame.render_widget(
                Paragraph::new(line),
                Rect::new(inner.x, y, inner.width, 1),
            );
            y += 1;
        }
    }
}

/// One or two lines for a card: priority + title, then due/description
/// when present.
fn card_lines<'a>(
    task: &'a Task,
    palette: &Palette,
    width: usize,
    selected: bool,
) -> Vec<Line<'a>> {
    let prio_color = match task.prio {
        Priority::P1 => palette.high,
        Priority::P2 => palette.medium,
        Priority::P3 => palette.low,
    };
    let base = if selected {
        Style::default().bg(palette.selection_bg)
    } else {
        Style::default()
    };

    let marker = if selected { "▸ " } else { "  " };
    let head = format!("{} ", task.prio.as_str());
    // marker and head are both known to render 2 and 3 cells wide
    let title_width = width.saturating_sub(6).max(1);

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, base.fg(palette.accent)),
        Span::styled(head, base.fg(prio_color).add_modifier(Modifier::BOLD)),
        Span::styled(
            truncate_to_width(&task.title, title_width),
            base.fg(palette.text),
        ),
    ])];

    let mut detail = String::new();
    if let Some(due) = task.due {
        detail.push_str(&format!("due {}", due.format("%b %-d")));
    }
    if !task.desc.is_empty() {
        if !detail.is_empty() {
            detail.push_str(" · ");
        }
        detail.push_str(&task.desc);
    }
    if !detail.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("    ", base),
            Span::styled(
                truncate_to_width(&detail, width.saturating_sub(5).max(1)),
                base.fg(palette.dim),
            ),
        ]));
    }
    lines
}

fn draw_footer(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    if let Some(toast) = &app.toast {
        let color = match toast.kind {
            ToastKind::Success => palette.success,
            ToastKind::Error => palette.error,
            ToastKind::Info => palette.info,
        };
        let line = Line::from(Span::styled(
            format!(" {} ", toast.msg),
            Style::default()
                .fg(palette.background)
                .bg(color)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints = match app.mode {
        Mode::MoveTask => "←/→ pick column · Enter drop · Esc cancel",
        Mode::Search => "type to filter · Enter keep · Esc clear",
        _ => "a add · e edit · d delete · m move · / search · t theme · C clear all · q quit",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {}", hints),
            Style::default().fg(palette.dim),
        ))),
        area,
    );
}

fn draw_form_popup(frame: &mut Frame, app: &App, palette: &Palette, title: &str) {
    let area = centered_rect(frame.area(), 50, 8);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(format!(" {} ", title));
    let inner = block.inner(area);
    frame.render_widget(
        Paragraph::new("").block(block).style(Style::default().bg(palette.background)),
        area,
    );

    let rows = [
        (FormField::Title, "Title", app.form.title.as_str()),
        (FormField::Desc, "Desc", app.form.desc.as_str()),
        (FormField::Due, "Due", app.form.due.as_str()),
    ];

    let mut y = inner.y;
    for (field, label, value) in rows {
        draw_form_row(frame, palette, inner, &mut y, app.form.focus == field, label, value);
    }
    let prio_value = format!("{} ({})", app.form.prio.as_str(), app.form.prio.label());
    draw_form_row(
        frame,
        palette,
        inner,
        &mut y,
        app.form.focus == FormField::Prio,
        "Prio",
        &prio_value,
    );

    if y < inner.bottom() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Tab next · Enter save · Esc cancel",
                Style::default().fg(palette.dim),
            )))
            .alignment(Alignment::Center),
            Rect::new(inner.x, inner.bottom() - 1, inner.width, 1),
        );
    }
}

fn draw_form_row(
    frame: &mut Frame,
    palette: &Palette,
    inner: Rect,
    y: &mut u16,
    focused: bool,
    label: &str,
    value: &str,
) {
    if *y >= inner.bottom() {
        return;
    }
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.dim)
    };
    let line = Line::from(vec![
        Span::styled(marker, Style::default().fg(palette.accent)),
        Span::styled(format!("{:<6}", label), label_style),
        Span::styled(
            truncate_to_width(value, inner.width.saturating_sub(10) as usize),
            Style::default().fg(palette.text),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line),
        Rect::new(inner.x, *y, inner.width, 1),
    );
    *y += 1;
}

fn draw_confirm_popup(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = centered_rect(frame.area(), 46, 5);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.error))
        .title(" Clear all ");
    let inner = block.inner(area);
    frame.render_widget(
        Paragraph::new("").block(block).style(Style::default().bg(palette.background)),
        area,
    );

    let lines = vec![
        Line::from(Span::styled(
            format!("Clear all {} tasks? This cannot be undone.", app.board.len()),
            Style::default().fg(palette.text),
        )),
        Line::from(Span::styled(
            "y confirm · any other key cancel",
            Style::default().fg(palette.dim),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

/// Centered popup rectangle, clamped to the screen
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Truncate to a display width, appending an ellipsis when cut
fn truncate_to_width(text: &str, max_width: usize) -> String {
    let total: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max_width {
        return text.to_string();
    }
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}
