/*
[INPUT]:  Query panel state and result rows
[OUTPUT]: Query panel rendering: input line, result table, status footer
[POS]:    Query panel rendering
[UPDATE]: When changing panel layout or result projection
*/

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};
use serde_json::Value;

use syncer_console_api::QueryRow;

use super::{COLUMN_SPACING, INDEX_COLUMN_KEY, QueryPanel, QueryPhase, cells_for};
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_query_panel(
    frame: &mut ratatui::Frame,
    area: Rect,
    panel: &mut QueryPanel,
) {
    frame.render_widget(Clear, area);

    let title = format!("Query: {}", panel.account().account_name);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(title);
    if panel.is_closing() {
        block = block.style(Style::default().add_modifier(Modifier::DIM));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_input(frame, layout[0], panel);
    draw_result(frame, layout[1], panel);
    draw_count(frame, layout[2], panel);
}

fn draw_input(frame: &mut ratatui::Frame, area: Rect, panel: &QueryPanel) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("SQL ([Enter] run, [Esc] close)");
    let widget = Paragraph::new(panel.input()).block(block);
    frame.render_widget(widget, area);
}

fn draw_result(frame: &mut ratatui::Frame, area: Rect, panel: &mut QueryPanel) {
    if panel.phase() == QueryPhase::Querying {
        let widget = Paragraph::new("Querying...").style(Style::default().fg(Color::Yellow));
        frame.render_widget(widget, area);
        return;
    }

    if !panel.error_msg().is_empty() {
        let widget =
            Paragraph::new(panel.error_msg().to_string()).style(Style::default().fg(Color::Red));
        frame.render_widget(widget, area);
        return;
    }

    match panel.results() {
        Some([]) => {
            let widget = Paragraph::new("No results");
            frame.render_widget(widget, area);
        }
        Some(rows) => {
            let rows = rows.to_vec();
            draw_result_table(frame, area, panel, &rows);
        }
        None => {}
    }
}

fn draw_result_table(
    frame: &mut ratatui::Frame,
    area: Rect,
    panel: &mut QueryPanel,
    rows: &[QueryRow],
) {
    // The drag hit-test needs the rendered table origin.
    panel.set_table_area(area);

    let keys = column_keys(rows);

    let mut widths = vec![Constraint::Length(cells_for(
        panel.width_for(INDEX_COLUMN_KEY),
    ))];
    let mut header_cells = vec![Cell::from("")];
    for cell in panel.header_cells() {
        widths.push(Constraint::Length(cells_for(cell.width())));
        let style = if cell.is_dragging() {
            header_style().add_modifier(Modifier::REVERSED)
        } else {
            header_style()
        };
        header_cells.push(Cell::from(cell.label().to_string()).style(style));
    }
    let header = Row::new(header_cells);

    let body = rows.iter().enumerate().map(|(index, row)| {
        let mut cells = vec![Cell::from((index + 1).to_string())];
        // Projection through the first row's key set only: extra keys in
        // later rows are dropped, missing keys render blank.
        for key in &keys {
            cells.push(Cell::from(format_cell(row.get(key))));
        }
        Row::new(cells)
    });

    let table = Table::new(body, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING);
    frame.render_widget(table, area);
}

fn draw_count(frame: &mut ratatui::Frame, area: Rect, panel: &QueryPanel) {
    let Some(rows) = panel.results() else {
        return;
    };
    if rows.is_empty() || !panel.error_msg().is_empty() {
        return;
    }
    let noun = if rows.len() > 1 { "records" } else { "record" };
    let widget = Paragraph::new(Line::from(format!("{} {noun}", rows.len())));
    frame.render_widget(widget, area);
}

/// Column projection: the first row's keys, in its enumeration order.
pub(in crate::tui) fn column_keys(rows: &[QueryRow]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// Display form of one result cell; absent keys and nulls render blank.
pub(in crate::tui) fn format_cell(value: Option<&Value>) -> String {
    match value {
        None => String::new(),
        Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
