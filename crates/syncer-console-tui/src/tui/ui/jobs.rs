/*
[INPUT]:  AppState sync job list and bootstrap message
[OUTPUT]: Sync jobs table rendered into Ratatui frame
[POS]:    TUI UI jobs view rendering
[UPDATE]: When adding job columns
*/

use ratatui::layout::Constraint;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_jobs_view(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &AppState,
) {
    if let Some(message) = app.jobs_message.as_deref() {
        let widget = Paragraph::new(message.to_string())
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style())
                    .title("Syncer jobs"),
            );
        frame.render_widget(widget, area);
        return;
    }

    let mut rows = Vec::new();
    for job in &app.jobs {
        let is_valid = if job.is_valid { "Yes" } else { "No" };
        let last_trigger = job
            .last_trigger_time
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        rows.push(Row::new(vec![
            Cell::from(job.dtable_uuid.as_str()),
            Cell::from(job.name.as_str()),
            Cell::from(job.job_type.as_str()),
            Cell::from(is_valid),
            Cell::from(last_trigger),
            Cell::from(job.trigger_detail.trigger_type.as_str()),
        ]));
    }

    if rows.is_empty() {
        rows.push(Row::new(vec![
            Cell::from("No syncer jobs"),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
        ]));
    }

    let header = Row::new(vec![
        Cell::from("Bases"),
        Cell::from("Job name"),
        Cell::from("Job type"),
        Cell::from("Is valid"),
        Cell::from("Last trigger time"),
        Cell::from("Trigger type"),
    ])
    .style(header_style());

    let table = Table::new(
        rows,
        [
            Constraint::Length(38),
            Constraint::Length(18),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(20),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!("Syncer jobs ({})", app.jobs.len())),
    );
    frame.render_widget(table, area);
}
