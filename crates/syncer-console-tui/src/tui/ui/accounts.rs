/*
[INPUT]:  AppState account list, selection, and bootstrap error
[OUTPUT]: Accounts table rendered into Ratatui frame
[POS]:    TUI UI accounts view rendering
[UPDATE]: When adding account columns
*/

use ratatui::layout::Constraint;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::tui::app::AppState;
use crate::tui::runtime::{border_style, header_style};

pub(in crate::tui) fn draw_accounts_view(
    frame: &mut ratatui::Frame,
    area: ratatui::layout::Rect,
    app: &mut AppState,
) {
    // A bootstrap error replaces the whole list, matching the page it mirrors.
    if let Some(error) = app.bootstrap_error.as_deref() {
        let widget = Paragraph::new(error.to_string())
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(border_style())
                    .title("Accounts"),
            );
        frame.render_widget(widget, area);
        return;
    }

    let mut rows = Vec::new();
    for (index, account) in app.accounts.iter().enumerate() {
        rows.push(Row::new(vec![
            Cell::from((index + 1).to_string()),
            Cell::from(account.host.as_str()),
            Cell::from(account.user.as_str()),
            Cell::from("*".repeat(account.password.chars().count())),
            Cell::from(account.port.to_string()),
            Cell::from(account.account_name.as_str()),
            Cell::from(account.owner.as_deref().unwrap_or("-")),
        ]));
    }

    if rows.is_empty() {
        rows.push(Row::new(vec![
            Cell::from("No accounts"),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
            Cell::from(""),
        ]));
    }

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Host"),
        Cell::from("User"),
        Cell::from("Password"),
        Cell::from("Port"),
        Cell::from("Account name"),
        Cell::from("Owner"),
    ])
    .style(header_style());

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(20),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(6),
            Constraint::Length(18),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(format!("Accounts ({})", app.accounts.len())),
    );
    frame.render_stateful_widget(table, area, &mut app.table_state);
}
