/*
[INPUT]:  Backend client, bootstrap state, crossterm input, async API completions
[OUTPUT]: Ratatui run loop, rendering dispatch, and log buffer utilities
[POS]:    TUI runtime loop and shared helpers
[UPDATE]: When changing TUI layout, keybindings, or runtime controls
*/

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::fmt::MakeWriter;

use syncer_console_api::{Account, QueryRow, SyncerClient, SyncerError};

use super::app::{AppState, Tab};
use super::events::{handle_key_event, handle_mouse_event};
use super::query::draw_query_panel;
use super::terminal::TerminalGuard;
use super::ui::modal::draw_modal;
use super::ui::*;
use crate::bootstrap::BootstrapConfig;

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);
pub(crate) const LOG_BUFFER_CAPACITY: usize = 2000;
/// Cosmetic close-animation delay before the query panel unmounts.
pub(crate) const CLOSE_ANIMATION_DELAY: Duration = Duration::from_millis(300);
/// Login boundary shown when the backend session has expired.
pub(crate) const LOGIN_URL: &str = "/account/login/";
/// Static logout boundary surfaced in the footer.
pub(crate) const LOGOUT_URL: &str = "/login_out/";

pub type LogBufferHandle = Arc<StdMutex<LogBuffer>>;

#[derive(Debug, Default)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    capacity: usize,
}

impl LogBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity,
        }
    }

    pub fn push_line(&mut self, line: String) {
        if self.capacity == 0 {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

#[derive(Clone)]
pub struct LogWriterFactory {
    buffer: LogBufferHandle,
}

impl LogWriterFactory {
    pub fn new(buffer: LogBufferHandle) -> Self {
        Self { buffer }
    }
}

pub struct LogWriter {
    buffer: LogBufferHandle,
    partial: String,
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let chunk = String::from_utf8_lossy(buf);
        self.partial.push_str(&chunk);
        while let Some(pos) = self.partial.find('\n') {
            let line = self.partial[..pos].trim_end_matches('\r').to_string();
            self.partial = self.partial[pos + 1..].to_string();
            let buffer = self.buffer.clone();
            let mut guard = buffer.lock().expect("log buffer lock");
            guard.push_line(line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.partial.is_empty() {
            let line = std::mem::take(&mut self.partial);
            let buffer = self.buffer.clone();
            let mut guard = buffer.lock().expect("log buffer lock");
            guard.push_line(line);
        }
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            buffer: self.buffer.clone(),
            partial: String::new(),
        }
    }
}

/// Events consumed by the run loop: raw terminal input plus completions of
/// the async API calls spawned by the app.
pub(super) enum UiEvent {
    Input(CrosstermEvent),
    QueryFinished {
        generation: u64,
        outcome: Result<Vec<QueryRow>, SyncerError>,
    },
    AccountAdded {
        outcome: Result<Account, SyncerError>,
    },
    PanelCloseElapsed {
        generation: u64,
    },
}

pub async fn run_tui(
    client: Arc<SyncerClient>,
    bootstrap: BootstrapConfig,
    log_buffer: LogBufferHandle,
) -> Result<()> {
    let mut terminal = TerminalGuard::new()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();
    let input_tx = event_tx.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = input_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = AppState::new(client, bootstrap, log_buffer, event_tx);

    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = tick.tick() => {}
            maybe_event = event_rx.recv() => {
                if let Some(event) = maybe_event {
                    match event {
                        UiEvent::Input(CrosstermEvent::Key(key)) => {
                            if handle_key_event(&mut app, key.code) {
                                should_quit = true;
                            }
                        }
                        UiEvent::Input(CrosstermEvent::Mouse(mouse)) => {
                            handle_mouse_event(&mut app, mouse);
                        }
                        UiEvent::Input(_) => {}
                        UiEvent::QueryFinished { generation, outcome } => {
                            app.apply_query_outcome(generation, outcome);
                        }
                        UiEvent::AccountAdded { outcome } => {
                            app.apply_add_account_outcome(outcome);
                        }
                        UiEvent::PanelCloseElapsed { generation } => {
                            app.finish_close_panel(generation);
                        }
                    }
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    Ok(())
}

fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let area = frame.area();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    draw_tabs(frame, layout[1], app.current_tab);

    if app.session_expired {
        draw_login_boundary(frame, layout[0]);
        draw_footer(frame, layout[2], app);
        return;
    }

    match app.current_tab {
        Tab::Accounts => draw_accounts_view(frame, layout[0], app),
        Tab::Jobs => draw_jobs_view(frame, layout[0], app),
        Tab::Logs => draw_logs(frame, layout[0], &app.log_buffer),
    }

    draw_footer(frame, layout[2], app);

    if let Some(modal) = app.add_account_modal.as_ref() {
        let modal_area = centered_rect(area, 60, 60);
        draw_modal(frame, modal_area, &modal.to_modal());
    }

    if let Some(panel) = app.query_panel.as_mut() {
        let panel_area = centered_rect(area, 90, 80);
        draw_query_panel(frame, panel_area, panel);
    }
}

fn draw_login_boundary(frame: &mut ratatui::Frame, area: ratatui::layout::Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Session expired");
    let text = Text::from(vec![
        Line::from("Your session has expired."),
        Line::from(format!("Log in again at {LOGIN_URL}")),
        Line::from("Press [q] to quit."),
    ]);
    let widget = Paragraph::new(text)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    frame.render_widget(widget, area);
}

pub(super) fn draw_footer(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, app: &AppState) {
    let key_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let line1 = Line::from(vec![
        Span::styled("[Up/Down]", key_style),
        Span::raw(" Select  "),
        Span::styled("[Tab/1/2/3]", key_style),
        Span::raw(" Switch  "),
        Span::styled("[a]", key_style),
        Span::raw(" Add account  "),
        Span::styled("[Enter]", key_style),
        Span::raw(" Query  "),
        Span::styled("[q]", key_style),
        Span::raw(" Quit"),
    ]);
    let line2 = Line::from(vec![
        Span::raw(format!("Status: {}  ", app.status_message)),
        Span::raw(format!("Logout: {LOGOUT_URL}")),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title("Hotkeys");
    let text = Text::from(vec![line1, line2]);
    let widget = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

pub(crate) fn border_style() -> Style {
    Style::default().fg(Color::Magenta)
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(
    area: ratatui::layout::Rect,
    percent_x: u16,
    percent_y: u16,
) -> ratatui::layout::Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}
