/*
[INPUT]:  Modal state, fields, and key events
[OUTPUT]: Modal rendering output and modal action results
[POS]:    TUI UI modal module root
[UPDATE]: When adding modal field kinds or key handling
*/

mod add_account;

pub(in crate::tui) use add_account::AddAccountModal;

use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::runtime::border_style;

pub(in crate::tui) struct Modal {
    pub(super) title: String,
    pub(super) focus_index: usize,
    pub(super) fields: Vec<Field>,
    pub(super) error: Option<String>,
}

pub(in crate::tui) enum Field {
    TextInput {
        label: String,
        value: String,
        secret: bool,
    },
    Select {
        label: String,
        options: Vec<String>,
        selected: usize,
    },
    Button {
        label: String,
        action: ModalAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::tui) enum ModalAction {
    Submit,
    Cancel,
    None,
}

pub(in crate::tui) fn draw_modal(frame: &mut ratatui::Frame, area: Rect, modal: &Modal) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(modal.title.as_str());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = modal
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| {
            let content = match field {
                Field::TextInput {
                    label,
                    value,
                    secret,
                } => {
                    let shown = if *secret {
                        "*".repeat(value.chars().count())
                    } else {
                        value.clone()
                    };
                    format!("{label}: {shown}")
                }
                Field::Select {
                    label,
                    options,
                    selected,
                } => {
                    let selected_value = options.get(*selected).map(String::as_str).unwrap_or("-");
                    format!("{label}: {selected_value}")
                }
                Field::Button { label, .. } => format!("[{label}]"),
            };
            let style = if index == modal.focus_index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(content, style))
        })
        .collect();

    if let Some(error) = modal.error.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

pub(in crate::tui) fn handle_modal_key(modal: &mut Modal, key: KeyCode) -> ModalAction {
    match key {
        KeyCode::Esc => ModalAction::Cancel,
        KeyCode::Tab => {
            if !modal.fields.is_empty() {
                modal.focus_index = (modal.focus_index + 1) % modal.fields.len();
            }
            ModalAction::None
        }
        KeyCode::Up => {
            if let Some(Field::Select {
                selected, options, ..
            }) = modal.fields.get_mut(modal.focus_index)
            {
                if !options.is_empty() {
                    *selected = selected.saturating_sub(1);
                }
            }
            ModalAction::None
        }
        KeyCode::Down => {
            if let Some(Field::Select {
                selected, options, ..
            }) = modal.fields.get_mut(modal.focus_index)
            {
                if *selected + 1 < options.len() {
                    *selected += 1;
                }
            }
            ModalAction::None
        }
        KeyCode::Backspace => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.pop();
            }
            ModalAction::None
        }
        KeyCode::Char(ch) => {
            if let Some(Field::TextInput { value, .. }) = modal.fields.get_mut(modal.focus_index) {
                value.push(ch);
            }
            ModalAction::None
        }
        KeyCode::Enter => {
            if let Some(Field::Button { action, .. }) = modal.fields.get(modal.focus_index) {
                return *action;
            }
            ModalAction::None
        }
        _ => ModalAction::None,
    }
}
