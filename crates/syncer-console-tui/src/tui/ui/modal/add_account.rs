/*
[INPUT]:  Account form state and key events
[OUTPUT]: Add-account modal state, validation, and submission payloads
[POS]:    TUI UI modal - add account form
[UPDATE]: When adding form fields or account types
*/

use crossterm::event::KeyCode;

use syncer_console_api::AddAccountRequest;

use super::{Field, Modal, ModalAction, handle_modal_key};

const ACCOUNT_TYPES: &[&str] = &["mysql"];
const DEFAULT_PORT: &str = "3306";

pub(in crate::tui) struct AddAccountModal {
    account_type_index: usize,
    host: String,
    user: String,
    password: String,
    port: String,
    account_name: String,
    focus_index: usize,
    error: String,
    submitting: bool,
}

impl AddAccountModal {
    pub(in crate::tui) fn new() -> Self {
        Self {
            account_type_index: 0,
            host: String::new(),
            user: String::new(),
            password: String::new(),
            port: DEFAULT_PORT.to_string(),
            account_name: String::new(),
            focus_index: 0,
            error: String::new(),
            submitting: false,
        }
    }

    pub(in crate::tui) fn to_modal(&self) -> Modal {
        Modal {
            title: "Add account".to_string(),
            focus_index: self.focus_index,
            fields: vec![
                Field::Select {
                    label: "Account type".to_string(),
                    options: ACCOUNT_TYPES.iter().map(|t| t.to_string()).collect(),
                    selected: self.account_type_index,
                },
                Field::TextInput {
                    label: "Host".to_string(),
                    value: self.host.clone(),
                    secret: false,
                },
                Field::TextInput {
                    label: "User".to_string(),
                    value: self.user.clone(),
                    secret: false,
                },
                Field::TextInput {
                    label: "Password".to_string(),
                    value: self.password.clone(),
                    secret: true,
                },
                Field::TextInput {
                    label: "Port".to_string(),
                    value: self.port.clone(),
                    secret: false,
                },
                Field::TextInput {
                    label: "Account name".to_string(),
                    value: self.account_name.clone(),
                    secret: false,
                },
                Field::Button {
                    label: "Submit".to_string(),
                    action: ModalAction::Submit,
                },
                Field::Button {
                    label: "Cancel".to_string(),
                    action: ModalAction::Cancel,
                },
            ],
            error: if self.error.is_empty() {
                None
            } else {
                Some(self.error.clone())
            },
        }
    }

    pub(in crate::tui) fn handle_key(&mut self, key: KeyCode) -> ModalAction {
        // No edits while a request is outstanding; Esc still cancels.
        if self.submitting {
            return if key == KeyCode::Esc {
                ModalAction::Cancel
            } else {
                ModalAction::None
            };
        }
        let mut modal = self.to_modal();
        let action = handle_modal_key(&mut modal, key);
        self.apply_modal_state(&modal);
        action
    }

    /// Validate the form and, if it passes, mark the modal as submitting and
    /// hand back the request payload. At most one request is outstanding.
    pub(in crate::tui) fn begin_submit(&mut self) -> Option<AddAccountRequest> {
        if self.submitting {
            return None;
        }
        let host = self.host.trim().to_string();
        let user = self.user.trim().to_string();
        let password = self.password.trim().to_string();
        let port_text = self.port.trim();
        let account_name = self.account_name.trim().to_string();

        if host.is_empty()
            || user.is_empty()
            || password.is_empty()
            || port_text.is_empty()
            || account_name.is_empty()
        {
            self.error = "all fields are required".to_string();
            return None;
        }
        let Ok(port) = port_text.parse::<u32>() else {
            self.error = "port must be a number".to_string();
            return None;
        };

        self.error.clear();
        self.submitting = true;
        Some(AddAccountRequest {
            account_type: ACCOUNT_TYPES[self.account_type_index].to_string(),
            host,
            user,
            password,
            port,
            account_name,
        })
    }

    pub(in crate::tui) fn finish_submit(&mut self) {
        self.submitting = false;
    }

    pub(in crate::tui) fn set_error(&mut self, message: String) {
        self.error = message;
    }

    pub(in crate::tui) fn error(&self) -> &str {
        &self.error
    }

    fn apply_modal_state(&mut self, modal: &Modal) {
        self.focus_index = modal.focus_index;
        if let Some(Field::Select { selected, .. }) = modal.fields.first() {
            self.account_type_index = *selected;
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(1) {
            self.host = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(2) {
            self.user = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(3) {
            self.password = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(4) {
            self.port = value.clone();
        }
        if let Some(Field::TextInput { value, .. }) = modal.fields.get(5) {
            self.account_name = value.clone();
        }
    }
}
