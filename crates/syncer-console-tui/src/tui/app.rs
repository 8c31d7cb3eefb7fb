/*
[INPUT]:  Backend client, bootstrap state, and async API completion outcomes
[OUTPUT]: AppState helpers for view state, selection, and submission flows
[POS]:    TUI app state and submission management
[UPDATE]: When adding views, flows, or completion handling
*/

use std::sync::Arc;

use ratatui::widgets::TableState;
use tokio::sync::mpsc::UnboundedSender;

use syncer_console_api::{Account, QueryRow, SyncJob, SyncerClient, SyncerError};

use super::query::QueryPanel;
use super::runtime::{CLOSE_ANIMATION_DELAY, LogBufferHandle, UiEvent};
use super::ui::modal::AddAccountModal;
use crate::bootstrap::BootstrapConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tab {
    Accounts,
    Jobs,
    Logs,
}

pub(super) struct AppState {
    pub(super) client: Arc<SyncerClient>,
    pub(super) events: UnboundedSender<UiEvent>,
    pub(super) log_buffer: LogBufferHandle,
    pub(super) accounts: Vec<Account>,
    pub(super) bootstrap_error: Option<String>,
    pub(super) jobs: Vec<SyncJob>,
    pub(super) jobs_message: Option<String>,
    pub(super) table_state: TableState,
    pub(super) current_tab: Tab,
    pub(super) status_message: String,
    pub(super) add_account_modal: Option<AddAccountModal>,
    pub(super) query_panel: Option<QueryPanel>,
    pub(super) session_expired: bool,
    panel_generation: u64,
}

impl AppState {
    pub(super) fn new(
        client: Arc<SyncerClient>,
        bootstrap: BootstrapConfig,
        log_buffer: LogBufferHandle,
        events: UnboundedSender<UiEvent>,
    ) -> Self {
        let accounts: Vec<Account> = bootstrap
            .accounts
            .into_iter()
            .map(Account::from)
            .collect();
        let mut table_state = TableState::default();
        if !accounts.is_empty() {
            table_state.select(Some(0));
        }
        Self {
            client,
            events,
            log_buffer,
            accounts,
            bootstrap_error: bootstrap.error,
            jobs: bootstrap.syncer_jobs,
            jobs_message: bootstrap.message,
            table_state,
            current_tab: Tab::Accounts,
            status_message: "Ready".to_string(),
            add_account_modal: None,
            query_panel: None,
            session_expired: false,
            panel_generation: 0,
        }
    }

    pub(super) fn selected_account(&self) -> Option<&Account> {
        let idx = self.table_state.selected().unwrap_or(0);
        self.accounts.get(idx)
    }

    pub(super) fn next_tab(&mut self) {
        self.current_tab = match self.current_tab {
            Tab::Accounts => Tab::Jobs,
            Tab::Jobs => Tab::Logs,
            Tab::Logs => Tab::Accounts,
        };
    }

    pub(super) fn set_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    pub(super) fn move_selection(&mut self, delta: isize) {
        if self.accounts.is_empty() {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, (self.accounts.len() - 1) as isize) as usize;
        self.table_state.select(Some(next));
    }

    pub(super) fn open_add_account(&mut self) {
        if self.add_account_modal.is_none() {
            self.add_account_modal = Some(AddAccountModal::new());
        }
    }

    pub(super) fn close_modal(&mut self) {
        self.add_account_modal = None;
    }

    pub(super) fn open_query_panel(&mut self) {
        if self.query_panel.is_some() {
            return;
        }
        let Some(account) = self.selected_account().cloned() else {
            self.status_message = "no account selected".to_string();
            return;
        };
        self.panel_generation += 1;
        self.query_panel = Some(QueryPanel::new(account, self.panel_generation));
    }

    /// Ask the open panel for a submittable query and, if it yields one,
    /// issue exactly one request for it.
    pub(super) fn submit_panel_query(&mut self) {
        let Some(panel) = self.query_panel.as_mut() else {
            return;
        };
        let Some(text) = panel.begin_submit() else {
            return;
        };
        let generation = panel.generation();
        let account_id = panel.account().id;
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = client.query_account(account_id, &text).await;
            let _ = events.send(UiEvent::QueryFinished { generation, outcome });
        });
    }

    /// Apply a query completion to the panel it belongs to.
    ///
    /// Completions for a panel that is gone, or from an older panel
    /// generation, are dropped: in-flight requests are never cancelled, so a
    /// late response must land as a no-op.
    pub(super) fn apply_query_outcome(
        &mut self,
        generation: u64,
        outcome: Result<Vec<QueryRow>, SyncerError>,
    ) {
        let Some(panel) = self.query_panel.as_mut() else {
            return;
        };
        if panel.generation() != generation {
            return;
        }
        match outcome {
            Ok(rows) => panel.apply_success(rows),
            Err(err) if err.is_session_expired() => {
                // Handoff to the login boundary; the panel sets no local error.
                self.query_panel = None;
                self.session_expired = true;
            }
            Err(err) => panel.apply_error(err.user_message()),
        }
    }

    pub(super) fn begin_close_panel(&mut self) {
        let Some(panel) = self.query_panel.as_mut() else {
            return;
        };
        if panel.is_closing() {
            return;
        }
        panel.begin_close();
        let generation = panel.generation();
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(CLOSE_ANIMATION_DELAY).await;
            let _ = events.send(UiEvent::PanelCloseElapsed { generation });
        });
    }

    pub(super) fn finish_close_panel(&mut self, generation: u64) {
        if self
            .query_panel
            .as_ref()
            .is_some_and(|panel| panel.generation() == generation)
        {
            self.query_panel = None;
        }
    }

    pub(super) fn submit_add_account(&mut self) {
        let Some(modal) = self.add_account_modal.as_mut() else {
            return;
        };
        let Some(request) = modal.begin_submit() else {
            return;
        };
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = client.add_account(&request).await;
            let _ = events.send(UiEvent::AccountAdded { outcome });
        });
    }

    pub(super) fn apply_add_account_outcome(&mut self, outcome: Result<Account, SyncerError>) {
        let Some(modal) = self.add_account_modal.as_mut() else {
            return;
        };
        modal.finish_submit();
        match outcome {
            Ok(account) => {
                let name = account.account_name.clone();
                // Append only; the existing list is never re-fetched or reordered.
                self.accounts.push(account);
                if self.table_state.selected().is_none() {
                    self.table_state.select(Some(0));
                }
                self.add_account_modal = None;
                self.status_message = format!("account created: {name}");
            }
            Err(err) if err.is_session_expired() => {
                self.add_account_modal = None;
                self.session_expired = true;
            }
            Err(err) => modal.set_error(err.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;
    use syncer_console_api::{AccountPayload, types::AccountConfig};
    use tokio::sync::mpsc;

    use crate::tui::runtime::LogBuffer;

    fn payload(id: i64, name: &str) -> AccountPayload {
        AccountPayload {
            id,
            owner: Some("admin".to_string()),
            account_config: AccountConfig {
                host: "127.0.0.1".to_string(),
                user: "root".to_string(),
                password: "pw".to_string(),
                port: 3306,
                account_name: name.to_string(),
            },
        }
    }

    fn account(id: i64, name: &str) -> Account {
        Account::from(payload(id, name))
    }

    fn test_app(accounts: Vec<AccountPayload>) -> AppState {
        let bootstrap = BootstrapConfig {
            accounts,
            ..BootstrapConfig::default()
        };
        let client = Arc::new(SyncerClient::new().expect("client"));
        let log_buffer = Arc::new(StdMutex::new(LogBuffer::new(16)));
        let (tx, _rx) = mpsc::unbounded_channel();
        AppState::new(client, bootstrap, log_buffer, tx)
    }

    #[test]
    fn test_session_expiry_closes_panel_without_local_error() {
        let mut app = test_app(vec![payload(1, "one")]);
        app.open_query_panel();
        let generation = app.query_panel.as_ref().expect("panel").generation();

        app.apply_query_outcome(generation, Err(SyncerError::SessionExpired));

        assert!(app.session_expired);
        assert!(app.query_panel.is_none());
    }

    #[test]
    fn test_late_query_outcome_is_dropped() {
        let mut app = test_app(vec![payload(1, "one")]);
        app.open_query_panel();
        let generation = app.query_panel.as_ref().expect("panel").generation();

        // Stale generation: the completion belongs to an earlier panel.
        app.apply_query_outcome(generation + 1, Ok(Vec::new()));
        assert!(!app.query_panel.as_ref().expect("panel").has_results());

        // No panel mounted at all.
        app.query_panel = None;
        app.apply_query_outcome(generation, Ok(Vec::new()));
        assert!(app.query_panel.is_none());
        assert!(!app.session_expired);
    }

    #[test]
    fn test_add_account_appends_exactly_one_entry() {
        let mut app = test_app(vec![payload(1, "one"), payload(2, "two")]);
        app.open_add_account();

        app.apply_add_account_outcome(Ok(account(3, "three")));

        let names: Vec<&str> = app
            .accounts
            .iter()
            .map(|a| a.account_name.as_str())
            .collect();
        assert_eq!(names, vec!["one", "two", "three"]);
        assert!(app.add_account_modal.is_none());
    }

    #[test]
    fn test_add_account_error_stays_in_modal() {
        let mut app = test_app(vec![]);
        app.open_add_account();

        app.apply_add_account_outcome(Err(SyncerError::Api {
            message: "host unreachable".to_string(),
        }));

        let modal = app.add_account_modal.as_ref().expect("modal still open");
        assert_eq!(modal.error(), "host unreachable");
        assert!(app.accounts.is_empty());
    }

    #[tokio::test]
    async fn test_query_submission_round_trip() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/account/1/query/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"id": 1, "name": "alpha"}]
            })))
            .mount(&server)
            .await;

        let client = Arc::new(SyncerClient::with_base_url(&server.uri()).expect("client"));
        let log_buffer = Arc::new(StdMutex::new(LogBuffer::new(16)));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let bootstrap = BootstrapConfig {
            accounts: vec![payload(1, "one")],
            ..BootstrapConfig::default()
        };
        let mut app = AppState::new(client, bootstrap, log_buffer, tx);

        app.open_query_panel();
        for ch in "select 1".chars() {
            app.query_panel.as_mut().expect("panel").input_char(ch);
        }
        app.submit_panel_query();

        let event = rx.recv().await.expect("completion event");
        let UiEvent::QueryFinished {
            generation,
            outcome,
        } = event
        else {
            panic!("query completion expected");
        };
        app.apply_query_outcome(generation, outcome);

        let panel = app.query_panel.as_ref().expect("panel");
        assert_eq!(panel.results().expect("rows").len(), 1);
        assert_eq!(panel.width_for("name"), 200);
    }

    #[test]
    fn test_finish_close_panel_checks_generation() {
        let mut app = test_app(vec![payload(1, "one")]);
        app.open_query_panel();
        let generation = app.query_panel.as_ref().expect("panel").generation();

        app.finish_close_panel(generation + 1);
        assert!(app.query_panel.is_some());

        app.finish_close_panel(generation);
        assert!(app.query_panel.is_none());
    }
}
