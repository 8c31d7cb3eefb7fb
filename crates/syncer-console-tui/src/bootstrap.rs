/*
[INPUT]:  Pre-populated page state JSON as the backend injects it
[OUTPUT]: Parsed bootstrap state for the accounts and jobs views
[POS]:    Configuration layer - initial console state
[UPDATE]: When the injected page state gains new fields
*/

use std::path::Path;

use serde::{Deserialize, Serialize};
use syncer_console_api::{AccountPayload, SyncJob};

/// Initial console state, normally injected into the page by the backend.
///
/// Accounts pages carry `{accounts, error}`, job pages `{syncerJobs, message}`;
/// a single file may carry both. The content is taken as-is and not
/// reconciled with the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub accounts: Vec<AccountPayload>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, rename = "syncerJobs")]
    pub syncer_jobs: Vec<SyncJob>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BootstrapConfig {
    /// Load bootstrap state from a JSON file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }
}
