/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One result row from an ad-hoc query.
///
/// The column set is arbitrary and only known at runtime, so rows stay as
/// ordered JSON maps; key order is the backend's enumeration order.
pub type QueryRow = serde_json::Map<String, serde_json::Value>;

/// Account record as the backend sends it: connection fields are nested
/// under `account_config`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountPayload {
    pub id: i64,
    #[serde(default)]
    pub owner: Option<String>,
    pub account_config: AccountConfig,
}

/// Connection credential fields of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub port: u32,
    pub account_name: String,
}

/// Flattened account record used throughout the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub host: String,
    pub user: String,
    pub password: String,
    pub port: u32,
    pub account_name: String,
    pub owner: Option<String>,
}

impl From<AccountPayload> for Account {
    fn from(payload: AccountPayload) -> Self {
        let AccountPayload {
            id,
            owner,
            account_config,
        } = payload;
        Self {
            id,
            host: account_config.host,
            user: account_config.user,
            password: account_config.password,
            port: account_config.port,
            account_name: account_config.account_name,
            owner,
        }
    }
}

/// One synchronization job as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncJob {
    pub dtable_uuid: String,
    pub name: String,
    pub job_type: String,
    pub is_valid: bool,
    pub last_trigger_time: DateTime<Utc>,
    pub trigger_detail: TriggerDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDetail {
    pub trigger_type: String,
}
