/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust response structs with deserialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

use super::models::{AccountPayload, QueryRow};

/// Response for POST /api/v1/account/add/
///
/// Exactly one of `account` / `error` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddAccountResponse {
    #[serde(default)]
    pub account: Option<AccountPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Response for POST /api/v1/account/{id}/query/
///
/// Exactly one of `results` / `error_msg` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Option<Vec<QueryRow>>,
    #[serde(default)]
    pub error_msg: Option<String>,
}
