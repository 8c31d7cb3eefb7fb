/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust request structs with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::{Deserialize, Serialize};

/// Body for POST /api/v1/account/add/
///
/// String fields are expected to be trimmed by the caller before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddAccountRequest {
    pub account_type: String,
    pub host: String,
    pub user: String,
    pub password: String,
    pub port: u32,
    pub account_name: String,
}

/// Body for POST /api/v1/account/{id}/query/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
}
