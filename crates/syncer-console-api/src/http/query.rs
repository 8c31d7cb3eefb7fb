/*
[INPUT]:  Raw query text and a target account identifier
[OUTPUT]: Ordered result rows or an API error payload
[POS]:    HTTP layer - ad-hoc query endpoint
[UPDATE]: When the query endpoint or result shape changes
*/

use crate::http::{Result, SyncerClient, SyncerError};
use crate::types::{QueryRequest, QueryResponse, QueryRow};
use reqwest::Method;

impl SyncerClient {
    /// Run an ad-hoc query against one account's database
    ///
    /// POST /api/v1/account/{id}/query/
    ///
    /// The query text is sent raw; the caller is responsible for trimming.
    /// Row order and per-row key order are preserved as the backend sent them.
    pub async fn query_account(&self, account_id: i64, query: &str) -> Result<Vec<QueryRow>> {
        let endpoint = format!("/api/v1/account/{account_id}/query/");
        let builder = self
            .api_request(Method::POST, &endpoint)?
            .json(&QueryRequest {
                query: query.to_string(),
            });
        let response: QueryResponse = self.send_json(builder).await?;

        if let Some(message) = response.error_msg {
            return Err(SyncerError::from_api_message(message));
        }
        Ok(response.results.unwrap_or_default())
    }
}
