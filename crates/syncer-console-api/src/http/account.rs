/*
[INPUT]:  Account creation requests with trimmed credential fields
[OUTPUT]: Persisted account records flattened from the wire payload
[POS]:    HTTP layer - account management endpoints
[UPDATE]: When account endpoints or payload shapes change
*/

use crate::http::{Result, SyncerClient, SyncerError};
use crate::types::{Account, AddAccountRequest, AddAccountResponse};
use reqwest::Method;

impl SyncerClient {
    /// Create a new database account record
    ///
    /// POST /api/v1/account/add/
    pub async fn add_account(&self, request: &AddAccountRequest) -> Result<Account> {
        let builder = self
            .api_request(Method::POST, "/api/v1/account/add/")?
            .json(request);
        let response: AddAccountResponse = self.send_json(builder).await?;

        if let Some(message) = response.error {
            return Err(SyncerError::from_api_message(message));
        }
        let payload = response
            .account
            .ok_or_else(|| SyncerError::InvalidResponse("missing account in response".to_string()))?;
        Ok(Account::from(payload))
    }
}
