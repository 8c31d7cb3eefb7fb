/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for syncer-console-api tests

use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Account payload JSON as the backend returns it (nested account_config)
pub fn sample_account_json() -> serde_json::Value {
    serde_json::json!({
        "id": 12,
        "owner": "ops@example.com",
        "account_config": {
            "host": "mysql.internal",
            "user": "syncer",
            "password": "hunter2",
            "port": 3306,
            "account_name": "orders-db"
        }
    })
}
