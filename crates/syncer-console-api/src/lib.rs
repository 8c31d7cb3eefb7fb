/*
[INPUT]:  Public API exports for syncer-console-api crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod http;
pub mod types;

// Re-export main types for convenience
pub use http::{ClientConfig, Result, SyncerClient, SyncerError};
pub use types::{Account, AccountPayload, AddAccountRequest, QueryRow, SyncJob};
