/*
[INPUT]:  Backend client, bootstrap state, crossterm events, and log buffer
[OUTPUT]: Ratatui-based admin console for accounts, queries, and sync jobs
[POS]:    TUI module root for the syncer-console binary
[UPDATE]: When adding new views or changing module layout
*/

mod app;
mod events;
mod query;
mod terminal;
mod ui;

pub mod runtime;
