/*
[INPUT]:  TUI app state for UI components
[OUTPUT]: UI component render functions and module exports
[POS]:    TUI UI module root
[UPDATE]: When adding views or changing component exports
*/

mod accounts;
mod jobs;
mod layout;
mod logs;

pub mod modal;

pub(in crate::tui) use accounts::draw_accounts_view;
pub(in crate::tui) use jobs::draw_jobs_view;
pub(in crate::tui) use layout::draw_tabs;
pub(in crate::tui) use logs::draw_logs;
