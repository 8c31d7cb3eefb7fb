/*
[INPUT]:  Query input, async query outcomes, and mouse drag events
[OUTPUT]: Query panel state machine with per-column width management
[POS]:    Query panel module root
[UPDATE]: When changing submission flow, width derivation, or resize routing
*/

mod header_cell;
mod table;

pub(in crate::tui) use header_cell::{HeaderCell, MIN_COLUMN_WIDTH, PX_PER_CELL, cells_for};
pub(in crate::tui) use table::draw_query_panel;

use std::collections::HashMap;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use syncer_console_api::{Account, QueryRow};

/// Synthetic leading column holding 1-based row numbers.
pub(in crate::tui) const INDEX_COLUMN_KEY: &str = "index";
pub(in crate::tui) const INDEX_COLUMN_WIDTH: u16 = 80;
pub(in crate::tui) const DEFAULT_COLUMN_WIDTH: u16 = 200;
/// Gap between rendered columns, in cells; drag handles live in this gap.
pub(in crate::tui) const COLUMN_SPACING: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::tui) enum QueryPhase {
    Idle,
    Querying,
    Succeeded,
    Failed,
}

/// Width map for a fresh result set: 80 for the index column plus 200 for
/// each key of the first row. Only the first row's key set matters.
pub(in crate::tui) fn derive_column_widths(rows: &[QueryRow]) -> HashMap<String, u16> {
    let mut widths = HashMap::from([(INDEX_COLUMN_KEY.to_string(), INDEX_COLUMN_WIDTH)]);
    if let Some(first) = rows.first() {
        for key in first.keys() {
            widths.insert(key.clone(), DEFAULT_COLUMN_WIDTH);
        }
    }
    widths
}

/// The transient session for one ad-hoc query against one account.
///
/// All mutable view state (width map, results, drag progress) is owned by
/// this instance and discarded wholesale when the panel closes.
pub(in crate::tui) struct QueryPanel {
    account: Account,
    generation: u64,
    input: String,
    phase: QueryPhase,
    error_msg: String,
    results: Option<Vec<QueryRow>>,
    column_widths: HashMap<String, u16>,
    header_cells: Vec<HeaderCell>,
    active_drag: Option<usize>,
    closing: bool,
    table_area: Option<Rect>,
}

impl QueryPanel {
    pub(in crate::tui) fn new(account: Account, generation: u64) -> Self {
        Self {
            account,
            generation,
            input: String::new(),
            phase: QueryPhase::Idle,
            error_msg: String::new(),
            results: None,
            column_widths: HashMap::new(),
            header_cells: Vec::new(),
            active_drag: None,
            closing: false,
            table_area: None,
        }
    }

    pub(in crate::tui) fn account(&self) -> &Account {
        &self.account
    }

    pub(in crate::tui) fn generation(&self) -> u64 {
        self.generation
    }

    pub(in crate::tui) fn phase(&self) -> QueryPhase {
        self.phase
    }

    pub(in crate::tui) fn input(&self) -> &str {
        &self.input
    }

    pub(in crate::tui) fn error_msg(&self) -> &str {
        &self.error_msg
    }

    pub(in crate::tui) fn results(&self) -> Option<&[QueryRow]> {
        self.results.as_deref()
    }

    pub(in crate::tui) fn has_results(&self) -> bool {
        self.results.is_some()
    }

    pub(in crate::tui) fn header_cells(&self) -> &[HeaderCell] {
        &self.header_cells
    }

    pub(in crate::tui) fn is_closing(&self) -> bool {
        self.closing
    }

    pub(in crate::tui) fn begin_close(&mut self) {
        self.closing = true;
    }

    pub(in crate::tui) fn input_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    pub(in crate::tui) fn input_backspace(&mut self) {
        self.input.pop();
    }

    /// Transition into `Querying` and yield the text to submit.
    ///
    /// Yields nothing for trimmed-empty input (silent no-op) or while a
    /// request is already outstanding: submission is blocked, not queued.
    pub(in crate::tui) fn begin_submit(&mut self) -> Option<String> {
        if self.closing || self.phase == QueryPhase::Querying {
            return None;
        }
        let trimmed = self.input.trim();
        if trimmed.is_empty() {
            return None;
        }
        self.phase = QueryPhase::Querying;
        Some(trimmed.to_string())
    }

    /// Store a fresh result set, recomputing widths and header cells from
    /// the first row's keys.
    pub(in crate::tui) fn apply_success(&mut self, rows: Vec<QueryRow>) {
        self.phase = QueryPhase::Succeeded;
        self.error_msg.clear();
        self.column_widths = derive_column_widths(&rows);
        self.header_cells = rows
            .first()
            .map(|row| {
                row.keys()
                    .map(|key| HeaderCell::new(key.clone(), DEFAULT_COLUMN_WIDTH))
                    .collect()
            })
            .unwrap_or_default();
        self.active_drag = None;
        self.results = Some(rows);
    }

    pub(in crate::tui) fn apply_error(&mut self, message: String) {
        self.phase = QueryPhase::Failed;
        self.error_msg = message;
        self.results = Some(Vec::new());
        self.header_cells.clear();
        self.active_drag = None;
    }

    pub(in crate::tui) fn width_for(&self, key: &str) -> u16 {
        self.column_widths
            .get(key)
            .copied()
            .unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    /// Overwrite exactly one entry of the width map. Valid in any state; a
    /// resize against stale results is inert but harmless.
    pub(in crate::tui) fn resize_column(&mut self, key: &str, width: u16) {
        self.column_widths.insert(key.to_string(), width);
    }

    pub(in crate::tui) fn set_table_area(&mut self, area: Rect) {
        self.table_area = Some(area);
    }

    /// Route a mouse event to the column resize machinery.
    ///
    /// Drag-move and drag-release are only routed while a drag is active,
    /// and the active drag is cleared on release, so no routing survives
    /// across unrelated cells.
    pub(in crate::tui) fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = self.handle_hit(event.column, event.row) {
                    self.active_drag = Some(index);
                    self.header_cells[index].begin_drag(event.column);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(index) = self.active_drag {
                    self.header_cells[index].drag_to(event.column);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(index) = self.active_drag.take() {
                    if let Some(width) = self.header_cells[index].end_drag(event.column) {
                        let key = self.header_cells[index].label().to_string();
                        self.resize_column(&key, width);
                    }
                }
            }
            _ => {}
        }
    }

    /// Hit-test a pointer position against the drag handles on the header
    /// row. A handle sits at the right edge of each data column, spanning
    /// the column gap plus one cell of tolerance either side.
    fn handle_hit(&self, x: u16, y: u16) -> Option<usize> {
        let area = self.table_area?;
        if y != area.y {
            return None;
        }
        let mut edge = area
            .x
            .saturating_add(cells_for(self.width_for(INDEX_COLUMN_KEY)))
            .saturating_add(COLUMN_SPACING);
        for (index, cell) in self.header_cells.iter().enumerate() {
            edge = edge.saturating_add(cells_for(cell.width()));
            let lo = edge.saturating_sub(1);
            let hi = edge.saturating_add(COLUMN_SPACING);
            if x >= lo && x <= hi {
                return Some(index);
            }
            edge = edge.saturating_add(COLUMN_SPACING);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syncer_console_api::types::{AccountConfig, AccountPayload};

    fn test_account() -> Account {
        Account::from(AccountPayload {
            id: 1,
            owner: None,
            account_config: AccountConfig {
                host: "127.0.0.1".to_string(),
                user: "root".to_string(),
                password: "pw".to_string(),
                port: 3306,
                account_name: "local".to_string(),
            },
        })
    }

    fn rows(json: &str) -> Vec<QueryRow> {
        serde_json::from_str(json).expect("rows")
    }

    fn panel() -> QueryPanel {
        QueryPanel::new(test_account(), 1)
    }

    #[test]
    fn test_derived_widths_for_two_columns() {
        let rows = rows(r#"[{"a": 1, "b": 2}, {"a": 3, "b": 4}]"#);
        let widths = derive_column_widths(&rows);
        assert_eq!(widths.len(), 3);
        assert_eq!(widths.get(INDEX_COLUMN_KEY), Some(&80));
        assert_eq!(widths.get("a"), Some(&200));
        assert_eq!(widths.get("b"), Some(&200));
    }

    #[test]
    fn test_derived_widths_for_empty_results() {
        let widths = derive_column_widths(&[]);
        assert_eq!(widths.len(), 1);
        assert_eq!(widths.get(INDEX_COLUMN_KEY), Some(&80));
    }

    #[test]
    fn test_empty_submission_is_a_silent_no_op() {
        let mut panel = panel();
        assert_eq!(panel.begin_submit(), None);
        panel.input_char(' ');
        panel.input_char('\t');
        assert_eq!(panel.begin_submit(), None);
        assert_eq!(panel.phase(), QueryPhase::Idle);
        assert!(!panel.has_results());
    }

    #[test]
    fn test_submission_trims_and_blocks_while_querying() {
        let mut panel = panel();
        for ch in "  select 1  ".chars() {
            panel.input_char(ch);
        }
        assert_eq!(panel.begin_submit(), Some("select 1".to_string()));
        assert_eq!(panel.phase(), QueryPhase::Querying);
        // One outstanding request at a time: blocked, not queued.
        assert_eq!(panel.begin_submit(), None);
    }

    #[test]
    fn test_submission_blocked_while_closing() {
        let mut panel = panel();
        for ch in "select 1".chars() {
            panel.input_char(ch);
        }
        panel.begin_close();
        assert_eq!(panel.begin_submit(), None);
    }

    #[test]
    fn test_success_recomputes_widths_and_keeps_row_order() {
        let mut panel = panel();
        for ch in "select 1".chars() {
            panel.input_char(ch);
        }
        panel.begin_submit().expect("submit");
        panel.apply_success(rows(r#"[{"a": 1, "b": 2}, {"a": 3, "b": 4}]"#));

        assert_eq!(panel.phase(), QueryPhase::Succeeded);
        assert_eq!(panel.results().expect("results").len(), 2);
        assert_eq!(panel.width_for("a"), 200);
        assert_eq!(panel.width_for(INDEX_COLUMN_KEY), 80);
        let labels: Vec<&str> = panel.header_cells().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["a", "b"]);

        // Next submission is allowed again.
        assert!(panel.begin_submit().is_some());
    }

    #[test]
    fn test_empty_result_set_succeeds_without_error() {
        let mut panel = panel();
        for ch in "select 1".chars() {
            panel.input_char(ch);
        }
        panel.begin_submit().expect("submit");
        panel.apply_success(Vec::new());

        // An empty result set is a successful outcome, distinct from both
        // idle (no results yet) and failure (error message set).
        assert_eq!(panel.phase(), QueryPhase::Succeeded);
        assert_eq!(panel.results(), Some(&[][..]));
        assert!(panel.error_msg().is_empty());
        assert!(panel.header_cells().is_empty());
        assert_eq!(panel.width_for(INDEX_COLUMN_KEY), 80);
    }

    #[test]
    fn test_error_clears_results_and_stores_message() {
        let mut panel = panel();
        panel.apply_success(rows(r#"[{"a": 1}]"#));
        panel.apply_error("table does not exist".to_string());

        assert_eq!(panel.phase(), QueryPhase::Failed);
        assert_eq!(panel.error_msg(), "table does not exist");
        assert_eq!(panel.results(), Some(&[][..]));
    }

    #[test]
    fn test_resize_changes_exactly_one_entry() {
        let mut panel = panel();
        panel.apply_success(rows(r#"[{"a": 1, "b": 2}]"#));
        panel.resize_column("a", 340);

        assert_eq!(panel.width_for("a"), 340);
        assert_eq!(panel.width_for("b"), 200);
        assert_eq!(panel.width_for(INDEX_COLUMN_KEY), 80);
    }

    #[test]
    fn test_resize_in_idle_state_is_inert_but_harmless() {
        let mut panel = panel();
        panel.resize_column("ghost", 120);
        assert_eq!(panel.width_for("ghost"), 120);
        assert_eq!(panel.phase(), QueryPhase::Idle);
    }

    #[test]
    fn test_mouse_drag_resizes_through_the_handle() {
        let mut panel = panel();
        panel.apply_success(rows(r#"[{"a": 1, "b": 2}]"#));
        panel.set_table_area(Rect::new(0, 0, 80, 20));

        // Index column is 8 cells + 1 spacing; column "a" is 20 cells, so
        // its handle edge sits at x = 29.
        panel.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 29,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        assert!(panel.header_cells()[0].is_dragging());

        panel.handle_mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 34,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        assert_eq!(panel.header_cells()[0].width(), 250);
        // Map is not yet committed mid-drag.
        assert_eq!(panel.width_for("a"), 200);

        panel.handle_mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 34,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        assert_eq!(panel.width_for("a"), 250);
        assert_eq!(panel.width_for("b"), 200);
        assert!(!panel.header_cells()[0].is_dragging());
    }

    #[test]
    fn test_mouse_off_the_header_row_starts_no_drag() {
        let mut panel = panel();
        panel.apply_success(rows(r#"[{"a": 1}]"#));
        panel.set_table_area(Rect::new(0, 0, 80, 20));

        panel.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 29,
            row: 5,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        assert!(!panel.header_cells()[0].is_dragging());

        // Drag events with no active drag are ignored.
        panel.handle_mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 40,
            row: 0,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        assert_eq!(panel.header_cells()[0].width(), 200);
    }
}
