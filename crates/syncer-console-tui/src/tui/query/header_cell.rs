/*
[INPUT]:  Mouse drag coordinates in terminal cells
[OUTPUT]: One resizable header cell tracking its own width during a drag
[POS]:    Query panel - column resize primitive
[UPDATE]: When changing resize behavior or width bounds
*/

/// Column widths keep the backend UI's pixel contract: defaults of 200 (80
/// for the index column) and a floor of 60. Terminal rendering converts px
/// to cells through this fixed scale, and mouse deltas convert back the
/// same way.
pub(in crate::tui) const PX_PER_CELL: u16 = 10;
/// No drag may shrink a column below this width.
pub(in crate::tui) const MIN_COLUMN_WIDTH: u16 = 60;

/// Rendered width in terminal cells for a pixel width.
pub(in crate::tui) fn cells_for(px: u16) -> u16 {
    (px / PX_PER_CELL).max(1)
}

#[derive(Debug)]
struct DragState {
    origin_x: u16,
    origin_width: u16,
}

/// One result-table header cell.
///
/// While a drag is in progress the cell owns its displayed width and updates
/// it per move for immediate feedback; on release the final width is handed
/// back to the owner, whose width map then becomes authoritative.
#[derive(Debug)]
pub(in crate::tui) struct HeaderCell {
    label: String,
    width: u16,
    drag: Option<DragState>,
}

impl HeaderCell {
    pub(in crate::tui) fn new(label: String, width: u16) -> Self {
        Self {
            label,
            width,
            drag: None,
        }
    }

    pub(in crate::tui) fn label(&self) -> &str {
        &self.label
    }

    pub(in crate::tui) fn width(&self) -> u16 {
        self.width
    }

    pub(in crate::tui) fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Capture the starting pointer column and current width.
    pub(in crate::tui) fn begin_drag(&mut self, x: u16) {
        self.drag = Some(DragState {
            origin_x: x,
            origin_width: self.width,
        });
    }

    /// Update the displayed width for the current pointer column.
    ///
    /// `new_width = max(60, origin_width + delta_px)`; a no-op when no drag
    /// is active or the pointer has not moved.
    pub(in crate::tui) fn drag_to(&mut self, x: u16) {
        let Some(drag) = self.drag.as_ref() else {
            return;
        };
        let delta_cells = i64::from(x) - i64::from(drag.origin_x);
        let delta_px = delta_cells * i64::from(PX_PER_CELL);
        if delta_px == 0 {
            return;
        }
        let width = i64::from(drag.origin_width) + delta_px;
        self.width = width.clamp(i64::from(MIN_COLUMN_WIDTH), i64::from(u16::MAX)) as u16;
    }

    /// Release the drag and report the final width for the owner to commit.
    pub(in crate::tui) fn end_drag(&mut self, x: u16) -> Option<u16> {
        self.drag.as_ref()?;
        self.drag_to(x);
        self.drag = None;
        Some(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_grows_width() {
        let mut cell = HeaderCell::new("host".to_string(), 200);
        cell.begin_drag(40);
        cell.drag_to(45);
        assert_eq!(cell.width(), 250);
        assert!(cell.is_dragging());
    }

    #[test]
    fn test_width_never_drops_below_minimum() {
        let mut cell = HeaderCell::new("host".to_string(), 200);
        cell.begin_drag(500);
        // Far past the point where origin_width is exhausted.
        cell.drag_to(0);
        assert_eq!(cell.width(), MIN_COLUMN_WIDTH);
        assert_eq!(cell.end_drag(0), Some(MIN_COLUMN_WIDTH));
    }

    #[test]
    fn test_small_negative_delta_shrinks_from_origin() {
        let mut cell = HeaderCell::new("host".to_string(), 200);
        cell.begin_drag(50);
        cell.drag_to(44);
        assert_eq!(cell.width(), 140);
    }

    #[test]
    fn test_moves_without_drag_are_ignored() {
        let mut cell = HeaderCell::new("host".to_string(), 200);
        cell.drag_to(90);
        assert_eq!(cell.width(), 200);
        assert_eq!(cell.end_drag(90), None);
    }

    #[test]
    fn test_release_clears_drag_state() {
        let mut cell = HeaderCell::new("host".to_string(), 200);
        cell.begin_drag(10);
        assert_eq!(cell.end_drag(12), Some(220));
        assert!(!cell.is_dragging());
        // Subsequent moves without a new drag do nothing.
        cell.drag_to(40);
        assert_eq!(cell.width(), 220);
    }

    #[test]
    fn test_zero_delta_is_a_no_op() {
        let mut cell = HeaderCell::new("host".to_string(), 200);
        cell.begin_drag(10);
        cell.drag_to(10);
        assert_eq!(cell.width(), 200);
    }

    #[test]
    fn test_cells_for_scale() {
        assert_eq!(cells_for(200), 20);
        assert_eq!(cells_for(80), 8);
        assert_eq!(cells_for(60), 6);
        assert_eq!(cells_for(5), 1);
    }
}
