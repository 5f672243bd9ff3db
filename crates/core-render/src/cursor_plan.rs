//! Cursor reconciliation: folds the end-of-frame cursor move/shape/visibility
//! change into the same output string as the cell diff, instead of issuing
//! it as a separate write. Order matters - shape first, then position and
//! visibility - so a terminal that applies DECSCUSR immediately never shows
//! the old shape at the new position for one frame.

use core_terminal::CursorState;

/// The cursor state before and after a frame, compared once at emit time so
/// an unmoved, unchanged cursor costs nothing on the wire.
#[derive(Debug, Clone, Copy)]
pub struct CursorPlan {
    pub previous: CursorState,
    pub current: CursorState,
}

impl CursorPlan {
    pub fn new(previous: CursorState, current: CursorState) -> Self {
        Self { previous, current }
    }

    /// Append whatever bytes are needed to bring the terminal's cursor from
    /// `previous` to `current`. Shape changes are emitted first (they're
    /// harmless while hidden), then position, then the final show/hide.
    pub fn emit(&self, out: &mut String) {
        if self.previous.shape != self.current.shape {
            core_terminal::ansi::cursor_style(out, self.current.shape.decscusr_param());
        }

        if self.current.visible {
            if self.previous.position != self.current.position || !self.previous.visible {
                core_terminal::ansi::cursor_position(out, self.current.position.y, self.current.position.x);
            }
            if !self.previous.visible {
                core_terminal::ansi::cursor_show(out);
            }
        } else if self.previous.visible {
            core_terminal::ansi::cursor_hide(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_geometry::Position;
    use core_terminal::CursorShape;

    #[test]
    fn unchanged_cursor_emits_nothing() {
        let state = CursorState::default();
        let plan = CursorPlan::new(state, state);
        let mut out = String::new();
        plan.emit(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn shape_change_precedes_position_and_show() {
        let previous = CursorState { position: Position::new(0, 0), visible: false, shape: CursorShape::default() };
        let current = CursorState { position: Position::new(3, 1), visible: true, shape: CursorShape::SteadyBar };
        let plan = CursorPlan::new(previous, current);
        let mut out = String::new();
        plan.emit(&mut out);

        let shape_idx = out.find("6 q").unwrap();
        let pos_idx = out.find("2;4H").unwrap();
        let show_idx = out.find("?25h").unwrap();
        assert!(shape_idx < pos_idx);
        assert!(pos_idx < show_idx);
    }

    #[test]
    fn going_invisible_only_hides() {
        let previous = CursorState { position: Position::new(2, 2), visible: true, shape: CursorShape::default() };
        let current = CursorState { visible: false, ..previous };
        let plan = CursorPlan::new(previous, current);
        let mut out = String::new();
        plan.emit(&mut out);
        assert_eq!(out, "\x1b[?25l");
    }

    #[test]
    fn moving_while_already_visible_repositions_without_resending_show() {
        let previous = CursorState { position: Position::new(0, 0), visible: true, shape: CursorShape::default() };
        let current = CursorState { position: Position::new(5, 5), ..previous };
        let plan = CursorPlan::new(previous, current);
        let mut out = String::new();
        plan.emit(&mut out);
        assert!(!out.contains("?25h"));
        assert!(out.contains("6;6H"));
    }
}
