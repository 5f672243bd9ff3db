//! Turns a cell diff (or a full buffer, for the first-frame/resize path)
//! into the exact ANSI byte stream `core_terminal::ansi` assembles.
//!
//! Cursor position and SGR state are tracked locally so repeated writes to
//! adjacent cells in the same style cost nothing beyond the symbol bytes
//! themselves - the whole point of assembling one string per frame instead
//! of issuing a `move + style + print` per cell unconditionally.

use core_buffer::Buffer;
use core_cell::{Cell, Style};
use core_geometry::Position;
use core_terminal::ansi;

use crate::cursor_plan::CursorPlan;

#[derive(Default)]
struct TrackedState {
    row: Option<u16>,
    col: Option<u16>,
    style: Option<Style>,
    hyperlink: Option<String>,
}

impl TrackedState {
    fn move_to(&mut self, out: &mut String, row: u16, col: u16) {
        if self.row != Some(row) || self.col != Some(col) {
            ansi::cursor_position(out, row, col);
        }
        self.row = Some(row);
        self.col = Some(col);
    }

    fn advance_col(&mut self, width: u16) {
        if let Some(col) = self.col {
            self.col = Some(col + width);
        }
    }

    fn apply_style(&mut self, out: &mut String, style: Style) {
        if self.style != Some(style) {
            ansi::sgr_for_style(out, style);
            self.style = Some(style);
        }
    }

    fn apply_hyperlink(&mut self, out: &mut String, hyperlink: &str) {
        if self.hyperlink.as_deref() != Some(hyperlink) {
            ansi::hyperlink(out, hyperlink);
            self.hyperlink = Some(hyperlink.to_string());
        }
    }

    fn write_cell(&mut self, out: &mut String, pos: Position, cell: &Cell) {
        if cell.is_trailing_half() {
            return;
        }
        self.move_to(out, pos.y, pos.x);
        self.apply_style(out, cell.style);
        self.apply_hyperlink(out, &cell.hyperlink);
        out.push_str(&cell.symbol);
        self.advance_col(cell.width());
    }
}

/// Assemble the output for an incremental diff: one `(position, cell)` per
/// changed cell, already produced by [`core_buffer::diff`].
pub fn assemble_diff(diff: &[(Position, Cell)], cursor: CursorPlan) -> String {
    let mut out = String::new();
    let mut state = TrackedState::default();
    for (pos, cell) in diff {
        state.write_cell(&mut out, *pos, cell);
    }
    cursor.emit(&mut out);
    out
}

/// Assemble a full repaint: clear the screen, then walk every row, skipping
/// runs of default cells with a single clear-to-end-of-line instead of
/// printing spaces.
pub fn assemble_full(buffer: &Buffer, cursor: CursorPlan) -> String {
    let mut out = String::new();
    ansi::clear_screen(&mut out);
    let mut state = TrackedState::default();

    let area = buffer.area();
    for y in area.y..area.bottom() {
        let row_is_blank = (area.x..area.right()).all(|x| buffer.get(x, y) == Cell::blank());
        if row_is_blank {
            state.move_to(&mut out, y, area.x);
            ansi::clear_to_end_of_line(&mut out);
            continue;
        }
        let mut x = area.x;
        while x < area.right() {
            let cell = buffer.get(x, y);
            if cell != Cell::blank() && !cell.is_trailing_half() {
                state.write_cell(&mut out, Position::new(x, y), &cell);
            }
            x += cell.width().max(1);
        }
    }
    cursor.emit(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_cell::Color;
    use core_geometry::Rect;
    use core_terminal::{CursorShape, CursorState};

    fn no_cursor() -> CursorPlan {
        CursorPlan { previous: CursorState::default(), current: CursorState::default() }
    }

    #[test]
    fn diff_reuses_style_across_adjacent_cells() {
        let style = Style::new().fg(Color::Rgb(1, 2, 3));
        let diff = vec![
            (Position::new(0, 0), Cell::new("a", style)),
            (Position::new(1, 0), Cell::new("b", style)),
        ];
        let out = assemble_diff(&diff, no_cursor());
        // Only one SGR sequence should appear despite two styled cells.
        assert_eq!(out.matches("38;2;1;2;3").count(), 1);
        assert!(out.contains('a'));
        assert!(out.contains('b'));
    }

    #[test]
    fn diff_skips_trailing_half_cells() {
        let diff = vec![(Position::new(0, 0), Cell::trailing_half(Style::default(), String::new()))];
        let out = assemble_diff(&diff, no_cursor());
        assert!(out.is_empty());
    }

    #[test]
    fn full_render_clears_blank_rows_without_printing_spaces() {
        let buffer = Buffer::new(Rect::new(0, 0, 4, 2));
        let out = assemble_full(&buffer, no_cursor());
        assert!(out.starts_with("\x1b[2J"));
        assert!(!out.contains(' '));
    }
}
