//! The off-screen cell grid applications draw into.

use core_cell::{display_width, Cell, Style};
use core_geometry::{Position, Rect};
use unicode_segmentation::UnicodeSegmentation;

use crate::dirty::DirtyRegion;

/// A 2-D grid of [`Cell`]s backed by a flat `Vec`, plus the dirty-region
/// tracker the renderer consults to decide what to re-emit.
///
/// Grid dimensions always equal `area`'s dimensions. Reads outside `area`
/// return a blank cell; writes outside `area` are no-ops.
#[derive(Debug, Clone)]
pub struct Buffer {
    area: Rect,
    cells: Vec<Cell>,
    dirty: DirtyRegion,
}

impl Buffer {
    pub fn new(area: Rect) -> Self {
        let count = area.area() as usize;
        Self { area, cells: vec![Cell::blank(); count], dirty: DirtyRegion::new() }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn width(&self) -> u16 {
        self.area.width
    }

    pub fn height(&self) -> u16 {
        self.area.height
    }

    pub fn dirty(&self) -> &DirtyRegion {
        &self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty.clear();
    }

    fn local_index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.area.x || y < self.area.y {
            return None;
        }
        let lx = x - self.area.x;
        let ly = y - self.area.y;
        if lx >= self.area.width || ly >= self.area.height {
            return None;
        }
        Some(ly as usize * self.area.width as usize + lx as usize)
    }

    /// Read the cell at `(x, y)`. Out-of-bounds coordinates return a blank
    /// default cell rather than panicking or returning `None`.
    pub fn get(&self, x: u16, y: u16) -> Cell {
        match self.local_index(x, y) {
            Some(i) => self.cells[i].clone(),
            None => Cell::blank(),
        }
    }

    fn get_ref(&self, x: u16, y: u16) -> Option<&Cell> {
        self.local_index(x, y).map(|i| &self.cells[i])
    }

    /// Write a single cell at `(x, y)`. A no-op if out of bounds.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.local_index(x, y) {
            self.cells[i] = cell;
            self.dirty.mark(x, y);
        }
    }

    /// Write `text` starting at `(x, y)`, advancing one grapheme cluster at a
    /// time by its display width. Stops at the right edge of the row - a
    /// wide rune that would straddle the boundary is simply not written
    /// (nothing partial is emitted). A wide rune writes its glyph at the
    /// leading column and an empty-symbol trailing half at the next column,
    /// both carrying `style`/`hyperlink` so hyperlink hit-testing covers
    /// both halves.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style, hyperlink: &str) {
        if y < self.area.y || y >= self.area.bottom() {
            return;
        }
        let right_edge = self.area.right();
        let mut cursor = x;
        for grapheme in text.graphemes(true) {
            let w = display_width(grapheme);
            if w == 0 {
                continue;
            }
            if cursor < self.area.x || cursor.saturating_add(w) > right_edge {
                break;
            }
            self.set(cursor, y, Cell::new(grapheme, style).with_hyperlink(hyperlink));
            if w == 2 {
                self.set(cursor + 1, y, Cell::trailing_half(style, hyperlink.to_string()));
            }
            cursor += w;
        }
    }

    /// Fill `rect` (clipped to `area`) with `cell`, marking the filled region dirty.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let target = self.area.intersection(&rect);
        if target.is_empty() {
            return;
        }
        for y in target.y..target.bottom() {
            for x in target.x..target.right() {
                if let Some(i) = self.local_index(x, y) {
                    self.cells[i] = cell.clone();
                }
            }
        }
        self.dirty.mark_rect(target);
    }

    /// Fill the entire buffer with `cell` (or a blank cell if `None`),
    /// marking the whole area dirty.
    pub fn clear(&mut self, cell: Option<Cell>) {
        let fill_cell = cell.unwrap_or_default();
        let area = self.area;
        self.fill(area, fill_cell);
    }

    /// Re-allocate the grid for `new_area`, copying overlapping content from
    /// the old grid and marking the entire new area dirty.
    ///
    /// The overlap is computed in absolute rect coordinates (old area
    /// intersected with new area) but copied using offsets local to each
    /// grid - these are two different coordinate spaces and must not be
    /// conflated.
    pub fn resize(&mut self, new_area: Rect) {
        let overlap = self.area.intersection(&new_area);
        let mut new_cells = vec![Cell::blank(); new_area.area() as usize];

        if !overlap.is_empty() {
            for y in overlap.y..overlap.bottom() {
                for x in overlap.x..overlap.right() {
                    if let Some(old_i) = self.local_index(x, y) {
                        let new_lx = x - new_area.x;
                        let new_ly = y - new_area.y;
                        let new_i = new_ly as usize * new_area.width as usize + new_lx as usize;
                        new_cells[new_i] = self.cells[old_i].clone();
                    }
                }
            }
        }

        self.area = new_area;
        self.cells = new_cells;
        self.dirty.clear();
        self.dirty.mark_rect(new_area);
    }

    /// Copy cells from `src` (clipped to `src_rect` intersected with `src`'s
    /// own area) into `self` at `dest_pos`, preserving the trailing-half
    /// invariant of the source. The merged rectangle in `self` is marked dirty.
    pub fn merge(&mut self, src: &Buffer, src_rect: Rect, dest_pos: Position) {
        let clipped = src.area.intersection(&src_rect);
        if clipped.is_empty() {
            return;
        }
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                let Some(cell) = src.get_ref(x, y) else { continue };
                let dx = dest_pos.x + (x - clipped.x);
                let dy = dest_pos.y + (y - clipped.y);
                self.set(dx, dy, cell.clone());
            }
        }
        let dest_rect = Rect::new(dest_pos.x, dest_pos.y, clipped.width, clipped.height);
        self.dirty.mark_rect(self.area.intersection(&dest_rect));
    }

    /// Iterate `(x, y, &Cell)` in row-major order across the whole area.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let area = self.area;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let lx = (i % area.width as usize) as u16;
            let ly = (i / area.width as usize) as u16;
            (area.x + lx, area.y + ly, cell)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_all_blank_and_clean() {
        let buf = Buffer::new(Rect::new(0, 0, 4, 2));
        assert!(!buf.dirty().is_dirty());
        assert_eq!(buf.get(0, 0), Cell::blank());
    }

    #[test]
    fn out_of_bounds_read_returns_blank() {
        let buf = Buffer::new(Rect::new(0, 0, 4, 2));
        assert_eq!(buf.get(99, 99), Cell::blank());
    }

    #[test]
    fn out_of_bounds_write_is_noop() {
        let mut buf = Buffer::new(Rect::new(0, 0, 4, 2));
        buf.set(99, 99, Cell::new("X", Style::default()));
        assert!(!buf.dirty().is_dirty());
    }

    #[test]
    fn set_string_writes_symbols_and_marks_dirty() {
        let mut buf = Buffer::new(Rect::new(0, 0, 10, 1));
        buf.set_string(2, 0, "hi", Style::default(), "");
        assert_eq!(buf.get(2, 0).symbol, "h");
        assert_eq!(buf.get(3, 0).symbol, "i");
        assert_eq!(buf.dirty().bounds(), Some((2, 0, 3, 0)));
    }

    #[test]
    fn set_string_wide_rune_writes_trailing_half() {
        let mut buf = Buffer::new(Rect::new(0, 0, 80, 1));
        buf.set_string(78, 0, "\u{3042}", Style::default(), ""); // "あ"
        assert_eq!(buf.get(78, 0).symbol, "\u{3042}");
        assert!(buf.get(79, 0).is_trailing_half());
    }

    #[test]
    fn set_string_wide_rune_at_last_column_is_not_written() {
        let mut buf = Buffer::new(Rect::new(0, 0, 80, 1));
        buf.set_string(79, 0, "\u{3042}", Style::default(), "");
        assert_eq!(buf.get(79, 0), Cell::blank());
    }

    #[test]
    fn fill_clips_to_area() {
        let mut buf = Buffer::new(Rect::new(0, 0, 4, 4));
        buf.fill(Rect::new(2, 2, 10, 10), Cell::new("#", Style::default()));
        assert_eq!(buf.get(3, 3).symbol, "#");
        assert_eq!(buf.dirty().bounds(), Some((2, 2, 3, 3)));
    }

    #[test]
    fn clear_marks_entire_area_dirty() {
        let mut buf = Buffer::new(Rect::new(0, 0, 4, 4));
        buf.clear(None);
        assert_eq!(buf.dirty().bounds(), Some((0, 0, 3, 3)));
    }

    #[test]
    fn resize_preserves_overlap_and_marks_all_dirty() {
        let mut buf = Buffer::new(Rect::new(0, 0, 4, 4));
        buf.set(1, 1, Cell::new("Z", Style::default()));
        buf.resize(Rect::new(0, 0, 6, 6));
        assert_eq!(buf.get(1, 1).symbol, "Z");
        assert_eq!(buf.dirty().bounds(), Some((0, 0, 5, 5)));
    }

    #[test]
    fn merge_copies_clipped_region() {
        let mut src = Buffer::new(Rect::new(0, 0, 4, 4));
        src.set(0, 0, Cell::new("A", Style::default()));
        src.set(1, 0, Cell::new("B", Style::default()));
        let mut dest = Buffer::new(Rect::new(0, 0, 10, 10));
        dest.merge(&src, Rect::new(0, 0, 2, 1), Position::new(5, 5));
        assert_eq!(dest.get(5, 5).symbol, "A");
        assert_eq!(dest.get(6, 5).symbol, "B");
    }
}
