//! Owns the current and previous frame buffers and turns the difference
//! between them into a single assembled write per tick.
//!
//! The previous buffer, and the current buffer's dirty region, are only
//! updated after `write_raw` reports success - a failed write leaves both
//! untouched so the next tick retries against the same baseline instead of
//! silently adopting a frame the terminal never actually received.

use core_buffer::{diff, Buffer};
use core_error::Result;
use core_geometry::Rect;
use core_terminal::{CursorState, TerminalBackend};

use crate::assembler::{assemble_diff, assemble_full};
use crate::cursor_plan::CursorPlan;

/// The render pipeline's buffer pair and the "next frame must be a full
/// repaint" flag (set on construction, on resize, and whenever a caller
/// asks for one explicitly).
pub struct Renderer {
    current: Buffer,
    previous: Buffer,
    previous_cursor: CursorState,
    force_full: bool,
}

impl Renderer {
    pub fn new(area: Rect) -> Self {
        Self {
            current: Buffer::new(area),
            previous: Buffer::new(area),
            previous_cursor: CursorState::default(),
            force_full: true,
        }
    }

    /// The buffer applications draw into for the frame in progress.
    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.current
    }

    pub fn area(&self) -> Rect {
        self.current.area()
    }

    /// Force the next `render` call to repaint the whole screen rather than
    /// diff against the previous frame - used after a suspend/resume cycle
    /// or whenever the terminal's own contents may have changed underneath us.
    pub fn mark_full_redraw(&mut self) {
        self.force_full = true;
    }

    /// Re-allocate both buffers for a new terminal size, preserving whatever
    /// content overlaps, and force a full repaint (the old diff is meaningless
    /// against a differently-shaped previous buffer).
    pub fn resize(&mut self, new_area: Rect) {
        self.current.resize(new_area);
        self.previous.resize(new_area);
        self.force_full = true;
    }

    /// Diff (or fully repaint) the current buffer against the previous one,
    /// fold in the cursor reconciliation, and write the result through
    /// `backend`. On success, the previous buffer and cursor are advanced to
    /// match what was just sent and the current buffer's dirty region is
    /// cleared; on failure, nothing is mutated.
    pub fn render(&mut self, backend: &mut dyn TerminalBackend, cursor: CursorState) -> Result<()> {
        let cursor_plan = CursorPlan::new(self.previous_cursor, cursor);

        let use_full = self.force_full || self.current.area() != self.previous.area();
        let output = if use_full {
            assemble_full(&self.current, cursor_plan)
        } else {
            let changes = diff(&self.previous, &self.current);
            if changes.is_empty() && self.previous_cursor == cursor {
                return Ok(());
            }
            assemble_diff(&changes, cursor_plan)
        };

        backend.write_raw(output.as_bytes())?;

        self.previous = self.current.clone();
        self.previous_cursor = cursor;
        self.current.clear_dirty();
        self.force_full = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_cell::{Cell, Style};
    use core_geometry::Rect;

    struct RecordingBackend {
        writes: Vec<Vec<u8>>,
        fail_next: bool,
    }

    impl RecordingBackend {
        fn new() -> Self {
            Self { writes: Vec::new(), fail_next: false }
        }
    }

    impl TerminalBackend for RecordingBackend {
        fn enter_raw_mode(&mut self) -> Result<()> {
            Ok(())
        }
        fn leave_raw_mode(&mut self) -> Result<()> {
            Ok(())
        }
        fn enter_alternate_screen(&mut self) -> Result<()> {
            Ok(())
        }
        fn leave_alternate_screen(&mut self) -> Result<()> {
            Ok(())
        }
        fn hide_cursor(&mut self) -> Result<()> {
            Ok(())
        }
        fn show_cursor(&mut self) -> Result<()> {
            Ok(())
        }
        fn enable_mouse_capture(&mut self) -> Result<()> {
            Ok(())
        }
        fn disable_mouse_capture(&mut self) -> Result<()> {
            Ok(())
        }
        fn enable_bracketed_paste(&mut self) -> Result<()> {
            Ok(())
        }
        fn disable_bracketed_paste(&mut self) -> Result<()> {
            Ok(())
        }
        fn enable_focus_events(&mut self) -> Result<()> {
            Ok(())
        }
        fn disable_focus_events(&mut self) -> Result<()> {
            Ok(())
        }
        fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
            if self.fail_next {
                self.fail_next = false;
                return Err(core_error::Error::new(
                    core_error::ErrorKind::Terminal(core_error::TerminalKind::Render),
                    "simulated write failure",
                ));
            }
            self.writes.push(bytes.to_vec());
            Ok(())
        }
    }

    #[test]
    fn first_render_is_always_full() {
        let mut renderer = Renderer::new(Rect::new(0, 0, 4, 1));
        let mut backend = RecordingBackend::new();
        renderer.render(&mut backend, CursorState::default()).unwrap();
        assert_eq!(backend.writes.len(), 1);
        assert!(String::from_utf8(backend.writes[0].clone()).unwrap().starts_with("\x1b[2J"));
    }

    #[test]
    fn second_render_with_no_changes_writes_nothing() {
        let mut renderer = Renderer::new(Rect::new(0, 0, 4, 1));
        let mut backend = RecordingBackend::new();
        renderer.render(&mut backend, CursorState::default()).unwrap();
        renderer.render(&mut backend, CursorState::default()).unwrap();
        assert_eq!(backend.writes.len(), 1);
    }

    #[test]
    fn subsequent_edit_produces_a_diff_only_write() {
        let mut renderer = Renderer::new(Rect::new(0, 0, 4, 1));
        let mut backend = RecordingBackend::new();
        renderer.render(&mut backend, CursorState::default()).unwrap();

        renderer.buffer_mut().set(0, 0, Cell::new("x", Style::default()));
        renderer.render(&mut backend, CursorState::default()).unwrap();

        assert_eq!(backend.writes.len(), 2);
        let second = String::from_utf8(backend.writes[1].clone()).unwrap();
        assert!(!second.contains("\x1b[2J"));
        assert!(second.contains('x'));
    }

    #[test]
    fn failed_write_leaves_previous_buffer_untouched() {
        let mut renderer = Renderer::new(Rect::new(0, 0, 4, 1));
        let mut backend = RecordingBackend::new();
        renderer.render(&mut backend, CursorState::default()).unwrap();

        renderer.buffer_mut().set(0, 0, Cell::new("x", Style::default()));
        backend.fail_next = true;
        assert!(renderer.render(&mut backend, CursorState::default()).is_err());

        // The dirty edit is still pending - a retry should still see it.
        backend.fail_next = false;
        renderer.render(&mut backend, CursorState::default()).unwrap();
        assert_eq!(backend.writes.len(), 2);
        assert!(String::from_utf8(backend.writes[1].clone()).unwrap().contains('x'));
    }

    #[test]
    fn resize_forces_a_full_repaint() {
        let mut renderer = Renderer::new(Rect::new(0, 0, 4, 1));
        let mut backend = RecordingBackend::new();
        renderer.render(&mut backend, CursorState::default()).unwrap();

        renderer.resize(Rect::new(0, 0, 6, 2));
        renderer.render(&mut backend, CursorState::default()).unwrap();
        assert_eq!(backend.writes.len(), 2);
        assert!(String::from_utf8(backend.writes[1].clone()).unwrap().starts_with("\x1b[2J"));
    }
}
