//! Turns a [`core_buffer::Buffer`] and the previous frame's into a single
//! assembled ANSI write per tick: diff-or-full-repaint, cursor reconciliation,
//! then one write through the terminal backend's robust retry path.

pub mod assembler;
pub mod cursor_plan;
pub mod renderer;

pub use cursor_plan::CursorPlan;
pub use renderer::Renderer;
