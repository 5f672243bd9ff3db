//! Celina: a terminal user-interface framework. Applications declare a
//! frame by writing cells into a buffer and registering event/render
//! callbacks; the framework owns the terminal, polls input, and flushes
//! only the cells that changed.
//!
//! This crate is a thin facade over the engine's `core-*` crates, grouped
//! into modules the way a Celina application actually consumes them -
//! [`buffer`] and [`style`] to describe a frame, [`layout`] to subdivide
//! space, [`events`] to read input, [`windows`] for overlapping sub-regions,
//! and [`app`] to run the whole thing.

pub mod app {
    pub use core_app::{App, AppControl, Config, EventSource, FpsMonitor};
    pub use core_render::Renderer;
}

pub mod buffer {
    pub use core_buffer::{diff, DirtyRegion};
    pub use core_cell::{display_width, Cell};
    pub type Buffer = core_buffer::Buffer;
}

pub mod style {
    pub use core_cell::{Color, Modifier, Style};
}

pub mod geometry {
    pub use core_geometry::{Position, Rect, Size};
}

pub mod layout {
    pub use core_layout::{split, Constraint, Direction, Layout};
}

pub mod events {
    pub use core_events::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind, ResizeState,
    };

    #[cfg(unix)]
    pub use core_events::Stdin;

    /// A fresh stdin-backed event source, ready to hand to [`crate::app::App::new`].
    #[cfg(unix)]
    pub fn stdin() -> Stdin {
        Stdin::new()
    }
}

pub mod terminal {
    pub use core_terminal::{CrosstermBackend, CursorShape, CursorState, FeatureSet, TerminalBackend};

    /// The current terminal size, or 80x24 if it can't be queried (e.g. stdout
    /// isn't a tty). Meant for establishing the initial render area before
    /// the first resize event arrives.
    #[cfg(unix)]
    pub fn terminal_size_or_default() -> core_geometry::Rect {
        let size = core_terminal::terminal_size().unwrap_or(core_geometry::Size::new(80, 24));
        core_geometry::Rect::new(0, 0, size.width, size.height)
    }
}

pub mod windows {
    pub use core_windows::{BorderConfig, BorderStyle, Borders, Handlers, Window, WindowFlags, WindowId, WindowManager, WindowState};
}

pub mod error {
    pub use core_error::{Error, ErrorKind, Result};
}

/// The types most applications need for a single `use celina::prelude::*;`.
pub mod prelude {
    pub use crate::app::{App, AppControl, Config};
    pub use crate::buffer::{Buffer, Cell};
    pub use crate::error::{Error, Result};
    pub use crate::events::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
    pub use crate::geometry::{Position, Rect, Size};
    pub use crate::layout::{Constraint, Direction, Layout};
    pub use crate::style::{Color, Modifier, Style};
    pub use crate::terminal::CrosstermBackend;
}
