//! Terminal session management and the exact ANSI/VT byte vocabulary Celina
//! emits: raw mode and the alternate screen, mouse/paste/focus toggles,
//! capability detection, and the robust per-frame write path.

pub mod ansi;
pub mod backend;
pub mod capabilities;
pub mod cursor;
pub mod write;

#[cfg(unix)]
pub mod size;

pub use backend::{CrosstermBackend, FeatureSet, TerminalBackend};
pub use capabilities::{MouseModes, TerminalCapabilities};
pub use cursor::{CursorShape, CursorState};

#[cfg(unix)]
pub use size::terminal_size;
