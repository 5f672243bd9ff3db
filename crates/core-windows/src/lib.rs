//! Window composition: per-window buffers, borders, z-order, and the event
//! routing rules (modal exclusivity, mouse hit-testing with focus promotion,
//! focused-window key/paste dispatch) layered on top of `core-buffer`.

pub mod border;
pub mod manager;
pub mod window;

pub use border::{BorderConfig, BorderStyle, Borders};
pub use manager::WindowManager;
pub use window::{Handlers, Window, WindowFlags, WindowId, WindowState};
