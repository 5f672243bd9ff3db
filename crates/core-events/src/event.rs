//! The top-level event enum delivered to application and window handlers.

use crate::key::KeyEvent;
use crate::mouse::MouseEvent;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// A complete bracketed-paste payload, embedded escapes preserved byte-for-byte.
    Paste(String),
    /// New terminal size in columns/rows.
    Resize(u16, u16),
    FocusGained,
    FocusLost,
    /// Ctrl-C (`0x03`), surfaced distinctly from the generic Ctrl-modified char path.
    Quit,
}
