//! Byte-level terminal input: the decoder state machine, its typed event
//! vocabulary, and the stdin-backed blocking/non-blocking/poll entry points.

pub mod decode;
pub mod event;
pub mod key;
pub mod mouse;
pub mod resize;

#[cfg(unix)]
pub mod source;

pub use decode::{decode_one, ByteSource, FixedBytes};
pub use event::Event;
pub use key::{KeyCode, KeyEvent, KeyModifiers};
pub use mouse::{MouseButton, MouseEvent, MouseEventKind};
pub use resize::ResizeState;

#[cfg(unix)]
pub use source::{poll_events, read_key_blocking, read_key_nonblocking, Stdin};
