//! Stdin-backed [`ByteSource`] and the public blocking/non-blocking/poll
//! entry points described by the decoder's scheduling model.

use std::io::Read;
use std::os::unix::io::RawFd;

use crate::decode::{decode_one, ByteSource};
use crate::event::Event;

/// Reads single bytes from a raw fd, using `poll(2)` to implement the
/// bounded waits the decoder needs for escape-sequence disambiguation.
pub struct Stdin {
    fd: RawFd,
}

impl Stdin {
    pub fn new() -> Self {
        Self { fd: 0 }
    }

    fn ready(&self, timeout_ms: Option<u64>) -> bool {
        let mut pollfd = libc::pollfd { fd: self.fd, events: libc::POLLIN, revents: 0 };
        let timeout = match timeout_ms {
            None => -1,
            Some(ms) => ms.min(i32::MAX as u64) as i32,
        };
        // SAFETY: `pollfd` is a single valid `pollfd` on the stack; `poll`
        // writes only into `revents`, which we read immediately after.
        let rc = unsafe { libc::poll(&mut pollfd, 1, timeout) };
        rc > 0 && pollfd.revents & libc::POLLIN != 0
    }
}

impl Default for Stdin {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSource for Stdin {
    fn next_byte(&mut self, timeout_ms: Option<u64>) -> Option<u8> {
        if !self.ready(timeout_ms) {
            return None;
        }
        let mut buf = [0u8; 1];
        match std::io::stdin().lock().read(&mut buf) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }
}

/// Blocks until a complete event is decoded. Used outside the main tick
/// loop (e.g. waiting for a keypress after returning from suspend).
pub fn read_key_blocking(source: &mut Stdin) -> Event {
    loop {
        if let Some(event) = decode_one(source, true) {
            return event;
        }
    }
}

/// Attempts to decode a single event without blocking; returns `None` if no
/// data is currently available on stdin.
pub fn read_key_nonblocking(source: &mut Stdin) -> Option<Event> {
    decode_one(source, false)
}

/// Waits up to `timeout_ms` for stdin to become readable.
pub fn poll_events(source: &Stdin, timeout_ms: u64) -> bool {
    source.ready(Some(timeout_ms))
}
