//! The per-frame write path: a bounded retry loop around partial writes.
//!
//! A single `write(2)` can return early (a partial write), fail with
//! `EINTR` (signal interrupted the call), or fail with `EAGAIN`/`EWOULDBLOCK`
//! if stdout is briefly non-blocking (seen on some pseudo-terminals under
//! load). None of these are real failures; the loop below retries until the
//! whole buffer is written or a genuine error (e.g. a broken pipe) occurs.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use core_error::{Error, IoKind, Result};

const MAX_RETRIES: u32 = 32;
const RETRY_SLEEP: Duration = Duration::from_micros(500);

/// Write `bytes` in full to `out`, retrying partial writes and transient
/// `EINTR`/`EAGAIN` errors up to [`MAX_RETRIES`] times before giving up.
pub fn robust_write(out: &mut impl Write, bytes: &[u8]) -> Result<()> {
    let mut written = 0usize;
    let mut retries = 0u32;

    while written < bytes.len() {
        match out.write(&bytes[written..]) {
            Ok(0) => {
                return Err(Error::io(IoKind::Write, "write returned 0 with bytes remaining"));
            }
            Ok(n) => {
                written += n;
                retries = 0;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                retries += 1;
                if retries > MAX_RETRIES {
                    return Err(Error::with_cause(
                        core_error::ErrorKind::Io(IoKind::Write),
                        "write retry budget exhausted (EINTR)",
                        e,
                    ));
                }
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                retries += 1;
                if retries > MAX_RETRIES {
                    return Err(Error::with_cause(
                        core_error::ErrorKind::Io(IoKind::Write),
                        "write retry budget exhausted (EAGAIN)",
                        e,
                    ));
                }
                thread::sleep(RETRY_SLEEP);
            }
            Err(e) => return Err(Error::from(e)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A writer that returns `WouldBlock` a fixed number of times before
    /// accepting the write, to exercise the retry path.
    struct FlakyWriter {
        fail_remaining: u32,
        written: Vec<u8>,
    }

    impl Write for FlakyWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_remaining > 0 {
                self.fail_remaining -= 1;
                return Err(io::Error::from(io::ErrorKind::WouldBlock));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// A writer that only ever accepts one byte per call, to exercise the
    /// partial-write accumulation path.
    struct OneByteWriter {
        written: Vec<u8>,
    }

    impl Write for OneByteWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.written.push(buf[0]);
            Ok(1)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn retries_through_transient_would_block() {
        let mut w = FlakyWriter { fail_remaining: 3, written: Vec::new() };
        robust_write(&mut w, b"hello").unwrap();
        assert_eq!(w.written, b"hello");
    }

    #[test]
    fn accumulates_across_partial_writes() {
        let mut w = OneByteWriter { written: Vec::new() };
        robust_write(&mut w, b"abcdef").unwrap();
        assert_eq!(w.written, b"abcdef");
    }

    #[test]
    fn gives_up_after_retry_budget_exhausted() {
        let mut w = FlakyWriter { fail_remaining: MAX_RETRIES + 5, written: Vec::new() };
        let err = robust_write(&mut w, b"x").unwrap_err();
        assert!(matches!(err.kind(), core_error::ErrorKind::Io(IoKind::Write)));
    }
}
