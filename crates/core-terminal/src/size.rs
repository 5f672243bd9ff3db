//! Terminal dimension query via `TIOCGWINSZ`, the one piece of terminal
//! state the core engine reads back rather than only ever writing.

use core_error::{Error, Result, TerminalKind};
use core_geometry::Size;

#[repr(C)]
#[derive(Default)]
struct WinSize {
    ws_row: libc::c_ushort,
    ws_col: libc::c_ushort,
    ws_xpixel: libc::c_ushort,
    ws_ypixel: libc::c_ushort,
}

/// Query the size of the terminal attached to stdout (fd 1).
pub fn terminal_size() -> Result<Size> {
    let mut ws = WinSize::default();
    // SAFETY: `ws` is a single valid `WinSize` on the stack; `ioctl` with
    // `TIOCGWINSZ` only writes into it and we read the result immediately after.
    let rc = unsafe { libc::ioctl(1, libc::TIOCGWINSZ, &mut ws as *mut WinSize) };
    if rc != 0 {
        return Err(Error::with_cause(
            core_error::ErrorKind::Terminal(TerminalKind::Size),
            "TIOCGWINSZ failed",
            std::io::Error::last_os_error(),
        ));
    }
    Ok(Size::new(ws.ws_col, ws.ws_row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winsize_struct_matches_kernel_layout_size() {
        // Four u16 fields, no padding expected on any platform libc targets.
        assert_eq!(std::mem::size_of::<WinSize>(), 8);
    }
}
