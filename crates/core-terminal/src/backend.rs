//! Terminal session management: raw mode, alternate screen, and the optional
//! feature toggles (mouse capture, bracketed paste, focus events) an `App`
//! enables/disables around suspend and resume.
//!
//! Raw mode, the alternate screen, and cursor visibility go through
//! crossterm, whose commands already emit exactly the bytes the
//! specification pins down (`ESC[?1049h/l`, `ESC[?25l/h`). The remaining
//! toggles are written directly via [`crate::ansi`] so their exact wire
//! format is never at the mercy of a library's own mode bookkeeping.

use std::io::{self, Write};

use core_error::{Error, Result, TerminalKind};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::ansi;
use crate::write::robust_write;

/// Which optional terminal features are currently enabled. Suspend captures
/// this, disables everything in reverse of the order listed here, and resume
/// restores exactly this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeatureSet {
    pub raw_mode: bool,
    pub alternate_screen: bool,
    pub mouse_capture: bool,
    pub bracketed_paste: bool,
    pub focus_events: bool,
}

pub trait TerminalBackend {
    fn enter_raw_mode(&mut self) -> Result<()>;
    fn leave_raw_mode(&mut self) -> Result<()>;
    fn enter_alternate_screen(&mut self) -> Result<()>;
    fn leave_alternate_screen(&mut self) -> Result<()>;
    fn hide_cursor(&mut self) -> Result<()>;
    fn show_cursor(&mut self) -> Result<()>;
    fn enable_mouse_capture(&mut self) -> Result<()>;
    fn disable_mouse_capture(&mut self) -> Result<()>;
    fn enable_bracketed_paste(&mut self) -> Result<()>;
    fn disable_bracketed_paste(&mut self) -> Result<()>;
    fn enable_focus_events(&mut self) -> Result<()>;
    fn disable_focus_events(&mut self) -> Result<()>;
    /// Write raw, already-assembled bytes (an assembled frame) to the
    /// terminal using the robust retry loop.
    fn write_raw(&mut self, bytes: &[u8]) -> Result<()>;
}

/// The production backend: crossterm for session-level mode switches, raw
/// writes for everything per-frame.
#[derive(Debug, Default)]
pub struct CrosstermBackend {
    features: FeatureSet,
}

impl CrosstermBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn features(&self) -> FeatureSet {
        self.features
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        let mut stdout = io::stdout();
        robust_write(&mut stdout, bytes)?;
        stdout.flush().map_err(Error::from)
    }
}

impl TerminalBackend for CrosstermBackend {
    fn enter_raw_mode(&mut self) -> Result<()> {
        enable_raw_mode()
            .map_err(|e| Error::with_cause(core_error::ErrorKind::Terminal(TerminalKind::Config), "enable raw mode", e))?;
        self.features.raw_mode = true;
        Ok(())
    }

    fn leave_raw_mode(&mut self) -> Result<()> {
        disable_raw_mode()
            .map_err(|e| Error::with_cause(core_error::ErrorKind::Terminal(TerminalKind::Config), "disable raw mode", e))?;
        self.features.raw_mode = false;
        Ok(())
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        execute!(io::stdout(), EnterAlternateScreen)
            .map_err(|e| Error::with_cause(core_error::ErrorKind::Terminal(TerminalKind::Config), "enter alternate screen", e))?;
        self.features.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        execute!(io::stdout(), LeaveAlternateScreen)
            .map_err(|e| Error::with_cause(core_error::ErrorKind::Terminal(TerminalKind::Config), "leave alternate screen", e))?;
        self.features.alternate_screen = false;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        execute!(io::stdout(), Hide).map_err(crossterm_err)
    }

    fn show_cursor(&mut self) -> Result<()> {
        execute!(io::stdout(), Show).map_err(crossterm_err)
    }

    fn enable_mouse_capture(&mut self) -> Result<()> {
        let mut bytes = String::new();
        ansi::mouse_sgr_on(&mut bytes);
        self.write_bytes(bytes.as_bytes())?;
        self.features.mouse_capture = true;
        Ok(())
    }

    fn disable_mouse_capture(&mut self) -> Result<()> {
        let mut bytes = String::new();
        ansi::mouse_sgr_off(&mut bytes);
        self.write_bytes(bytes.as_bytes())?;
        self.features.mouse_capture = false;
        Ok(())
    }

    fn enable_bracketed_paste(&mut self) -> Result<()> {
        let mut bytes = String::new();
        ansi::bracketed_paste_on(&mut bytes);
        self.write_bytes(bytes.as_bytes())?;
        self.features.bracketed_paste = true;
        Ok(())
    }

    fn disable_bracketed_paste(&mut self) -> Result<()> {
        let mut bytes = String::new();
        ansi::bracketed_paste_off(&mut bytes);
        self.write_bytes(bytes.as_bytes())?;
        self.features.bracketed_paste = false;
        Ok(())
    }

    fn enable_focus_events(&mut self) -> Result<()> {
        let mut bytes = String::new();
        ansi::focus_events_on(&mut bytes);
        self.write_bytes(bytes.as_bytes())?;
        self.features.focus_events = true;
        Ok(())
    }

    fn disable_focus_events(&mut self) -> Result<()> {
        let mut bytes = String::new();
        ansi::focus_events_off(&mut bytes);
        self.write_bytes(bytes.as_bytes())?;
        self.features.focus_events = false;
        Ok(())
    }

    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_bytes(bytes)
    }
}

fn crossterm_err(e: io::Error) -> Error {
    Error::with_cause(core_error::ErrorKind::Terminal(TerminalKind::Render), "crossterm command failed", e)
}

/// Disable, in reverse-of-enable order, every feature still set in `features`,
/// restoring the cursor and leaving the alternate screen last. Any single
/// step's failure is swallowed (cleanup is best-effort) except the first
/// error encountered, which is returned to the caller after every step has
/// been attempted.
pub fn cleanup(backend: &mut dyn TerminalBackend, features: FeatureSet) -> Result<()> {
    let mut first_err = None;
    let mut record = |res: Result<()>| {
        if let Err(e) = res {
            if first_err.is_none() {
                first_err = Some(e);
            }
        }
    };

    record(backend.show_cursor());
    if features.mouse_capture {
        record(backend.disable_mouse_capture());
    }
    if features.bracketed_paste {
        record(backend.disable_bracketed_paste());
    }
    if features.focus_events {
        record(backend.disable_focus_events());
    }
    if features.alternate_screen {
        record(backend.leave_alternate_screen());
    }
    if features.raw_mode {
        record(backend.leave_raw_mode());
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
