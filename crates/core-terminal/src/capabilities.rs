//! Terminal capability probing from the environment.
//!
//! Detection is deliberately cheap (string matching on `TERM`, run once at
//! startup) rather than a round-trip probe sequence - good enough to gate
//! color/mouse output without adding startup latency.

use std::env;

/// Which mouse-tracking modes we enable on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseModes {
    /// `ESC [ ? 9 h` - X10 compatibility mode (click-only, no motion).
    pub x10: bool,
    /// `ESC [ ? 1000 h` - normal button-event tracking.
    pub button_event: bool,
    /// `ESC [ ? 1002 h` - button-event tracking with drag.
    pub button_drag: bool,
    /// `ESC [ ? 1003 h` - any-motion tracking.
    pub any_event: bool,
    /// `ESC [ ? 1006 h` - SGR extended coordinate encoding.
    pub sgr: bool,
}

impl MouseModes {
    /// The conservative subset assumed for terminals we don't recognize.
    pub const CONSERVATIVE: MouseModes = MouseModes {
        x10: true,
        button_event: true,
        button_drag: false,
        any_event: false,
        sgr: false,
    };

    /// The full mode set enabled on terminals known to support SGR mouse
    /// reporting (xterm, screen, tmux and their descendants).
    pub const FULL: MouseModes = MouseModes {
        x10: true,
        button_event: true,
        button_drag: true,
        any_event: true,
        sgr: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TerminalCapabilities {
    /// False for known-dumb terminals ("dumb", "cons25", "emacs"); colored
    /// output and most ANSI sequences should be suppressed.
    pub ansi: bool,
    pub mouse_modes: MouseModes,
}

const NON_ANSI_TERMS: &[&str] = &["dumb", "cons25", "emacs"];
const FULL_MOUSE_SUBSTRINGS: &[&str] = &["xterm", "screen", "tmux"];

impl TerminalCapabilities {
    /// Probe `$TERM` and derive ANSI/mouse support from it.
    pub fn detect() -> Self {
        Self::from_term(env::var("TERM").ok().as_deref())
    }

    /// Pure function over a `TERM` value, split out from `detect` for
    /// deterministic unit testing without touching the process environment.
    pub fn from_term(term: Option<&str>) -> Self {
        let term = term.unwrap_or("");
        let ansi = !NON_ANSI_TERMS.contains(&term);
        let mouse_modes = if FULL_MOUSE_SUBSTRINGS.iter().any(|needle| term.contains(needle)) {
            MouseModes::FULL
        } else {
            MouseModes::CONSERVATIVE
        };
        Self { ansi, mouse_modes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dumb_terminal_disables_ansi() {
        assert!(!TerminalCapabilities::from_term(Some("dumb")).ansi);
        assert!(!TerminalCapabilities::from_term(Some("cons25")).ansi);
    }

    #[test]
    fn unset_term_is_treated_as_non_ansi() {
        assert!(!TerminalCapabilities::from_term(None).ansi);
    }

    #[test]
    fn xterm_family_gets_full_mouse_modes() {
        assert_eq!(TerminalCapabilities::from_term(Some("xterm-256color")).mouse_modes, MouseModes::FULL);
        assert_eq!(TerminalCapabilities::from_term(Some("screen.xterm")).mouse_modes, MouseModes::FULL);
        assert_eq!(TerminalCapabilities::from_term(Some("tmux-256color")).mouse_modes, MouseModes::FULL);
    }

    #[test]
    fn unknown_terminal_gets_conservative_mouse_modes() {
        assert_eq!(TerminalCapabilities::from_term(Some("vt100")).mouse_modes, MouseModes::CONSERVATIVE);
    }
}
