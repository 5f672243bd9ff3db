//! The exact ANSI/VT byte sequences Celina emits.
//!
//! These are plain string-building functions rather than an abstraction
//! over a terminal library: the specification pins every byte here to
//! xterm's conventions (SGR mouse 1006, focus 1004, bracketed paste 2004,
//! DECSCUSR, OSC 8), so there is no room for a backend to "interpret" them
//! differently. `core-terminal`'s `backend` module still uses crossterm for
//! session setup (raw mode, alternate screen) where byte-exactness doesn't
//! matter; everything written per-frame goes through here instead so the
//! output assembler has full control over batching and the robust-write retry.

use std::fmt::Write as _;

use core_cell::{Color, Modifier, Style};

pub fn alt_screen_on(out: &mut String) {
    out.push_str("\x1b[?1049h");
}

pub fn alt_screen_off(out: &mut String) {
    out.push_str("\x1b[?1049l");
}

pub fn cursor_hide(out: &mut String) {
    out.push_str("\x1b[?25l");
}

pub fn cursor_show(out: &mut String) {
    out.push_str("\x1b[?25h");
}

/// `row`/`col` are 0-based buffer coordinates; the wire format is 1-based.
pub fn cursor_position(out: &mut String, row: u16, col: u16) {
    let _ = write!(out, "\x1b[{};{}H", row + 1, col + 1);
}

/// DECSCUSR cursor shape, `style` in 0..=6 (0 = default blinking block).
pub fn cursor_style(out: &mut String, style: u8) {
    let _ = write!(out, "\x1b[{style} q");
}

pub fn clear_screen(out: &mut String) {
    out.push_str("\x1b[2J");
}

pub fn clear_line(out: &mut String) {
    out.push_str("\x1b[2K");
}

pub fn clear_to_end_of_line(out: &mut String) {
    out.push_str("\x1b[0K");
}

pub fn clear_to_start_of_line(out: &mut String) {
    out.push_str("\x1b[1K");
}

pub fn mouse_sgr_on(out: &mut String) {
    out.push_str("\x1b[?1000h\x1b[?1002h\x1b[?1003h\x1b[?1006h\x1b[?9h");
}

pub fn mouse_sgr_off(out: &mut String) {
    out.push_str("\x1b[?9l\x1b[?1006l\x1b[?1003l\x1b[?1002l\x1b[?1000l");
}

pub fn bracketed_paste_on(out: &mut String) {
    out.push_str("\x1b[?2004h");
}

pub fn bracketed_paste_off(out: &mut String) {
    out.push_str("\x1b[?2004l");
}

pub fn focus_events_on(out: &mut String) {
    out.push_str("\x1b[?1004h");
}

pub fn focus_events_off(out: &mut String) {
    out.push_str("\x1b[?1004l");
}

pub fn sgr_reset(out: &mut String) {
    out.push_str("\x1b[0m");
}

/// Open an OSC 8 hyperlink. An empty `url` closes the currently open link.
pub fn hyperlink(out: &mut String, url: &str) {
    let _ = write!(out, "\x1b]8;;{url}\x1b\\");
}

/// Emit the SGR codes needed to transition from "no particular style" to
/// `style`. Always resets first when either color is `Default` to avoid
/// color bleed from whatever SGR state preceded this cell, then emits
/// explicit codes for both colors (including background-default `49` when
/// only the foreground is non-default, so terminals don't inherit a stale
/// background) plus one code per active modifier.
pub fn sgr_for_style(out: &mut String, style: Style) {
    if style.fg == Color::Default || style.bg == Color::Default {
        sgr_reset(out);
    }
    let mut codes: Vec<String> = Vec::new();

    match style.fg {
        Color::Default => {}
        Color::Indexed(n) => codes.push(indexed16_fg_code(n)),
        Color::Indexed256(n) => codes.push(format!("38;5;{n}")),
        Color::Rgb(r, g, b) => codes.push(format!("38;2;{r};{g};{b}")),
    }
    match style.bg {
        // Only need the explicit "background default" code when the
        // foreground is being set to something non-default; a style that is
        // fully default was already fully covered by the reset above.
        Color::Default if style.fg != Color::Default => codes.push("49".to_string()),
        Color::Default => {}
        Color::Indexed(n) => codes.push(indexed16_bg_code(n)),
        Color::Indexed256(n) => codes.push(format!("48;5;{n}")),
        Color::Rgb(r, g, b) => codes.push(format!("48;2;{r};{g};{b}")),
    }

    if style.modifiers.contains(Modifier::BOLD) {
        codes.push("1".to_string());
    }
    if style.modifiers.contains(Modifier::DIM) {
        codes.push("2".to_string());
    }
    if style.modifiers.contains(Modifier::ITALIC) {
        codes.push("3".to_string());
    }
    if style.modifiers.contains(Modifier::UNDERLINE) {
        codes.push("4".to_string());
    }
    if style.modifiers.contains(Modifier::SLOW_BLINK) {
        codes.push("5".to_string());
    }
    if style.modifiers.contains(Modifier::RAPID_BLINK) {
        codes.push("6".to_string());
    }
    if style.modifiers.contains(Modifier::REVERSED) {
        codes.push("7".to_string());
    }
    if style.modifiers.contains(Modifier::CROSSED_OUT) {
        codes.push("9".to_string());
    }
    if style.modifiers.contains(Modifier::HIDDEN) {
        codes.push("8".to_string());
    }

    if codes.is_empty() {
        return;
    }
    let _ = write!(out, "\x1b[{}m", codes.join(";"));
}

fn indexed16_fg_code(n: u8) -> String {
    if n < 8 { format!("{}", 30 + n) } else { format!("{}", 82 + n) }
}

fn indexed16_bg_code(n: u8) -> String {
    if n < 8 { format!("{}", 40 + n) } else { format!("{}", 92 + n) }
}
