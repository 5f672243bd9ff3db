//! Byte-level input decoder: turns raw terminal bytes into [`Event`]s.
//!
//! The decoder never raises - a malformed or truncated sequence resolves to
//! a safe default (bare Escape, a dropped/ignored classification, or
//! whatever UTF-8 could be salvaged) rather than propagating an error. This
//! mirrors the terminal's own behavior: a dropped byte should degrade input
//! fidelity, never crash the event loop.

use crate::event::Event;
use crate::key::{KeyCode, KeyEvent, KeyModifiers};
use crate::mouse::{MouseButton, MouseEvent, MouseEventKind};

/// Bytes are pulled one at a time through this trait so the same state
/// machine drives both a real, poll-backed stdin reader and an in-memory
/// byte queue in tests. `timeout_ms` of `None` means wait indefinitely;
/// `Some(ms)` bounds the wait and returns `None` on expiry.
pub trait ByteSource {
    fn next_byte(&mut self, timeout_ms: Option<u64>) -> Option<u8>;
}

/// A fixed queue of bytes, useful for deterministic tests and for feeding a
/// known escape sequence through the state machine.
pub struct FixedBytes {
    bytes: std::collections::VecDeque<u8>,
}

impl FixedBytes {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into().into() }
    }
}

impl ByteSource for FixedBytes {
    fn next_byte(&mut self, _timeout_ms: Option<u64>) -> Option<u8> {
        self.bytes.pop_front()
    }
}

/// Timeout used for every byte read once inside an escape sequence, in
/// non-blocking mode. `None` (blocking mode) never times out.
const ESC_FOLLOWUP_TIMEOUT_MS: u64 = 20;

/// Decode exactly one event from `source`. `blocking` selects whether
/// interior sequence reads wait indefinitely (`true`) or time out after
/// [`ESC_FOLLOWUP_TIMEOUT_MS`] (`false`, matching `read_key_nonblocking`'s
/// contract once the first byte is already known to be available).
pub fn decode_one(source: &mut impl ByteSource, blocking: bool) -> Option<Event> {
    let first_timeout = if blocking { None } else { Some(0) };
    let b = source.next_byte(first_timeout)?;
    Some(decode_from_first_byte(source, b, blocking))
}

fn inner_timeout(blocking: bool) -> Option<u64> {
    if blocking { None } else { Some(ESC_FOLLOWUP_TIMEOUT_MS) }
}

fn decode_from_first_byte(source: &mut impl ByteSource, b: u8, blocking: bool) -> Event {
    match b {
        0x03 => Event::Quit,
        0x00 => key(KeyCode::Char(' '), KeyModifiers::CTRL),
        0x01..=0x1A if !matches!(b, 0x08 | 0x09 | 0x0A | 0x0D) => {
            key(KeyCode::Char((b'a' + (b - 1)) as char), KeyModifiers::CTRL)
        }
        0x1C..=0x1F => key(KeyCode::Char((b'4' + (b - 0x1C)) as char), KeyModifiers::CTRL),
        0x08 | 0x7F => key(KeyCode::Backspace, KeyModifiers::empty()),
        0x09 => key(KeyCode::Tab, KeyModifiers::empty()),
        0x0D | 0x0A => key(KeyCode::Enter, KeyModifiers::empty()),
        0x20 => key(KeyCode::Char(' '), KeyModifiers::empty()),
        0x1B => decode_escape(source, blocking),
        _ => decode_utf8(source, b, blocking),
    }
}

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

fn decode_escape(source: &mut impl ByteSource, blocking: bool) -> Event {
    let Some(b) = source.next_byte(inner_timeout(blocking)) else {
        return key(KeyCode::Escape, KeyModifiers::empty());
    };
    match b {
        b'[' => decode_csi(source, blocking),
        b'O' => decode_ss3(source, blocking),
        _ => {
            // Not a recognized continuation; the byte we peeked belongs to
            // whatever comes next, but since this decoder consumes one
            // event per call we simply surface a bare Escape and drop it -
            // a malformed sequence resolving to the documented safe default.
            key(KeyCode::Escape, KeyModifiers::empty())
        }
    }
}

fn decode_ss3(source: &mut impl ByteSource, blocking: bool) -> Event {
    match source.next_byte(inner_timeout(blocking)) {
        Some(b'P') => key(KeyCode::F(1), KeyModifiers::empty()),
        Some(b'Q') => key(KeyCode::F(2), KeyModifiers::empty()),
        Some(b'R') => key(KeyCode::F(3), KeyModifiers::empty()),
        Some(b'S') => key(KeyCode::F(4), KeyModifiers::empty()),
        _ => key(KeyCode::Escape, KeyModifiers::empty()),
    }
}

const PASTE_TERMINATOR: &[u8] = b"\x1b[201~";

fn decode_csi(source: &mut impl ByteSource, blocking: bool) -> Event {
    let timeout = inner_timeout(blocking);

    let Some(first) = source.next_byte(timeout) else {
        return key(KeyCode::Escape, KeyModifiers::empty());
    };

    if first == b'M' {
        return decode_x10_mouse(source, timeout);
    }
    if first == b'<' {
        return decode_sgr_mouse(source, timeout);
    }

    // Generic CSI: accumulate bytes until a final byte (a letter, or '~').
    let mut buf = vec![first];
    loop {
        if is_csi_final(*buf.last().unwrap()) {
            break;
        }
        match source.next_byte(timeout) {
            Some(b) => buf.push(b),
            None => return key(KeyCode::Escape, KeyModifiers::empty()),
        }
    }

    let final_byte = *buf.last().unwrap() as char;
    let params = &buf[..buf.len() - 1];
    let params = std::str::from_utf8(params).unwrap_or("");
    let mut parts = params.split(';');
    let base_num: Option<u32> = parts.next().and_then(|s| s.parse().ok());
    let modifier_digit: Option<u32> = parts.next().and_then(|s| s.parse().ok());
    let modifiers = modifier_digit.map(modifiers_from_digit).unwrap_or_else(KeyModifiers::empty);

    match final_byte {
        'A' => key(KeyCode::Up, modifiers),
        'B' => key(KeyCode::Down, modifiers),
        'C' => key(KeyCode::Right, modifiers),
        'D' => key(KeyCode::Left, modifiers),
        'H' => key(KeyCode::Home, modifiers),
        'F' => key(KeyCode::End, modifiers),
        'Z' => key(KeyCode::BackTab, modifiers),
        'I' => Event::FocusGained,
        'O' => Event::FocusLost,
        '~' => decode_tilde(source, base_num, modifiers, timeout),
        _ => key(KeyCode::Escape, KeyModifiers::empty()),
    }
}

fn is_csi_final(b: u8) -> bool {
    b == b'~' || b.is_ascii_alphabetic()
}

fn modifiers_from_digit(digit: u32) -> KeyModifiers {
    let bits = digit.saturating_sub(1);
    let mut m = KeyModifiers::empty();
    if bits & 0b001 != 0 {
        m |= KeyModifiers::SHIFT;
    }
    if bits & 0b010 != 0 {
        m |= KeyModifiers::ALT;
    }
    if bits & 0b100 != 0 {
        m |= KeyModifiers::CTRL;
    }
    m
}

fn decode_tilde(
    source: &mut impl ByteSource,
    base_num: Option<u32>,
    modifiers: KeyModifiers,
    timeout: Option<u64>,
) -> Event {
    match base_num {
        Some(1) => key(KeyCode::Home, modifiers),
        Some(2) => key(KeyCode::Insert, modifiers),
        Some(3) => key(KeyCode::Delete, modifiers),
        Some(4) => key(KeyCode::End, modifiers),
        Some(5) => key(KeyCode::PageUp, modifiers),
        Some(6) => key(KeyCode::PageDown, modifiers),
        Some(11) => key(KeyCode::F(1), modifiers),
        Some(12) => key(KeyCode::F(2), modifiers),
        Some(13) => key(KeyCode::F(3), modifiers),
        Some(14) => key(KeyCode::F(4), modifiers),
        Some(15) => key(KeyCode::F(5), modifiers),
        Some(17) => key(KeyCode::F(6), modifiers),
        Some(18) => key(KeyCode::F(7), modifiers),
        Some(19) => key(KeyCode::F(8), modifiers),
        Some(20) => key(KeyCode::F(9), modifiers),
        Some(21) => key(KeyCode::F(10), modifiers),
        Some(23) => key(KeyCode::F(11), modifiers),
        Some(24) => key(KeyCode::F(12), modifiers),
        Some(200) => Event::Paste(read_paste_body(source, timeout)),
        // 201 without a preceding 200 (stray terminator) and anything else
        // unrecognized: resolve to the documented safe default.
        _ => key(KeyCode::Escape, KeyModifiers::empty()),
    }
}

/// Accumulate paste content until `ESC [ 201 ~` (or the source runs dry).
/// Equivalent to the description's 6-state scanner (None/ESC/`[`/`2`/`20`/
/// `201`), expressed here as incremental prefix-matching against the fixed
/// terminator so a byte that breaks the match can itself restart one
/// (e.g. back-to-back escapes inside pasted text).
fn read_paste_body(source: &mut impl ByteSource, timeout: Option<u64>) -> String {
    let mut content: Vec<u8> = Vec::new();
    let mut pending: Vec<u8> = Vec::new();

    while let Some(b) = source.next_byte(timeout) {
        let mut candidate = pending.clone();
        candidate.push(b);
        if PASTE_TERMINATOR.starts_with(&candidate) {
            if candidate.len() == PASTE_TERMINATOR.len() {
                pending.clear();
                break;
            }
            pending = candidate;
            continue;
        }
        // The prefix broke: flush everything matched so far (not including
        // `b`), then let `b` itself restart a fresh match if it's a `ESC`.
        content.extend_from_slice(&pending);
        pending.clear();
        if PASTE_TERMINATOR.starts_with(&[b]) {
            pending.push(b);
        } else {
            content.push(b);
        }
    }
    content.extend_from_slice(&pending);
    String::from_utf8_lossy(&content).into_owned()
}

fn decode_x10_mouse(source: &mut impl ByteSource, timeout: Option<u64>) -> Event {
    let button = source.next_byte(timeout);
    let x = source.next_byte(timeout);
    let y = source.next_byte(timeout);
    let (Some(button), Some(x), Some(y)) = (button, x, y) else {
        return key(KeyCode::Escape, KeyModifiers::empty());
    };
    let button = button.wrapping_sub(32);
    let x = u16::from(x.wrapping_sub(33));
    let y = u16::from(y.wrapping_sub(33));
    Event::Mouse(mouse_event_from_button_byte(button, x, y, None))
}

fn decode_sgr_mouse(source: &mut impl ByteSource, timeout: Option<u64>) -> Event {
    let mut buf = Vec::new();
    loop {
        match source.next_byte(timeout) {
            Some(b @ (b'M' | b'm')) => {
                buf.push(b);
                break;
            }
            Some(b) => buf.push(b),
            None => return key(KeyCode::Escape, KeyModifiers::empty()),
        }
    }
    let terminator = *buf.last().unwrap();
    let body = std::str::from_utf8(&buf[..buf.len() - 1]).unwrap_or("");
    let mut parts = body.split(';');
    let (Some(button), Some(x), Some(y)) = (
        parts.next().and_then(|s| s.parse::<u8>().ok()),
        parts.next().and_then(|s| s.parse::<u16>().ok()),
        parts.next().and_then(|s| s.parse::<u16>().ok()),
    ) else {
        return key(KeyCode::Escape, KeyModifiers::empty());
    };
    let x = x.saturating_sub(1);
    let y = y.saturating_sub(1);
    let release = terminator == b'm';
    Event::Mouse(mouse_event_from_button_byte(button, x, y, Some(release)))
}

fn button_from_info(info: u8) -> MouseButton {
    match info {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        _ => MouseButton::Right,
    }
}

fn mouse_event_from_button_byte(byte: u8, x: u16, y: u16, explicit_release: Option<bool>) -> MouseEvent {
    let button_info = byte & 0x03;
    let drag = byte & 0x20 != 0;
    let wheel = byte & 0x40 != 0;

    let mut modifiers = KeyModifiers::empty();
    if byte & 0x04 != 0 {
        modifiers |= KeyModifiers::SHIFT;
    }
    if byte & 0x08 != 0 {
        modifiers |= KeyModifiers::ALT;
    }
    if byte & 0x10 != 0 {
        modifiers |= KeyModifiers::CTRL;
    }

    let kind = if wheel {
        if button_info & 1 == 0 { MouseEventKind::WheelUp } else { MouseEventKind::WheelDown }
    } else if let Some(true) = explicit_release {
        MouseEventKind::Release(button_from_info(button_info))
    } else if button_info == 3 {
        if drag { MouseEventKind::Moved } else { MouseEventKind::Release(MouseButton::Left) }
    } else if drag {
        MouseEventKind::Drag(button_from_info(button_info))
    } else {
        MouseEventKind::Press(button_from_info(button_info))
    };

    MouseEvent { kind, x, y, modifiers }
}

fn decode_utf8(source: &mut impl ByteSource, lead: u8, blocking: bool) -> Event {
    let expected_len = utf8_expected_len(lead);
    let mut bytes = vec![lead];
    if expected_len > 1 {
        let timeout = inner_timeout(blocking);
        for _ in 1..expected_len {
            match source.next_byte(timeout) {
                Some(b) if b & 0xC0 == 0x80 => bytes.push(b),
                Some(b) => {
                    // Not a valid continuation byte; stop early and commit
                    // whatever was already collected (lossy, never blocks).
                    return commit_utf8(bytes, Some(b));
                }
                None => break,
            }
        }
    }
    commit_utf8(bytes, None)
}

fn utf8_expected_len(lead: u8) -> usize {
    if lead & 0x80 == 0 {
        1
    } else if lead & 0xE0 == 0xC0 {
        2
    } else if lead & 0xF0 == 0xE0 {
        3
    } else if lead & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}

/// `leftover` is a byte read while probing for a continuation that turned
/// out not to be one; it is discarded (the partial character still commits).
fn commit_utf8(bytes: Vec<u8>, _leftover: Option<u8>) -> Event {
    let text = String::from_utf8_lossy(&bytes);
    let ch = text.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
    key(KeyCode::Char(ch), KeyModifiers::empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Event {
        let mut src = FixedBytes::new(bytes.to_vec());
        decode_one(&mut src, true).expect("expected an event")
    }

    #[test]
    fn ctrl_c_is_quit() {
        assert_eq!(decode(&[0x03]), Event::Quit);
    }

    #[test]
    fn ctrl_a_maps_to_char_a_with_ctrl() {
        assert_eq!(decode(&[0x01]), Event::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CTRL)));
    }

    #[test]
    fn bare_escape_on_no_followup() {
        let mut src = FixedBytes::new(vec![0x1B]);
        assert_eq!(decode_one(&mut src, false), Some(Event::Key(KeyEvent::plain(KeyCode::Escape))));
    }

    #[test]
    fn plain_arrow_up() {
        assert_eq!(decode(b"\x1b[A"), Event::Key(KeyEvent::plain(KeyCode::Up)));
    }

    #[test]
    fn modified_arrow_up_ctrl() {
        // S5: ESC [ 1 ; 5 A -> ArrowUp + Ctrl (5-1=4 -> bit2 -> Ctrl).
        assert_eq!(decode(b"\x1b[1;5A"), Event::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::CTRL)));
    }

    #[test]
    fn function_key_gap_mapping() {
        assert_eq!(decode(b"\x1b[15~"), Event::Key(KeyEvent::plain(KeyCode::F(5))));
        assert_eq!(decode(b"\x1b[17~"), Event::Key(KeyEvent::plain(KeyCode::F(6))));
    }

    #[test]
    fn ss3_function_keys() {
        assert_eq!(decode(b"\x1bOP"), Event::Key(KeyEvent::plain(KeyCode::F(1))));
    }

    #[test]
    fn sgr_mouse_press() {
        // S4: ESC [ < 0 ; 11 ; 6 M -> Press(Left) at (10, 5).
        let ev = decode(b"\x1b[<0;11;6M");
        assert_eq!(
            ev,
            Event::Mouse(MouseEvent { kind: MouseEventKind::Press(MouseButton::Left), x: 10, y: 5, modifiers: KeyModifiers::empty() })
        );
    }

    #[test]
    fn sgr_mouse_release() {
        let ev = decode(b"\x1b[<0;11;6m");
        assert_eq!(
            ev,
            Event::Mouse(MouseEvent { kind: MouseEventKind::Release(MouseButton::Left), x: 10, y: 5, modifiers: KeyModifiers::empty() })
        );
    }

    #[test]
    fn x10_mouse_click() {
        let ev = decode(&[0x1B, b'[', b'M', 32, 33 + 10, 33 + 5]);
        assert_eq!(
            ev,
            Event::Mouse(MouseEvent { kind: MouseEventKind::Press(MouseButton::Left), x: 10, y: 5, modifiers: KeyModifiers::empty() })
        );
    }

    #[test]
    fn bracketed_paste_with_embedded_escape() {
        // S6: ESC [ 200 ~ h i ESC x ESC [ 201 ~ -> Paste("hi\x1bx").
        let ev = decode(b"\x1b[200~hi\x1bx\x1b[201~");
        assert_eq!(ev, Event::Paste("hi\x1bx".to_string()));
    }

    #[test]
    fn bracketed_paste_empty() {
        let ev = decode(b"\x1b[200~\x1b[201~");
        assert_eq!(ev, Event::Paste(String::new()));
    }

    #[test]
    fn utf8_two_byte_character() {
        // U+00E9 'é' = 0xC3 0xA9.
        assert_eq!(decode(&[0xC3, 0xA9]), Event::Key(KeyEvent::plain(KeyCode::Char('é'))));
    }

    #[test]
    fn utf8_three_byte_character() {
        // "あ" = E3 81 82.
        assert_eq!(decode(&[0xE3, 0x81, 0x82]), Event::Key(KeyEvent::plain(KeyCode::Char('あ'))));
    }

    #[test]
    fn backspace_and_delete_variants() {
        assert_eq!(decode(&[0x08]), Event::Key(KeyEvent::plain(KeyCode::Backspace)));
        assert_eq!(decode(&[0x7F]), Event::Key(KeyEvent::plain(KeyCode::Backspace)));
        assert_eq!(decode(b"\x1b[3~"), Event::Key(KeyEvent::plain(KeyCode::Delete)));
    }

    #[test]
    fn focus_events() {
        assert_eq!(decode(b"\x1b[I"), Event::FocusGained);
        assert_eq!(decode(b"\x1b[O"), Event::FocusLost);
    }
}
