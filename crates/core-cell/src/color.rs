//! Terminal color representation and the handful of pure color-math helpers
//! applications use to build palettes (hex parsing, HSV conversion, RGB
//! interpolation, the xterm 256-color cube and grayscale ramp).

/// A terminal color. `Default` means "whatever the terminal's current
/// foreground/background is" - it is NOT the same as `Indexed(0)` (black).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Terminal default (no SGR color code emitted).
    Default,
    /// One of the 16 standard ANSI colors (0..15).
    Indexed(u8),
    /// One of the 256-color palette entries (0..255).
    Indexed256(u8),
    /// 24-bit truecolor.
    Rgb(u8, u8, u8),
}

impl Default for Color {
    fn default() -> Self {
        Color::Default
    }
}

impl Color {
    /// Parse a `#rrggbb` or `#rgb` hex string into an RGB color. Never fails:
    /// malformed input yields opaque black, matching the terminal-safe
    /// fallback used everywhere else color parsing can go wrong.
    pub fn from_hex(s: &str) -> Color {
        let s = s.strip_prefix('#').unwrap_or(s);
        let expand = |c: char| -> Option<u8> {
            let v = c.to_digit(16)? as u8;
            Some(v * 16 + v)
        };
        match s.len() {
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16);
                let g = u8::from_str_radix(&s[2..4], 16);
                let b = u8::from_str_radix(&s[4..6], 16);
                match (r, g, b) {
                    (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
                    _ => Color::Rgb(0, 0, 0),
                }
            }
            3 => {
                let mut chars = s.chars();
                match (
                    chars.next().and_then(expand),
                    chars.next().and_then(expand),
                    chars.next().and_then(expand),
                ) {
                    (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
                    _ => Color::Rgb(0, 0, 0),
                }
            }
            _ => Color::Rgb(0, 0, 0),
        }
    }

    /// Convert HSV (hue in 0..360, saturation/value in 0.0..=1.0) to an RGB color.
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Color {
        let h = h.rem_euclid(360.0);
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;
        let (r1, g1, b1) = match h as u32 {
            0..=59 => (c, x, 0.0),
            60..=119 => (x, c, 0.0),
            120..=179 => (0.0, c, x),
            180..=239 => (0.0, x, c),
            240..=299 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |chan: f32| -> u8 { ((chan + m) * 255.0).round().clamp(0.0, 255.0) as u8 };
        Color::Rgb(to_u8(r1), to_u8(g1), to_u8(b1))
    }

    /// Linearly interpolate between two colors, treating non-RGB operands as
    /// their nearest RGB equivalent being irrelevant - only RGB components are
    /// interpolated; other variants fall back to `a` at `t <= 0` and `b` at `t >= 1`.
    pub fn lerp(a: Color, b: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        match (a, b) {
            (Color::Rgb(ar, ag, ab), Color::Rgb(br, bg, bb)) => {
                let lerp_chan = |x: u8, y: u8| -> u8 {
                    (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8
                };
                Color::Rgb(lerp_chan(ar, br), lerp_chan(ag, bg), lerp_chan(ab, bb))
            }
            _ if t <= 0.0 => a,
            _ => b,
        }
    }

    /// Map a value in 0..24 to the xterm grayscale ramp (palette indices 232..255).
    pub fn grayscale(level: u8) -> Color {
        Color::Indexed256(232 + level.min(23))
    }

    /// Build a palette index from the 6x6x6 xterm RGB cube; each channel is
    /// clamped to 0..5 and combined as `16 + 36*r + 6*g + b`.
    pub fn cube(r: u8, g: u8, b: u8) -> Color {
        let r = r.min(5);
        let g = g.min(5);
        let b = b.min(5);
        Color::Indexed256(16 + 36 * r + 6 * g + b)
    }
}
