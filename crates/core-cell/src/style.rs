//! Style: a foreground/background color pair plus a set of text modifiers.

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Text attribute flags. Stored as a bitset since a cell can carry any
    /// combination (e.g. bold + underline).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifier: u16 {
        const BOLD        = 0b0000_0000_0001;
        const DIM         = 0b0000_0000_0010;
        const ITALIC      = 0b0000_0000_0100;
        const UNDERLINE   = 0b0000_0000_1000;
        const SLOW_BLINK  = 0b0000_0001_0000;
        const RAPID_BLINK = 0b0000_0010_0000;
        const REVERSED    = 0b0000_0100_0000;
        const CROSSED_OUT = 0b0000_1000_0000;
        const HIDDEN      = 0b0001_0000_0000;
    }
}

/// Foreground color, background color, and modifier set for one cell.
///
/// `Style::default()` is `Default`/`Default`/empty - the terminal's own
/// colors, not black-on-black. A naive derive that picked the first `Color`
/// variant would still be correct here only because `Color::Default` *is*
/// that first variant; this is asserted in the tests below so a future
/// reordering of `Color`'s variants cannot silently break it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub modifiers: Modifier,
}

impl Style {
    pub const fn new() -> Self {
        Self { fg: Color::Default, bg: Color::Default, modifiers: Modifier::empty() }
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    pub fn add_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers |= modifier;
        self
    }

    pub fn remove_modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.remove(modifier);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_is_default_colors_and_no_modifiers() {
        let style = Style::default();
        assert_eq!(style.fg, Color::Default);
        assert_eq!(style.bg, Color::Default);
        assert!(style.modifiers.is_empty());
    }

    #[test]
    fn builder_methods_compose() {
        let style = Style::new().fg(Color::Rgb(1, 2, 3)).add_modifier(Modifier::BOLD | Modifier::ITALIC);
        assert_eq!(style.fg, Color::Rgb(1, 2, 3));
        assert!(style.modifiers.contains(Modifier::BOLD));
        assert!(style.modifiers.contains(Modifier::ITALIC));
        assert!(!style.modifiers.contains(Modifier::UNDERLINE));
    }

    #[test]
    fn remove_modifier_clears_only_requested_bit() {
        let style = Style::new()
            .add_modifier(Modifier::BOLD | Modifier::DIM)
            .remove_modifier(Modifier::DIM);
        assert!(style.modifiers.contains(Modifier::BOLD));
        assert!(!style.modifiers.contains(Modifier::DIM));
    }
}
