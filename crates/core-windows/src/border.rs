//! Which sides of a window draw a border, and the glyphs used to draw it.

use bitflags::bitflags;

bitflags! {
    /// Active border sides. A window with no sides set has `content_area() == area()`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Borders: u8 {
        const TOP    = 0b0001;
        const BOTTOM = 0b0010;
        const LEFT   = 0b0100;
        const RIGHT  = 0b1000;
        const ALL = Self::TOP.bits() | Self::BOTTOM.bits() | Self::LEFT.bits() | Self::RIGHT.bits();
    }
}

/// The six box-drawing glyphs a border is assembled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderStyle {
    pub top_left: String,
    pub top_right: String,
    pub bottom_left: String,
    pub bottom_right: String,
    pub horizontal: String,
    pub vertical: String,
}

impl Default for BorderStyle {
    fn default() -> Self {
        Self::plain()
    }
}

impl BorderStyle {
    pub fn plain() -> Self {
        Self {
            top_left: "┌".to_string(),
            top_right: "┐".to_string(),
            bottom_left: "└".to_string(),
            bottom_right: "┘".to_string(),
            horizontal: "─".to_string(),
            vertical: "│".to_string(),
        }
    }

    pub fn double() -> Self {
        Self {
            top_left: "╔".to_string(),
            top_right: "╗".to_string(),
            bottom_left: "╚".to_string(),
            bottom_right: "╝".to_string(),
            horizontal: "═".to_string(),
            vertical: "║".to_string(),
        }
    }
}

/// A window's border configuration: which sides are active and what glyphs
/// they're drawn with. `thickness` is always 1 cell per active side - the
/// specification does not define thicker borders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderConfig {
    pub sides: Borders,
    pub style: BorderStyle,
}

impl Default for BorderConfig {
    fn default() -> Self {
        Self { sides: Borders::ALL, style: BorderStyle::plain() }
    }
}

impl BorderConfig {
    pub fn none() -> Self {
        Self { sides: Borders::empty(), style: BorderStyle::plain() }
    }

    /// How much the content area shrinks on each edge: `(left, top, right, bottom)`.
    pub fn thickness(&self) -> (u16, u16, u16, u16) {
        (
            self.sides.contains(Borders::LEFT) as u16,
            self.sides.contains(Borders::TOP) as u16,
            self.sides.contains(Borders::RIGHT) as u16,
            self.sides.contains(Borders::BOTTOM) as u16,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sides_thickness_is_one_cell_each() {
        let cfg = BorderConfig::default();
        assert_eq!(cfg.thickness(), (1, 1, 1, 1));
    }

    #[test]
    fn no_borders_has_zero_thickness() {
        let cfg = BorderConfig::none();
        assert_eq!(cfg.thickness(), (0, 0, 0, 0));
    }

    #[test]
    fn partial_sides_only_shrink_those_edges() {
        let cfg = BorderConfig { sides: Borders::TOP | Borders::LEFT, style: BorderStyle::plain() };
        assert_eq!(cfg.thickness(), (1, 1, 0, 0));
    }
}
