//! Color, style, and cell: the value types every higher-level crate in
//! Celina's core builds on.

pub mod cell;
pub mod color;
pub mod style;

pub use cell::{display_width, Cell};
pub use color::Color;
pub use style::{Modifier, Style};
