//! Constraint-based rectangle subdivision: the `Layout`/`Constraint`
//! vocabulary and the four-phase solver that turns them into `Rect`s.

pub mod constraint;
pub mod solver;

pub use constraint::Constraint;
pub use solver::{split, Direction, Layout};
