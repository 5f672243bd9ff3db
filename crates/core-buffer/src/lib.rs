//! The off-screen cell grid and its damage-tracked differential comparison -
//! the heart of Celina's rendering pipeline.

pub mod buffer;
pub mod diff;
pub mod dirty;

pub use buffer::Buffer;
pub use diff::diff;
pub use dirty::DirtyRegion;
