//! Application orchestration: configuration, frame pacing, suspend/resume,
//! and the tick engine that ties the renderer, input decoder, and window
//! manager together into a runnable program.

pub mod app;
pub mod config;
pub mod fps;
pub mod suspend;

pub use app::{App, AppControl, EventSource};
pub use config::Config;
pub use fps::FpsMonitor;
pub use suspend::suspend_scope;

pub use core_render::Renderer;
