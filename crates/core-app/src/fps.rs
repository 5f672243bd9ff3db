//! Frame pacing: decides when the tick loop's render step should fire, and
//! tracks the rolling frames-per-second figure applications can query.

use std::time::{Duration, Instant};

/// Target clamped to 1..=240 - zero would divide by zero computing the
/// frame interval, and anything above 240 is almost certainly a
/// misconfiguration rather than a real display's refresh rate.
const MIN_TARGET_FPS: u32 = 1;
const MAX_TARGET_FPS: u32 = 240;

pub struct FpsMonitor {
    target_fps: u32,
    frame_interval: Duration,
    last_render: Option<Instant>,
    frame_count_window: u32,
    window_start: Instant,
    current_fps: f64,
}

impl FpsMonitor {
    pub fn new(target_fps: u32) -> Self {
        let target_fps = target_fps.clamp(MIN_TARGET_FPS, MAX_TARGET_FPS);
        Self {
            target_fps,
            frame_interval: Duration::from_secs_f64(1.0 / f64::from(target_fps)),
            last_render: None,
            frame_count_window: 0,
            window_start: Instant::now(),
            current_fps: 0.0,
        }
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Whether enough time has passed since the last render for another one
    /// to be due. True unconditionally before the first render.
    pub fn should_render(&self) -> bool {
        match self.last_render {
            None => true,
            Some(last) => last.elapsed() >= self.frame_interval,
        }
    }

    /// Milliseconds until the next render is due, `0` if one is already due.
    /// This is the value the tick loop passes to `poll_events` so it never
    /// blocks past the next scheduled render.
    pub fn remaining_frame_ms(&self) -> u64 {
        match self.last_render {
            None => 0,
            Some(last) => {
                let elapsed = last.elapsed();
                if elapsed >= self.frame_interval {
                    0
                } else {
                    (self.frame_interval - elapsed).as_millis() as u64
                }
            }
        }
    }

    /// Marks the start of a render step. Does not itself update FPS
    /// statistics - that happens in `end_frame`, after the frame producer
    /// and renderer have both run, so the reported rate reflects complete
    /// frames rather than attempts.
    pub fn start_frame(&mut self) {}

    /// Marks the completion of a render step: advances the last-render
    /// timestamp and the one-second rolling frame counter.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        self.last_render = Some(now);
        self.frame_count_window += 1;

        let elapsed = now.duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.current_fps = f64::from(self.frame_count_window) / elapsed.as_secs_f64();
            self.frame_count_window = 0;
            self.window_start = now;
        }
    }

    pub fn current_fps(&self) -> f64 {
        self.current_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_clamps_to_valid_range() {
        assert_eq!(FpsMonitor::new(0).target_fps(), 1);
        assert_eq!(FpsMonitor::new(1000).target_fps(), 240);
        assert_eq!(FpsMonitor::new(30).target_fps(), 30);
    }

    #[test]
    fn should_render_is_true_before_first_frame() {
        let monitor = FpsMonitor::new(60);
        assert!(monitor.should_render());
        assert_eq!(monitor.remaining_frame_ms(), 0);
    }

    #[test]
    fn immediately_after_a_frame_another_is_not_yet_due() {
        let mut monitor = FpsMonitor::new(30);
        monitor.end_frame();
        assert!(!monitor.should_render());
        assert!(monitor.remaining_frame_ms() > 0);
    }

    #[test]
    fn current_fps_starts_at_zero() {
        let monitor = FpsMonitor::new(60);
        assert_eq!(monitor.current_fps(), 0.0);
    }
}
