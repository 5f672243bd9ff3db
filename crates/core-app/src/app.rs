//! The tick engine: one thread, one blocking call per tick, draining a
//! bounded batch of events before at most one render.

use core_buffer::Buffer;
use core_error::Result;
use core_events::{Event, ResizeState};
use core_geometry::{Rect, Size};
use core_terminal::{CursorState, FeatureSet, TerminalBackend};
use core_windows::WindowManager;

use crate::config::Config;
use crate::fps::FpsMonitor;
use crate::suspend::suspend_scope;
use crate::Renderer;

/// Hard cap on events drained per tick (spec's anti-starvation bound): a
/// burst of input can never indefinitely delay the render step.
const MAX_EVENTS_PER_TICK: u32 = 5;

/// Abstracts the blocking-poll-then-drain input source so the tick loop can
/// be driven by real stdin or, in tests, a scripted sequence of events.
pub trait EventSource {
    /// Block up to `timeout_ms` for input to become available.
    fn poll_ready(&self, timeout_ms: u64) -> bool;
    /// Decode one event without blocking; `None` if nothing is buffered.
    fn read_nonblocking(&mut self) -> Option<Event>;
}

#[cfg(unix)]
impl EventSource for core_events::Stdin {
    fn poll_ready(&self, timeout_ms: u64) -> bool {
        core_events::poll_events(self, timeout_ms)
    }
    fn read_nonblocking(&mut self) -> Option<Event> {
        core_events::read_key_nonblocking(self)
    }
}

/// The narrow surface an event handler needs to request a quit or a
/// suspend - deliberately not the whole `App`, so a handler can't, say,
/// re-enter `run` or swap out the render callback mid-tick.
pub struct AppControl<'a> {
    quit: &'a mut bool,
}

impl AppControl<'_> {
    pub fn quit(&mut self) {
        *self.quit = true;
    }
}

type EventHandler = Box<dyn FnMut(&Event, &mut AppControl) -> bool>;
type RenderHandler = Box<dyn FnMut(&mut Buffer)>;

pub struct App<S: EventSource> {
    config: Config,
    backend: Box<dyn TerminalBackend>,
    source: S,
    renderer: Renderer,
    windows: WindowManager,
    fps: FpsMonitor,
    resize_state: ResizeState,
    event_handler: Option<EventHandler>,
    render_handler: Option<RenderHandler>,
    cursor: CursorState,
    quit: bool,
    features: FeatureSet,
}

impl<S: EventSource> App<S> {
    pub fn new(config: Config, backend: Box<dyn TerminalBackend>, source: S, initial_area: Rect) -> Self {
        let target_fps = config.target_fps_u32();
        Self {
            config,
            backend,
            source,
            renderer: Renderer::new(initial_area),
            windows: WindowManager::new(),
            fps: FpsMonitor::new(target_fps),
            resize_state: ResizeState::new(),
            event_handler: None,
            render_handler: None,
            cursor: CursorState::default(),
            quit: false,
            features: FeatureSet::default(),
        }
    }

    pub fn on_event(&mut self, handler: impl FnMut(&Event, &mut AppControl) -> bool + 'static) {
        self.event_handler = Some(Box::new(handler));
    }

    pub fn on_render(&mut self, handler: impl FnMut(&mut Buffer) + 'static) {
        self.render_handler = Some(Box::new(handler));
    }

    pub fn windows(&mut self) -> &mut WindowManager {
        &mut self.windows
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    fn enter(&mut self) -> Result<()> {
        if self.config.raw_mode {
            self.backend.enter_raw_mode()?;
            self.features.raw_mode = true;
        }
        if self.config.alternate_screen {
            self.backend.enter_alternate_screen()?;
            self.features.alternate_screen = true;
        }
        if self.config.mouse_capture {
            self.backend.enable_mouse_capture()?;
            self.features.mouse_capture = true;
        }
        if self.config.bracketed_paste {
            self.backend.enable_bracketed_paste()?;
            self.features.bracketed_paste = true;
        }
        if self.config.focus_events {
            self.backend.enable_focus_events()?;
            self.features.focus_events = true;
        }
        #[cfg(unix)]
        core_events::resize::install_handler();
        Ok(())
    }

    /// Disable, in reverse of `enter`'s order, whatever was enabled. Called
    /// unconditionally on the way out of `run`, even after an error.
    fn leave(&mut self) -> Result<()> {
        core_terminal::backend::cleanup(self.backend.as_mut(), self.features)
    }

    /// Runs the tick loop until the user handler returns `false`, a `Quit`
    /// event arrives, or `quit()` is called. Cleanup always runs before
    /// returning, whatever the outcome.
    pub fn run(&mut self) -> Result<()> {
        let enter_result = self.enter();
        let run_result = match enter_result {
            Ok(()) => self.tick_loop(),
            Err(e) => Err(e),
        };
        let leave_result = self.leave();
        run_result.and(leave_result)
    }

    fn tick_loop(&mut self) -> Result<()> {
        while !self.quit {
            self.poll_resize();

            let remaining = self.fps.remaining_frame_ms();
            if self.source.poll_ready(remaining) {
                self.drain_events();
            }

            if self.quit {
                break;
            }

            if self.fps.should_render() {
                self.fps.start_frame();
                if let Some(handler) = self.render_handler.as_mut() {
                    handler(self.renderer.buffer_mut());
                }
                if self.config.window_mode {
                    self.windows.render_into(self.renderer.buffer_mut());
                }
                self.renderer.render(self.backend.as_mut(), self.cursor)?;
                self.fps.end_frame();
            }
        }
        Ok(())
    }

    fn poll_resize(&mut self) {
        if !self.resize_state.poll() {
            return;
        }
        let Ok(size) = core_terminal::terminal_size() else { return };
        self.renderer.resize(Rect::new(0, 0, size.width, size.height));
        self.dispatch(&Event::Resize(size.width, size.height));
    }

    fn drain_events(&mut self) {
        for _ in 0..MAX_EVENTS_PER_TICK {
            let Some(event) = self.source.read_nonblocking() else { break };
            if matches!(event, Event::Quit) {
                self.quit = true;
            }
            self.dispatch(&event);
            if self.quit {
                break;
            }
        }
    }

    fn dispatch(&mut self, event: &Event) {
        if let Some(handler) = self.event_handler.as_mut() {
            let mut ctl = AppControl { quit: &mut self.quit };
            let _consumed = handler(event, &mut ctl);
        }
        if self.config.window_mode {
            self.windows.dispatch(event);
        }
    }

    /// Shell out: disable the currently enabled terminal features, run
    /// `body`, then restore them and force a full repaint - even if `body`
    /// panics.
    pub fn suspend<T>(&mut self, body: impl FnOnce() -> T) -> Result<T> {
        suspend_scope(self.backend.as_mut(), &mut self.renderer, self.features, body)
    }
}

/// Unused directly but documents the field `Config`'s `title`/`window_mode`
/// ultimately govern: kept here rather than duplicated in `App` itself.
pub fn initial_area_from(size: Size) -> Rect {
    Rect::new(0, 0, size.width, size.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_cell::{Cell, Style};
    use std::collections::VecDeque;

    struct FakeBackend {
        writes: u32,
    }

    impl TerminalBackend for FakeBackend {
        fn enter_raw_mode(&mut self) -> Result<()> {
            Ok(())
        }
        fn leave_raw_mode(&mut self) -> Result<()> {
            Ok(())
        }
        fn enter_alternate_screen(&mut self) -> Result<()> {
            Ok(())
        }
        fn leave_alternate_screen(&mut self) -> Result<()> {
            Ok(())
        }
        fn hide_cursor(&mut self) -> Result<()> {
            Ok(())
        }
        fn show_cursor(&mut self) -> Result<()> {
            Ok(())
        }
        fn enable_mouse_capture(&mut self) -> Result<()> {
            Ok(())
        }
        fn disable_mouse_capture(&mut self) -> Result<()> {
            Ok(())
        }
        fn enable_bracketed_paste(&mut self) -> Result<()> {
            Ok(())
        }
        fn disable_bracketed_paste(&mut self) -> Result<()> {
            Ok(())
        }
        fn enable_focus_events(&mut self) -> Result<()> {
            Ok(())
        }
        fn disable_focus_events(&mut self) -> Result<()> {
            Ok(())
        }
        fn write_raw(&mut self, _bytes: &[u8]) -> Result<()> {
            self.writes += 1;
            Ok(())
        }
    }

    /// Delivers a fixed script of events, then reports "not ready" forever -
    /// enough to drive a handful of ticks deterministically in tests.
    struct ScriptedSource {
        queue: VecDeque<Event>,
    }

    impl EventSource for ScriptedSource {
        fn poll_ready(&self, _timeout_ms: u64) -> bool {
            !self.queue.is_empty()
        }
        fn read_nonblocking(&mut self) -> Option<Event> {
            self.queue.pop_front()
        }
    }

    fn test_app(events: Vec<Event>) -> App<ScriptedSource> {
        let backend = Box::new(FakeBackend { writes: 0 });
        let source = ScriptedSource { queue: events.into() };
        App::new(Config::default(), backend, source, Rect::new(0, 0, 10, 4))
    }

    #[test]
    fn quit_event_stops_the_loop() {
        let mut app = test_app(vec![Event::Quit]);
        app.run().unwrap();
        assert!(app.quit);
    }

    #[test]
    fn app_quit_method_stops_the_loop_from_the_handler() {
        let mut app = test_app(vec![Event::Key(core_events::KeyEvent::plain(core_events::KeyCode::Char('q')))]);
        app.on_event(|_event, ctl| {
            ctl.quit();
            true
        });
        app.run().unwrap();
        assert!(app.quit);
    }

    #[test]
    fn render_handler_populates_the_buffer_before_the_flush() {
        let mut app = test_app(vec![Event::Quit]);
        app.on_render(|buf| buf.set(0, 0, Cell::new("x", Style::default())));
        // Force at least one render before the Quit event is drained by
        // making the FPS monitor think a render is always due.
        app.fps = FpsMonitor::new(1000);
        app.run().unwrap();
        assert!(app.quit);
    }
}
