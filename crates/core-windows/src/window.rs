//! A single window: its geometry, its own cell buffer, and the event
//! handlers the manager dispatches into.

use core_buffer::Buffer;
use core_events::{Event, KeyEvent, MouseEvent};
use core_geometry::Rect;

use crate::border::BorderConfig;

/// Opaque, manager-assigned identity. Two ids are only ever equal if they
/// came from the same `WindowManager::create_window` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFlags {
    pub visible: bool,
    pub focused: bool,
    pub resizable: bool,
    pub movable: bool,
    pub modal: bool,
    pub accepts_events: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self { visible: true, focused: false, resizable: true, movable: true, modal: false, accepts_events: true }
    }
}

type KeyHandler = Box<dyn FnMut(&KeyEvent) -> bool>;
type MouseHandler = Box<dyn FnMut(&MouseEvent) -> bool>;
type ResizeHandler = Box<dyn FnMut(Rect) -> bool>;
type GeneralHandler = Box<dyn FnMut(&Event) -> bool>;

/// Per-window event handler slots. Each is tried in order of specificity: a
/// handler matching the event's own kind first, falling back to `general`.
#[derive(Default)]
pub struct Handlers {
    pub general: Option<GeneralHandler>,
    pub key: Option<KeyHandler>,
    pub mouse: Option<MouseHandler>,
    pub resize: Option<ResizeHandler>,
}

pub struct Window {
    id: WindowId,
    area: Rect,
    content_area: Rect,
    buffer: Buffer,
    title: String,
    z: i64,
    state: WindowState,
    border: BorderConfig,
    flags: WindowFlags,
    handlers: Handlers,
    /// Area this window had before `Maximized` was entered, so `Normal` can restore it.
    pre_maximize_area: Option<Rect>,
}

impl Window {
    pub(crate) fn new(id: WindowId, area: Rect, title: impl Into<String>, z: i64, border: BorderConfig) -> Self {
        let content_area = content_area_for(area, &border);
        Self {
            id,
            area,
            content_area,
            buffer: Buffer::new(Rect::new(0, 0, content_area.width, content_area.height)),
            title: title.into(),
            z,
            state: WindowState::default(),
            border,
            flags: WindowFlags::default(),
            handlers: Handlers::default(),
            pre_maximize_area: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn content_area(&self) -> Rect {
        self.content_area
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn z(&self) -> i64 {
        self.z
    }

    pub(crate) fn set_z(&mut self, z: i64) {
        self.z = z;
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn border(&self) -> &BorderConfig {
        &self.border
    }

    pub fn set_border(&mut self, border: BorderConfig) {
        self.border = border;
        self.recompute_content_area();
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn flags_mut(&mut self) -> &mut WindowFlags {
        &mut self.flags
    }

    pub fn handlers_mut(&mut self) -> &mut Handlers {
        &mut self.handlers
    }

    /// Whether the manager should paint this window at all: `Hidden` and
    /// `Minimized` windows are skipped regardless of their `visible` flag.
    pub fn is_paintable(&self) -> bool {
        self.flags.visible && !matches!(self.state, WindowState::Hidden | WindowState::Minimized)
    }

    /// Resize the window's outer area. The content area and buffer are
    /// always recomputed from `area` and the border configuration - callers
    /// must never write to the buffer's area field directly, per the
    /// content-buffer invariant.
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
        self.recompute_content_area();
    }

    fn recompute_content_area(&mut self) {
        self.content_area = content_area_for(self.area, &self.border);
        self.buffer.resize(Rect::new(0, 0, self.content_area.width, self.content_area.height));
    }

    pub fn set_state(&mut self, state: WindowState, screen: Rect) {
        match (self.state, state) {
            (WindowState::Maximized, WindowState::Maximized) => {}
            (WindowState::Maximized, _) => {
                if let Some(prev) = self.pre_maximize_area.take() {
                    self.set_area(prev);
                }
            }
            (_, WindowState::Maximized) => {
                self.pre_maximize_area = Some(self.area);
                self.set_area(screen);
            }
            _ => {}
        }
        self.state = state;
    }

    /// Dispatch `event` into this window: the handler matching the event's
    /// own kind runs first, falling back to the general handler. Returns
    /// whether the event was consumed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        let specific_consumed = match event {
            Event::Key(key) => self.handlers.key.as_mut().map(|h| h(key)),
            Event::Mouse(mouse) => self.handlers.mouse.as_mut().map(|h| h(mouse)),
            Event::Resize(w, h) => {
                self.handlers.resize.as_mut().map(|handler| handler(Rect::new(0, 0, *w, *h)))
            }
            _ => None,
        };
        if let Some(consumed) = specific_consumed {
            return consumed;
        }
        match self.handlers.general.as_mut() {
            Some(h) => h(event),
            None => false,
        }
    }
}

fn content_area_for(area: Rect, border: &BorderConfig) -> Rect {
    let (left, top, right, bottom) = border.thickness();
    Rect::new(
        area.x.saturating_add(left),
        area.y.saturating_add(top),
        area.width.saturating_sub(left + right),
        area.height.saturating_sub(top + bottom),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::Borders;

    fn win(area: Rect, border: BorderConfig) -> Window {
        Window::new(WindowId::new(1), area, "test", 0, border)
    }

    #[test]
    fn content_area_shrinks_by_active_border_sides() {
        let w = win(Rect::new(0, 0, 10, 10), BorderConfig::default());
        assert_eq!(w.content_area(), Rect::new(1, 1, 8, 8));
    }

    #[test]
    fn no_border_content_area_equals_area() {
        let w = win(Rect::new(2, 2, 10, 10), BorderConfig::none());
        assert_eq!(w.content_area(), Rect::new(2, 2, 10, 10));
    }

    #[test]
    fn buffer_is_always_at_origin() {
        let w = win(Rect::new(5, 5, 10, 10), BorderConfig::default());
        assert_eq!(w.buffer().area(), Rect::new(0, 0, 8, 8));
    }

    #[test]
    fn resize_recomputes_content_area_and_buffer() {
        let mut w = win(Rect::new(0, 0, 10, 10), BorderConfig::default());
        w.set_area(Rect::new(0, 0, 20, 6));
        assert_eq!(w.content_area(), Rect::new(1, 1, 18, 4));
        assert_eq!(w.buffer().area(), Rect::new(0, 0, 18, 4));
    }

    #[test]
    fn maximize_then_restore_round_trips_area() {
        let original = Rect::new(3, 3, 10, 10);
        let mut w = win(original, BorderConfig::none());
        w.set_state(WindowState::Maximized, Rect::new(0, 0, 80, 24));
        assert_eq!(w.area(), Rect::new(0, 0, 80, 24));
        w.set_state(WindowState::Normal, Rect::new(0, 0, 80, 24));
        assert_eq!(w.area(), original);
    }

    #[test]
    fn hidden_and_minimized_are_not_paintable() {
        let mut w = win(Rect::new(0, 0, 4, 4), BorderConfig::none());
        assert!(w.is_paintable());
        w.set_state(WindowState::Hidden, Rect::ZERO);
        assert!(!w.is_paintable());
        w.set_state(WindowState::Minimized, Rect::ZERO);
        assert!(!w.is_paintable());
    }

    #[test]
    fn dispatch_prefers_specific_handler_over_general() {
        let mut w = win(Rect::new(0, 0, 4, 4), BorderConfig::none());
        w.handlers_mut().key = Some(Box::new(|_| true));
        w.handlers_mut().general = Some(Box::new(|_| false));
        let consumed = w.handle_event(&Event::Key(core_events::KeyEvent::plain(core_events::KeyCode::Enter)));
        assert!(consumed);
    }

    #[test]
    fn dispatch_falls_back_to_general_when_specific_unset() {
        let mut w = win(Rect::new(0, 0, 4, 4), BorderConfig::none());
        w.handlers_mut().general = Some(Box::new(|_| true));
        let consumed = w.handle_event(&Event::Key(core_events::KeyEvent::plain(core_events::KeyCode::Enter)));
        assert!(consumed);
    }

    #[test]
    fn borders_all_enables_every_side() {
        assert!(Borders::ALL.contains(Borders::TOP | Borders::BOTTOM | Borders::LEFT | Borders::RIGHT));
    }
}
