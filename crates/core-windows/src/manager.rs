//! Owns the window collection, z-order, and focus/modal state, and routes
//! events and composites frames per the painter's algorithm.

use core_buffer::Buffer;
use core_events::Event;
use core_geometry::{Position, Rect};

use crate::border::BorderConfig;
use crate::window::{Window, WindowId};

#[derive(Default)]
pub struct WindowManager {
    windows: Vec<Window>,
    next_id: u64,
    focused: Option<WindowId>,
    modal: Option<WindowId>,
    max_z: i64,
}

impl WindowManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_window(&mut self, title: impl Into<String>, area: Rect, border: BorderConfig) -> WindowId {
        let id = WindowId::new(self.next_id);
        self.next_id += 1;
        self.max_z += 1;
        let window = Window::new(id, area, title, self.max_z, border);
        self.windows.push(window);
        id
    }

    pub fn remove_window(&mut self, id: WindowId) {
        self.windows.retain(|w| w.id() != id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        if self.modal == Some(id) {
            self.modal = None;
        }
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    pub fn modal(&self) -> Option<WindowId> {
        self.modal
    }

    pub fn set_modal(&mut self, id: Option<WindowId>) {
        self.modal = id;
    }

    /// Bring `id` to the front (`z = max(z) + 1`) and make it the sole
    /// focused window, clearing the focused flag everywhere else.
    pub fn focus(&mut self, id: WindowId) {
        if self.window(id).is_none() {
            return;
        }
        self.max_z += 1;
        let new_z = self.max_z;
        for w in &mut self.windows {
            let is_target = w.id() == id;
            w.flags_mut().focused = is_target;
            if is_target {
                w.set_z(new_z);
            }
        }
        self.focused = Some(id);
    }

    /// Windows in paint order: lowest z first, so later entries draw on top.
    fn paint_order(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.windows.len()).collect();
        indices.sort_by_key(|&i| self.windows[i].z());
        indices
    }

    /// Route `event` to the right window(s) per the manager's dispatch rules,
    /// returning whether any window consumed it. A modal window, if present,
    /// receives every event exclusively.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        if let Some(modal_id) = self.modal {
            return self.window_mut(modal_id).map(|w| w.handle_event(event)).unwrap_or(false);
        }

        match event {
            Event::Mouse(mouse) => self.dispatch_mouse(mouse.x, mouse.y, event),
            Event::Key(_) | Event::Paste(_) => self.dispatch_to_focused(event),
            _ => self.dispatch_to_focused(event),
        }
    }

    fn dispatch_mouse(&mut self, x: u16, y: u16, event: &Event) -> bool {
        let pos = Position::new(x, y);
        let target = self
            .paint_order()
            .into_iter()
            .rev()
            .find(|&i| self.windows[i].is_paintable() && self.windows[i].flags().accepts_events && self.windows[i].area().contains(pos));

        let Some(idx) = target else { return false };
        let id = self.windows[idx].id();

        let is_press = matches!(event, Event::Mouse(m) if matches!(m.kind, core_events::MouseEventKind::Press(_)));
        if is_press {
            self.focus(id);
        }

        self.window_mut(id).map(|w| w.handle_event(event)).unwrap_or(false)
    }

    fn dispatch_to_focused(&mut self, event: &Event) -> bool {
        match self.focused {
            Some(id) => self.window_mut(id).map(|w| w.handle_event(event)).unwrap_or(false),
            None => false,
        }
    }

    /// Composite every paintable window's content buffer into `target`,
    /// lowest z-index first, at each window's `content_area` origin.
    pub fn render_into(&self, target: &mut Buffer) {
        for idx in self.paint_order() {
            let window = &self.windows[idx];
            if !window.is_paintable() {
                continue;
            }
            let content_area = window.content_area();
            let src_rect = Rect::new(0, 0, content_area.width, content_area.height);
            target.merge(window.buffer(), src_rect, Position::new(content_area.x, content_area.y));
        }
    }
}
