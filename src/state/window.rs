use super::behavior::Behavior;
use crate::input_handler::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Height of the chrome above a window's content area
pub const TITLEBAR_HEIGHT: i32 = 16;
/// Width of the close/maximize/minimize cluster at the right of the titlebar
pub const BUTTON_CLUSTER_WIDTH: i32 = 40;
/// Side of the square grab area centered on the bottom-right corner
pub const RESIZE_HANDLE: i32 = 8;
pub const TASKBAR_HEIGHT: i32 = 18;

// containment clamp
const VISIBLE_MARGIN_X: i32 = 5;
const VISIBLE_MARGIN_Y: i32 = 20;
const CLAMP_MIN_WIDTH: i32 = 50;
const CLAMP_MIN_HEIGHT: i32 = 25;

/// Icons available to dialog-style windows
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Icon {
    Error,
    Logo,
    NoSlots,
    EndSession,
}

/// Everything needed to open a window; the registry fills in the rest
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct WindowSpec {
    pub title: String,
    pub rect: Rect,
    pub min_width: i32,
    pub min_height: i32,
    pub resizable: bool,
    pub behavior: Behavior,
}

impl WindowSpec {
    pub fn new(title: impl Into<String>, behavior: Behavior) -> Self {
        Self {
            title: title.into(),
            rect: Rect::new(0, 0, 200, 100),
            min_width: 0,
            min_height: 0,
            resizable: false,
            behavior,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.rect.x = x;
        self.rect.y = y;
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.rect.width = width;
        self.rect.height = height;
        self
    }

    /// Makes the window resizable down to `min_width x min_height`
    pub fn resizable(mut self, min_width: i32, min_height: i32) -> Self {
        self.resizable = true;
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// A 200x100 window centered in the render area
    pub fn centered(self, render: (i32, i32)) -> Self {
        self.size(200, 100).at(render.0 / 2 - 100, render.1 / 2 - 50)
    }
}

/// One registry entry. A slot with `active == false` is free and every
/// other field is stale.
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct WindowSlot {
    pub id: Uuid,
    pub title: String,
    pub rect: Rect,
    pub min_width: i32,
    pub min_height: i32,
    pub active: bool,
    pub minimized: bool,
    pub maximized: bool,
    pub resizable: bool,
    /// Geometry captured when maximizing; only set while maximized
    pub saved_geometry: Option<Rect>,
    pub behavior: Behavior,
}

impl Default for WindowSlot {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            title: String::new(),
            rect: Rect::default(),
            min_width: 0,
            min_height: 0,
            active: false,
            minimized: false,
            maximized: false,
            resizable: false,
            saved_geometry: None,
            behavior: Behavior::default(),
        }
    }
}

impl WindowSlot {
    pub fn open(spec: WindowSpec, id: Uuid) -> Self {
        Self {
            id,
            title: spec.title,
            rect: spec.rect,
            min_width: spec.min_width,
            min_height: spec.min_height,
            active: true,
            minimized: false,
            maximized: false,
            resizable: spec.resizable,
            saved_geometry: None,
            behavior: spec.behavior,
        }
    }

    /// Active and not tucked away in the taskbar
    pub fn is_visible(&self) -> bool {
        self.active && !self.minimized
    }

    /// Drag area: the top strip minus the button cluster
    pub fn titlebar_rect(&self) -> Rect {
        Rect::new(
            self.rect.x,
            self.rect.y,
            self.rect.width - BUTTON_CLUSTER_WIDTH,
            TITLEBAR_HEIGHT,
        )
    }

    pub fn resize_handle_rect(&self) -> Rect {
        let half = RESIZE_HANDLE / 2;
        Rect::new(
            self.rect.x + self.rect.width - half,
            self.rect.y + self.rect.height - half,
            RESIZE_HANDLE,
            RESIZE_HANDLE,
        )
    }

    /// Flip between maximized and normal geometry. `work_area` is the render
    /// area minus the taskbar band.
    pub fn toggle_maximize(&mut self, work_area: Rect) {
        if self.maximized {
            self.maximized = false;
            if let Some(saved) = self.saved_geometry.take() {
                self.rect = saved;
            }
        } else {
            self.maximized = true;
            self.saved_geometry = Some(self.rect);
            self.rect = work_area;
        }
    }

    /// Leave maximized state because the titlebar was grabbed: the saved size
    /// comes back, centered under the pointer and pinned to the top edge.
    pub fn unmaximize_under(&mut self, pointer: Point) {
        if !self.maximized {
            return;
        }
        self.maximized = false;
        if let Some(saved) = self.saved_geometry.take() {
            self.rect.width = saved.width;
            self.rect.height = saved.height;
        }
        self.rect.x = pointer.x - self.rect.width / 2;
        self.rect.y = 0;
    }

    /// Resize so the bottom-right corner follows `pointer`, never below the
    /// window's minimum size
    pub fn resize_to(&mut self, pointer: Point) {
        if !self.resizable {
            return;
        }
        self.rect.width = (pointer.x - self.rect.x).max(self.min_width);
        self.rect.height = (pointer.y - self.rect.y).max(self.min_height);
    }

    /// Keep the window at least partially reachable on screen
    pub fn clamp_on_screen(&mut self, render_width: i32, render_height: i32) {
        self.rect.x = self.rect.x.min(render_width - VISIBLE_MARGIN_X);
        self.rect.y = self.rect.y.min(render_height - VISIBLE_MARGIN_Y);
        self.rect.width = self.rect.width.max(CLAMP_MIN_WIDTH);
        self.rect.height = self.rect.height.max(CLAMP_MIN_HEIGHT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(rect: Rect) -> WindowSlot {
        WindowSlot::open(
            WindowSpec::new("w", Behavior::Counter { value: 0 })
                .at(rect.x, rect.y)
                .size(rect.width, rect.height)
                .resizable(80, 60),
            Uuid::new_v4(),
        )
    }

    #[test]
    fn test_maximize_restore_round_trip() {
        let before = Rect::new(30, 40, 150, 90);
        let mut win = window(before);
        let work = Rect::new(0, 0, 512, 366);

        win.toggle_maximize(work);
        assert!(win.maximized);
        assert_eq!(win.rect, work);
        assert_eq!(win.saved_geometry, Some(before));

        win.toggle_maximize(work);
        assert!(!win.maximized);
        assert_eq!(win.rect, before);
        assert_eq!(win.saved_geometry, None);
    }

    #[test]
    fn test_unmaximize_centers_under_pointer() {
        let mut win = window(Rect::new(30, 40, 150, 90));
        win.toggle_maximize(Rect::new(0, 0, 512, 366));
        win.unmaximize_under(Point::new(300, 5));
        assert_eq!(win.rect, Rect::new(225, 0, 150, 90));
        assert!(!win.maximized);
    }

    #[test]
    fn test_resize_respects_minimum() {
        let mut win = window(Rect::new(100, 100, 200, 100));
        win.resize_to(Point::new(110, 120));
        assert_eq!((win.rect.width, win.rect.height), (80, 60));

        win.resize_to(Point::new(400, 300));
        assert_eq!((win.rect.width, win.rect.height), (300, 200));
    }

    #[test]
    fn test_resize_ignored_when_not_resizable() {
        let mut win = window(Rect::new(100, 100, 200, 100));
        win.resizable = false;
        win.resize_to(Point::new(400, 300));
        assert_eq!(win.rect, Rect::new(100, 100, 200, 100));
    }

    #[test]
    fn test_clamp_floors_height_itself() {
        let mut win = window(Rect::new(600, 500, 10, 10));
        win.clamp_on_screen(512, 384);
        assert_eq!(win.rect, Rect::new(507, 364, 50, 25));
    }

    #[test]
    fn test_hit_rects() {
        let win = window(Rect::new(100, 100, 200, 100));
        assert_eq!(win.titlebar_rect(), Rect::new(100, 100, 160, 16));
        assert_eq!(win.resize_handle_rect(), Rect::new(296, 196, 8, 8));
    }
}
