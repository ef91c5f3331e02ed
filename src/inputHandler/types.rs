// Core data structures shared by hit-testing and the interaction machine

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A point in render-space units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Represents an axis-aligned rectangle in render-space units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open containment: the right and bottom edges are outside
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same size, moved by (dx, dy)
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// Mouse cursor affordance selected once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorStyle {
    #[default]
    Default,
    /// Dragging a window by its titlebar
    Move,
    /// Hovering or dragging the bottom-right resize corner
    ResizeNwse,
}

/// Everything the core reads from the outside world for one frame.
///
/// The adapter coalesces raw device events into level + edge state and maps
/// the pointer into render space before handing it over.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFrame {
    pub pointer: Point,
    /// Left button is held
    pub down: bool,
    /// Left button went down during this frame
    pub pressed: bool,
    /// Left button went up during this frame
    pub released: bool,
    /// The demo key was pressed
    pub spawn_requested: bool,
    /// The host asked the session to end (window close, Ctrl+C)
    pub close_requested: bool,
    /// Wall clock for the taskbar
    pub time: NaiveTime,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            pointer: Point::default(),
            down: false,
            pressed: false,
            released: false,
            spawn_requested: false,
            close_requested: false,
            time: NaiveTime::MIN,
        }
    }
}

impl InputFrame {
    /// Pointer resting at `(x, y)` with no button activity
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            pointer: Point::new(x, y),
            ..Self::default()
        }
    }

    /// Button press edge at `(x, y)`; the button stays held
    pub fn press(x: i32, y: i32) -> Self {
        Self {
            down: true,
            pressed: true,
            ..Self::at(x, y)
        }
    }

    /// Button held while the pointer sits at `(x, y)`
    pub fn drag(x: i32, y: i32) -> Self {
        Self {
            down: true,
            ..Self::at(x, y)
        }
    }

    /// Button release edge at `(x, y)`
    pub fn release(x: i32, y: i32) -> Self {
        Self {
            released: true,
            ..Self::at(x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_is_half_open() {
        let r = Rect::new(10, 10, 20, 5);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(29, 14)));
        assert!(!r.contains(Point::new(30, 10))); // right edge
        assert!(!r.contains(Point::new(10, 15))); // bottom edge
        assert!(!r.contains(Point::new(9, 12)));
    }

    #[test]
    fn test_input_constructors() {
        let f = InputFrame::press(3, 4);
        assert!(f.pressed && f.down && !f.released);
        assert_eq!(f.pointer, Point::new(3, 4));

        let f = InputFrame::release(3, 4);
        assert!(f.released && !f.down && !f.pressed);
    }
}
