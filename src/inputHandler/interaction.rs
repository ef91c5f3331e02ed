// Move/resize state machine for the focused window

use super::types::{CursorStyle, InputFrame, Point};
use crate::state::window::WindowSlot;
use serde::{Deserialize, Serialize};

/// Global pointer interaction mode. Only ever applies to the focused slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Moving,
    Resizing,
}

#[derive(Debug, Clone, Default)]
pub struct Interaction {
    mode: InteractionMode,
    /// Pointer offset from the window origin captured when a move starts
    hook: Point,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn reset(&mut self) {
        self.mode = InteractionMode::Idle;
    }

    fn grab(&mut self, win: &WindowSlot, pointer: Point) {
        self.hook = Point::new(pointer.x - win.rect.x, pointer.y - win.rect.y);
    }

    /// Advance the machine by one frame against the focused window and
    /// return the cursor it asks for.
    ///
    /// Passing `None` (no visible focused window) drops back to idle.
    pub fn update(&mut self, win: Option<&mut WindowSlot>, input: &InputFrame) -> CursorStyle {
        let mut cursor = CursorStyle::Default;

        if input.released {
            self.mode = InteractionMode::Idle;
        }

        let Some(win) = win else {
            self.mode = InteractionMode::Idle;
            return cursor;
        };
        let pointer = input.pointer;

        // press and release in the same frame is a click, not a drag
        let grabbing = input.pressed && !input.released;

        if grabbing && win.titlebar_rect().contains(pointer) {
            self.mode = InteractionMode::Moving;
            self.grab(win, pointer);
        }

        if self.mode == InteractionMode::Moving {
            if win.maximized {
                win.unmaximize_under(pointer);
                self.grab(win, pointer);
            }
            cursor = CursorStyle::Move;
            win.rect.x = pointer.x - self.hook.x;
            win.rect.y = pointer.y - self.hook.y;
        }

        if win.resizable && win.resize_handle_rect().contains(pointer) {
            cursor = CursorStyle::ResizeNwse;
            if grabbing {
                self.mode = InteractionMode::Resizing;
            }
        }

        if self.mode == InteractionMode::Resizing {
            cursor = CursorStyle::ResizeNwse;
            win.resize_to(pointer);
        }

        cursor
    }
}
