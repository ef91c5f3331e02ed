// Window-local drawing helpers shared by all behaviors

use super::{Color, DrawCommand, DrawList, TextAlign, TextureId};
use crate::config::Theme;
use crate::input_handler::{InputFrame, Rect};
use crate::state::window::TITLEBAR_HEIGHT;

/// Left inset of the content area
const CONTENT_INSET: i32 = 2;

/// Rectangle available to content drawn at `(dx, dy)` inside `window`
pub fn content_rect(window: Rect, dx: i32, dy: i32) -> Rect {
    Rect::new(
        window.x + CONTENT_INSET + dx,
        window.y + TITLEBAR_HEIGHT + dy,
        window.width - CONTENT_INSET - dx,
        window.height - TITLEBAR_HEIGHT - dy,
    )
}

/// Draw context for one frame
pub struct Ui<'a> {
    pub draws: &'a mut DrawList,
    pub theme: &'a Theme,
    pub input: &'a InputFrame,
    pub outline_text: bool,
}

impl<'a> Ui<'a> {
    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.draws.push(DrawCommand::FillRect { rect, color });
    }

    pub fn texture(&mut self, id: TextureId, x: i32, y: i32) {
        self.draws.push(DrawCommand::Texture { id, x, y });
    }

    /// Unwrapped text at the top-left of `rect`
    pub fn label(&mut self, text: &str, rect: Rect, color: Color, bold: bool) {
        self.draws.push(DrawCommand::Text {
            rect,
            text: text.to_string(),
            color,
            bold,
            wrap: false,
            align: TextAlign::Left,
        });
    }

    /// Word-wrapped text in the window's content area
    pub fn win_text(&mut self, window: Rect, text: &str, dx: i32, dy: i32) {
        let rect = content_rect(window, dx, dy);
        self.draws.push(DrawCommand::Text {
            rect,
            text: text.to_string(),
            color: self.theme.window_text,
            bold: false,
            wrap: true,
            align: TextAlign::Left,
        });
        if self.outline_text {
            self.draws.push(DrawCommand::OutlineRect {
                rect,
                color: Color::rgb(0, 0, 0),
            });
        }
    }

    pub fn win_texture(&mut self, window: Rect, id: TextureId, dx: i32, dy: i32) {
        let at = content_rect(window, dx, dy);
        self.texture(id, at.x, at.y);
    }

    /// Push button inside a window's content area. Returns true on the frame
    /// the button is released while hovered. Buttons of windows that are not
    /// `interactive` never react to the pointer.
    pub fn win_button(
        &mut self,
        window: Rect,
        interactive: bool,
        text: &str,
        dx: i32,
        dy: i32,
        large: bool,
    ) -> bool {
        let at = content_rect(window, dx, dy);
        let probe = if large {
            TextureId::LargeButton { pressed: false }
        } else {
            TextureId::SmallButton { pressed: false }
        };
        let hovered = interactive && probe.rect_at(at.x, at.y).contains(self.input.pointer);
        let pressed = hovered && self.input.down;
        let id = if large {
            TextureId::LargeButton { pressed }
        } else {
            TextureId::SmallButton { pressed }
        };

        self.win_texture(window, id, dx, dy);
        self.win_text(window, text, dx + 2, dy + 2);

        hovered && self.input.released
    }
}
