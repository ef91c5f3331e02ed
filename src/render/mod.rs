// Draw primitives emitted by the core and consumed by a presentation backend

pub mod ui;

use crate::input_handler::Rect;
use crate::state::window::Icon;
use serde::{Deserialize, Serialize};

pub use ui::Ui;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Composite this color over `below` using its alpha
    pub fn over(self, below: Color) -> Color {
        let a = self.a as u16;
        let mix = |top: u8, bottom: u8| ((top as u16 * a + bottom as u16 * (255 - a)) / 255) as u8;
        Color::rgb(mix(self.r, below.r), mix(self.g, below.g), mix(self.b, below.b))
    }
}

/// The three titlebar controls, right to left: close, maximize/restore, minimize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChromeButton {
    Minimize,
    Maximize,
    Restore,
    Close,
}

/// Every bitmap the core can blit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureId {
    WindowButton { kind: ChromeButton, pressed: bool },
    SmallButton { pressed: bool },
    LargeButton { pressed: bool },
    StartButton { pressed: bool },
    Icon(Icon),
}

impl TextureId {
    /// Size in render units
    pub fn size(&self) -> (i32, i32) {
        match self {
            TextureId::WindowButton { .. } => (12, 12),
            TextureId::SmallButton { .. } => (48, 16),
            TextureId::LargeButton { .. } => (96, 16),
            TextureId::StartButton { .. } => (48, 16),
            TextureId::Icon(_) => (32, 32),
        }
    }

    /// Every texture the core can reference
    pub fn all() -> Vec<TextureId> {
        let mut ids = Vec::new();
        for pressed in [false, true] {
            for kind in [
                ChromeButton::Minimize,
                ChromeButton::Maximize,
                ChromeButton::Restore,
                ChromeButton::Close,
            ] {
                ids.push(TextureId::WindowButton { kind, pressed });
            }
            ids.push(TextureId::SmallButton { pressed });
            ids.push(TextureId::LargeButton { pressed });
            ids.push(TextureId::StartButton { pressed });
        }
        for icon in [Icon::Error, Icon::Logo, Icon::NoSlots, Icon::EndSession] {
            ids.push(TextureId::Icon(icon));
        }
        ids
    }

    pub fn rect_at(&self, x: i32, y: i32) -> Rect {
        let (w, h) = self.size();
        Rect::new(x, y, w, h)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
}

/// One draw primitive. Coordinates are in render space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    /// Desktop wallpaper over the whole render area
    Background { tiled: bool },
    FillRect { rect: Rect, color: Color },
    OutlineRect { rect: Rect, color: Color },
    /// Text laid out inside `rect`, word-wrapped when `wrap` is set
    Text {
        rect: Rect,
        text: String,
        color: Color,
        bold: bool,
        wrap: bool,
        align: TextAlign,
    },
    Texture { id: TextureId, x: i32, y: i32 },
}

/// Back-to-front sequence of primitives for one frame
pub type DrawList = Vec<DrawCommand>;
