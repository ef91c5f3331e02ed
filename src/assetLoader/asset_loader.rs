use crate::config::Theme;
use crate::render::{ChromeButton, Color, TextureId};
use crate::state::window::Icon;
use std::collections::HashMap;
use tracing::info;

/// Terminal stand-in for a bitmap: a fill with a centered glyph string
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub glyph: &'static str,
    pub fg: Color,
    pub bg: Color,
}

/// Sprites for every `TextureId`, keyed by id
pub struct Atlas {
    sprites: HashMap<TextureId, Sprite>,
    fallback: Sprite,
}

const BUTTON_FACE: Color = Color::rgb(224, 216, 216);
const BUTTON_PRESSED: Color = Color::rgb(144, 128, 128);
const BUTTON_INK: Color = Color::rgb(0, 0, 0);

impl Atlas {
    /// Build all sprites from the theme
    pub fn load(theme: &Theme) -> Self {
        let sprites: HashMap<TextureId, Sprite> = TextureId::all()
            .into_iter()
            .map(|id| (id, build_sprite(id, theme)))
            .collect();
        info!("[Assets] Built {} sprites", sprites.len());

        Self {
            sprites,
            fallback: Sprite {
                glyph: "?",
                fg: BUTTON_INK,
                bg: Color::rgb(255, 0, 255),
            },
        }
    }

    pub fn get(&self, id: TextureId) -> &Sprite {
        self.sprites.get(&id).unwrap_or(&self.fallback)
    }
}

/// Pressed buttons swap to the sunken face
fn face(pressed: bool) -> Color {
    if pressed {
        BUTTON_PRESSED
    } else {
        BUTTON_FACE
    }
}

fn build_sprite(id: TextureId, theme: &Theme) -> Sprite {
    match id {
        TextureId::WindowButton { kind, pressed } => Sprite {
            glyph: match kind {
                ChromeButton::Minimize => "_",
                ChromeButton::Maximize => "□",
                ChromeButton::Restore => "❐",
                ChromeButton::Close => "x",
            },
            fg: BUTTON_INK,
            bg: face(pressed),
        },
        TextureId::SmallButton { pressed } | TextureId::LargeButton { pressed } => Sprite {
            glyph: "",
            fg: theme.window_text,
            bg: face(pressed),
        },
        TextureId::StartButton { pressed } => Sprite {
            glyph: "Start",
            fg: theme.taskbar_text,
            bg: face(pressed),
        },
        TextureId::Icon(icon) => {
            let (glyph, fg) = match icon {
                Icon::Error => ("(!)", Color::rgb(200, 0, 0)),
                Icon::Logo => ("<o>", theme.title_bg),
                Icon::NoSlots => ("[#]", Color::rgb(200, 0, 0)),
                Icon::EndSession => ("(?)", theme.title_bg),
            };
            Sprite {
                glyph,
                fg,
                bg: theme.window_bg,
            }
        }
    }
}
