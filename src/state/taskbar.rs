// Taskbar: start button, minimized-window strip and clock

use super::window::{WindowSpec, TASKBAR_HEIGHT};
use super::WindowManager;
use crate::input_handler::Rect;
use crate::render::{DrawCommand, TextAlign, TextureId, Ui};
use tracing::debug;

const STRIP_START_X: i32 = 50;
const STRIP_STEP: i32 = 97;
const CLOCK_MARGIN: i32 = 3;

impl WindowManager {
    /// Slots shown as buttons in the taskbar strip, left to right
    pub fn taskbar_entries(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, w)| w.active && w.minimized)
            .map(|(i, _)| i)
            .collect()
    }

    pub(super) fn draw_taskbar(&mut self, ui: &mut Ui<'_>) {
        let theme = ui.theme;
        let (rw, rh) = self.render_size();
        let pointer = ui.input.pointer;
        let button_y = rh - TASKBAR_HEIGHT + 1;

        ui.fill(
            Rect::new(0, rh - TASKBAR_HEIGHT, rw, TASKBAR_HEIGHT),
            theme.taskbar_bg,
        );

        let start = TextureId::StartButton { pressed: false }.rect_at(1, button_y);
        let start_hover = start.contains(pointer);
        ui.texture(
            TextureId::StartButton {
                pressed: start_hover && ui.input.down,
            },
            start.x,
            start.y,
        );

        let mut restore = None;
        let mut x = STRIP_START_X;
        for index in self.taskbar_entries() {
            let button = TextureId::LargeButton { pressed: false }.rect_at(x, button_y);
            let hovered = button.contains(pointer);
            ui.texture(
                TextureId::LargeButton {
                    pressed: hovered && ui.input.down,
                },
                x,
                button_y,
            );
            ui.label(
                &self.slots[index].title,
                Rect::new(x + 1, button_y + 1, button.width - 2, button.height - 2),
                theme.taskbar_text,
                false,
            );
            if hovered && ui.input.released {
                restore = Some(index);
            }
            x += STRIP_STEP;
        }

        let clock = ui.input.time.format("%H:%M:%S").to_string();
        ui.draws.push(DrawCommand::Text {
            rect: Rect::new(0, rh - 15, rw - CLOCK_MARGIN, 13),
            text: clock,
            color: theme.taskbar_text,
            bold: false,
            wrap: false,
            align: TextAlign::Right,
        });

        if let Some(index) = restore {
            debug!("[Taskbar] Restoring slot {}", index);
            self.slots[index].minimized = false;
            self.raise(index);
        }

        if start_hover && ui.input.released {
            let _ = self.allocate(WindowSpec::start_menu((rw, rh)));
        }
    }
}
