// One frame: focus scan, interaction, chrome, clamp, behaviors, taskbar

use super::behavior::{self, BehaviorContext, Effect};
use super::window::{WindowSlot, WindowSpec};
use super::WindowManager;
use crate::input_handler::{spatial, CursorStyle, InputFrame, InteractionMode, Rect};
use crate::render::{ChromeButton, Color, DrawCommand, DrawList, TextureId, Ui};
use tracing::info;
use uuid::Uuid;

/// Everything the core produces for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub draws: DrawList,
    pub cursor: CursorStyle,
    /// False once the session has ended; the host stops scheduling frames
    pub running: bool,
}

impl WindowManager {
    /// Advance the desktop by one frame
    pub fn frame(&mut self, input: &InputFrame) -> FrameOutput {
        if input.close_requested {
            self.end_session("close requested");
        }

        if input.spawn_requested {
            let seed = Uuid::new_v4().as_u128();
            let _ = self.allocate(WindowSpec::demo(self.render_size(), seed));
        }

        // Pointer input over the overflow notice belongs to it alone
        let over_notice = self
            .overflow()
            .is_some_and(|w| w.is_visible() && w.rect.contains(input.pointer));
        let absorbed = input.pressed && over_notice;

        if input.pressed && !absorbed {
            if let Some(hit) = spatial::topmost_at(&self.slots[..self.capacity], input.pointer) {
                self.raise(hit);
            }
        }

        let cursor = {
            let machine_input = if absorbed {
                InputFrame {
                    pressed: false,
                    ..input.clone()
                }
            } else {
                input.clone()
            };
            let focused = self.capacity - 1;
            let target = self.slots.get_mut(focused).filter(|w| w.is_visible());
            self.interaction.update(target, &machine_input)
        };

        let theme = self.config.theme.clone();
        let mut draws = DrawList::new();
        draws.push(DrawCommand::Background {
            tiled: self.config.tiled_background,
        });

        let mut effects = Vec::new();
        {
            let mut ui = Ui {
                draws: &mut draws,
                theme: &theme,
                input,
                outline_text: self.config.debug_window_text,
            };
            self.draw_windows(&mut ui, &mut effects, over_notice);
            self.apply_effects(effects);
            self.draw_taskbar(&mut ui);

            if self.config.debug_move_resize {
                let mode = self.interaction.mode();
                let text = format!(
                    "Moving: {}  Resizing: {}",
                    (mode == InteractionMode::Moving) as u8,
                    (mode == InteractionMode::Resizing) as u8
                );
                ui.label(&text, Rect::new(0, 0, 200, 10), Color::rgb(255, 255, 255), false);
            }
        }

        FrameOutput {
            draws,
            cursor,
            running: self.running,
        }
    }

    /// Back-to-front pass over every visible slot, overflow slot last.
    /// While the pointer is over the overflow notice the focused window
    /// underneath is drawn inert.
    fn draw_windows(&mut self, ui: &mut Ui<'_>, effects: &mut Vec<Effect>, over_notice: bool) {
        let focused = self.capacity - 1;
        let render = self.render_size();
        let work_area = self.work_area();
        let mode = self.interaction.mode();

        let order: Vec<usize> = spatial::paint_order(&self.slots).collect();
        for i in order {
            let interactive = i >= focused && !(over_notice && i < self.capacity);
            let other_start_menu = self
                .slots
                .iter()
                .enumerate()
                .any(|(j, w)| j != i && w.active && w.behavior.is_start_menu());

            let win = &mut self.slots[i];
            let title = match (i == focused, mode) {
                (true, InteractionMode::Resizing) => {
                    format!("{} x {}", win.rect.width, win.rect.height)
                }
                (true, InteractionMode::Moving) => format!("{}, {}", win.rect.x, win.rect.y),
                _ => win.title.clone(),
            };
            draw_frame(ui, win, interactive, &title);

            if let Some(button) = chrome_buttons(ui, win, interactive) {
                apply_chrome(win, i, button, work_area);
            }

            win.clamp_on_screen(render.0, render.1);

            if !win.is_visible() {
                continue;
            }

            let mut cx = BehaviorContext {
                ui: &mut *ui,
                index: i,
                interactive,
                other_start_menu,
                render,
                effects: &mut *effects,
            };
            behavior::dispatch(win, &mut cx);
        }
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Spawn(spec) => {
                    let _ = self.allocate(spec);
                }
                Effect::EndSession => self.end_session("confirmed by user"),
            }
        }
    }
}

/// Shadow, body, titlebar and title text
fn draw_frame(ui: &mut Ui<'_>, win: &WindowSlot, interactive: bool, title: &str) {
    let theme = ui.theme;
    let r = win.rect;
    let (sx, sy) = theme.shadow_offset;

    ui.fill(r.offset(sx, sy), theme.shadow);
    ui.fill(r, theme.window_bg);
    ui.fill(
        Rect::new(r.x + 1, r.y + 1, r.width - 2, 14),
        if interactive {
            theme.title_bg
        } else {
            theme.title_unfocused
        },
    );
    ui.label(
        title,
        Rect::new(r.x + 2, r.y + 2, r.width - 4, 12),
        theme.title_text,
        true,
    );
}

/// Draw close, maximize/restore and minimize, right to left. Returns the
/// button released over this frame, if any. Positions are taken before
/// any action so one release never triggers two buttons.
fn chrome_buttons(ui: &mut Ui<'_>, win: &WindowSlot, interactive: bool) -> Option<ChromeButton> {
    let r = win.rect;
    let toggle = if win.maximized {
        ChromeButton::Restore
    } else {
        ChromeButton::Maximize
    };
    let layout = [
        (ChromeButton::Close, 14),
        (toggle, 27),
        (ChromeButton::Minimize, 40),
    ];

    let mut clicked = None;
    for (kind, from_right) in layout {
        let (x, y) = (r.x + r.width - from_right, r.y + 2);
        let probe = TextureId::WindowButton {
            kind,
            pressed: false,
        };
        let hovered = interactive && probe.rect_at(x, y).contains(ui.input.pointer);
        ui.texture(
            TextureId::WindowButton {
                kind,
                pressed: hovered && ui.input.down,
            },
            x,
            y,
        );
        if hovered && ui.input.released {
            clicked = Some(kind);
        }
    }
    clicked
}

fn apply_chrome(win: &mut WindowSlot, index: usize, button: ChromeButton, work_area: Rect) {
    match button {
        ChromeButton::Close => {
            info!("[WM] Closed '{}' in slot {}", win.title, index);
            win.active = false;
        }
        ChromeButton::Maximize | ChromeButton::Restore => {
            win.toggle_maximize(work_area);
            info!(
                "[WM] {} '{}'",
                if win.maximized { "Maximized" } else { "Restored" },
                win.title
            );
        }
        ChromeButton::Minimize => {
            info!("[WM] Minimized '{}'", win.title);
            win.minimized = true;
        }
    }
}
