// Per-window controllers, run once per frame after the chrome is drawn

use super::window::{Icon, WindowSlot, WindowSpec, TASKBAR_HEIGHT};
use crate::render::{TextureId, Ui};
use serde::Serialize;
use tracing::{debug, info};

pub const OUT_OF_SLOTS_MESSAGE: &str =
    "Out of window slots! Close some windows before trying again.";
pub const END_SESSION_PROMPT: &str = "Are you sure you want to end your session?";
pub const WELCOME_MESSAGE: &str = "Example message box window\nPress A to create new windows";

/// What a window does with its content area. Variant payloads hold the
/// window's private state.
#[derive(Clone, Serialize, Debug, PartialEq)]
#[serde(tag = "kind")]
pub enum Behavior {
    /// Icon, message and an OK button that closes the window
    MessageBox { message: String, icon: Icon },
    /// "Yes" ends the session, "No" closes the window
    EndSessionConfirm,
    /// Integer with Increase/Decrease buttons
    Counter { value: i32 },
    /// Launcher pinned to the left edge; at most one survives a frame
    StartMenu,
}

impl Default for Behavior {
    fn default() -> Self {
        Behavior::MessageBox {
            message: String::new(),
            icon: Icon::Error,
        }
    }
}

impl Behavior {
    pub fn is_start_menu(&self) -> bool {
        matches!(self, Behavior::StartMenu)
    }
}

/// Side effects a behavior may request. Applied by the manager after the
/// draw pass so the slot array never shifts mid-iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Spawn(WindowSpec),
    EndSession,
}

pub struct BehaviorContext<'a, 'u> {
    pub ui: &'a mut Ui<'u>,
    pub index: usize,
    /// Focused slot or the overflow slot
    pub interactive: bool,
    /// Another active window in the registry is also a start menu
    pub other_start_menu: bool,
    pub render: (i32, i32),
    pub effects: &'a mut Vec<Effect>,
}

impl WindowSpec {
    pub fn message_box(title: impl Into<String>, message: impl Into<String>, icon: Icon) -> Self {
        WindowSpec::new(
            title,
            Behavior::MessageBox {
                message: message.into(),
                icon,
            },
        )
    }

    /// Fixed notice shown in the overflow slot when the registry is full
    pub fn out_of_slots(render: (i32, i32)) -> Self {
        WindowSpec::message_box("Error", OUT_OF_SLOTS_MESSAGE, Icon::NoSlots).centered(render)
    }

    /// First window of a session
    pub fn welcome() -> Self {
        WindowSpec::message_box("Testing", WELCOME_MESSAGE, Icon::Logo)
            .at(50, 80)
            .size(224, 100)
            .resizable(224, 100)
    }

    /// Window opened by the demo key. `seed` picks the position.
    pub fn demo(render: (i32, i32), seed: u128) -> Self {
        let span_x = (render.0 - 200).max(0) as u128 + 1;
        let span_y = (render.1 - 100).max(0) as u128 + 1;
        let x = (seed % span_x) as i32;
        let y = ((seed >> 64) % span_y) as i32;
        WindowSpec::message_box("New window", "hello world", Icon::Error)
            .at(x, y)
            .size(200, 100)
            .resizable(125, 100)
    }

    pub fn start_menu(render: (i32, i32)) -> Self {
        WindowSpec::new("Start menu", Behavior::StartMenu)
            .at(0, render.1 / 2)
            .size(100, render.1 / 2 - TASKBAR_HEIGHT)
    }

    pub fn end_session(render: (i32, i32)) -> Self {
        WindowSpec::new("End session", Behavior::EndSessionConfirm).centered(render)
    }

    pub fn counter(render: (i32, i32)) -> Self {
        WindowSpec::new("Counter", Behavior::Counter { value: 0 }).centered(render)
    }
}

pub fn dispatch(win: &mut WindowSlot, cx: &mut BehaviorContext<'_, '_>) {
    match win.behavior {
        Behavior::MessageBox { .. } => message_box(win, cx),
        Behavior::EndSessionConfirm => end_session(win, cx),
        Behavior::Counter { .. } => counter(win, cx),
        Behavior::StartMenu => start_menu(win, cx),
    }
}

fn message_box(win: &mut WindowSlot, cx: &mut BehaviorContext<'_, '_>) {
    let rect = win.rect;
    if let Behavior::MessageBox { message, icon } = &win.behavior {
        cx.ui.win_texture(rect, TextureId::Icon(*icon), 8, 8);
        cx.ui.win_text(rect, message, 48, 8);
    }

    if cx.ui.win_button(rect, cx.interactive, "OK", 48, 64, false) {
        win.active = false;
    }
}

fn end_session(win: &mut WindowSlot, cx: &mut BehaviorContext<'_, '_>) {
    let rect = win.rect;
    cx.ui.win_texture(rect, TextureId::Icon(Icon::EndSession), 8, 8);
    cx.ui.win_text(rect, END_SESSION_PROMPT, 48, 8);

    if cx.ui.win_button(rect, cx.interactive, "Yes", 48, 64, false) {
        cx.effects.push(Effect::EndSession);
    }
    if cx.ui.win_button(rect, cx.interactive, "No", 100, 64, false) {
        win.active = false;
    }
}

fn counter(win: &mut WindowSlot, cx: &mut BehaviorContext<'_, '_>) {
    let rect = win.rect;
    let Behavior::Counter { value } = &mut win.behavior else {
        return;
    };

    cx.ui.win_text(rect, &value.to_string(), 0, 0);

    if cx.ui.win_button(rect, cx.interactive, "Increase", 0, 20, true) {
        *value += 1;
    }
    if cx.ui.win_button(rect, cx.interactive, "Decrease", 0, 36, true) {
        *value -= 1;
    }
}

fn start_menu(win: &mut WindowSlot, cx: &mut BehaviorContext<'_, '_>) {
    if !cx.interactive {
        debug!("[StartMenu] Slot {} lost focus, closing", cx.index);
        win.active = false;
        return;
    }
    if cx.other_start_menu {
        debug!("[StartMenu] Slot {} is a duplicate, closing", cx.index);
        win.active = false;
        return;
    }

    // pinned regardless of move/resize
    win.rect.x = 0;
    win.rect.y = cx.render.1 / 2;

    let rect = win.rect;
    if cx.ui.win_button(rect, cx.interactive, "End session", 0, 0, true) {
        win.active = false;
        cx.effects.push(Effect::Spawn(WindowSpec::end_session(cx.render)));
    }
    if cx.ui.win_button(rect, cx.interactive, "Counter demo", 0, 16, true) {
        info!("[StartMenu] Launching counter demo");
        win.active = false;
        cx.effects.push(Effect::Spawn(WindowSpec::counter(cx.render)));
    }
}
