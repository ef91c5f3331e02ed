use self::window::{WindowSlot, WindowSpec, TASKBAR_HEIGHT};
use crate::config::Config;
use crate::error::AllocError;
use crate::input_handler::{Interaction, InteractionMode, Rect};
use serde_json::{json, Value};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub mod behavior;
pub mod frame;
pub mod taskbar;
pub mod window;

pub use frame::FrameOutput;

/// Owns the slot registry, the z-order, the interaction mode and the
/// session flag.
///
/// Slots `0..capacity` are the regular windows in back-to-front order, so
/// `capacity - 1` is always the focused slot. Slot `capacity` is reserved
/// for the overflow notice and is painted last.
pub struct WindowManager {
    slots: Vec<WindowSlot>,
    capacity: usize,
    interaction: Interaction,
    running: bool,
    config: Config,
}

impl WindowManager {
    pub fn new(config: Config) -> Self {
        let capacity = config.window_limit.max(1);
        Self {
            slots: vec![WindowSlot::default(); capacity + 1],
            capacity,
            interaction: Interaction::new(),
            running: true,
            config,
        }
    }

    /// Fresh session with the introductory message box open
    pub fn with_welcome_window(config: Config) -> Self {
        let mut manager = Self::new(config);
        // An empty registry always has room
        let _ = manager.allocate(WindowSpec::welcome());
        manager
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn focused_index(&self) -> usize {
        self.capacity - 1
    }

    pub fn overflow_index(&self) -> usize {
        self.capacity
    }

    pub fn slots(&self) -> &[WindowSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&WindowSlot> {
        self.slots.get(index)
    }

    pub fn slot_mut(&mut self, index: usize) -> Option<&mut WindowSlot> {
        self.slots.get_mut(index)
    }

    /// The focused window, when one is open
    pub fn focused(&self) -> Option<&WindowSlot> {
        self.slots.get(self.focused_index()).filter(|w| w.active)
    }

    /// The overflow notice, when it is showing
    pub fn overflow(&self) -> Option<&WindowSlot> {
        self.slots.get(self.overflow_index()).filter(|w| w.active)
    }

    pub fn active_count(&self) -> usize {
        self.slots[..self.capacity].iter().filter(|w| w.active).count()
    }

    pub fn mode(&self) -> InteractionMode {
        self.interaction.mode()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn render_size(&self) -> (i32, i32) {
        self.config.render_size()
    }

    /// Render area minus the taskbar band; the geometry of a maximized window
    pub fn work_area(&self) -> Rect {
        let (w, h) = self.render_size();
        Rect::new(0, 0, w, h - TASKBAR_HEIGHT)
    }

    /// Open a window in the lowest free slot and focus it. Returns the slot
    /// it ends up in.
    ///
    /// When every regular slot is taken the window is not created; the fixed
    /// out-of-slots notice is put in the overflow slot instead.
    pub fn allocate(&mut self, spec: WindowSpec) -> Result<usize, AllocError> {
        let free = self.slots[..self.capacity].iter().position(|w| !w.active);

        let Some(slot) = free else {
            warn!(
                "[WM] No free slot for '{}' ({} in use)",
                spec.title, self.capacity
            );
            let notice = WindowSpec::out_of_slots(self.render_size());
            self.slots[self.capacity] = WindowSlot::open(notice, Uuid::new_v4());
            return Err(AllocError::OutOfSlots);
        };

        let window = WindowSlot::open(spec, Uuid::new_v4());
        info!("[WM] Opened '{}' ({}) in slot {}", window.title, window.id, slot);
        self.slots[slot] = window;
        self.raise(slot);
        Ok(self.focused_index())
    }

    /// Move the window at `index` to the focused position. Everything that
    /// was above it shifts down by one; the order below is untouched.
    pub fn focus(&mut self, index: usize) {
        if index >= self.capacity {
            return;
        }
        self.slots[index..self.capacity].rotate_left(1);
        debug!("[WM] Focused slot {} -> {}", index, self.focused_index());
    }

    /// Focus change initiated by the user or by a new window. Any drag in
    /// progress belonged to the previous focused window, so it is dropped.
    fn raise(&mut self, index: usize) {
        self.focus(index);
        self.interaction.reset();
    }

    pub fn end_session(&mut self, reason: &str) {
        if self.running {
            info!("[WM] Ending session: {}", reason);
        }
        self.running = false;
    }

    /// JSON view of the registry for debugging
    pub fn snapshot(&self) -> Value {
        let slots: Vec<Value> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, w)| w.active)
            .map(|(i, w)| {
                json!({
                    "index": i,
                    "id": w.id,
                    "title": w.title,
                    "rect": w.rect,
                    "minimized": w.minimized,
                    "maximized": w.maximized,
                    "resizable": w.resizable,
                    "behavior": w.behavior,
                })
            })
            .collect();

        json!({
            "capacity": self.capacity,
            "mode": self.interaction.mode(),
            "running": self.running,
            "slots": slots,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::behavior::Behavior;
    use super::window::Icon;
    use super::*;

    fn manager(limit: usize) -> WindowManager {
        WindowManager::new(Config {
            window_limit: limit,
            ..Config::default()
        })
    }

    fn named(title: &str) -> WindowSpec {
        WindowSpec::message_box(title, "", Icon::Error)
    }

    fn titles(wm: &WindowManager) -> Vec<String> {
        wm.slots()[..wm.capacity()]
            .iter()
            .map(|w| if w.active { w.title.clone() } else { "-".into() })
            .collect()
    }

    #[test]
    fn test_fill_registry_then_overflow() {
        let mut wm = manager(8);
        for i in 0..8 {
            assert_eq!(wm.allocate(named(&format!("W{}", i))), Ok(7));
        }
        assert_eq!(titles(&wm), ["W0", "W1", "W2", "W3", "W4", "W5", "W6", "W7"]);
        assert_eq!(wm.focused().map(|w| w.title.as_str()), Some("W7"));
        assert!(wm.overflow().is_none());

        let before = wm.slots()[..8].to_vec();
        assert_eq!(wm.allocate(named("W8")), Err(AllocError::OutOfSlots));
        assert_eq!(&wm.slots()[..8], before.as_slice());

        let notice = wm.overflow().unwrap();
        assert_eq!(notice.title, "Error");
        assert!(matches!(
            notice.behavior,
            Behavior::MessageBox { icon: Icon::NoSlots, .. }
        ));
        assert_eq!(wm.active_count(), 8);
    }

    #[test]
    fn test_repeated_overflow_keeps_single_notice() {
        let mut wm = manager(2);
        wm.allocate(named("a")).unwrap();
        wm.allocate(named("b")).unwrap();
        assert!(wm.allocate(named("c")).is_err());
        assert!(wm.allocate(named("d")).is_err());
        assert_eq!(wm.slots().iter().filter(|w| w.active).count(), 3);
    }

    #[test]
    fn test_focus_rotates_to_end() {
        let mut wm = manager(5);
        for t in ["A", "B", "C", "D", "E"] {
            wm.allocate(named(t)).unwrap();
        }
        wm.focus(1);
        assert_eq!(titles(&wm), ["A", "C", "D", "E", "B"]);

        // focusing the focused slot changes nothing
        wm.focus(4);
        assert_eq!(titles(&wm), ["A", "C", "D", "E", "B"]);

        // the overflow slot is outside the focus protocol
        wm.focus(5);
        assert_eq!(titles(&wm), ["A", "C", "D", "E", "B"]);
    }

    #[test]
    fn test_freed_slot_is_reused() {
        let mut wm = manager(3);
        for t in ["A", "B", "C"] {
            wm.allocate(named(t)).unwrap();
        }
        wm.slot_mut(1).unwrap().active = false;
        assert_eq!(wm.allocate(named("D")), Ok(2));
        assert_eq!(titles(&wm), ["A", "C", "D"]);
    }

    #[test]
    fn test_welcome_session() {
        let wm = WindowManager::with_welcome_window(Config::default());
        let focused = wm.focused().unwrap();
        assert_eq!(focused.title, "Testing");
        assert_eq!(focused.rect, Rect::new(50, 80, 224, 100));
        assert!(focused.resizable);
        assert!(wm.is_running());
        assert_eq!(wm.mode(), InteractionMode::Idle);
    }

    #[test]
    fn test_snapshot_lists_active_slots() {
        let mut wm = manager(4);
        wm.allocate(WindowSpec::counter(wm.render_size())).unwrap();
        let snap = wm.snapshot();
        assert_eq!(snap["capacity"], 4);
        assert_eq!(snap["mode"], "Idle");
        let slots = snap["slots"].as_array().unwrap();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0]["index"], 3);
        assert_eq!(slots[0]["behavior"]["kind"], "Counter");
        assert_eq!(slots[0]["behavior"]["value"], 0);
    }
}
