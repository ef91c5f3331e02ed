// Coalesces crossterm events between ticks into one InputFrame

use super::canvas::Viewport;
use crate::input_handler::{InputFrame, Point};
use chrono::NaiveTime;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

#[derive(Debug, Default)]
pub struct InputCollector {
    pointer: Point,
    down: bool,
    pressed: bool,
    released: bool,
    spawn: bool,
    close: bool,
    dump: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &Event, viewport: &Viewport) {
        match event {
            Event::Mouse(mouse) => self.handle_mouse(mouse, viewport),
            Event::Key(key) => self.handle_key(key),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, viewport: &Viewport) {
        self.pointer = viewport.to_render(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.down = true;
                self.pressed = true;
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.down = false;
                self.released = true;
            }
            MouseEventKind::Drag(MouseButton::Left) => self.down = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.close = true,
            KeyCode::Char('a') | KeyCode::Char('A') => self.spawn = true,
            KeyCode::Esc => self.close = true,
            KeyCode::F(12) => self.dump = true,
            _ => {}
        }
    }

    /// Whether a snapshot dump was asked for since the last call
    pub fn take_dump(&mut self) -> bool {
        std::mem::take(&mut self.dump)
    }

    /// Frame for this tick. Edges and one-shot requests are cleared, the
    /// pointer and button level carry over.
    pub fn take_frame(&mut self, time: NaiveTime) -> InputFrame {
        InputFrame {
            pointer: self.pointer,
            down: self.down,
            pressed: std::mem::take(&mut self.pressed),
            released: std::mem::take(&mut self.released),
            spawn_requested: std::mem::take(&mut self.spawn),
            close_requested: std::mem::take(&mut self.close),
            time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect as CellRect;

    fn viewport() -> Viewport {
        Viewport::new((512, 384), CellRect::new(0, 0, 64, 48))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_click_within_one_tick_keeps_both_edges() {
        let vp = viewport();
        let mut input = InputCollector::new();
        input.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 10, 3), &vp);
        input.handle(&mouse(MouseEventKind::Up(MouseButton::Left), 10, 3), &vp);

        let frame = input.take_frame(NaiveTime::MIN);
        assert!(frame.pressed && frame.released);
        assert!(!frame.down);
        assert_eq!(frame.pointer, Point::new(84, 28));

        let next = input.take_frame(NaiveTime::MIN);
        assert!(!next.pressed && !next.released);
        assert_eq!(next.pointer, Point::new(84, 28));
    }

    #[test]
    fn test_drag_holds_button_level() {
        let vp = viewport();
        let mut input = InputCollector::new();
        input.handle(&mouse(MouseEventKind::Down(MouseButton::Left), 0, 0), &vp);
        input.take_frame(NaiveTime::MIN);
        input.handle(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 5), &vp);

        let frame = input.take_frame(NaiveTime::MIN);
        assert!(frame.down);
        assert!(!frame.pressed);
        assert_eq!(frame.pointer, Point::new(44, 44));
    }

    #[test]
    fn test_right_button_is_ignored() {
        let vp = viewport();
        let mut input = InputCollector::new();
        input.handle(&mouse(MouseEventKind::Down(MouseButton::Right), 1, 1), &vp);
        let frame = input.take_frame(NaiveTime::MIN);
        assert!(!frame.down && !frame.pressed);
    }

    #[test]
    fn test_key_bindings() {
        let vp = viewport();
        let mut input = InputCollector::new();
        input.handle(&key(KeyCode::Char('A'), KeyModifiers::SHIFT), &vp);
        input.handle(&key(KeyCode::F(12), KeyModifiers::NONE), &vp);
        assert!(input.take_dump());
        assert!(!input.take_dump());
        let frame = input.take_frame(NaiveTime::MIN);
        assert!(frame.spawn_requested);
        assert!(!frame.close_requested);

        input.handle(&key(KeyCode::Char('q'), KeyModifiers::CONTROL), &vp);
        assert!(input.take_frame(NaiveTime::MIN).close_requested);
        input.handle(&key(KeyCode::Esc, KeyModifiers::NONE), &vp);
        assert!(input.take_frame(NaiveTime::MIN).close_requested);
    }

    #[test]
    fn test_ctrl_a_still_spawns() {
        let vp = viewport();
        let mut input = InputCollector::new();
        input.handle(&key(KeyCode::Char('c'), KeyModifiers::NONE), &vp);
        input.handle(&key(KeyCode::Char('a'), KeyModifiers::CONTROL), &vp);
        let frame = input.take_frame(NaiveTime::MIN);
        assert!(frame.spawn_requested);
        assert!(!frame.close_requested);
    }
}
