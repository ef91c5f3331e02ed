// Hit-testing over the z-ordered slot array

use super::types::Point;
use crate::state::window::WindowSlot;

/// Front-to-back scan over `slots`: index of the topmost visible window
/// containing `pointer`. The last element is the frontmost.
pub fn topmost_at(slots: &[WindowSlot], pointer: Point) -> Option<usize> {
    slots
        .iter()
        .enumerate()
        .rev()
        .find(|(_, win)| win.is_visible() && win.rect.contains(pointer))
        .map(|(i, _)| i)
}

/// Back-to-front paint order: indices of every visible window
pub fn paint_order(slots: &[WindowSlot]) -> impl Iterator<Item = usize> + '_ {
    slots
        .iter()
        .enumerate()
        .filter(|(_, win)| win.is_visible())
        .map(|(i, _)| i)
}
