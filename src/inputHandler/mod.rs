// Input handler module for pointer-driven window interaction
// Handles hit-testing, click-to-focus order, and the move/resize state machine

pub mod types;
pub mod interaction;
pub mod spatial;

pub use interaction::{Interaction, InteractionMode};
pub use types::*;
