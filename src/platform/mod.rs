//! Platform abstraction layer
//!
//! Turns host events into simulation inputs:
//! - Keyboard state into per-tick intents
//! - Host timestamps into clamped frame deltas

pub mod input;
pub mod time;

pub use input::{Key, VirtualKeyboard};
pub use time::{FrameClock, MAX_FRAME_DT};
