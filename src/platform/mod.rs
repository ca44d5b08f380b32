//! Platform abstraction layer
//!
//! Turns host events (keys, touches) into game commands. The DOM wiring
//! itself lives in the wasm entry point.

pub mod input;

pub use input::{Command, SwipeTracker, command_for_key, swipe_direction};
