// Input handling system
//
// Keyboard and mouse input for the local player.
//
// ## Architecture
//
// - `action`: Game actions, default key bindings and the per-tick `Controls` snapshot
// - `manager`: Turns winit events into held state and discrete presses
//
// ## Usage Example
//
// ```rust
// use engine::input::InputManager;
//
// let mut input = InputManager::new(window.inner_size(), logical_size);
//
// // Discrete presses are dispatched as soon as they arrive
// if let Some(action) = input.process_keyboard_event(&key_event) {
//     game.on_key_down(action);
// }
//
// // Held keys are sampled once per tick
// game.update(dt, &input.controls());
// ```

pub mod action;
pub mod manager;

// Re-export commonly used types
pub use action::{Action, Controls};
pub use manager::InputManager;
