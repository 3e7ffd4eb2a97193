// Input manager - turns winit events into held controls and discrete presses

use super::action::{default_bindings, Action, Controls};
use glam::Vec2;
use std::collections::{HashMap, HashSet};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Tracks keyboard and mouse state for the single local player
pub struct InputManager {
    /// Key to action mapping
    bindings: HashMap<KeyCode, Action>,

    /// Bound keys currently held down
    pressed: HashSet<KeyCode>,

    /// Last cursor position in window pixels
    cursor: Vec2,

    /// Window size in pixels
    window_size: Vec2,

    /// Logical size the game draws into
    logical_size: Vec2,
}

impl InputManager {
    /// Create a new input manager for a window of the given size
    pub fn new(window_size: PhysicalSize<u32>, logical_size: Vec2) -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            pressed: HashSet::new(),
            cursor: Vec2::ZERO,
            window_size: Vec2::new(window_size.width as f32, window_size.height as f32),
            logical_size,
        }
    }

    /// Process a keyboard event from winit.
    /// Returns the action for a fresh (non-repeat) press.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> Option<Action> {
        // Only process physical key presses
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return None;
        };
        self.process_key(key_code, event.state, event.repeat)
    }

    /// Record a key transition
    pub fn process_key(
        &mut self,
        key_code: KeyCode,
        state: ElementState,
        repeat: bool,
    ) -> Option<Action> {
        let action = *self.bindings.get(&key_code)?;
        match state {
            ElementState::Pressed => {
                let fresh = self.pressed.insert(key_code);
                (fresh && !repeat).then_some(action)
            }
            ElementState::Released => {
                self.pressed.remove(&key_code);
                None
            }
        }
    }

    /// Track the cursor position
    pub fn process_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Vec2::new(position.x as f32, position.y as f32);
    }

    /// Process a mouse button event.
    /// Returns the click position in game coordinates for a left press.
    pub fn process_mouse_button(&mut self, state: ElementState, button: MouseButton) -> Option<Vec2> {
        (state == ElementState::Pressed && button == MouseButton::Left)
            .then(|| self.cursor_position())
    }

    /// Cursor position mapped from window pixels into game coordinates
    pub fn cursor_position(&self) -> Vec2 {
        if self.window_size.x <= 0.0 || self.window_size.y <= 0.0 {
            return self.cursor;
        }
        self.cursor * self.logical_size / self.window_size
    }

    /// Keep the window size in sync for cursor mapping
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.window_size = Vec2::new(new_size.width as f32, new_size.height as f32);
    }

    /// Check if any key bound to an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed
            .iter()
            .any(|key| self.bindings.get(key) == Some(&action))
    }

    /// Sample the held movement keys
    pub fn controls(&self) -> Controls {
        Controls {
            up: self.is_pressed(Action::MoveUp),
            down: self.is_pressed(Action::MoveDown),
            left: self.is_pressed(Action::MoveLeft),
            right: self.is_pressed(Action::MoveRight),
            sprint: self.is_pressed(Action::Sprint),
        }
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> InputManager {
        InputManager::new(PhysicalSize::new(800, 600), Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_press_returns_action_once() {
        let mut input = manager();
        assert_eq!(
            input.process_key(KeyCode::Space, ElementState::Pressed, false),
            Some(Action::Confirm)
        );
        // Still held: a second press event is not fresh
        assert_eq!(
            input.process_key(KeyCode::Space, ElementState::Pressed, false),
            None
        );
    }

    #[test]
    fn test_repeat_is_ignored() {
        let mut input = manager();
        assert_eq!(
            input.process_key(KeyCode::Space, ElementState::Pressed, true),
            None
        );
    }

    #[test]
    fn test_unbound_key() {
        let mut input = manager();
        assert_eq!(
            input.process_key(KeyCode::KeyZ, ElementState::Pressed, false),
            None
        );
    }

    #[test]
    fn test_controls_follow_held_keys() {
        let mut input = manager();
        input.process_key(KeyCode::ArrowLeft, ElementState::Pressed, false);
        input.process_key(KeyCode::ShiftLeft, ElementState::Pressed, false);

        let controls = input.controls();
        assert!(controls.left);
        assert!(controls.sprint);
        assert!(!controls.right);

        input.process_key(KeyCode::ArrowLeft, ElementState::Released, false);
        assert!(!input.controls().left);
    }

    #[test]
    fn test_alternate_keys_share_action() {
        let mut input = manager();
        input.process_key(KeyCode::KeyW, ElementState::Pressed, false);
        assert!(input.controls().up);
        input.process_key(KeyCode::KeyW, ElementState::Released, false);
        assert!(!input.controls().up);
    }

    #[test]
    fn test_releasing_one_of_two_keys_keeps_action_held() {
        let mut input = manager();
        input.process_key(KeyCode::KeyW, ElementState::Pressed, false);
        input.process_key(KeyCode::ArrowUp, ElementState::Pressed, false);
        input.process_key(KeyCode::ArrowUp, ElementState::Released, false);
        assert!(input.is_pressed(Action::MoveUp));
    }

    #[test]
    fn test_left_click_reports_position() {
        let mut input = manager();
        input.process_cursor_moved(PhysicalPosition::new(400.0, 207.0));
        assert_eq!(
            input.process_mouse_button(ElementState::Pressed, MouseButton::Left),
            Some(Vec2::new(400.0, 207.0))
        );
        assert_eq!(
            input.process_mouse_button(ElementState::Released, MouseButton::Left),
            None
        );
        assert_eq!(
            input.process_mouse_button(ElementState::Pressed, MouseButton::Right),
            None
        );
    }

    #[test]
    fn test_cursor_scaled_to_game_space() {
        let mut input = InputManager::new(PhysicalSize::new(1600, 1200), Vec2::new(800.0, 600.0));
        input.process_cursor_moved(PhysicalPosition::new(800.0, 600.0));
        assert_eq!(input.cursor_position(), Vec2::new(400.0, 300.0));

        input.resize(PhysicalSize::new(800, 600));
        assert_eq!(input.cursor_position(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_reset() {
        let mut input = manager();
        input.process_key(KeyCode::ArrowDown, ElementState::Pressed, false);
        input.reset();
        assert_eq!(input.controls(), Controls::default());
    }
}
