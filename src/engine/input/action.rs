// Game action definitions and key bindings

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Sprint,

    // Meta actions
    Confirm,
}

/// Default keyboard bindings (arrows and WASD both move)
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowUp, Action::MoveUp),
        (KeyCode::ArrowDown, Action::MoveDown),
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::KeyW, Action::MoveUp),
        (KeyCode::KeyS, Action::MoveDown),
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::ShiftLeft, Action::Sprint),
        (KeyCode::ShiftRight, Action::Sprint),
        (KeyCode::Space, Action::Confirm),
    ]
}

/// Snapshot of the held movement keys, sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
}

impl Controls {
    /// Raw direction with each axis in {-1, 0, 1}; y grows downward
    pub fn direction(&self) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }
        if self.up {
            direction.y -= 1.0;
        }
        if self.down {
            direction.y += 1.0;
        }
        direction
    }
}
