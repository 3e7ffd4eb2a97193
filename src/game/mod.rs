// Game logic
//
// This module contains everything that makes up a round of play:
// - Tuning constants and stats
// - Frame-based animation shared by every entity
// - The hero, the enemies and the menu buttons
// - The session state machine that owns them all

pub mod animation;
pub mod button;
pub mod config;
pub mod enemy;
pub mod hero;
pub mod session;

// Re-export commonly used types
pub use session::{Game, GameState};
