// Clickable menu buttons

use glam::Vec2;

use super::config::{BUTTON_HEIGHT, BUTTON_WIDTH, SCREEN_WIDTH};
use crate::core::math::Rect;
use crate::engine::renderer::{Canvas, Color};

/// Label font size in pixels
const LABEL_SIZE: f32 = 24.0;

/// What a menu button does when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartGame,
    ToggleMusic,
    Exit,
}

#[derive(Debug, Clone)]
pub struct Button {
    label: &'static str,
    rect: Rect,
    action: MenuAction,
}

impl Button {
    pub fn new(label: &'static str, rect: Rect, action: MenuAction) -> Self {
        Self {
            label,
            rect,
            action,
        }
    }

    /// Standard-size button horizontally centered on screen
    pub fn centered(label: &'static str, top: f32, action: MenuAction) -> Self {
        let rect = Rect::new(
            (SCREEN_WIDTH / 2.0 - BUTTON_WIDTH / 2.0).floor(),
            top,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        );
        Self::new(label, rect, action)
    }

    /// The action to run if `point` falls on the button
    pub fn hit(&self, point: Vec2) -> Option<MenuAction> {
        self.rect.contains(point).then_some(self.action)
    }

    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.filled_rect(self.rect, Color::DARK_SLATE_GRAY);
        canvas.rect(self.rect, Color::WHITE);
        canvas.text(self.label, self.rect.center(), LABEL_SIZE, Color::WHITE);
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn action(&self) -> MenuAction {
        self.action
    }
}

/// Buttons on the main menu, top to bottom
pub fn main_menu() -> Vec<Button> {
    vec![
        Button::centered("Start Game", 180.0, MenuAction::StartGame),
        Button::centered("Music On/Off", 260.0, MenuAction::ToggleMusic),
        Button::centered("Exit", 340.0, MenuAction::Exit),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::canvas::tests::{DrawCall, RecordingCanvas};

    #[test]
    fn test_main_menu_layout() {
        let buttons = main_menu();
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0].label(), "Start Game");
        assert_eq!(buttons[0].rect(), Rect::new(290.0, 180.0, 220.0, 54.0));
        assert_eq!(buttons[1].action(), MenuAction::ToggleMusic);
        assert_eq!(buttons[2].rect().top(), 340.0);
    }

    #[test]
    fn test_hit() {
        let button = Button::centered("Start Game", 180.0, MenuAction::StartGame);
        assert_eq!(
            button.hit(button.rect().center()),
            Some(MenuAction::StartGame)
        );
        assert_eq!(button.hit(Vec2::new(290.0, 180.0)), Some(MenuAction::StartGame));
        assert_eq!(button.hit(Vec2::new(289.0, 200.0)), None);
        assert_eq!(button.hit(Vec2::new(400.0, 235.0)), None);
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        let buttons = main_menu();
        for pair in buttons.windows(2) {
            assert!(pair[0].rect().bottom() < pair[1].rect().top());
        }
    }

    #[test]
    fn test_draw() {
        let mut canvas = RecordingCanvas::default();
        let button = Button::centered("Exit", 340.0, MenuAction::Exit);
        button.draw(&mut canvas);

        assert_eq!(
            canvas.calls[0],
            DrawCall::FilledRect(button.rect(), Color::DARK_SLATE_GRAY)
        );
        assert_eq!(canvas.line_count(), 4);
        assert_eq!(canvas.texts(), vec!["Exit"]);
    }
}
