// Game session - the state machine that owns everything in play

use glam::Vec2;
use log::{debug, info};

use super::button::{main_menu, Button, MenuAction};
use super::config::{
    arena_center, EnemyStats, HeroStats, DEATH_DURATION, HIT_SOUND, SCREEN_HEIGHT, SCREEN_WIDTH,
    TILE_SIZE,
};
use super::enemy::{spawn_enemies, Enemy};
use super::hero::Hero;
use crate::engine::audio::Audio;
use crate::engine::input::{Action, Controls};
use crate::engine::renderer::{Canvas, Color};

const MENU_BACKGROUND: Color = Color::rgb(30, 30, 40);
const GRID_COLOR: Color = Color::rgb(50, 50, 60);

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Title screen with buttons
    #[default]
    Menu,
    /// Hero moving, enemies chasing
    Playing,
    /// Hero caught; death animation plays out
    Dying,
    /// Waiting for the player to return to the menu
    GameOver,
}

/// Everything one run of the program mutates: state, entities, audio
pub struct Game {
    state: GameState,
    hero: Hero,
    enemies: Vec<Enemy>,
    buttons: Vec<Button>,
    audio: Audio,
    /// Seconds spent in `Dying`
    death_timer: f32,
    enemy_stats: EnemyStats,
}

impl Game {
    pub fn new(audio: Audio) -> Self {
        let enemy_stats = EnemyStats::default();
        Self {
            state: GameState::Menu,
            hero: Hero::new(arena_center(), HeroStats::default()),
            enemies: spawn_enemies(enemy_stats),
            buttons: main_menu(),
            audio,
            death_timer: 0.0,
            enemy_stats,
        }
    }

    /// Run one tick of the current state's logic
    pub fn update(&mut self, dt: f32, controls: &Controls) {
        match self.state {
            GameState::Menu | GameState::GameOver => {}
            GameState::Playing => self.update_playing(dt, controls),
            GameState::Dying => self.update_dying(dt),
        }
    }

    fn update_playing(&mut self, dt: f32, controls: &Controls) {
        self.hero.update(dt, controls);

        let hero_position = self.hero.position();
        let mut caught = false;
        for enemy in &mut self.enemies {
            enemy.update(dt, hero_position);
            caught |= enemy.is_alive() && enemy.touches(hero_position);
        }

        if caught {
            self.enter_dying();
        }
    }

    fn update_dying(&mut self, dt: f32) {
        self.hero.update(dt, &Controls::default());
        self.death_timer += dt;
        if self.death_timer() >= DEATH_DURATION {
            self.transition(GameState::GameOver);
        }
    }

    /// Hero caught. Only the first call per death has any effect.
    fn enter_dying(&mut self) {
        if self.state == GameState::Dying {
            return;
        }
        self.hero.mark_dead();
        self.death_timer = 0.0;
        self.audio.play_sound(HIT_SOUND);
        self.transition(GameState::Dying);
    }

    /// Mouse press at `point` in screen coordinates
    pub fn on_mouse_down(&mut self, point: Vec2) {
        if self.state != GameState::Menu {
            return;
        }
        let clicked = self
            .buttons
            .iter()
            .find_map(|button| button.hit(point).map(|action| (button.label(), action)));
        if let Some((label, action)) = clicked {
            debug!("Menu button clicked: {}", label);
            self.apply(action);
        }
    }

    /// Fresh key press
    pub fn on_key_down(&mut self, action: Action) {
        if self.state == GameState::GameOver && action == Action::Confirm {
            self.audio.stop_music();
            self.transition(GameState::Menu);
        }
    }

    fn apply(&mut self, action: MenuAction) {
        match action {
            MenuAction::StartGame => self.start_game(),
            MenuAction::ToggleMusic => self.audio.toggle_music(),
            MenuAction::Exit => self.transition(GameState::GameOver),
        }
    }

    fn start_game(&mut self) {
        self.hero.reset(arena_center());
        self.enemies = spawn_enemies(self.enemy_stats);
        self.death_timer = 0.0;
        self.audio.resume_for_game();
        self.transition(GameState::Playing);
    }

    fn transition(&mut self, next: GameState) {
        if self.state != next {
            info!("Game state: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Draw the current state
    pub fn draw(&self, canvas: &mut impl Canvas) {
        canvas.clear();
        match self.state() {
            GameState::Menu => self.draw_menu(canvas),
            GameState::Playing | GameState::Dying => self.draw_arena(canvas),
            GameState::GameOver => Self::draw_game_over(canvas),
        }
    }

    fn draw_menu(&self, canvas: &mut impl Canvas) {
        canvas.fill(MENU_BACKGROUND);
        canvas.text(
            "DUNGEON ESCAPE",
            Vec2::new(SCREEN_WIDTH / 2.0, 100.0),
            56.0,
            Color::WHITE,
        );
        for button in self.buttons() {
            button.draw(canvas);
        }
    }

    fn draw_arena(&self, canvas: &mut impl Canvas) {
        let mut x = 0.0;
        while x < SCREEN_WIDTH {
            canvas.line(Vec2::new(x, 0.0), Vec2::new(x, SCREEN_HEIGHT), GRID_COLOR);
            x += TILE_SIZE;
        }
        let mut y = 0.0;
        while y < SCREEN_HEIGHT {
            canvas.line(Vec2::new(0.0, y), Vec2::new(SCREEN_WIDTH, y), GRID_COLOR);
            y += TILE_SIZE;
        }

        canvas.actor(self.hero.image(), self.hero.position());
        for enemy in self.enemies() {
            canvas.actor(enemy.image(), enemy.position());
        }
    }

    fn draw_game_over(canvas: &mut impl Canvas) {
        canvas.fill(Color::BLACK);
        canvas.text(
            "GAME OVER",
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 - 30.0),
            72.0,
            Color::RED,
        );
        canvas.text(
            "Press Space to return to Menu",
            Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0 + 40.0),
            28.0,
            Color::WHITE,
        );
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn audio(&self) -> &Audio {
        &self.audio
    }

    pub fn death_timer(&self) -> f32 {
        self.death_timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Rect;
    use crate::engine::audio::tests::{recording_audio, RecordingBackend};
    use crate::engine::audio::MusicState;
    use crate::engine::renderer::canvas::tests::{DrawCall, RecordingCanvas};
    use crate::game::hero::HeroAnimation;

    const TICK: f32 = 1.0 / 60.0;

    fn game() -> (Game, RecordingBackend) {
        let (audio, backend) = recording_audio();
        (Game::new(audio), backend)
    }

    fn click(game: &mut Game, action: MenuAction) {
        let center = game
            .buttons()
            .iter()
            .find(|b| b.action() == action)
            .map(|b| b.rect().center())
            .unwrap();
        game.on_mouse_down(center);
    }

    fn playing_game() -> (Game, RecordingBackend) {
        let (mut game, backend) = game();
        click(&mut game, MenuAction::StartGame);
        (game, backend)
    }

    /// Steer the hero onto the first enemy until something catches it
    fn run_into_enemy(game: &mut Game) {
        for _ in 0..600 {
            let hero = game.hero().position();
            let target = game.enemies()[0].position();
            let controls = Controls {
                up: target.y < hero.y - 1.0,
                down: target.y > hero.y + 1.0,
                left: target.x < hero.x - 1.0,
                right: target.x > hero.x + 1.0,
                sprint: false,
            };
            game.update(TICK, &controls);
            if game.state() != GameState::Playing {
                return;
            }
        }
        panic!("hero never reached an enemy");
    }

    #[test]
    fn test_starts_in_menu() {
        let (game, _) = game();
        assert_eq!(game.state(), GameState::Menu);
        assert_eq!(game.buttons().len(), 3);
    }

    #[test]
    fn test_start_button_begins_play() {
        let (mut game, backend) = playing_game();
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.hero().position(), Vec2::new(400.0, 300.0));
        assert!(game.hero().is_alive());
        assert_eq!(game.hero().animation().state(), HeroAnimation::Idle);

        let spawns: Vec<Vec2> = game.enemies().iter().map(Enemy::position).collect();
        assert_eq!(spawns, vec![Vec2::new(200.0, 200.0), Vec2::new(600.0, 400.0)]);

        assert_eq!(game.audio().music_state(), MusicState::Playing);
        assert_eq!(backend.count("resume"), 1);

        // Clicks only matter in the menu
        game.on_mouse_down(Vec2::new(400.0, 367.0));
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_exit_button_goes_to_game_over() {
        let (mut game, _) = game();
        click(&mut game, MenuAction::Exit);
        assert_eq!(game.state(), GameState::GameOver);
    }

    #[test]
    fn test_music_button_stays_in_menu() {
        let (mut game, backend) = game();
        click(&mut game, MenuAction::ToggleMusic);
        assert_eq!(game.state(), GameState::Menu);
        assert!(!game.audio().music_on());

        click(&mut game, MenuAction::ToggleMusic);
        assert!(game.audio().music_on());
        assert_eq!(backend.count("play:background"), 1);
    }

    #[test]
    fn test_menu_ignores_other_input() {
        let (mut game, _) = game();
        game.on_mouse_down(Vec2::new(10.0, 10.0));
        game.on_key_down(Action::Confirm);
        game.update(1.0, &Controls { right: true, ..Default::default() });
        assert_eq!(game.state(), GameState::Menu);
        assert_eq!(game.hero().position(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_collision_enters_dying_with_one_hit_sound() {
        let (mut game, backend) = playing_game();
        run_into_enemy(&mut game);

        assert_eq!(game.state(), GameState::Dying);
        assert!(!game.hero().is_alive());
        assert_eq!(game.death_timer(), 0.0);
        assert_eq!(backend.count("sound:hit"), 1);
    }

    #[test]
    fn test_dying_does_not_replay_hit_or_reset_timer() {
        let (mut game, backend) = playing_game();
        run_into_enemy(&mut game);

        let hero_position = game.hero().position();
        let enemy_positions: Vec<Vec2> = game.enemies().iter().map(Enemy::position).collect();

        for _ in 0..30 {
            game.update(TICK, &Controls { down: true, ..Default::default() });
        }
        assert_eq!(game.state(), GameState::Dying);
        assert_eq!(backend.count("sound:hit"), 1);
        assert!((game.death_timer() - 30.0 * TICK).abs() < 1e-4);

        // The hero stays put and enemies are frozen
        assert_eq!(game.hero().position(), hero_position);
        let frozen: Vec<Vec2> = game.enemies().iter().map(Enemy::position).collect();
        assert_eq!(frozen, enemy_positions);

        // Re-entering directly is also guarded
        game.enter_dying();
        assert_eq!(backend.count("sound:hit"), 1);
        assert!(game.death_timer() > 0.0);
    }

    #[test]
    fn test_two_enemies_at_once_play_one_hit() {
        let (mut game, backend) = playing_game();
        // Both enemies standing on the hero in the same tick
        let territory = Rect::new(350.0, 250.0, 100.0, 100.0);
        game.enemies = vec![
            Enemy::new(Vec2::new(400.0, 300.0), territory, EnemyStats::default()),
            Enemy::new(Vec2::new(402.0, 300.0), territory, EnemyStats::default()),
        ];
        game.update(TICK, &Controls::default());
        assert_eq!(game.state(), GameState::Dying);
        assert_eq!(backend.count("sound:hit"), 1);
    }

    /// Hero sprinting right from 11 px left of an enemy that never moves
    fn hero_beside_idle_enemy() -> (Game, RecordingBackend) {
        let (mut game, backend) = playing_game();
        let idle = EnemyStats {
            speed: 0.0,
            ..EnemyStats::default()
        };
        game.enemies = vec![Enemy::new(
            Vec2::new(400.0, 300.0),
            Rect::new(350.0, 250.0, 100.0, 100.0),
            idle,
        )];
        game.hero = Hero::new(Vec2::new(389.0, 300.0), HeroStats::default());
        (game, backend)
    }

    const SPRINT_RIGHT: Controls = Controls {
        up: false,
        down: false,
        left: false,
        right: true,
        sprint: true,
    };

    #[test]
    fn test_fast_hero_passes_through_between_ticks() {
        let (mut game, backend) = hero_beside_idle_enemy();

        // 280 px/s for 0.1 s carries the hero from 11 px before the enemy
        // to 17 px past it; only the end position is checked
        game.update(0.1, &SPRINT_RIGHT);

        assert_eq!(game.hero().position(), Vec2::new(417.0, 300.0));
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(backend.count("sound:hit"), 0);
    }

    #[test]
    fn test_tick_ending_within_reach_is_caught() {
        let (mut game, backend) = hero_beside_idle_enemy();

        // 2.8 px step ends 8.2 px from the enemy
        game.update(0.01, &SPRINT_RIGHT);

        assert!(game.hero().position().distance(Vec2::new(400.0, 300.0)) < 10.0);
        assert_eq!(game.state(), GameState::Dying);
        assert_eq!(backend.count("sound:hit"), 1);
    }

    #[test]
    fn test_dying_animates_death() {
        let (mut game, _) = playing_game();
        run_into_enemy(&mut game);
        game.update(TICK, &Controls::default());
        assert_eq!(game.hero().animation().state(), HeroAnimation::Dead);
    }

    #[test]
    fn test_dying_ends_in_game_over_once() {
        let (mut game, _) = playing_game();
        run_into_enemy(&mut game);

        game.update(1.0, &Controls::default());
        assert_eq!(game.state(), GameState::Dying);
        game.update(1.0, &Controls::default());
        assert_eq!(game.state(), GameState::GameOver);

        // Further ticks leave the state alone
        let timer = game.death_timer();
        for _ in 0..100 {
            game.update(1.0, &Controls::default());
        }
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.death_timer(), timer);
    }

    #[test]
    fn test_game_over_returns_to_menu_on_confirm_only() {
        let (mut game, backend) = playing_game();
        run_into_enemy(&mut game);
        game.update(DEATH_DURATION, &Controls::default());
        assert_eq!(game.state(), GameState::GameOver);

        game.on_key_down(Action::MoveUp);
        game.on_mouse_down(game.buttons()[0].rect().center());
        assert_eq!(game.state(), GameState::GameOver);

        game.on_key_down(Action::Confirm);
        assert_eq!(game.state(), GameState::Menu);
        assert_eq!(game.audio().music_state(), MusicState::Stopped);
        assert_eq!(backend.count("stop"), 1);
    }

    #[test]
    fn test_new_game_after_death_resets_everything() {
        let (mut game, backend) = playing_game();
        run_into_enemy(&mut game);
        game.update(DEATH_DURATION, &Controls::default());
        game.on_key_down(Action::Confirm);

        click(&mut game, MenuAction::StartGame);
        assert_eq!(game.state(), GameState::Playing);
        assert!(game.hero().is_alive());
        assert_eq!(game.hero().position(), Vec2::new(400.0, 300.0));
        assert_eq!(game.enemies()[0].position(), Vec2::new(200.0, 200.0));
        assert_eq!(game.death_timer(), 0.0);
        // Stopped track starts again from the top
        assert_eq!(backend.count("play:background"), 2);
    }

    #[test]
    fn test_confirm_ignored_while_playing() {
        let (mut game, _) = playing_game();
        game.on_key_down(Action::Confirm);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn test_muted_game_still_plays() {
        let mut game = Game::new(Audio::muted("background"));
        click(&mut game, MenuAction::StartGame);
        run_into_enemy(&mut game);
        assert_eq!(game.state(), GameState::Dying);
    }

    #[test]
    fn test_draw_menu() {
        let (game, _) = game();
        let mut canvas = RecordingCanvas::default();
        game.draw(&mut canvas);

        assert_eq!(canvas.calls[0], DrawCall::Clear);
        assert_eq!(canvas.calls[1], DrawCall::Fill(MENU_BACKGROUND));
        assert_eq!(
            canvas.texts(),
            vec!["DUNGEON ESCAPE", "Start Game", "Music On/Off", "Exit"]
        );
        assert!(canvas.actors().is_empty());
    }

    #[test]
    fn test_draw_arena() {
        let (game, _) = playing_game();
        let mut canvas = RecordingCanvas::default();
        game.draw(&mut canvas);

        // 17 vertical + 13 horizontal grid lines
        assert_eq!(canvas.line_count(), 30);
        let actors = canvas.actors();
        assert_eq!(actors.len(), 3);
        assert_eq!(actors[0], ("hero_idle_0", Vec2::new(400.0, 300.0)));
        assert_eq!(actors[1].0, "enemy_walk_0");
        assert!(canvas.texts().is_empty());
    }

    #[test]
    fn test_draw_dying_matches_playing_layout() {
        let (mut game, _) = playing_game();
        run_into_enemy(&mut game);
        game.update(TICK, &Controls::default());
        let mut canvas = RecordingCanvas::default();
        game.draw(&mut canvas);
        assert_eq!(canvas.line_count(), 30);
        assert!(canvas.actors()[0].0.starts_with("hero_dead_"));
    }

    #[test]
    fn test_draw_game_over() {
        let (mut game, _) = game();
        click(&mut game, MenuAction::Exit);
        let mut canvas = RecordingCanvas::default();
        game.draw(&mut canvas);

        assert_eq!(canvas.calls[1], DrawCall::Fill(Color::BLACK));
        assert_eq!(
            canvas.texts(),
            vec!["GAME OVER", "Press Space to return to Menu"]
        );
    }
}
