use anyhow::Result;
use glam::Vec2;
use log::{error, info};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::audio::{open_default_backend, Audio};
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::{RenderError, Renderer};
use game::config::{asset_dir, MUSIC_TRACK, SCREEN_HEIGHT, SCREEN_WIDTH, TITLE};
use game::Game;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting {}...", TITLE);

    let logical_size = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(SCREEN_WIDTH, SCREEN_HEIGHT))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    info!("Window created successfully");

    let assets = AssetLoader::new(asset_dir());
    info!("Loading assets from {}", assets.base_path().display());

    let audio = Audio::open(open_default_backend(assets.clone()), MUSIC_TRACK);
    let mut renderer = pollster::block_on(Renderer::new(window.clone(), assets, logical_size))?;
    let mut input = InputManager::new(window.inner_size(), logical_size);
    let mut game = Game::new(audio);
    let mut game_loop = GameLoop::new();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    input.resize(physical_size);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if let Some(action) = input.process_keyboard_event(&event) {
                        game.on_key_down(action);
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.process_cursor_moved(position);
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    if let Some(point) = input.process_mouse_button(state, button) {
                        game.on_mouse_down(point);
                    }
                }
                WindowEvent::Focused(false) => input.reset(),
                WindowEvent::RedrawRequested => {
                    let steps = game_loop.begin_frame();
                    let dt = game_loop.fixed_timestep();
                    for _ in 0..steps {
                        game.update(dt, &input.controls());
                    }

                    game.draw(&mut renderer);
                    match renderer.render() {
                        Ok(()) => {}
                        Err(RenderError::Surface(
                            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated,
                        )) => renderer.resize(renderer.size()),
                        Err(RenderError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                            error!("GPU out of memory, shutting down");
                            elwt.exit();
                        }
                        Err(e) => error!("Render error: {}", e),
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
