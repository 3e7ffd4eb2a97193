// Rendering system using wgpu

mod camera;
pub mod canvas;
mod font;
mod sprite;
mod texture;
mod vertex;

pub use canvas::{Canvas, Color};

use camera::Camera;
use sprite::SpriteRenderer;
use texture::{TextureHandle, TextureManager};

use glam::{Vec2, Vec4};
use log::info;
use std::sync::Arc;
use thiserror::Error;
use winit::window::Window;

use crate::core::math::Rect;
use crate::engine::assets::{AssetError, AssetLoader};

/// Width of lines drawn with `Canvas::line`, in logical pixels
const LINE_WIDTH: f32 = 1.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("Failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("Surface is not supported by the adapter")]
    UnsupportedSurface,

    #[error("Failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Main renderer responsible for initializing wgpu and drawing the
/// game's frames
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    sprite_renderer: SpriteRenderer,
    texture_manager: TextureManager,
    clear_color: Color,
    /// Whether the surface encodes to sRGB on write
    srgb_target: bool,
}

impl Renderer {
    /// Create a new renderer for the given window. Everything drawn is in
    /// `logical_size` coordinates and stretched to the surface.
    pub async fn new(
        window: Arc<Window>,
        loader: AssetLoader,
        logical_size: Vec2,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(RenderError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);

        let srgb_target = surface_format.is_srgb();
        if !srgb_target {
            info!("No sRGB surface format; using {:?}", surface_format);
        }

        let texture_manager = TextureManager::new(&device, &queue, loader, srgb_target);
        let camera = Camera::new(logical_size);
        let sprite_renderer =
            SpriteRenderer::new(&device, surface_format, texture_manager.layout(), &camera);

        info!(
            "Renderer initialized with {}x{} resolution",
            size.width, size.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            sprite_renderer,
            texture_manager,
            clear_color: Color::BLACK,
            srgb_target,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    /// Present everything drawn since the last `clear`
    pub fn render(&mut self) -> Result<(), RenderError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let vertex_buffer = self.sprite_renderer.upload(&self.device);
        let clear = self.clear_color.for_target(self.srgb_target);

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: clear.x as f64,
                            g: clear.y as f64,
                            b: clear.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(buffer) = vertex_buffer.as_ref() {
                self.sprite_renderer
                    .render(&mut render_pass, buffer, &self.texture_manager);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn texture(&mut self, image: &str) -> TextureHandle {
        self.texture_manager
            .get_or_load(&self.device, &self.queue, image)
    }

    fn image_size(&self, handle: TextureHandle) -> Vec2 {
        self.texture_manager
            .get(handle)
            .map_or(Vec2::ZERO, |texture| texture.size)
    }
}

impl Canvas for Renderer {
    fn clear(&mut self) {
        self.sprite_renderer.clear();
        self.clear_color = Color::BLACK;
    }

    fn fill(&mut self, color: Color) {
        // Anything underneath would be hidden anyway
        self.sprite_renderer.clear();
        self.clear_color = color;
    }

    fn filled_rect(&mut self, rect: Rect, color: Color) {
        let white = self.texture_manager.white();
        self.sprite_renderer
            .push_quad(rect, color.for_target(self.srgb_target), white);
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        let white = self.texture_manager.white();
        self.sprite_renderer.push_corners(
            line_corners(from, to, LINE_WIDTH),
            color.for_target(self.srgb_target),
            white,
        );
    }

    fn text(&mut self, text: &str, center: Vec2, size: f32, color: Color) {
        let scale = font::pixel_scale(size);
        let top_left = (center - font::measure(text, scale) / 2.0).floor();
        let white = self.texture_manager.white();
        let color = color.for_target(self.srgb_target);
        for rect in font::layout(text, top_left, scale) {
            self.sprite_renderer.push_quad(rect, color, white);
        }
    }

    fn blit(&mut self, image: &str, top_left: Vec2) {
        let handle = self.texture(image);
        let size = self.image_size(handle);
        self.sprite_renderer.push_quad(
            Rect::new(top_left.x, top_left.y, size.x, size.y),
            Vec4::ONE,
            handle,
        );
    }

    fn actor(&mut self, image: &str, center: Vec2) {
        let handle = self.texture(image);
        let size = self.image_size(handle);
        self.blit(image, center - size / 2.0);
    }
}

/// Corners of a `width`-wide strip from `from` to `to`, extended by half
/// the width past both ends so outlines meet at their corners
fn line_corners(from: Vec2, to: Vec2, width: f32) -> [Vec2; 4] {
    let half = width / 2.0;
    let along = (to - from).try_normalize().unwrap_or(Vec2::X) * half;
    let across = along.perp();
    let start = from - along;
    let end = to + along;
    [start - across, end - across, end + across, start + across]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line_corners() {
        let corners = line_corners(Vec2::new(0.0, 10.0), Vec2::new(100.0, 10.0), 2.0);
        assert_eq!(
            corners,
            [
                Vec2::new(-1.0, 9.0),
                Vec2::new(101.0, 9.0),
                Vec2::new(101.0, 11.0),
                Vec2::new(-1.0, 11.0),
            ]
        );
    }

    #[test]
    fn test_degenerate_line_is_a_dot() {
        let corners = line_corners(Vec2::new(5.0, 5.0), Vec2::new(5.0, 5.0), 1.0);
        let min = corners.iter().fold(Vec2::MAX, |acc, c| acc.min(*c));
        let max = corners.iter().fold(Vec2::MIN, |acc, c| acc.max(*c));
        assert_eq!(max - min, Vec2::new(1.0, 1.0));
    }
}
