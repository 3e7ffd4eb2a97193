// Texture loading and management system

use glam::Vec2;
use image::GenericImageView;
use log::warn;
use std::collections::HashMap;

use super::RenderError;
use crate::engine::assets::{AssetLoader, AssetType};

/// Handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

#[cfg(test)]
impl TextureHandle {
    pub(crate) fn nth(index: usize) -> Self {
        Self(index)
    }
}

/// Draw size of images that could not be loaded
const PLACEHOLDER_SIZE: Vec2 = Vec2::new(32.0, 32.0);

/// A texture on the GPU, bound and ready to draw
pub struct Texture {
    pub texture: wgpu::Texture,
    pub bind_group: wgpu::BindGroup,
    /// Size to draw the texture at, in screen pixels
    pub size: Vec2,
}

impl Texture {
    /// Create a texture from image bytes
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self, RenderError> {
        let img = image::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();
        let rgba = img.to_rgba8();
        Ok(Self::from_rgba(
            device,
            queue,
            layout,
            format,
            &rgba,
            width,
            height,
            Vec2::new(width as f32, height as f32),
            label,
        ))
    }

    /// Create a 1x1 solid color texture drawn at `size`
    pub fn from_color(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        color: [u8; 4],
        size: Vec2,
        label: &str,
    ) -> Self {
        Self::from_rgba(device, queue, layout, format, &color, 1, 1, size, label)
    }

    #[allow(clippy::too_many_arguments)]
    fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        format: wgpu::TextureFormat,
        rgba: &[u8],
        width: u32,
        height: u32,
        size: Vec2,
        label: &str,
    ) -> Self {
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Nearest filtering keeps pixel art crisp
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            texture,
            bind_group,
            size,
        }
    }
}

/// Placeholder color for an image that could not be loaded, picked from
/// the `<entity>_` prefix so stand-ins remain distinguishable
pub fn placeholder_color(id: &str) -> [u8; 4] {
    match id.split('_').next() {
        Some("hero") => [80, 200, 120, 255],
        Some("enemy") => [210, 70, 70, 255],
        _ => [255, 0, 255, 255],
    }
}

/// Texture format for images drawn to a target. Sampling an sRGB texture
/// decodes to linear, which only an sRGB target encodes back.
pub fn image_format(srgb_target: bool) -> wgpu::TextureFormat {
    if srgb_target {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    }
}

/// Loads images by identifier and caches them
pub struct TextureManager {
    loader: AssetLoader,
    layout: wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
    textures: Vec<Texture>,
    by_id: HashMap<String, TextureHandle>,
    white: TextureHandle,
}

impl TextureManager {
    /// Create a new texture manager
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        loader: AssetLoader,
        srgb_target: bool,
    ) -> Self {
        let format = image_format(srgb_target);
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let white = Texture::from_color(
            device,
            queue,
            &layout,
            format,
            [255; 4],
            Vec2::ONE,
            "white",
        );

        Self {
            loader,
            layout,
            format,
            textures: vec![white],
            by_id: HashMap::new(),
            white: TextureHandle(0),
        }
    }

    /// Layout every texture bind group follows
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Plain white texture used for solid shapes
    pub fn white(&self) -> TextureHandle {
        self.white
    }

    /// Texture for an image identifier, loading it on first use.
    /// Missing or broken images are replaced by a flat placeholder and
    /// reported once.
    pub fn get_or_load(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        id: &str,
    ) -> TextureHandle {
        if let Some(&handle) = self.by_id.get(id) {
            return handle;
        }

        let texture = self
            .loader
            .load_bytes(AssetType::Image, id)
            .map_err(RenderError::from)
            .and_then(|bytes| {
                Texture::from_bytes(device, queue, &self.layout, self.format, &bytes, id)
            })
            .unwrap_or_else(|e| {
                warn!("{}; drawing a placeholder for '{}'", e, id);
                Texture::from_color(
                    device,
                    queue,
                    &self.layout,
                    self.format,
                    placeholder_color(id),
                    PLACEHOLDER_SIZE,
                    id,
                )
            });

        let handle = TextureHandle(self.textures.len());
        self.textures.push(texture);
        self.by_id.insert(id.to_string(), handle);
        handle
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_colors_by_entity() {
        assert_eq!(placeholder_color("hero_walk_1"), [80, 200, 120, 255]);
        assert_eq!(placeholder_color("enemy_walk_0"), [210, 70, 70, 255]);
        assert_eq!(placeholder_color("tile_floor"), [255, 0, 255, 255]);
    }

    #[test]
    fn test_images_match_target_encoding() {
        assert_eq!(image_format(true), wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!(image_format(false), wgpu::TextureFormat::Rgba8Unorm);
    }
}
