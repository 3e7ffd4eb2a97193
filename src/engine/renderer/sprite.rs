// Sprite rendering system

use glam::{Vec2, Vec4};
use std::ops::Range;
use wgpu::util::DeviceExt;

use super::camera::{Camera, CameraUniform};
use super::texture::{TextureHandle, TextureManager};
use super::vertex::Vertex;
use crate::core::math::Rect;

/// Quads queued for one frame, grouped into runs sharing a texture
#[derive(Debug, Default)]
pub struct QuadBatch {
    vertices: Vec<Vertex>,
    draws: Vec<(TextureHandle, Range<u32>)>,
}

impl QuadBatch {
    /// Queue a textured quad covering `rect`, tinted by `color`
    pub fn push_quad(&mut self, rect: Rect, color: Vec4, texture: TextureHandle) {
        self.push_corners(
            [
                Vec2::new(rect.left(), rect.top()),
                Vec2::new(rect.right(), rect.top()),
                Vec2::new(rect.right(), rect.bottom()),
                Vec2::new(rect.left(), rect.bottom()),
            ],
            color,
            texture,
        );
    }

    /// Queue a quad from its corners, clockwise from the one that samples
    /// the texture's top-left
    pub fn push_corners(&mut self, corners: [Vec2; 4], color: Vec4, texture: TextureHandle) {
        let [a, b, c, d] = corners;
        let top_left = Vertex::new(a, Vec2::new(0.0, 0.0), color);
        let top_right = Vertex::new(b, Vec2::new(1.0, 0.0), color);
        let bottom_right = Vertex::new(c, Vec2::new(1.0, 1.0), color);
        let bottom_left = Vertex::new(d, Vec2::new(0.0, 1.0), color);

        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&[
            top_left,
            bottom_left,
            bottom_right,
            top_left,
            bottom_right,
            top_right,
        ]);
        let end = self.vertices.len() as u32;

        match self.draws.last_mut() {
            Some((last, range)) if *last == texture => range.end = end,
            _ => self.draws.push((texture, start..end)),
        }
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.draws.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertex ranges in submission order, each drawn with one texture
    pub fn draws(&self) -> &[(TextureHandle, Range<u32>)] {
        &self.draws
    }
}

/// Draws batched screen-space quads with one pipeline
pub struct SpriteRenderer {
    render_pipeline: wgpu::RenderPipeline,
    _camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    batch: QuadBatch,
}

impl SpriteRenderer {
    /// Create a new sprite renderer
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        texture_layout: &wgpu::BindGroupLayout,
        camera: &Camera,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sprite Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sprite Pipeline Layout"),
            bind_group_layouts: &[&camera_bind_group_layout, texture_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sprite Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // y points down in screen space, which flips winding
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        // The projection never changes, so the uniform is written once
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[CameraUniform::new(camera)]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Self {
            render_pipeline,
            _camera_buffer: camera_buffer,
            camera_bind_group,
            batch: QuadBatch::default(),
        }
    }

    pub fn push_quad(&mut self, rect: Rect, color: Vec4, texture: TextureHandle) {
        self.batch.push_quad(rect, color, texture);
    }

    pub fn push_corners(&mut self, corners: [Vec2; 4], color: Vec4, texture: TextureHandle) {
        self.batch.push_corners(corners, color, texture);
    }

    /// Drop everything queued so far
    pub fn clear(&mut self) {
        self.batch.clear();
    }

    /// Copy the queued vertices to the GPU; `None` when nothing is queued
    pub fn upload(&self, device: &wgpu::Device) -> Option<wgpu::Buffer> {
        if self.batch.is_empty() {
            return None;
        }
        Some(
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sprite Vertex Buffer"),
                contents: bytemuck::cast_slice(self.batch.vertices()),
                usage: wgpu::BufferUsages::VERTEX,
            }),
        )
    }

    /// Record draw calls for the queued quads
    pub fn render<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        vertex_buffer: &'a wgpu::Buffer,
        texture_manager: &'a TextureManager,
    ) {
        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));

        for (handle, range) in self.batch.draws() {
            let Some(texture) = texture_manager.get(*handle) else {
                continue;
            };
            render_pass.set_bind_group(1, &texture.bind_group, &[]);
            render_pass.draw(range.clone(), 0..1);
        }
    }
}
