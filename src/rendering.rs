//! Rendering system with wgpu pipeline and shader management.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::debug_ui::DebugUi;
use crate::params::WaveParams;
use crate::scene::DirectionalLight;
use crate::surface::{SurfaceGrid, Vertex};

/// Uniform buffer for the wave surface shader.
///
/// Field order and padding mirror the `Uniforms` struct in `shader.wgsl`
/// (vec3s pair with a trailing f32 to fill each 16-byte slot).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 3],
    pub time: f32,
    pub base_color: [f32; 3],
    pub roughness: f32,
    pub emissive_color: [f32; 3],
    pub emissive_low: f32,
    pub light_direction: [f32; 3],
    pub emissive_high: f32,
    pub light_color: [f32; 3],
    pub emissive_power: f32,
    pub large_frequency: [f32; 2],
    pub large_speed: f32,
    pub large_multiplier: f32,
    pub small_frequency: f32,
    pub small_speed: f32,
    pub small_multiplier: f32,
    pub normal_shift: f32,
    pub small_iterations: u32,
    pub light_intensity: f32,
    pub _padding: [f32; 2],
}

impl Uniforms {
    /// Snapshot the live parameters for this frame. The wave params are
    /// re-read every call, so debug-panel edits show up on the next frame
    /// without any rebuild.
    pub fn compose(
        view_proj: Mat4,
        camera_position: Vec3,
        waves: &WaveParams,
        light: &DirectionalLight,
        time: f32,
    ) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_position: camera_position.to_array(),
            time,
            base_color: waves.base_color,
            roughness: waves.roughness,
            emissive_color: waves.emissive_color,
            emissive_low: waves.emissive_low,
            light_direction: light.direction().to_array(),
            emissive_high: waves.emissive_high,
            light_color: light.color,
            emissive_power: waves.emissive_power,
            large_frequency: waves.large_frequency,
            large_speed: waves.large_speed,
            large_multiplier: waves.large_multiplier,
            small_frequency: waves.small_frequency,
            small_speed: waves.small_speed,
            small_multiplier: waves.small_multiplier,
            normal_shift: waves.normal_shift,
            small_iterations: waves.small_iterations,
            light_intensity: light.intensity,
            _padding: [0.0; 2],
        }
    }
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

/// Rendering system managing wgpu device, pipeline, and buffers.
///
/// The surface mesh is uploaded lazily: the scene has no mesh until the
/// base asset group ends, and the vertex data never changes afterward
/// (displacement happens in the vertex shader).
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    mesh: Option<GpuMesh>,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(window: std::sync::Arc<winit::window::Window>) -> Result<Self, String> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Window must have 'static lifetime via Arc
        let surface = instance
            .create_surface(window)
            .map_err(|e| format!("Failed to create surface: {}", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| format!("Failed to request device: {}", e))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Wave Surface Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Uniform Buffer"),
            contents: bytemuck::cast_slice(&[Uniforms::zeroed()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Render Pipeline Layout"),
                bind_group_layouts: &[&uniform_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Wave Surface Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Double-sided material; the fragment stage flips the
                // normal on back faces
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            uniform_buffer,
            uniform_bind_group,
            mesh: None,
        })
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.config.width as f32 / self.config.height.max(1) as f32
    }

    /// Reconfigure the swapchain for a new framebuffer size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
    }

    /// Re-apply the current surface configuration (after a lost surface).
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    /// Upload the (static) surface grid once it exists in the scene.
    pub fn upload_surface(&mut self, grid: &SurfaceGrid) {
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Surface Vertex Buffer"),
                contents: bytemuck::cast_slice(&grid.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Surface Index Buffer"),
                contents: bytemuck::cast_slice(&grid.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        self.mesh = Some(GpuMesh {
            vertex_buffer,
            index_buffer,
            index_count: grid.indices.len() as u32,
        });
    }

    /// Update the frame's uniforms
    pub fn update_uniforms(&self, uniforms: &Uniforms) {
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[*uniforms]));
    }

    /// Render a frame: clear, draw the wave surface if built, then the
    /// debug overlay if one is supplied.
    pub fn render(
        &mut self,
        overlay: Option<(&mut DebugUi, egui::FullOutput)>,
    ) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(mesh) = &self.mesh {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
            }
        }

        if let Some((ui, full_output)) = overlay {
            ui.paint(
                &self.device,
                &self.queue,
                &mut encoder,
                &view,
                [self.config.width, self.config.height],
                full_output,
            );
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::SurfaceGeometry;
    use crate::scene::Scene;
    use crate::world::World;

    #[test]
    fn test_uniforms_layout_matches_wgsl() {
        // mat4 (64) + seven 16-byte slots = 192; any drift here corrupts
        // every field after the mismatch on the GPU
        assert_eq!(std::mem::size_of::<Uniforms>(), 192);
        assert_eq!(std::mem::align_of::<Uniforms>(), 4);
    }

    #[test]
    fn test_uniforms_compose_reads_live_params() {
        let mut world = World::new(SurfaceGeometry::default());
        let mut scene = Scene::new();
        world.handle_group_end("base", &mut scene);
        let light = scene.light.unwrap();

        let a = Uniforms::compose(Mat4::IDENTITY, Vec3::ZERO, &world.waves, &light, 1.0);
        world.waves.emissive_power = 2.0;
        let b = Uniforms::compose(Mat4::IDENTITY, Vec3::ZERO, &world.waves, &light, 1.0);

        assert_eq!(a.emissive_power, 7.0);
        assert_eq!(b.emissive_power, 2.0);
        assert_eq!(b.small_iterations, 3);
        assert_eq!(b.large_frequency, [3.0, 1.0]);
    }
}
