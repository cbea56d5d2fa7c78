//! WebGPU renderer: one depth-tested, lit mesh over a transparent canvas.

use crate::constants::{light_direction, AMBIENT_INTENSITY, DIRECTIONAL_INTENSITY};
use ar_core::ModelData;
use glam::{Mat3, Mat4};
use std::ops::Range;
use web_sys as web;
use wgpu::util::DeviceExt;

mod helpers;

static MODEL_WGSL: &str = include_str!("../shaders/model.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
    light_dir: [f32; 4],
    light: [f32; 4],
}

struct GpuBatch {
    indices: Range<u32>,
    // None draws with the white fallback
    texture: Option<usize>,
}

struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    textures: Vec<wgpu::BindGroup>,
    batches: Vec<GpuBatch>,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_texture: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    mesh: Option<GpuMesh>,
    width: u32,
    height: u32,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Rgba8Unorm
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The video shows through wherever nothing is drawn.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            log::warn!("[render] premultiplied alpha unavailable; canvas may be opaque");
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("model_shader"),
            source: wgpu::ShaderSource::Wgsl(MODEL_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
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
        let texture_layout = helpers::texture_bind_group_layout(&device);
        // glTF defaults: linear filtering, repeat wrapping
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("base_color_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let white = helpers::create_rgba_texture(&device, &queue, 1, 1, &[255; 4]);
        let white_texture =
            helpers::texture_bind_group(&device, &texture_layout, &white, &sampler);
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("mesh_pl"),
            bind_group_layouts: &[&bgl, &texture_layout],
            push_constant_ranges: &[],
        });
        let pipeline = helpers::make_mesh_pipeline(&device, &pipeline_layout, &shader, format);
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let depth_view = helpers::create_depth_view(&device, width, height);

        log::info!("[render] surface {}x{} format={:?} alpha={:?}", width, height, format, alpha_mode);
        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            uniform_buffer,
            bind_group,
            texture_layout,
            sampler,
            white_texture,
            depth_view,
            mesh: None,
            width,
            height,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = helpers::create_depth_view(&self.device, self.width, self.height);
    }

    /// Replace the GPU copy of the displayed model; `None` clears it.
    pub fn upload_model(&mut self, model: Option<&ModelData>) {
        self.mesh = model.filter(|m| !m.mesh.indices.is_empty()).map(|model| {
            let m = &model.mesh;
            let vertices = helpers::interleave(m);
            let vertex_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_vertices"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                });
            let index_buffer = self
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("mesh_indices"),
                    contents: bytemuck::cast_slice(&m.indices),
                    usage: wgpu::BufferUsages::INDEX,
                });

            let mut textures = Vec::new();
            // glTF image index -> slot in `textures`
            let mut slots: Vec<Option<usize>> = vec![None; model.images.len()];
            for index in m.used_images() {
                let Some(image) = model.image_for(Some(index)) else {
                    continue;
                };
                match helpers::create_image_texture(&self.device, &self.queue, image) {
                    Some(view) => {
                        textures.push(helpers::texture_bind_group(
                            &self.device,
                            &self.texture_layout,
                            &view,
                            &self.sampler,
                        ));
                        slots[index] = Some(textures.len() - 1);
                    }
                    None => log::warn!(
                        "[render] image {} ({}x{}) not uploadable; drawing untextured",
                        index,
                        image.width,
                        image.height
                    ),
                }
            }
            let batches = m
                .batches
                .iter()
                .map(|b| GpuBatch {
                    indices: b.first_index..b.first_index + b.index_count,
                    texture: b.image.and_then(|i| slots.get(i).copied().flatten()),
                })
                .collect();

            GpuMesh {
                vertex_buffer,
                index_buffer,
                index_count: m.indices.len() as u32,
                textures,
                batches,
            }
        });
        if let Some(m) = &self.mesh {
            log::info!(
                "[render] uploaded mesh with {} indices, {} batches, {} textures",
                m.index_count,
                m.batches.len(),
                m.textures.len()
            );
        }
    }

    pub fn render(&mut self, view_proj: Mat4, model: Mat4) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let normal_matrix = Mat4::from_mat3(Mat3::from_mat4(model).inverse().transpose());
        let uniforms = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            normal_matrix: normal_matrix.to_cols_array_2d(),
            light_dir: {
                let [x, y, z] = light_direction();
                [x, y, z, 0.0]
            },
            light: [AMBIENT_INTENSITY, DIRECTIONAL_INTENSITY, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(mesh) = &self.mesh {
                rpass.set_pipeline(&self.pipeline);
                rpass.set_bind_group(0, &self.bind_group, &[]);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                for batch in &mesh.batches {
                    let texture = batch
                        .texture
                        .and_then(|i| mesh.textures.get(i))
                        .unwrap_or(&self.white_texture);
                    rpass.set_bind_group(1, texture, &[]);
                    rpass.draw_indexed(batch.indices.clone(), 0, 0..1);
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
