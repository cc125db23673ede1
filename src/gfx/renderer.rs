//! Forward renderer for house graphs
//!
//! Two passes per frame: a depth-only shadow pass from the rig's key light,
//! then the main pass (opaque parts first, then transparent glass). GPU
//! resources for each part are created lazily the first time that part is
//! prepared, so the house graph itself stays a plain CPU-side structure.

use std::sync::Arc;

use cgmath::Matrix4;
use wgpu::util::DeviceExt;

use crate::engine::GpuEngine;
use crate::gfx::camera::CameraUniform;
use crate::gfx::lights::{LightRig, LightsUniform};
use crate::gfx::material::MaterialUniform;
use crate::gfx::texture::TextureResource;
use crate::gfx::vertex::Vertex3D;
use crate::house::graph::Part;
use crate::wgpu_utils::{
    binding_types, BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc,
    UniformBuffer,
};

/// Global uniform buffer content
///
/// Must match the `Globals` struct in both shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct GlobalUniforms {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    lights: LightsUniform,
}

/// Per-part model transform uniform
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct TransformUniform {
    model: [[f32; 4]; 4],
}

/// GPU half of a [`Part`]
///
/// Created on first draw and owned by the part so window churn (parts being
/// dropped and re-created on parameter changes) cleans up after itself.
pub struct PartGpu {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    transform_ubo: UniformBuffer<TransformUniform>,
    transform_bind_group: wgpu::BindGroup,
    material_ubo: UniformBuffer<MaterialUniform>,
    material_bind_group: wgpu::BindGroup,
}

/// Pipelines, layouts, and global bindings for one viewport
pub struct SceneRenderer {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,

    rig: LightRig,
    global_ubo: UniformBuffer<GlobalUniforms>,
    global_bind_group: wgpu::BindGroup,

    transform_layout: BindGroupLayoutWithDesc,
    material_layout: BindGroupLayoutWithDesc,

    shadow_map: TextureResource,
    shadow_bind_group: wgpu::BindGroup,

    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    shadow_pipeline: wgpu::RenderPipeline,
}

impl SceneRenderer {
    /// Creates the renderer for a surface of the given format
    pub fn new(engine: &GpuEngine, surface_format: wgpu::TextureFormat, rig: LightRig) -> Self {
        let device = engine.device.clone();
        let queue = engine.queue.clone();

        let global_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(&device, "Globals Layout");
        let transform_layout = BindGroupLayoutBuilder::new()
            .next_binding_vertex(binding_types::uniform())
            .create(&device, "Transform Layout");
        let material_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::uniform())
            .create(&device, "Material Layout");
        let shadow_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::depth_texture_2d())
            .next_binding_fragment(binding_types::sampler(wgpu::SamplerBindingType::Comparison))
            .create(&device, "Shadow Layout");

        let global_ubo = UniformBuffer::new(&device);
        let global_bind_group = BindGroupBuilder::new(&global_layout)
            .resource(global_ubo.binding_resource())
            .create(&device, "Global Bind Group");

        let shadow_map = TextureResource::create_shadow_map(&device, rig.shadow_map_size);
        let shadow_bind_group = BindGroupBuilder::new(&shadow_layout)
            .texture(&shadow_map.view)
            .sampler(&shadow_map.sampler)
            .create(&device, "Shadow Bind Group");

        let house_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("House Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("house.wgsl").into()),
        });
        let shadow_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shadow Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shadow.wgsl").into()),
        });

        let main_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Main Pipeline Layout"),
            bind_group_layouts: &[
                &global_layout.layout,
                &transform_layout.layout,
                &material_layout.layout,
                &shadow_layout.layout,
            ],
            push_constant_ranges: &[],
        });
        let shadow_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Shadow Pipeline Layout"),
                bind_group_layouts: &[&global_layout.layout, &transform_layout.layout],
                push_constant_ranges: &[],
            });

        let color_pipeline = |label: &str, blend: wgpu::BlendState, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&main_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &house_shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex3D::desc()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &house_shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: Some(wgpu::Face::Back),
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: TextureResource::DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let opaque_pipeline = color_pipeline("OPAQUE", wgpu::BlendState::REPLACE, true);
        let transparent_pipeline =
            color_pipeline("TRANSPARENT", wgpu::BlendState::ALPHA_BLENDING, false);

        // Depth-only pass; no culling so thin parts cannot leak light.
        let shadow_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("SHADOW"),
            layout: Some(&shadow_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shadow_shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex3D::desc()],
                compilation_options: Default::default(),
            },
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: TextureResource::DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            device,
            queue,
            rig,
            global_ubo,
            global_bind_group,
            transform_layout,
            material_layout,
            shadow_map,
            shadow_bind_group,
            opaque_pipeline,
            transparent_pipeline,
            shadow_pipeline,
        }
    }

    /// Uploads the per-frame globals: camera, light rig, shadow projection
    pub fn update_globals(&mut self, camera: CameraUniform) {
        let key = self.rig.key_light_position();
        let light_view = Matrix4::look_at_rh(
            cgmath::Point3::new(key[0], key[1], key[2]),
            cgmath::Point3::new(0.0, 0.0, 0.0),
            cgmath::Vector3::unit_y(),
        );
        let light_proj = cgmath::ortho(-25.0, 25.0, -25.0, 25.0, 5.0, 50.0);

        self.global_ubo.update_content(
            &self.queue,
            GlobalUniforms {
                view_position: camera.view_position,
                view_proj: camera.view_proj,
                light_view_proj: (light_proj * light_view).into(),
                lights: self.rig.uniform(),
            },
        );
    }

    /// Ensures the part has GPU resources and uploads its current transform
    ///
    /// `model` is the fully composed world transform (house root times the
    /// part's local transform).
    pub fn prepare_part(&self, part: &mut Part, model: Matrix4<f32>) {
        if part.gpu.is_none() {
            part.gpu = Some(self.init_part_gpu(part));
        }

        let gpu = part.gpu.as_mut().expect("gpu resources just initialized");
        gpu.transform_ubo
            .update_content(&self.queue, TransformUniform {
                model: model.into(),
            });
        gpu.material_ubo
            .update_content(&self.queue, part.material.uniform());
    }

    fn init_part_gpu(&self, part: &Part) -> PartGpu {
        let vertices = part.geometry.to_vertices();
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Vertex Buffer: {}", part.name)),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Index Buffer: {}", part.name)),
                contents: bytemuck::cast_slice(&part.geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let transform_ubo = UniformBuffer::new(&self.device);
        let transform_bind_group = BindGroupBuilder::new(&self.transform_layout)
            .resource(transform_ubo.binding_resource())
            .create(&self.device, "Part Transform Bind Group");

        let material_ubo = UniformBuffer::new(&self.device);
        let material_bind_group = BindGroupBuilder::new(&self.material_layout)
            .resource(material_ubo.binding_resource())
            .create(&self.device, "Part Material Bind Group");

        PartGpu {
            vertex_buffer,
            index_buffer,
            index_count: part.geometry.indices.len() as u32,
            transform_ubo,
            transform_bind_group,
            material_ubo,
            material_bind_group,
        }
    }

    /// Renders the shadow casters into the shadow map
    pub fn shadow_pass(&self, encoder: &mut wgpu::CommandEncoder, casters: &[&Part]) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.shadow_map.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_pipeline(&self.shadow_pipeline);
        pass.set_bind_group(0, &self.global_bind_group, &[]);

        for part in casters {
            let Some(gpu) = part.gpu.as_ref() else {
                continue;
            };
            pass.set_bind_group(1, &gpu.transform_bind_group, &[]);
            pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
            pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..gpu.index_count, 0, 0..1);
        }
    }

    /// Renders the main pass: opaque parts first, then transparent ones
    pub fn main_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
        background: wgpu::Color,
        opaque: &[&Part],
        transparent: &[&Part],
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(background),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        pass.set_bind_group(0, &self.global_bind_group, &[]);
        pass.set_bind_group(3, &self.shadow_bind_group, &[]);

        pass.set_pipeline(&self.opaque_pipeline);
        for part in opaque {
            Self::draw_part(&mut pass, part);
        }

        pass.set_pipeline(&self.transparent_pipeline);
        for part in transparent {
            Self::draw_part(&mut pass, part);
        }
    }

    fn draw_part(pass: &mut wgpu::RenderPass<'_>, part: &Part) {
        let Some(gpu) = part.gpu.as_ref() else {
            return;
        };
        pass.set_bind_group(1, &gpu.transform_bind_group, &[]);
        pass.set_bind_group(2, &gpu.material_bind_group, &[]);
        pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..gpu.index_count, 0, 0..1);
    }
}
