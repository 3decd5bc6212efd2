//! An instanced cuboid renderer.

use crate::camera::Camera3d;
use crate::color;
use crate::context::Context;
use crate::light::Lighting;
use crate::procedural;
use crate::scene::SceneObject;
use bytemuck::{Pod, Zeroable};

/// Vertex of the unit cube.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct CuboidVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// Frame uniforms for block rendering.
/// Layout must match blocks.wgsl FrameUniforms struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
    /// Direction the light travels in xyz, material shininess in w.
    pub light_dir: [f32; 4],
    pub light_color: [f32; 4],
    pub ambient: [f32; 4],
}

impl FrameUniforms {
    /// Packs the camera and lighting state of the current frame.
    pub fn new(camera: &dyn Camera3d, lighting: &Lighting) -> Self {
        let light_dir = lighting.sun.direction();
        let light_color = color::scaled_rgb(lighting.sun.color, lighting.sun.intensity);
        let ambient = color::scaled_rgb(lighting.ambient, 1.0);

        FrameUniforms {
            view_proj: camera.transformation().to_cols_array_2d(),
            eye: camera.eye().extend(1.0).to_array(),
            light_dir: light_dir.extend(lighting.shininess).to_array(),
            light_color: [light_color[0], light_color[1], light_color[2], 1.0],
            ambient: [ambient[0], ambient[1], ambient[2], 1.0],
        }
    }
}

/// Per-block data for the storage buffer (center + extents + color).
/// Layout must match blocks.wgsl BlockData struct.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BlockData {
    pub center: [f32; 4],
    pub extents: [f32; 4],
    pub color: [f32; 4],
}

impl BlockData {
    /// The GPU view of an object, with its current display color.
    pub fn from_object(object: &SceneObject) -> Self {
        let c = object.color();
        BlockData {
            center: object.position().extend(1.0).to_array(),
            extents: object.extents().extend(0.0).to_array(),
            color: [c.r, c.g, c.b, c.a],
        }
    }
}

/// Draws every block of the scene as a lit cuboid, in one instanced draw call.
pub struct BlockRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    num_indices: u32,
    frame_uniform_buffer: wgpu::Buffer,
    block_storage_buffer: wgpu::Buffer,
    block_capacity: usize,
    blocks: Vec<BlockData>,
}

impl BlockRenderer {
    /// Creates the pipeline and the cube geometry.
    pub fn new(ctxt: &Context) -> BlockRenderer {
        let bind_group_layout = ctxt
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("block_renderer_bind_group_layout"),
                entries: &[
                    // Frame uniforms (binding 0)
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // Block data storage buffer (binding 1)
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: true },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let pipeline_layout = ctxt
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("block_renderer_pipeline_layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let shader = ctxt.create_shader_module(
            Some("block_renderer_shader"),
            include_str!("../builtin/blocks.wgsl"),
        );

        let vertex_attributes = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        let pipeline = ctxt
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("block_renderer_pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<CuboidVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &vertex_attributes,
                    }],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: ctxt.surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: Some(wgpu::Face::Back),
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: Context::depth_format(),
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            });

        let mesh = procedural::unit_cuboid();
        let vertices: Vec<CuboidVertex> = mesh
            .coords
            .iter()
            .zip(mesh.normals.iter())
            .map(|(p, n)| CuboidVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();
        let indices: Vec<u16> = mesh.flat_indices().into_iter().map(|i| i as u16).collect();

        let vertex_buffer = ctxt.create_buffer_init(
            Some("block_renderer_vertex_buffer"),
            bytemuck::cast_slice(&vertices),
            wgpu::BufferUsages::VERTEX,
        );
        let index_buffer = ctxt.create_buffer_init(
            Some("block_renderer_index_buffer"),
            bytemuck::cast_slice(&indices),
            wgpu::BufferUsages::INDEX,
        );

        let frame_uniform_buffer = ctxt.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("block_renderer_frame_uniform_buffer"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let block_capacity = 16;
        let block_storage_buffer = Self::create_storage_buffer(ctxt, block_capacity);

        BlockRenderer {
            pipeline,
            bind_group_layout,
            vertex_buffer,
            index_buffer,
            num_indices: mesh.num_triangles() as u32 * 3,
            frame_uniform_buffer,
            block_storage_buffer,
            block_capacity,
            blocks: Vec::new(),
        }
    }

    fn create_storage_buffer(ctxt: &Context, capacity: usize) -> wgpu::Buffer {
        ctxt.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("block_renderer_storage_buffer"),
            size: (std::mem::size_of::<BlockData>() * capacity) as u64,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn ensure_storage_buffer_capacity(&mut self, ctxt: &Context, needed: usize) {
        if needed > self.block_capacity {
            let new_capacity = needed.next_power_of_two();
            self.block_storage_buffer = Self::create_storage_buffer(ctxt, new_capacity);
            self.block_capacity = new_capacity;
        }
    }

    fn create_bind_group(&self, ctxt: &Context) -> wgpu::BindGroup {
        ctxt.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("block_renderer_bind_group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: self.frame_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: self.block_storage_buffer.as_entire_binding(),
                },
            ],
        })
    }

    /// Uploads the current state of `objects` and draws them.
    pub fn render(
        &mut self,
        ctxt: &Context,
        camera: &dyn Camera3d,
        lighting: &Lighting,
        objects: &[SceneObject],
        render_pass: &mut wgpu::RenderPass<'_>,
    ) {
        if objects.is_empty() {
            return;
        }

        let frame_uniforms = FrameUniforms::new(camera, lighting);
        ctxt.write_buffer(
            &self.frame_uniform_buffer,
            0,
            bytemuck::bytes_of(&frame_uniforms),
        );

        self.blocks.clear();
        self.blocks.extend(objects.iter().map(BlockData::from_object));
        self.ensure_storage_buffer_capacity(ctxt, self.blocks.len());
        ctxt.write_buffer(
            &self.block_storage_buffer,
            0,
            bytemuck::cast_slice(&self.blocks),
        );

        let bind_group = self.create_bind_group(ctxt);

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        render_pass.draw_indexed(0..self.num_indices, 0, 0..self.blocks.len() as u32);
    }
}
