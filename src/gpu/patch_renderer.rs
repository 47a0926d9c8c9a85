//! Two-pass patch renderer: shaded fill, then an offset wireframe.
//!
//! Pipelines are built once from the fill and line [`DrawPass`]es. When
//! the device supports `POLYGON_MODE_LINE` the wireframe re-rasterizes
//! the triangle list as lines with the pass's depth bias; otherwise it
//! draws the grid line list without bias (wgpu rejects bias on line
//! topologies).

use glam::Mat4;

use super::dynamic_buffer::TypedBuffer;
use super::render_context::RenderContext;
use crate::frame::{DepthBias, DepthCompare, DrawPass, PolygonFill, RenderDescriptor};
use crate::tessellation::{PatchTessellator, TessellatedVertex};

/// Depth buffer format.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Remaps OpenGL clip depth `[-w, w]` to wgpu's `[0, w]`.
#[rustfmt::skip]
const GL_TO_WGPU_DEPTH: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

/// Clip matrix in wgpu's depth convention.
#[must_use]
pub fn wgpu_clip(clip: Mat4) -> Mat4 {
    GL_TO_WGPU_DEPTH * clip
}

/// Per-pass uniform block, matching `PassUniform` in `patch.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PassUniform {
    /// Model-to-clip transform in wgpu depth convention.
    pub clip: [[f32; 4]; 4],
    /// Model-to-world transform.
    pub model: [[f32; 4]; 4],
    /// Eye position (w unused).
    pub eye: [f32; 4],
    /// Multiplies the shaded color.
    pub color_scale: [f32; 4],
}

impl PassUniform {
    /// Uniform contents for one pass of `frame`.
    #[must_use]
    pub fn new(frame: &RenderDescriptor, pass: &DrawPass) -> Self {
        Self {
            clip: wgpu_clip(frame.clip).to_cols_array_2d(),
            model: frame.model.to_cols_array_2d(),
            eye: frame.eye.extend(1.0).to_array(),
            color_scale: pass.color_scale.to_array(),
        }
    }
}

fn compare_function(compare: DepthCompare) -> wgpu::CompareFunction {
    match compare {
        DepthCompare::Less => wgpu::CompareFunction::Less,
        DepthCompare::LessEqual => wgpu::CompareFunction::LessEqual,
    }
}

fn depth_bias_state(bias: Option<DepthBias>) -> wgpu::DepthBiasState {
    bias.map_or_else(wgpu::DepthBiasState::default, |b| wgpu::DepthBiasState {
        constant: b.constant,
        slope_scale: b.slope_scale,
        clamp: 0.0,
    })
}

/// How the wireframe pass is rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireframeTopology {
    /// Triangle list with `PolygonMode::Line`.
    PolygonLine,
    /// Grid edges as a line list.
    LineList,
}

impl WireframeTopology {
    /// Pick the topology the device supports.
    #[must_use]
    pub fn for_device(polygon_mode_line: bool) -> Self {
        if polygon_mode_line {
            Self::PolygonLine
        } else {
            Self::LineList
        }
    }
}

fn primitive_state(
    pass: &DrawPass,
    wire: WireframeTopology,
) -> wgpu::PrimitiveState {
    let (topology, polygon_mode, cull_mode) = match (pass.polygon, wire) {
        (PolygonFill::Fill, _) => (
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::PolygonMode::Fill,
            Some(wgpu::Face::Back),
        ),
        (PolygonFill::Line, WireframeTopology::PolygonLine) => (
            wgpu::PrimitiveTopology::TriangleList,
            wgpu::PolygonMode::Line,
            Some(wgpu::Face::Back),
        ),
        (PolygonFill::Line, WireframeTopology::LineList) => (
            wgpu::PrimitiveTopology::LineList,
            wgpu::PolygonMode::Fill,
            None,
        ),
    };
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode,
        unclipped_depth: false,
        polygon_mode,
        conservative: false,
    }
}

fn depth_stencil_state(
    pass: &DrawPass,
    wire: WireframeTopology,
) -> wgpu::DepthStencilState {
    let bias = match (pass.polygon, wire) {
        (PolygonFill::Line, WireframeTopology::LineList) => None,
        _ => pass.depth_bias,
    };
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: compare_function(pass.depth_compare),
        stencil: wgpu::StencilState::default(),
        bias: depth_bias_state(bias),
    }
}

/// One pipeline plus the uniform block it reads.
struct PassResources {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    polygon: PolygonFill,
}

/// GPU resources for drawing the tessellated mesh in two passes.
pub struct PatchRenderer {
    passes: Vec<PassResources>,
    wireframe: WireframeTopology,
    vertices: TypedBuffer<TessellatedVertex>,
    triangles: TypedBuffer<u32>,
    lines: TypedBuffer<u32>,
    uploaded_generation: Option<u64>,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
}

impl PatchRenderer {
    /// Build pipelines for `passes` and size targets to the surface.
    pub fn new(context: &RenderContext, passes: &[DrawPass]) -> Self {
        let device = &context.device;
        let wireframe = WireframeTopology::for_device(context.polygon_mode_line);

        let shader = device
            .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/patch.wgsl"));

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Patch Pass Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Patch Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let passes = passes
            .iter()
            .enumerate()
            .map(|(index, pass)| {
                let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some(&format!("Patch Pass {index} Uniform")),
                    size: size_of::<PassUniform>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM
                        | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group =
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some(&format!("Patch Pass {index} Bind Group")),
                        layout: &bind_group_layout,
                        entries: &[wgpu::BindGroupEntry {
                            binding: 0,
                            resource: uniform_buffer.as_entire_binding(),
                        }],
                    });
                PassResources {
                    pipeline: Self::create_pipeline(
                        context,
                        &shader,
                        &pipeline_layout,
                        pass,
                        wireframe,
                    ),
                    uniform_buffer,
                    bind_group,
                    polygon: pass.polygon,
                }
            })
            .collect();

        let usage_v = wgpu::BufferUsages::VERTEX;
        let usage_i = wgpu::BufferUsages::INDEX;
        let (depth_view, msaa_view) = Self::create_targets(context);

        Self {
            passes,
            wireframe,
            vertices: TypedBuffer::with_capacity(device, "Patch Vertices", 4096, usage_v),
            triangles: TypedBuffer::with_capacity(device, "Patch Triangles", 16384, usage_i),
            lines: TypedBuffer::with_capacity(device, "Patch Lines", 16384, usage_i),
            uploaded_generation: None,
            depth_view,
            msaa_view,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        shader: &wgpu::ShaderModule,
        layout: &wgpu::PipelineLayout,
        pass: &DrawPass,
        wireframe: WireframeTopology,
    ) -> wgpu::RenderPipeline {
        let label = match pass.polygon {
            PolygonFill::Fill => "Patch Fill Pipeline",
            PolygonFill::Line => "Patch Wireframe Pipeline",
        };

        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: size_of::<TessellatedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // position
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1, // normal
                },
            ],
        };

        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[vertex_layout],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: context.format(),
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: primitive_state(pass, wireframe),
                depth_stencil: Some(depth_stencil_state(pass, wireframe)),
                multisample: wgpu::MultisampleState {
                    count: context.sample_count,
                    ..Default::default()
                },
                multiview: None,
                cache: None,
            })
    }

    fn create_targets(
        context: &RenderContext,
    ) -> (wgpu::TextureView, Option<wgpu::TextureView>) {
        let (width, height) = context.size();
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = |label: &str, format: wgpu::TextureFormat| {
            context
                .device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some(label),
                    size,
                    mip_level_count: 1,
                    sample_count: context.sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        };

        let depth = texture("Patch Depth", DEPTH_FORMAT);
        let msaa = (context.sample_count > 1)
            .then(|| texture("Patch MSAA Color", context.format()));
        (depth, msaa)
    }

    /// Recreate the depth and MSAA targets after a surface resize.
    pub fn resize(&mut self, context: &RenderContext) {
        let (depth_view, msaa_view) = Self::create_targets(context);
        self.depth_view = depth_view;
        self.msaa_view = msaa_view;
    }

    /// Upload the tessellated mesh if it changed since the last upload.
    pub fn upload(&mut self, context: &RenderContext, tessellator: &PatchTessellator) {
        if self.uploaded_generation == Some(tessellator.generation()) {
            return;
        }
        let mesh = tessellator.mesh();
        let (device, queue) = (&context.device, &context.queue);
        let _ = self.vertices.write(device, queue, &mesh.vertices);
        let _ = self.triangles.write(device, queue, &mesh.triangles);
        let _ = self.lines.write(device, queue, &mesh.lines);
        self.uploaded_generation = Some(tessellator.generation());
    }

    /// Record both passes of `frame` into one render pass targeting
    /// `target`.
    pub fn encode(
        &self,
        context: &RenderContext,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        frame: &RenderDescriptor,
        clear: wgpu::Color,
    ) {
        for (resources, pass) in self.passes.iter().zip(&frame.passes) {
            let uniform = PassUniform::new(frame, pass);
            context.queue.write_buffer(
                &resources.uniform_buffer,
                0,
                bytemuck::bytes_of(&uniform),
            );
        }

        let (view, resolve_target) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(target)),
            None => (target, None),
        };
        let store = if resolve_target.is_some() {
            wgpu::StoreOp::Discard
        } else {
            wgpu::StoreOp::Store
        };

        let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("patch render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            ..Default::default()
        });

        if self.vertices.is_empty() {
            return;
        }
        rp.set_vertex_buffer(0, self.vertices.buffer().slice(..));

        for resources in &self.passes {
            let indices = match (resources.polygon, self.wireframe) {
                (PolygonFill::Line, WireframeTopology::LineList) => &self.lines,
                _ => &self.triangles,
            };
            rp.set_pipeline(&resources.pipeline);
            rp.set_bind_group(0, &resources.bind_group, &[]);
            rp.set_index_buffer(indices.buffer().slice(..), wgpu::IndexFormat::Uint32);
            rp.draw_indexed(0..indices.count() as u32, 0, 0..1);
        }
    }
}
