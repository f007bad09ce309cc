//! Shaded quad preview pane.
//!
//! The preview draws a single quad through an egui paint callback; the
//! fragment stage in `preview.wgsl` mirrors the Cook-Torrance evaluator of
//! the `glimt-bxdf` crate. All GPU resources are created once and live in
//! the egui-wgpu callback resources until the render state is torn down.

use crate::error::RuntimeError;
use bxdf::{CookTorranceBrdf, MaterialParams, PointLight};
use glam::Vec3;
use wgpu::util::DeviceExt;

/// Camera position, fixed.
const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 3.0);
/// Point light position, fixed.
const LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
/// Point light colour, fixed.
const LIGHT_COLOUR: Vec3 = Vec3::new(1.0, 1.0, 1.0);

/// Vertex of the preview quad.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    normal: [f32; 3],
}

/// The quad spans the full preview surface in normalised device
/// coordinates, normals facing the camera.
const QUAD_VERTICES: [Vertex; 4] = [
    Vertex { position: [-1.0, -1.0, 0.0], normal: [0.0, 0.0, 1.0] },
    Vertex { position: [1.0, -1.0, 0.0], normal: [0.0, 0.0, 1.0] },
    Vertex { position: [1.0, 1.0, 0.0], normal: [0.0, 0.0, 1.0] },
    Vertex { position: [-1.0, 1.0, 0.0], normal: [0.0, 0.0, 1.0] },
];

/// Two counter-clockwise triangles covering the quad.
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Uniform buffer contents. The layout matches `Uniforms` in
/// `preview.wgsl`: vec3 fields are aligned to 16 bytes with the scalars
/// packed into their tails.
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct Uniforms {
    cam_pos: [f32; 3],
    roughness: f32,
    light_pos: [f32; 3],
    metallic: f32,
    light_colour: [f32; 3],
    _padding: f32,
}

impl Uniforms {
    fn new(params: MaterialParams) -> Self {
        Self {
            cam_pos: CAMERA_POSITION.to_array(),
            roughness: params.roughness,
            light_pos: LIGHT_POSITION.to_array(),
            metallic: params.metallic,
            light_colour: LIGHT_COLOUR.to_array(),
            _padding: 0.0,
        }
    }
}

/// One-time GPU resources for the preview.
pub struct PreviewResources {
    /// `None` when the shader failed to compile or the pipeline failed to
    /// link; painting is skipped in that case and the frame stays cleared.
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
}

impl PreviewResources {
    /// Creates the buffers, bind group and render pipeline of the preview.
    ///
    /// A pipeline that does not pass validation is logged and discarded;
    /// the remaining resources still exist so later paints skip drawing
    /// instead of crashing.
    pub fn new(device: &wgpu::Device, target_format: wgpu::TextureFormat) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("preview_vertex_buffer"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("preview_index_buffer"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("preview_uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(MaterialParams::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("preview_bind_group_layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("preview_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let pipeline = match create_pipeline(device, &bind_group_layout, target_format) {
            Ok(pipeline) => Some(pipeline),
            Err(RuntimeError::Rhi(err)) if err.is_validation_error() => {
                log::error!("Preview shader failed validation, skipping drawing: {}", err);
                None
            },
            Err(err) => {
                log::error!("Failed to create the preview pipeline: {}", err);
                None
            },
        };
        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
        }
    }
}

/// Builds the render pipeline under a validation error scope so that a
/// shader that fails to compile or link surfaces as an error instead of a
/// panic.
fn create_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    target_format: wgpu::TextureFormat,
) -> Result<wgpu::RenderPipeline, RuntimeError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("preview_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("preview.wgsl").into()),
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("preview_pipeline_layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });
    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("preview_pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
            }],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: target_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            conservative: false,
            unclipped_depth: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    });
    match pollster::block_on(device.pop_error_scope()) {
        None => Ok(pipeline),
        Some(err) => Err(err.into()),
    }
}

/// The preview pane.
#[derive(Default)]
pub struct MaterialPreview;

impl MaterialPreview {
    /// Shows the preview, filling the available space with the shaded quad.
    ///
    /// Hovering the quad shows the linear radiance at the cursor computed
    /// by the CPU evaluator.
    pub fn ui(&mut self, ui: &mut egui::Ui, params: MaterialParams) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        ui.painter().add(egui_wgpu::Callback::new_paint_callback(
            rect,
            PreviewCallback {
                uniforms: Uniforms::new(params),
            },
        ));
        if let Some(pos) = response.hover_pos() {
            if rect.width() > 0.0 && rect.height() > 0.0 {
                let frag_pos = Vec3::new(
                    (pos.x - rect.left()) / rect.width() * 2.0 - 1.0,
                    1.0 - (pos.y - rect.top()) / rect.height() * 2.0,
                    0.0,
                );
                let radiance = CookTorranceBrdf::new(params).eval(
                    frag_pos,
                    Vec3::Z,
                    CAMERA_POSITION,
                    &PointLight {
                        position: LIGHT_POSITION,
                        colour: LIGHT_COLOUR,
                    },
                );
                response.on_hover_ui_at_pointer(|ui| {
                    ui.label(format!(
                        "radiance: ({:.4}, {:.4}, {:.4})",
                        radiance.x, radiance.y, radiance.z
                    ));
                });
            }
        }
    }
}

/// Per-frame paint callback carrying the uniform snapshot for the frame.
struct PreviewCallback {
    uniforms: Uniforms,
}

impl egui_wgpu::CallbackTrait for PreviewCallback {
    fn prepare(
        &self,
        _device: &wgpu::Device,
        queue: &wgpu::Queue,
        _screen_descriptor: &egui_wgpu::ScreenDescriptor,
        _egui_encoder: &mut wgpu::CommandEncoder,
        callback_resources: &mut egui_wgpu::CallbackResources,
    ) -> Vec<wgpu::CommandBuffer> {
        if let Some(resources) = callback_resources.get::<PreviewResources>() {
            queue.write_buffer(
                &resources.uniform_buffer,
                0,
                bytemuck::bytes_of(&self.uniforms),
            );
        }
        Vec::new()
    }

    fn paint(
        &self,
        _info: egui::PaintCallbackInfo,
        render_pass: &mut wgpu::RenderPass<'static>,
        callback_resources: &egui_wgpu::CallbackResources,
    ) {
        let Some(resources) = callback_resources.get::<PreviewResources>() else {
            return;
        };
        // An unlinked pipeline must never be bound; leave the frame cleared.
        let Some(pipeline) = resources.pipeline.as_ref() else {
            return;
        };
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &resources.bind_group, &[]);
        render_pass.set_vertex_buffer(0, resources.vertex_buffer.slice(..));
        render_pass.set_index_buffer(resources.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_match_the_wgsl_layout() {
        // Three vec3s padded to 16 bytes each.
        assert_eq!(std::mem::size_of::<Uniforms>(), 48);
        assert_eq!(std::mem::offset_of!(Uniforms, roughness), 12);
        assert_eq!(std::mem::offset_of!(Uniforms, light_pos), 16);
        assert_eq!(std::mem::offset_of!(Uniforms, metallic), 28);
        assert_eq!(std::mem::offset_of!(Uniforms, light_colour), 32);
    }

    #[test]
    fn uniforms_carry_the_material_parameters() {
        let uniforms = Uniforms::new(MaterialParams::new(0.25, 0.75));
        assert_eq!(uniforms.roughness, 0.25);
        assert_eq!(uniforms.metallic, 0.75);
        assert_eq!(uniforms.cam_pos, CAMERA_POSITION.to_array());
        assert_eq!(uniforms.light_pos, LIGHT_POSITION.to_array());
        assert_eq!(uniforms.light_colour, LIGHT_COLOUR.to_array());
    }

    #[test]
    fn quad_covers_the_preview_surface_facing_the_camera() {
        assert_eq!(QUAD_INDICES.len(), 6);
        for index in QUAD_INDICES {
            assert!((index as usize) < QUAD_VERTICES.len());
        }
        for vertex in QUAD_VERTICES {
            assert_eq!(vertex.position[2], 0.0);
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
    }
}
