use crate::geometry::VertexLayout;
use crate::shader::{CompiledStage, ENTRY_POINT};

/// Creates the render pipeline for one vertex/fragment pair.
///
/// The caller has already checked `layout` against the vertex stage and the
/// two stages against each other.
pub(crate) fn create_render_pipeline(
    device: &wgpu::Device,
    label: &str,
    vertex: &CompiledStage,
    fragment: &CompiledStage,
    layout: &VertexLayout,
    format: wgpu::TextureFormat,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    let vs_module = vertex.create_module(device, &format!("{label} vertex shader"));
    let fs_module = fragment.create_module(device, &format!("{label} fragment shader"));

    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} pipeline layout")),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    let buffers = layout.to_wgpu();

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} pipeline")),
        layout: Some(&pipeline_layout),

        vertex: wgpu::VertexState {
            module: &vs_module,
            entry_point: Some(ENTRY_POINT),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: &fs_module,
            entry_point: Some(ENTRY_POINT),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },

        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
