use wgpu::util::DeviceExt;

use crate::device::{
    capture_validation, log_uncaptured_errors, GraphicsHost, RenderTarget, OUTPUT_FORMAT,
};
use crate::frame::{FramePlan, SlotBuffer};
use crate::geometry::{BufferData, Geometry, VertexLayout};
use crate::shader::{check_stage_link, compile_stage, CompiledStage, ShaderSources, ShaderStage};
use crate::{RenderError, Result};

use super::procedure::FrameProcedure;
use super::render_pipeline::create_render_pipeline;
use super::FrameConfig;

/// Builds a ready-to-draw frame procedure.
///
/// Stages run strictly in order: capability check, adapter, device, target
/// configuration, shader compilation, layout validation, vertex upload and
/// pipeline creation. The first failure aborts the build; nothing is retried.
pub async fn initialize<H, T>(host: &H, mut target: T, config: FrameConfig) -> Result<FrameProcedure<T>>
where
    H: GraphicsHost,
    T: RenderTarget,
{
    let FrameConfig {
        label,
        shaders,
        geometry,
        device: device_init,
        topology,
    } = config;

    check_capability(host)?;

    let adapter = host.request_adapter(target.compatible_surface()).await?;
    let info = adapter.get_info();
    log::info!("{label}: using adapter `{}` ({:?})", info.name, info.backend);

    let device_label = format!("{label} device");
    let (device, queue) = adapter
        .request_device(&device_init.device_descriptor(Some(&device_label), &adapter))
        .await
        .map_err(|e| RenderError::DeviceRequest(e.to_string()))?;
    log_uncaptured_errors(&device, &label);
    log::debug!("{label}: device and queue created");

    let format = target.configure(&adapter, &device, OUTPUT_FORMAT)?;
    log::info!("{label}: rendering to {format:?}");

    let (vertex, fragment) = compile_pair(&shaders)?;

    let layout = check_geometry(&geometry, &vertex)?;
    let data = geometry.buffer_data();
    layout.check_buffers(&data, geometry.vertex_count())?;

    let buffers = capture_validation(&device, "vertex upload", || upload(&device, &label, &data))?;
    log::debug!("{label}: uploaded {} vertex buffer(s)", buffers.len());

    let pipeline = capture_validation(&device, "pipeline creation", || {
        create_render_pipeline(&device, &label, &vertex, &fragment, &layout, format, topology)
    })?;
    log::debug!("{label}: pipeline created ({topology:?})");

    let plan = FramePlan::new(&layout, geometry.vertex_count());
    let uploaded: Vec<u32> = buffers.iter().map(|b| b.slot).collect();
    plan.check_bindings(&uploaded)?;

    Ok(FrameProcedure {
        label,
        device,
        queue,
        target,
        format,
        pipeline,
        buffers,
        plan,
    })
}

/// Fails with `CapabilityUnavailable` when the host exposes no usable backend.
///
/// Hosts that must create a surface before calling `initialize` run this first.
pub fn check_capability<H: GraphicsHost>(host: &H) -> Result<()> {
    if host.available_backends().is_empty() {
        log::warn!("graphics capability unavailable; not requesting an adapter");
        return Err(RenderError::CapabilityUnavailable);
    }
    Ok(())
}

/// Compiles both stages and checks they link and produce a color.
pub fn compile_pair(shaders: &ShaderSources) -> Result<(CompiledStage, CompiledStage)> {
    let vertex = compile_stage(shaders, ShaderStage::Vertex)?;
    let fragment = compile_stage(shaders, ShaderStage::Fragment)?;

    check_stage_link(vertex.interface(), fragment.interface())?;
    if fragment.interface().output(0).is_none() {
        return Err(RenderError::validation(
            "fragment shader writes no color to @location(0)",
        ));
    }

    Ok((vertex, fragment))
}

/// Validates geometry and its layout against the vertex stage.
pub fn check_geometry(geometry: &Geometry, vertex: &CompiledStage) -> Result<VertexLayout> {
    geometry.validate()?;
    let layout = geometry.layout();
    layout.validate()?;
    layout.check_shader_inputs(vertex.interface())?;
    Ok(layout)
}

fn upload(device: &wgpu::Device, label: &str, data: &[BufferData]) -> Vec<SlotBuffer> {
    data.iter()
        .map(|d| SlotBuffer {
            slot: d.slot,
            buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} vertex buffer {}", d.slot)),
                contents: &d.contents,
                usage: wgpu::BufferUsages::VERTEX,
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::{ShaderLanguage, TriangleStyle};

    #[test]
    fn builtin_pairs_link() {
        for style in TriangleStyle::ALL {
            for language in ShaderLanguage::ALL {
                compile_pair(&style.sources(language)).unwrap();
            }
        }
    }

    #[test]
    fn builtin_geometry_matches_its_shaders() {
        for style in TriangleStyle::ALL {
            for language in ShaderLanguage::ALL {
                let (vertex, _) = compile_pair(&style.sources(language)).unwrap();
                check_geometry(&Geometry::for_style(style), &vertex).unwrap();
            }
        }
    }

    #[test]
    fn colored_shaders_reject_position_only_geometry() {
        let sources = TriangleStyle::VertexColored.sources(ShaderLanguage::Wgsl);
        let (vertex, _) = compile_pair(&sources).unwrap();
        let err = check_geometry(&Geometry::triangle(), &vertex).unwrap_err();
        assert!(matches!(err, RenderError::GpuValidation(_)));
    }

    #[test]
    fn embedded_shaders_reject_buffered_geometry() {
        let sources = TriangleStyle::Embedded.sources(ShaderLanguage::Glsl);
        let (vertex, _) = compile_pair(&sources).unwrap();
        assert!(check_geometry(&Geometry::triangle(), &vertex).is_err());
    }

    #[test]
    fn mismatched_varyings_fail_to_link() {
        let colored = TriangleStyle::VertexColored.sources(ShaderLanguage::Wgsl);
        let solid = TriangleStyle::Solid.sources(ShaderLanguage::Wgsl);
        // Position-only vertex stage feeding a fragment stage that reads a color.
        let mixed = ShaderSources::wgsl(solid.vertex, colored.fragment);
        assert!(matches!(compile_pair(&mixed), Err(RenderError::GpuValidation(_))));
    }

    #[test]
    fn fragment_without_color_output_is_rejected() {
        let solid = TriangleStyle::Solid.sources(ShaderLanguage::Glsl);
        let silent = ShaderSources::glsl(solid.vertex, "#version 450\nvoid main() {}\n");
        let err = compile_pair(&silent).unwrap_err();
        assert!(err.to_string().contains("@location(0)"), "{err}");
    }
}
