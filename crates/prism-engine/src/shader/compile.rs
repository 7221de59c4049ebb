use std::borrow::Cow;

use crate::{RenderError, Result};

use super::interface::StageInterface;
use super::{ShaderLanguage, ShaderSources, ShaderStage};

/// Entry point name shared by every stage in both languages.
pub const ENTRY_POINT: &str = "main";

/// A parsed and validated shader stage, ready to hand to a device.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    stage: ShaderStage,
    language: ShaderLanguage,
    module: naga::Module,
    interface: StageInterface,
}

impl CompiledStage {
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn language(&self) -> ShaderLanguage {
        self.language
    }

    pub fn interface(&self) -> &StageInterface {
        &self.interface
    }

    /// Creates the device-side shader module from the validated IR.
    pub fn create_module(&self, device: &wgpu::Device, label: &str) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(self.module.clone())),
        })
    }
}

/// Parses, validates and reflects one stage of `sources`.
///
/// Any parse or validation failure is reported as `GpuValidation` with the
/// front end's diagnostic.
pub fn compile_stage(sources: &ShaderSources, stage: ShaderStage) -> Result<CompiledStage> {
    let language = sources.language;
    let source = sources.stage(stage);

    let module = parse(source, language, stage)?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    validator.validate(&module).map_err(|e| {
        RenderError::validation(format!("{language} {stage} shader failed validation: {e}"))
    })?;

    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.to_naga() && ep.name == ENTRY_POINT)
        .ok_or_else(|| {
            RenderError::validation(format!(
                "{language} {stage} shader has no `{ENTRY_POINT}` entry point for its stage"
            ))
        })?;

    let interface = StageInterface::reflect(&module, entry_point)?;
    log::debug!(
        "compiled {language} {stage} shader: {} input(s), {} output(s)",
        interface.inputs.len(),
        interface.outputs.len()
    );

    Ok(CompiledStage {
        stage,
        language,
        module,
        interface,
    })
}

fn parse(source: &str, language: ShaderLanguage, stage: ShaderStage) -> Result<naga::Module> {
    match language {
        ShaderLanguage::Wgsl => naga::front::wgsl::parse_str(source).map_err(|e| {
            RenderError::validation(format!(
                "wgsl {stage} shader failed to parse: {}",
                e.emit_to_string(source)
            ))
        }),
        ShaderLanguage::Glsl => {
            let mut frontend = naga::front::glsl::Frontend::default();
            frontend
                .parse(&naga::front::glsl::Options::from(stage.to_naga()), source)
                .map_err(|e| RenderError::validation(format!("glsl {stage} shader failed to parse: {e}")))
        }
    }
}
