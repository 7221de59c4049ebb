use crate::{RenderError, Result};

/// One user-defined (`@location`) input or output of a shader stage.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct InterfaceSlot {
    pub location: u32,
    pub format: wgpu::VertexFormat,
}

/// Location-bound inputs and outputs of a stage's entry point.
///
/// Builtins (`vertex_index`, `position`, ...) are not part of the interface.
/// Both lists are sorted by location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageInterface {
    pub inputs: Vec<InterfaceSlot>,
    pub outputs: Vec<InterfaceSlot>,
}

impl StageInterface {
    pub(crate) fn reflect(module: &naga::Module, entry_point: &naga::EntryPoint) -> Result<Self> {
        let function = &entry_point.function;

        let mut inputs = Vec::new();
        for arg in &function.arguments {
            collect(module, arg.ty, arg.binding.as_ref(), &mut inputs)?;
        }

        let mut outputs = Vec::new();
        if let Some(result) = &function.result {
            collect(module, result.ty, result.binding.as_ref(), &mut outputs)?;
        }

        inputs.sort_by_key(|s| s.location);
        outputs.sort_by_key(|s| s.location);

        Ok(Self { inputs, outputs })
    }

    pub fn input(&self, location: u32) -> Option<&InterfaceSlot> {
        self.inputs.iter().find(|s| s.location == location)
    }

    pub fn output(&self, location: u32) -> Option<&InterfaceSlot> {
        self.outputs.iter().find(|s| s.location == location)
    }
}

/// Checks that every fragment input is written by the vertex stage with the same format.
pub fn check_stage_link(vertex: &StageInterface, fragment: &StageInterface) -> Result<()> {
    for input in &fragment.inputs {
        match vertex.output(input.location) {
            Some(out) if out.format == input.format => {}
            Some(out) => {
                return Err(RenderError::validation(format!(
                    "fragment input @location({}) is {:?} but the vertex stage writes {:?}",
                    input.location, input.format, out.format
                )));
            }
            None => {
                return Err(RenderError::validation(format!(
                    "fragment input @location({}) is not written by the vertex stage",
                    input.location
                )));
            }
        }
    }
    Ok(())
}

fn collect(
    module: &naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<InterfaceSlot>,
) -> Result<()> {
    match binding {
        Some(naga::Binding::Location { location, .. }) => {
            let format = value_format(module, ty).ok_or_else(|| {
                RenderError::validation(format!(
                    "@location({location}) has a type that cannot cross a stage boundary"
                ))
            })?;
            out.push(InterfaceSlot {
                location: *location,
                format,
            });
        }
        Some(naga::Binding::BuiltIn(_)) => {}
        None => {
            if let naga::TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for member in members {
                    collect(module, member.ty, member.binding.as_ref(), out)?;
                }
            }
        }
    }
    Ok(())
}

fn value_format(module: &naga::Module, ty: naga::Handle<naga::Type>) -> Option<wgpu::VertexFormat> {
    use naga::{ScalarKind, TypeInner, VectorSize};
    use wgpu::VertexFormat as F;

    let (scalar, size) = match &module.types[ty].inner {
        TypeInner::Scalar(scalar) => (*scalar, None),
        TypeInner::Vector { size, scalar } => (*scalar, Some(*size)),
        _ => return None,
    };
    if scalar.width != 4 {
        return None;
    }

    let format = match (scalar.kind, size) {
        (ScalarKind::Float, None) => F::Float32,
        (ScalarKind::Float, Some(VectorSize::Bi)) => F::Float32x2,
        (ScalarKind::Float, Some(VectorSize::Tri)) => F::Float32x3,
        (ScalarKind::Float, Some(VectorSize::Quad)) => F::Float32x4,
        (ScalarKind::Sint, None) => F::Sint32,
        (ScalarKind::Sint, Some(VectorSize::Bi)) => F::Sint32x2,
        (ScalarKind::Sint, Some(VectorSize::Tri)) => F::Sint32x3,
        (ScalarKind::Sint, Some(VectorSize::Quad)) => F::Sint32x4,
        (ScalarKind::Uint, None) => F::Uint32,
        (ScalarKind::Uint, Some(VectorSize::Bi)) => F::Uint32x2,
        (ScalarKind::Uint, Some(VectorSize::Tri)) => F::Uint32x3,
        (ScalarKind::Uint, Some(VectorSize::Quad)) => F::Uint32x4,
        _ => return None,
    };
    Some(format)
}
