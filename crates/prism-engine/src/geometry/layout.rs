use crate::shader::StageInterface;
use crate::{RenderError, Result};

use super::mesh::BufferData;

/// Vertex strides and attribute offsets must be multiples of this.
const STRIDE_ALIGNMENT: u64 = 4;

/// Layout of one vertex buffer slot.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBufferSpec {
    pub slot: u32,
    pub stride: u64,
    pub attributes: Vec<wgpu::VertexAttribute>,
}

impl VertexBufferSpec {
    pub fn new(slot: u32, stride: u64, attributes: &[wgpu::VertexAttribute]) -> Self {
        Self {
            slot,
            stride,
            attributes: attributes.to_vec(),
        }
    }
}

/// Vertex buffer layouts a pipeline is built with, ordered by slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexLayout {
    buffers: Vec<VertexBufferSpec>,
}

impl VertexLayout {
    pub fn new(mut buffers: Vec<VertexBufferSpec>) -> Self {
        buffers.sort_by_key(|b| b.slot);
        Self { buffers }
    }

    pub fn buffers(&self) -> &[VertexBufferSpec] {
        &self.buffers
    }

    pub fn buffer(&self, slot: u32) -> Option<&VertexBufferSpec> {
        self.buffers.iter().find(|b| b.slot == slot)
    }

    /// Checks the layout is internally consistent.
    ///
    /// Slots must be contiguous from 0 because wgpu indexes buffer layouts by
    /// slot. Strides are non-zero multiples of 4, attributes fit inside their
    /// stride and shader locations are unique.
    pub fn validate(&self) -> Result<()> {
        let mut locations = Vec::new();

        for (index, spec) in self.buffers.iter().enumerate() {
            if spec.slot != index as u32 {
                return Err(RenderError::validation(format!(
                    "vertex buffer slots must be contiguous from 0; found slot {} at position {index}",
                    spec.slot
                )));
            }
            if spec.stride == 0 || spec.stride % STRIDE_ALIGNMENT != 0 {
                return Err(RenderError::validation(format!(
                    "slot {} stride {} is not a non-zero multiple of {}",
                    spec.slot,
                    spec.stride,
                    STRIDE_ALIGNMENT
                )));
            }
            for attr in &spec.attributes {
                let end = attr.offset + attr.format.size();
                if end > spec.stride {
                    return Err(RenderError::validation(format!(
                        "slot {} attribute @location({}) spans bytes {}..{end} beyond stride {}",
                        spec.slot, attr.shader_location, attr.offset, spec.stride
                    )));
                }
                if locations.contains(&attr.shader_location) {
                    return Err(RenderError::validation(format!(
                        "@location({}) is declared by more than one attribute",
                        attr.shader_location
                    )));
                }
                locations.push(attr.shader_location);
            }
        }
        Ok(())
    }

    /// Checks the uploaded buffers against the layout.
    ///
    /// Every slot receives exactly one buffer whose element stride equals the
    /// declared stride and which holds at least `vertex_count` elements.
    pub fn check_buffers(&self, buffers: &[BufferData], vertex_count: u32) -> Result<()> {
        if buffers.len() != self.buffers.len() {
            return Err(RenderError::validation(format!(
                "layout declares {} vertex buffer(s) but {} were supplied",
                self.buffers.len(),
                buffers.len()
            )));
        }

        for data in buffers {
            let spec = self.buffer(data.slot).ok_or_else(|| {
                RenderError::validation(format!("no layout declared for vertex buffer slot {}", data.slot))
            })?;

            if data.stride != spec.stride {
                return Err(RenderError::validation(format!(
                    "slot {} buffer stride {} does not match layout stride {}",
                    data.slot, data.stride, spec.stride
                )));
            }

            let len = data.contents.len() as u64;
            if len % spec.stride != 0 {
                return Err(RenderError::validation(format!(
                    "slot {} buffer length {len} is not a multiple of stride {}",
                    data.slot, spec.stride
                )));
            }
            if len / spec.stride < u64::from(vertex_count) {
                return Err(RenderError::validation(format!(
                    "slot {} holds {} vertices but {vertex_count} are drawn",
                    data.slot,
                    len / spec.stride
                )));
            }
        }
        Ok(())
    }

    /// Checks the layout feeds exactly the inputs the vertex stage declares.
    pub fn check_shader_inputs(&self, vertex: &StageInterface) -> Result<()> {
        for input in &vertex.inputs {
            let attr = self.attribute(input.location).ok_or_else(|| {
                RenderError::validation(format!(
                    "vertex shader reads @location({}) but no buffer provides it",
                    input.location
                ))
            })?;
            if attr.format != input.format {
                return Err(RenderError::validation(format!(
                    "@location({}) is {:?} in the layout but {:?} in the vertex shader",
                    input.location, attr.format, input.format
                )));
            }
        }

        for attr in self.buffers.iter().flat_map(|b| &b.attributes) {
            if vertex.input(attr.shader_location).is_none() {
                return Err(RenderError::validation(format!(
                    "layout provides @location({}) but the vertex shader does not read it",
                    attr.shader_location
                )));
            }
        }
        Ok(())
    }

    /// Borrows the layout in the form `wgpu::VertexState` expects.
    pub fn to_wgpu(&self) -> Vec<wgpu::VertexBufferLayout<'_>> {
        self.buffers
            .iter()
            .map(|b| wgpu::VertexBufferLayout {
                array_stride: b.stride,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &b.attributes,
            })
            .collect()
    }

    fn attribute(&self, location: u32) -> Option<&wgpu::VertexAttribute> {
        self.buffers
            .iter()
            .flat_map(|b| &b.attributes)
            .find(|a| a.shader_location == location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Geometry, Position, VertexColor};
    use crate::shader::InterfaceSlot;
    use wgpu::VertexFormat;

    fn colored_inputs() -> StageInterface {
        StageInterface {
            inputs: vec![
                InterfaceSlot { location: 0, format: VertexFormat::Float32x2 },
                InterfaceSlot { location: 1, format: VertexFormat::Float32x3 },
            ],
            outputs: vec![],
        }
    }

    #[test]
    fn two_attribute_layout_uses_packed_strides() {
        let layout = Geometry::colored_triangle().layout();
        let strides: Vec<u64> = layout.buffers().iter().map(|b| b.stride).collect();
        assert_eq!(strides, vec![8, 12]);
        layout.validate().unwrap();
    }

    #[test]
    fn canonical_buffers_pass_checks() {
        let g = Geometry::colored_triangle();
        let layout = g.layout();
        layout.check_buffers(&g.buffer_data(), g.vertex_count()).unwrap();
        layout.check_shader_inputs(&colored_inputs()).unwrap();
    }

    #[test]
    fn color_buffer_with_padded_stride_is_rejected() {
        let g = Geometry::colored_triangle();
        let mut data = g.buffer_data();
        // RGBA-padded colors: 16 bytes per vertex.
        data[1] = BufferData {
            slot: 1,
            stride: 16,
            contents: vec![0; 48],
        };
        let err = g.layout().check_buffers(&data, 3).unwrap_err();
        assert!(err.to_string().contains("stride"), "{err}");
    }

    #[test]
    fn truncated_buffer_is_rejected() {
        let g = Geometry::triangle();
        let mut data = g.buffer_data();
        data[0].contents.truncate(16);
        assert!(g.layout().check_buffers(&data, 3).is_err());
    }

    #[test]
    fn ragged_buffer_is_rejected() {
        let g = Geometry::triangle();
        let mut data = g.buffer_data();
        data[0].contents.push(0);
        assert!(g.layout().check_buffers(&data, 3).is_err());
    }

    #[test]
    fn missing_buffer_is_rejected() {
        let g = Geometry::colored_triangle();
        let mut data = g.buffer_data();
        data.pop();
        assert!(g.layout().check_buffers(&data, 3).is_err());
    }

    #[test]
    fn attribute_past_stride_is_rejected() {
        let layout = VertexLayout::new(vec![VertexBufferSpec::new(
            0,
            8,
            &wgpu::vertex_attr_array![0 => Float32x3],
        )]);
        assert!(layout.validate().is_err());
    }

    #[test]
    fn unaligned_stride_is_rejected() {
        let layout = VertexLayout::new(vec![VertexBufferSpec::new(
            0,
            6,
            &wgpu::vertex_attr_array![0 => Float16x2],
        )]);
        assert!(layout.validate().is_err());
    }

    #[test]
    fn slot_gap_is_rejected() {
        let layout = VertexLayout::new(vec![VertexBufferSpec::new(1, Position::STRIDE, &Position::ATTRS)]);
        assert!(layout.validate().is_err());
    }

    #[test]
    fn duplicate_location_is_rejected() {
        let layout = VertexLayout::new(vec![
            VertexBufferSpec::new(0, Position::STRIDE, &Position::ATTRS),
            VertexBufferSpec::new(1, 8, &wgpu::vertex_attr_array![0 => Float32x2]),
        ]);
        assert!(layout.validate().is_err());
    }

    #[test]
    fn shader_input_without_attribute_is_rejected() {
        let layout = Geometry::triangle().layout();
        let err = layout.check_shader_inputs(&colored_inputs()).unwrap_err();
        assert!(err.to_string().contains("@location(1)"), "{err}");
    }

    #[test]
    fn attribute_format_must_match_shader() {
        let layout = VertexLayout::new(vec![
            VertexBufferSpec::new(0, Position::STRIDE, &Position::ATTRS),
            VertexBufferSpec::new(1, 16, &wgpu::vertex_attr_array![1 => Float32x4]),
        ]);
        assert!(layout.check_shader_inputs(&colored_inputs()).is_err());
    }

    #[test]
    fn unread_attribute_is_rejected() {
        let layout = Geometry::colored_triangle().layout();
        let position_only = StageInterface {
            inputs: vec![InterfaceSlot { location: 0, format: VertexFormat::Float32x2 }],
            outputs: vec![],
        };
        assert!(layout.check_shader_inputs(&position_only).is_err());
    }

    #[test]
    fn wgpu_layouts_follow_slot_order() {
        let layout = VertexLayout::new(vec![
            VertexBufferSpec::new(1, VertexColor::STRIDE, &VertexColor::ATTRS),
            VertexBufferSpec::new(0, Position::STRIDE, &Position::ATTRS),
        ]);
        let raw = layout.to_wgpu();
        assert_eq!(raw[0].array_stride, 8);
        assert_eq!(raw[1].array_stride, 12);
    }
}
