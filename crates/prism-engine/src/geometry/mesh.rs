use crate::shader::TriangleStyle;
use crate::{RenderError, Result};

use super::layout::{VertexBufferSpec, VertexLayout};
use super::vertex::{
    Position, VertexColor, COLOR_SLOT, POSITION_SLOT, TRIANGLE_COLORS, TRIANGLE_POSITIONS,
};

/// Vertex data drawn by a frame procedure.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Positions come from the vertex shader; nothing is uploaded.
    Embedded { vertex_count: u32 },
    /// A position stream and an optional color stream of equal length.
    Buffered {
        positions: Vec<Position>,
        colors: Option<Vec<VertexColor>>,
    },
}

/// Bytes destined for one vertex buffer slot.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferData {
    pub slot: u32,
    /// Size of one element as laid out in `contents`.
    pub stride: u64,
    pub contents: Vec<u8>,
}

impl Geometry {
    /// Three shader-embedded vertices.
    pub fn embedded_triangle() -> Self {
        Geometry::Embedded { vertex_count: 3 }
    }

    /// The canonical triangle, positions only.
    pub fn triangle() -> Self {
        Geometry::Buffered {
            positions: TRIANGLE_POSITIONS.to_vec(),
            colors: None,
        }
    }

    /// The canonical triangle with blue, green and red corners.
    pub fn colored_triangle() -> Self {
        Geometry::Buffered {
            positions: TRIANGLE_POSITIONS.to_vec(),
            colors: Some(TRIANGLE_COLORS.to_vec()),
        }
    }

    pub fn for_style(style: TriangleStyle) -> Self {
        match style {
            TriangleStyle::Embedded => Self::embedded_triangle(),
            TriangleStyle::Solid => Self::triangle(),
            TriangleStyle::VertexColored => Self::colored_triangle(),
        }
    }

    pub fn vertex_count(&self) -> u32 {
        match self {
            Geometry::Embedded { vertex_count } => *vertex_count,
            // `validate` rejects counts that do not fit.
            Geometry::Buffered { positions, .. } => u32::try_from(positions.len()).unwrap_or(u32::MAX),
        }
    }

    /// Checks the geometry is drawable on its own.
    pub fn validate(&self) -> Result<()> {
        if let Geometry::Buffered { positions, .. } = self {
            drawable_count(positions.len())?;
        }
        if self.vertex_count() == 0 {
            return Err(RenderError::validation("geometry has no vertices"));
        }

        if let Geometry::Buffered {
            positions,
            colors: Some(colors),
        } = self
        {
            if colors.len() != positions.len() {
                return Err(RenderError::validation(format!(
                    "geometry has {} positions but {} colors",
                    positions.len(),
                    colors.len()
                )));
            }
        }
        Ok(())
    }

    /// Vertex buffer layout matching `buffer_data`.
    pub fn layout(&self) -> VertexLayout {
        let mut buffers = Vec::new();
        if let Geometry::Buffered { colors, .. } = self {
            buffers.push(VertexBufferSpec::new(POSITION_SLOT, Position::STRIDE, &Position::ATTRS));
            if colors.is_some() {
                buffers.push(VertexBufferSpec::new(COLOR_SLOT, VertexColor::STRIDE, &VertexColor::ATTRS));
            }
        }
        VertexLayout::new(buffers)
    }

    /// Raw bytes per slot, ready for upload.
    pub fn buffer_data(&self) -> Vec<BufferData> {
        let Geometry::Buffered { positions, colors } = self else {
            return Vec::new();
        };

        let mut out = vec![BufferData {
            slot: POSITION_SLOT,
            stride: Position::STRIDE,
            contents: bytemuck::cast_slice(positions).to_vec(),
        }];
        if let Some(colors) = colors {
            out.push(BufferData {
                slot: COLOR_SLOT,
                stride: VertexColor::STRIDE,
                contents: bytemuck::cast_slice(colors).to_vec(),
            });
        }
        out
    }
}

/// Vertex count as passed to a draw call, which addresses vertices with `u32`.
fn drawable_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| {
        RenderError::validation(format!(
            "geometry has {len} vertices; draws address at most {}",
            u32::MAX
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_beyond_u32_are_rejected() {
        assert_eq!(drawable_count(3).unwrap(), 3);
        assert_eq!(drawable_count(u32::MAX as usize).unwrap(), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert!(matches!(
            drawable_count(u32::MAX as usize + 1),
            Err(RenderError::GpuValidation(_))
        ));
    }

    #[test]
    fn canonical_triangle_has_three_vertices() {
        assert_eq!(Geometry::triangle().vertex_count(), 3);
        assert_eq!(Geometry::colored_triangle().vertex_count(), 3);
        assert_eq!(Geometry::embedded_triangle().vertex_count(), 3);
    }

    #[test]
    fn canonical_positions_match_reference_data() {
        let Geometry::Buffered { positions, .. } = Geometry::triangle() else {
            panic!("buffered geometry expected");
        };
        let xy: Vec<[f32; 2]> = positions.iter().map(|p| p.xy).collect();
        assert_eq!(xy, vec![[0.0, 0.5], [-0.5, -0.5], [0.5, -0.5]]);
    }

    #[test]
    fn embedded_geometry_uploads_nothing() {
        let g = Geometry::embedded_triangle();
        assert!(g.buffer_data().is_empty());
        assert!(g.layout().buffers().is_empty());
    }

    #[test]
    fn colored_geometry_fills_two_slots() {
        let data = Geometry::colored_triangle().buffer_data();
        assert_eq!(data.len(), 2);
        assert_eq!((data[0].slot, data[0].contents.len()), (0, 24));
        assert_eq!((data[1].slot, data[1].contents.len()), (1, 36));
    }

    #[test]
    fn color_count_must_match_positions() {
        let g = Geometry::Buffered {
            positions: TRIANGLE_POSITIONS.to_vec(),
            colors: Some(vec![VertexColor::new(1.0, 1.0, 1.0)]),
        };
        assert!(matches!(g.validate(), Err(RenderError::GpuValidation(_))));
    }

    #[test]
    fn empty_geometry_is_rejected() {
        assert!(Geometry::Embedded { vertex_count: 0 }.validate().is_err());
        let g = Geometry::Buffered {
            positions: vec![],
            colors: None,
        };
        assert!(g.validate().is_err());
    }
}
