use bytemuck::{Pod, Zeroable};

/// Buffer slot of the position stream.
pub const POSITION_SLOT: u32 = 0;
/// Buffer slot of the optional color stream.
pub const COLOR_SLOT: u32 = 1;

/// Clip-space position, two `f32`s (8 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Position {
    pub xy: [f32; 2],
}

impl Position {
    pub const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
    pub const STRIDE: u64 = std::mem::size_of::<Position>() as u64;

    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { xy: [x, y] }
    }
}

/// Linear RGB vertex color, three `f32`s (12 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct VertexColor {
    pub rgb: [f32; 3],
}

impl VertexColor {
    pub const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];
    pub const STRIDE: u64 = std::mem::size_of::<VertexColor>() as u64;

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { rgb: [r, g, b] }
    }
}

/// `(0, 0.5)`, `(-0.5, -0.5)`, `(0.5, -0.5)`.
pub const TRIANGLE_POSITIONS: [Position; 3] = [
    Position::new(0.0, 0.5),
    Position::new(-0.5, -0.5),
    Position::new(0.5, -0.5),
];

/// Blue, green, red.
pub const TRIANGLE_COLORS: [VertexColor; 3] = [
    VertexColor::new(0.0, 0.0, 1.0),
    VertexColor::new(0.0, 1.0, 0.0),
    VertexColor::new(1.0, 0.0, 0.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strides_match_packed_floats() {
        assert_eq!(Position::STRIDE, 8);
        assert_eq!(VertexColor::STRIDE, 12);
    }

    #[test]
    fn attributes_sit_at_slot_locations() {
        assert_eq!(Position::ATTRS[0].shader_location, 0);
        assert_eq!(Position::ATTRS[0].offset, 0);
        assert_eq!(VertexColor::ATTRS[0].shader_location, 1);
        assert_eq!(VertexColor::ATTRS[0].format, wgpu::VertexFormat::Float32x3);
    }
}
