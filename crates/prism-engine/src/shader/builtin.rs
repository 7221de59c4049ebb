use std::fmt;

use super::{ShaderLanguage, ShaderSources};

/// Built-in triangle variants.
///
/// Every style has a WGSL and a GLSL implementation that produce the same
/// image for the same geometry.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TriangleStyle {
    /// Positions baked into the vertex shader, solid red fill. No vertex buffers.
    Embedded,
    /// Position buffer at slot 0, solid red fill.
    Solid,
    /// Position buffer at slot 0 and color buffer at slot 1; colors are interpolated.
    VertexColored,
}

impl TriangleStyle {
    pub const ALL: [TriangleStyle; 3] = [
        TriangleStyle::Embedded,
        TriangleStyle::Solid,
        TriangleStyle::VertexColored,
    ];

    pub fn has_vertex_colors(self) -> bool {
        self == TriangleStyle::VertexColored
    }

    /// Returns this style's shader pair in `language`.
    pub fn sources(self, language: ShaderLanguage) -> ShaderSources {
        let (vertex, fragment) = match (self, language) {
            (TriangleStyle::Embedded, ShaderLanguage::Wgsl) => (wgsl::EMBEDDED_VS, wgsl::SOLID_FS),
            (TriangleStyle::Solid, ShaderLanguage::Wgsl) => (wgsl::POSITION_VS, wgsl::SOLID_FS),
            (TriangleStyle::VertexColored, ShaderLanguage::Wgsl) => (wgsl::COLORED_VS, wgsl::COLORED_FS),
            (TriangleStyle::Embedded, ShaderLanguage::Glsl) => (glsl::EMBEDDED_VS, glsl::SOLID_FS),
            (TriangleStyle::Solid, ShaderLanguage::Glsl) => (glsl::POSITION_VS, glsl::SOLID_FS),
            (TriangleStyle::VertexColored, ShaderLanguage::Glsl) => (glsl::COLORED_VS, glsl::COLORED_FS),
        };
        ShaderSources::new(vertex, fragment, language)
    }
}

impl fmt::Display for TriangleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriangleStyle::Embedded => f.write_str("embedded"),
            TriangleStyle::Solid => f.write_str("solid"),
            TriangleStyle::VertexColored => f.write_str("vertex-colored"),
        }
    }
}

mod wgsl {
    pub(super) const EMBEDDED_VS: &str = include_str!("shaders/embedded_vs.wgsl");
    pub(super) const POSITION_VS: &str = include_str!("shaders/position_vs.wgsl");
    pub(super) const COLORED_VS: &str = include_str!("shaders/colored_vs.wgsl");
    pub(super) const SOLID_FS: &str = include_str!("shaders/solid_fs.wgsl");
    pub(super) const COLORED_FS: &str = include_str!("shaders/colored_fs.wgsl");
}

mod glsl {
    pub(super) const EMBEDDED_VS: &str = include_str!("shaders/embedded.vert");
    pub(super) const POSITION_VS: &str = include_str!("shaders/position.vert");
    pub(super) const COLORED_VS: &str = include_str!("shaders/colored.vert");
    pub(super) const SOLID_FS: &str = include_str!("shaders/solid.frag");
    pub(super) const COLORED_FS: &str = include_str!("shaders/colored.frag");
}
