use crate::device::DeviceInit;
use crate::geometry::Geometry;
use crate::shader::{ShaderLanguage, ShaderSources, TriangleStyle};

/// Everything `initialize` needs besides the host and target.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Prefix for every GPU object label.
    pub label: String,
    pub shaders: ShaderSources,
    pub geometry: Geometry,
    pub device: DeviceInit,
    pub topology: wgpu::PrimitiveTopology,
}

impl FrameConfig {
    pub fn new(shaders: ShaderSources, geometry: Geometry) -> Self {
        Self {
            label: "prism".to_string(),
            shaders,
            geometry,
            device: DeviceInit::default(),
            topology: wgpu::PrimitiveTopology::TriangleList,
        }
    }

    /// A built-in triangle variant in the chosen shading language.
    pub fn triangle(style: TriangleStyle, language: ShaderLanguage) -> Self {
        let mut config = Self::new(style.sources(language), Geometry::for_style(style));
        config.label = format!("prism {style} {language}");
        config
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_device(mut self, device: DeviceInit) -> Self {
        self.device = device;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_config_pairs_style_with_geometry() {
        let cfg = FrameConfig::triangle(TriangleStyle::VertexColored, ShaderLanguage::Glsl);
        assert_eq!(cfg.shaders.language, ShaderLanguage::Glsl);
        assert_eq!(cfg.geometry, Geometry::colored_triangle());
        assert_eq!(cfg.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(cfg.label, "prism vertex-colored glsl");
    }
}
