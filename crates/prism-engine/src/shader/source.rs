use std::borrow::Cow;
use std::fmt;

/// Shading language of a `ShaderSources` pair.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderLanguage {
    /// WGSL, the native WebGPU shading language.
    Wgsl,
    /// GLSL 450, the portable shading language.
    Glsl,
}

impl ShaderLanguage {
    pub const ALL: [ShaderLanguage; 2] = [ShaderLanguage::Wgsl, ShaderLanguage::Glsl];
}

impl fmt::Display for ShaderLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderLanguage::Wgsl => f.write_str("wgsl"),
            ShaderLanguage::Glsl => f.write_str("glsl"),
        }
    }
}

/// Pipeline stage a source is compiled for.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub(crate) fn to_naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Vertex and fragment source text in one language.
///
/// Both stages expose an entry point named `main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
    pub language: ShaderLanguage,
}

impl ShaderSources {
    pub fn new(
        vertex: impl Into<Cow<'static, str>>,
        fragment: impl Into<Cow<'static, str>>,
        language: ShaderLanguage,
    ) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
            language,
        }
    }

    pub fn wgsl(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self::new(vertex, fragment, ShaderLanguage::Wgsl)
    }

    pub fn glsl(vertex: impl Into<Cow<'static, str>>, fragment: impl Into<Cow<'static, str>>) -> Self {
        Self::new(vertex, fragment, ShaderLanguage::Glsl)
    }

    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}
