//! Viewer settings loaded from an optional TOML file.

use std::path::Path;

use anyhow::{Context, Result};
use prism_engine::device::DeviceInit;
use prism_engine::{FrameConfig, ShaderLanguage, TriangleStyle};
use serde::Deserialize;

/// Root of the viewer configuration file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "prism".to_string(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub language: Language,
    pub style: Style,
    pub present_mode: PresentMode,
    pub backend: Backend,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            language: Language::Wgsl,
            style: Style::VertexColored,
            present_mode: PresentMode::Fifo,
            backend: Backend::All,
        }
    }
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Language {
    Wgsl,
    Glsl,
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Style {
    Embedded,
    Solid,
    VertexColored,
}

#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PresentMode {
    Fifo,
    Mailbox,
    Immediate,
    AutoVsync,
    AutoNoVsync,
}

/// Backend selection. `None` disables graphics entirely, which exercises the
/// capability-unavailable path.
#[derive(Debug, Copy, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Backend {
    All,
    Primary,
    Vulkan,
    Metal,
    Dx12,
    Gl,
    None,
}

impl From<Language> for ShaderLanguage {
    fn from(value: Language) -> Self {
        match value {
            Language::Wgsl => ShaderLanguage::Wgsl,
            Language::Glsl => ShaderLanguage::Glsl,
        }
    }
}

impl From<Style> for TriangleStyle {
    fn from(value: Style) -> Self {
        match value {
            Style::Embedded => TriangleStyle::Embedded,
            Style::Solid => TriangleStyle::Solid,
            Style::VertexColored => TriangleStyle::VertexColored,
        }
    }
}

impl From<PresentMode> for wgpu::PresentMode {
    fn from(value: PresentMode) -> Self {
        match value {
            PresentMode::Fifo => wgpu::PresentMode::Fifo,
            PresentMode::Mailbox => wgpu::PresentMode::Mailbox,
            PresentMode::Immediate => wgpu::PresentMode::Immediate,
            PresentMode::AutoVsync => wgpu::PresentMode::AutoVsync,
            PresentMode::AutoNoVsync => wgpu::PresentMode::AutoNoVsync,
        }
    }
}

impl From<Backend> for wgpu::Backends {
    fn from(value: Backend) -> Self {
        match value {
            Backend::All => wgpu::Backends::all(),
            Backend::Primary => wgpu::Backends::PRIMARY,
            Backend::Vulkan => wgpu::Backends::VULKAN,
            Backend::Metal => wgpu::Backends::METAL,
            Backend::Dx12 => wgpu::Backends::DX12,
            Backend::Gl => wgpu::Backends::GL,
            Backend::None => wgpu::Backends::empty(),
        }
    }
}

impl ViewerConfig {
    /// Loads the configuration at `path`, or defaults if the file does not exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("config file not found at {path:?}, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {path:?}"))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config file {path:?}"))?;

        log::info!("loaded config from {path:?}");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn device_init(&self) -> DeviceInit {
        DeviceInit {
            backends: self.render.backend.into(),
            present_mode: self.render.present_mode.into(),
            ..DeviceInit::default()
        }
    }

    pub fn frame_config(&self) -> FrameConfig {
        FrameConfig::triangle(self.render.style.into(), self.render.language.into())
            .with_device(self.device_init())
    }
}
