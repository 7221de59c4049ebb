//! GPU host, device and render target management.
//!
//! This module is responsible for:
//! - probing graphics capability and requesting adapters (`GraphicsHost`)
//! - configuring where frames go (`RenderTarget`: swapchain or offscreen)
//! - mapping surface errors to frame-level actions

mod error;
mod host;
mod init;
mod offscreen;
mod surface;
mod target;

pub use error::{surface_error_action, SurfaceErrorAction};
pub(crate) use error::{capture_validation, log_uncaptured_errors};
pub use host::{GraphicsHost, WgpuHost};
pub use init::DeviceInit;
pub use offscreen::{OffscreenFrame, OffscreenTarget};
pub use surface::{SwapchainFrame, SwapchainTarget};
pub use target::{RenderTarget, TargetFrame};

/// Color format every pipeline targets unless the surface cannot provide it.
pub const OUTPUT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Bgra8Unorm;
