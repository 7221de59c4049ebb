use crate::{RenderError, Result};

use super::error::{capture_validation, surface_error_action, SurfaceErrorAction};
use super::target::{RenderTarget, TargetFrame};
use super::DeviceInit;

/// Window swapchain target.
///
/// Surface lifetime is tied to the window via `'w`; the window must outlive
/// this target.
pub struct SwapchainTarget<'w> {
    surface: wgpu::Surface<'w>,

    /// Set by `configure`; `None` until the device exists.
    config: Option<wgpu::SurfaceConfiguration>,

    /// Current drawable size in physical pixels.
    size: (u32, u32),

    present_mode: wgpu::PresentMode,
    alpha_mode: Option<wgpu::CompositeAlphaMode>,
    desired_maximum_frame_latency: u32,
}

/// Swapchain image acquired for one frame.
///
/// Holding it prevents acquisition of the next image; present promptly.
pub struct SwapchainFrame {
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl TargetFrame for SwapchainFrame {
    fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl<'w> SwapchainTarget<'w> {
    pub fn new(surface: wgpu::Surface<'w>, width: u32, height: u32, init: &DeviceInit) -> Self {
        Self {
            surface,
            config: None,
            size: (width, height),
            present_mode: init.present_mode,
            alpha_mode: init.alpha_mode,
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        }
    }

    /// Returns the active surface format, once configured.
    pub fn format(&self) -> Option<wgpu::TextureFormat> {
        self.config.as_ref().map(|c| c.format)
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    fn has_area(&self) -> bool {
        self.size.0 > 0 && self.size.1 > 0
    }
}

impl RenderTarget for SwapchainTarget<'_> {
    type Frame = SwapchainFrame;

    fn compatible_surface(&self) -> Option<&wgpu::Surface<'_>> {
        Some(&self.surface)
    }

    fn configure(
        &mut self,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        preferred: wgpu::TextureFormat,
    ) -> Result<wgpu::TextureFormat> {
        let caps = self.surface.get_capabilities(adapter);
        let format = choose_surface_format(&caps.formats, preferred).ok_or_else(|| {
            RenderError::Surface("surface reports no supported formats for this adapter".into())
        })?;
        let alpha_mode = choose_alpha_mode(&caps.alpha_modes, self.alpha_mode);
        let max = device.limits().max_texture_dimension_2d;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: self.size.0.clamp(1, max),
            height: self.size.1.clamp(1, max),
            present_mode: self.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: self.desired_maximum_frame_latency,
        };

        if self.has_area() {
            capture_validation(device, "surface configuration", || {
                self.surface.configure(device, &config)
            })?;
        }
        log::debug!("surface configured: {format:?} {}x{}", config.width, config.height);

        self.config = Some(config);
        Ok(format)
    }

    fn acquire(&mut self, device: &wgpu::Device) -> Result<Option<SwapchainFrame>> {
        if !self.has_area() {
            return Ok(None);
        }

        match self.surface.get_current_texture() {
            Ok(texture) => {
                let view = texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                Ok(Some(SwapchainFrame { texture, view }))
            }
            Err(err) => match surface_error_action(&err) {
                SurfaceErrorAction::Reconfigured => {
                    log::debug!("surface {err}; reconfiguring");
                    if let Some(config) = self.config.as_ref() {
                        capture_validation(device, "surface reconfiguration", || {
                            self.surface.configure(device, config)
                        })?;
                    }
                    Ok(None)
                }
                SurfaceErrorAction::SkipFrame => {
                    log::debug!("surface {err}; skipping frame");
                    Ok(None)
                }
                SurfaceErrorAction::Fatal => Err(RenderError::Surface(err.to_string())),
            },
        }
    }

    fn present(&mut self, frame: SwapchainFrame) {
        let SwapchainFrame { texture, view } = frame;
        drop(view);
        texture.present();
    }

    /// wgpu cannot configure a 0x0 surface; in that case configuration is
    /// deferred until a non-empty size arrives. Sizes beyond the device's
    /// texture limit are clamped; the compositor scales the image.
    fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) -> Result<()> {
        let max = device.limits().max_texture_dimension_2d;
        let clamped = (width.min(max), height.min(max));
        if clamped != (width, height) {
            log::warn!("surface size {width}x{height} exceeds {max}; clamping");
        }

        self.size = clamped;
        if !self.has_area() {
            return Ok(());
        }

        if let Some(config) = self.config.as_mut() {
            config.width = clamped.0;
            config.height = clamped.1;
            let config = &*config;
            capture_validation(device, "surface reconfiguration", || {
                self.surface.configure(device, config)
            })?;
        }
        Ok(())
    }
}

/// Picks `preferred` when the surface offers it, else the first offered format.
pub(crate) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    preferred: wgpu::TextureFormat,
) -> Option<wgpu::TextureFormat> {
    if formats.contains(&preferred) {
        return Some(preferred);
    }

    let fallback = formats.first().copied()?;
    log::warn!("surface does not support {preferred:?}; falling back to {fallback:?}");
    Some(fallback)
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| supported.contains(m))
        .or_else(|| supported.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode, TextureFormat};

    #[test]
    fn preferred_format_selected_when_offered() {
        let formats = [TextureFormat::Rgba8Unorm, TextureFormat::Bgra8Unorm];
        assert_eq!(
            choose_surface_format(&formats, TextureFormat::Bgra8Unorm),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba8UnormSrgb, TextureFormat::Rgba8Unorm];
        assert_eq!(
            choose_surface_format(&formats, TextureFormat::Bgra8Unorm),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
    }

    #[test]
    fn no_formats_means_incompatible() {
        assert_eq!(choose_surface_format(&[], TextureFormat::Bgra8Unorm), None);
    }

    #[test]
    fn unsupported_alpha_request_is_ignored() {
        let supported = [CompositeAlphaMode::Opaque];
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::PreMultiplied)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(
            choose_alpha_mode(&supported, Some(CompositeAlphaMode::Opaque)),
            CompositeAlphaMode::Opaque
        );
        assert_eq!(choose_alpha_mode(&[], None), CompositeAlphaMode::Auto);
    }
}
