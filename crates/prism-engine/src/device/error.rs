use crate::{RenderError, Result};

/// High-level response after a surface acquisition error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering may resume next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Fatal error (commonly OOM).
    Fatal,
}

/// Classifies a surface error without touching the surface.
pub fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

/// Runs `f` inside a validation error scope on `device`.
///
/// wgpu reports validation failures asynchronously; without a scope they reach
/// the uncaptured-error handler instead of the caller.
pub(crate) fn capture_validation<T>(
    device: &wgpu::Device,
    what: &str,
    f: impl FnOnce() -> T,
) -> Result<T> {
    let scope = device.push_error_scope(wgpu::ErrorFilter::Validation);
    let value = f();

    match pollster::block_on(scope.pop()) {
        None => Ok(value),
        Some(err) => Err(RenderError::validation(format!("{what}: {err}"))),
    }
}

/// Logs errors raised outside any scope instead of panicking.
pub(crate) fn log_uncaptured_errors(device: &wgpu::Device, label: &str) {
    let label = label.to_string();
    device.on_uncaptured_error(std::sync::Arc::new(move |err| {
        log::error!("{label}: uncaptured wgpu error: {err}");
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lost_and_outdated_reconfigure() {
        assert_eq!(surface_error_action(&wgpu::SurfaceError::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(
            surface_error_action(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
    }

    #[test]
    fn out_of_memory_is_fatal() {
        assert_eq!(surface_error_action(&wgpu::SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
    }

    #[test]
    fn timeout_skips_frame() {
        assert_eq!(surface_error_action(&wgpu::SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(surface_error_action(&wgpu::SurfaceError::Other), SurfaceErrorAction::SkipFrame);
    }

    fn test_device() -> Option<wgpu::Device> {
        let init = crate::device::DeviceInit::default();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter =
            pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions::default())).ok()?;
        let descriptor = init.device_descriptor(Some("scope test device"), &adapter);
        let (device, _queue) = pollster::block_on(adapter.request_device(&descriptor)).ok()?;
        Some(device)
    }

    #[test]
    fn validation_scope_turns_wgpu_errors_into_results() {
        let Some(device) = test_device() else {
            return;
        };

        let ok = capture_validation(&device, "empty scope", || 7);
        assert_eq!(ok.unwrap(), 7);

        // Zero-sized textures are invalid in WebGPU.
        let err = capture_validation(&device, "zero-sized texture", || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("zero"),
                size: wgpu::Extent3d {
                    width: 0,
                    height: 0,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Rgba8Unorm,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
        })
        .unwrap_err();
        assert!(matches!(err, RenderError::GpuValidation(_)));
        assert!(err.to_string().contains("zero-sized texture"), "{err}");
    }
}
