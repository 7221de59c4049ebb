use std::future::Future;

use crate::{RenderError, Result};

use super::DeviceInit;

/// Source of graphics capability and adapters.
///
/// Split out so the capability check can be exercised without real hardware.
pub trait GraphicsHost {
    /// Backends usable on this host. Empty means no graphics capability.
    fn available_backends(&self) -> wgpu::Backends;

    /// Requests an adapter, optionally one able to present to `compatible_surface`.
    fn request_adapter(
        &self,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> impl Future<Output = Result<wgpu::Adapter>>;
}

/// `GraphicsHost` backed by a `wgpu::Instance`.
pub struct WgpuHost {
    instance: wgpu::Instance,
    backends: wgpu::Backends,
    power_preference: wgpu::PowerPreference,
    force_fallback_adapter: bool,
}

impl WgpuHost {
    pub fn new(init: &DeviceInit) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: init.backends,
            ..Default::default()
        });

        Self {
            instance,
            backends: init.backends,
            power_preference: init.power_preference,
            force_fallback_adapter: init.force_fallback_adapter,
        }
    }

    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }

    /// Creates a presentation surface for a window (or any other surface source).
    pub fn create_surface<'w>(
        &self,
        target: impl Into<wgpu::SurfaceTarget<'w>>,
    ) -> Result<wgpu::Surface<'w>> {
        self.instance
            .create_surface(target)
            .map_err(|e| RenderError::Surface(format!("failed to create surface: {e}")))
    }
}

impl GraphicsHost for WgpuHost {
    /// Requested backends that this build of wgpu can actually drive.
    fn available_backends(&self) -> wgpu::Backends {
        self.backends & wgpu::Instance::enabled_backend_features()
    }

    async fn request_adapter(
        &self,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<wgpu::Adapter> {
        self.instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: self.power_preference,
                compatible_surface,
                force_fallback_adapter: self.force_fallback_adapter,
            })
            .await
            .map_err(|e| RenderError::AdapterUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(backends: wgpu::Backends) -> WgpuHost {
        WgpuHost::new(&DeviceInit {
            backends,
            ..DeviceInit::default()
        })
    }

    #[test]
    fn backends_missing_from_the_build_are_unavailable() {
        let missing = wgpu::Backends::all().difference(wgpu::Instance::enabled_backend_features());
        assert!(!missing.is_empty());
        assert!(host(missing).available_backends().is_empty());
    }

    #[test]
    fn compiled_backends_stay_available() {
        let compiled = wgpu::Instance::enabled_backend_features();
        assert_eq!(host(wgpu::Backends::all()).available_backends(), compiled);
        assert!(host(wgpu::Backends::empty()).available_backends().is_empty());
    }
}
