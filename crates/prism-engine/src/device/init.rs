/// Initialization parameters for the device layer.
///
/// Keep this structure small. Add flags only when a concrete platform or
/// backend requirement exists.
#[derive(Debug, Clone)]
pub struct DeviceInit {
    /// Backends the host is allowed to use.
    ///
    /// An empty set means the graphics capability is absent.
    pub backends: wgpu::Backends,

    pub power_preference: wgpu::PowerPreference,

    /// Force a software adapter.
    pub force_fallback_adapter: bool,

    /// Present mode (swap behavior). FIFO is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features. A triangle needs none.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device. WebGL2-level limits cover a triangle.
    pub required_limits: wgpu::Limits,

    /// Desired maximum frame latency for the surface (a hint).
    pub desired_maximum_frame_latency: u32,
}

impl Default for DeviceInit {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}

impl DeviceInit {
    /// Device request for `adapter`; texture size limits follow the adapter so
    /// large windows can still be configured.
    pub(crate) fn device_descriptor<'a>(
        &self,
        label: Option<&'a str>,
        adapter: &wgpu::Adapter,
    ) -> wgpu::DeviceDescriptor<'a> {
        wgpu::DeviceDescriptor {
            label,
            required_features: self.required_features,
            required_limits: self.required_limits.clone().using_resolution(adapter.limits()),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        }
    }
}
