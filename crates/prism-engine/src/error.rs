use thiserror::Error;

/// Failures raised while building or driving a frame procedure.
///
/// None of these are retried. `CapabilityUnavailable` is the only variant a
/// host is expected to handle gracefully (by not rendering at all).
#[derive(Debug, Error)]
pub enum RenderError {
    /// The host exposes no graphics backend.
    #[error("no graphics backend is available on this host")]
    CapabilityUnavailable,

    /// Backends exist but none produced an adapter matching the request.
    #[error("no suitable GPU adapter: {0}")]
    AdapterUnavailable(String),

    /// The adapter refused to open a logical device.
    #[error("failed to create device/queue: {0}")]
    DeviceRequest(String),

    /// Shader, vertex layout or buffer contents do not agree.
    #[error("GPU validation failed: {0}")]
    GpuValidation(String),

    /// Surface creation, configuration or acquisition failed fatally.
    #[error("surface error: {0}")]
    Surface(String),
}

impl RenderError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::GpuValidation(msg.into())
    }
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
