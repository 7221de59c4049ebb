use crate::Result;

/// A view that can be rendered into for exactly one frame.
pub trait TargetFrame {
    fn view(&self) -> &wgpu::TextureView;
}

/// Where frames end up: a window swapchain or an offscreen texture.
pub trait RenderTarget {
    type Frame: TargetFrame;

    /// Surface the adapter must be able to present to, if any.
    fn compatible_surface(&self) -> Option<&wgpu::Surface<'_>>;

    /// Configures the target for `device` and returns the color format in use.
    ///
    /// `preferred` is used when supported; otherwise the target picks a
    /// supported fallback.
    fn configure(
        &mut self,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        preferred: wgpu::TextureFormat,
    ) -> Result<wgpu::TextureFormat>;

    /// Acquires the image for the next frame.
    ///
    /// `Ok(None)` means this frame should be skipped.
    fn acquire(&mut self, device: &wgpu::Device) -> Result<Option<Self::Frame>>;

    /// Hands a finished frame back after its commands were submitted.
    fn present(&mut self, frame: Self::Frame);

    /// Applies a new drawable size in physical pixels.
    ///
    /// Zero sizes are deferred until a non-empty size arrives.
    fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) -> Result<()>;
}
