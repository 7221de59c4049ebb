use crate::{RenderError, Result};

use super::error::capture_validation;
use super::target::{RenderTarget, TargetFrame};

/// Renders into a texture instead of a window.
///
/// Used for headless capture: after a frame is submitted, `read_pixels`
/// copies the image back to the CPU.
pub struct OffscreenTarget {
    width: u32,
    height: u32,
    format: Option<wgpu::TextureFormat>,
    texture: Option<wgpu::Texture>,
}

pub struct OffscreenFrame {
    view: wgpu::TextureView,
}

impl TargetFrame for OffscreenFrame {
    fn view(&self) -> &wgpu::TextureView {
        &self.view
    }
}

impl OffscreenTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            format: None,
            texture: None,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the texture format, once configured.
    pub fn format(&self) -> Option<wgpu::TextureFormat> {
        self.format
    }

    /// Allocates the color texture; size and texture change together or not at all.
    fn create_texture(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<()> {
        check_size(device, width, height)?;

        let texture = capture_validation(device, "offscreen texture creation", || {
            device.create_texture(&wgpu::TextureDescriptor {
                label: Some("prism offscreen color"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
                view_formats: &[],
            })
        })?;

        self.texture = Some(texture);
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Copies the current texture contents to tightly packed rows of 4-byte texels.
    ///
    /// Blocks until the GPU has finished all submitted work.
    pub fn read_pixels(&self, device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Vec<u8>> {
        let texture = self
            .texture
            .as_ref()
            .ok_or_else(|| RenderError::Surface("offscreen target is not configured".into()))?;

        let unpadded = self.width * 4;
        let padded = padded_bytes_per_row(self.width);

        let readback = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("prism offscreen readback"),
            size: u64::from(padded) * u64::from(self.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("prism readback encoder"),
        });
        encoder.copy_texture_to_buffer(
            texture.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        queue.submit(std::iter::once(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| RenderError::Surface(format!("device poll failed: {e}")))?;

        rx.recv()
            .map_err(|_| RenderError::Surface("readback callback was dropped".into()))?
            .map_err(|e| RenderError::Surface(format!("readback map failed: {e}")))?;

        let mut pixels = Vec::with_capacity((unpadded * self.height) as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks(padded as usize) {
                pixels.extend_from_slice(&row[..unpadded as usize]);
            }
        }
        readback.unmap();

        Ok(pixels)
    }
}

impl RenderTarget for OffscreenTarget {
    type Frame = OffscreenFrame;

    fn compatible_surface(&self) -> Option<&wgpu::Surface<'_>> {
        None
    }

    fn configure(
        &mut self,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        preferred: wgpu::TextureFormat,
    ) -> Result<wgpu::TextureFormat> {
        let renderable = |f: wgpu::TextureFormat| {
            adapter
                .get_texture_format_features(f)
                .allowed_usages
                .contains(wgpu::TextureUsages::RENDER_ATTACHMENT)
        };

        // Some GL drivers cannot render to BGRA.
        let format = if renderable(preferred) {
            preferred
        } else {
            let fallback = wgpu::TextureFormat::Rgba8Unorm;
            log::warn!("adapter cannot render to {preferred:?}; falling back to {fallback:?}");
            fallback
        };

        self.create_texture(device, format, self.width, self.height)?;
        self.format = Some(format);
        Ok(format)
    }

    fn acquire(&mut self, _device: &wgpu::Device) -> Result<Option<OffscreenFrame>> {
        let texture = self
            .texture
            .as_ref()
            .ok_or_else(|| RenderError::Surface("offscreen target is not configured".into()))?;
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Some(OffscreenFrame { view }))
    }

    fn present(&mut self, _frame: OffscreenFrame) {}

    /// Rejects sizes the device cannot allocate and keeps the previous texture.
    fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        match self.format {
            Some(format) => self.create_texture(device, format, width, height),
            None => {
                check_size(device, width, height)?;
                self.width = width;
                self.height = height;
                Ok(())
            }
        }
    }
}

fn check_size(device: &wgpu::Device, width: u32, height: u32) -> Result<()> {
    let max = device.limits().max_texture_dimension_2d;
    if width > max || height > max {
        return Err(RenderError::validation(format!(
            "offscreen size {width}x{height} exceeds the device limit of {max}"
        )));
    }
    Ok(())
}

/// Row pitch for texture-to-buffer copies.
pub(crate) fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_copy_alignment() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
    }

    #[test]
    fn zero_size_is_clamped() {
        assert_eq!(OffscreenTarget::new(0, 0).size(), (1, 1));
    }
}
