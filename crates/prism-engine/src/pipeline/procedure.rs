use crate::device::{capture_validation, OffscreenTarget, RenderTarget, TargetFrame};
use crate::frame::{FramePlan, SlotBuffer, WgpuPassRecorder};
use crate::Result;

/// Outcome of one `render_frame` call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    /// Commands were submitted and the image handed back to the target.
    Submitted,
    /// No image was available (surface reconfigured, timed out or zero-sized).
    Skipped,
}

/// A built pipeline plus everything needed to draw it, one frame per call.
///
/// Owns the device, queue, vertex buffers and pipeline for its lifetime.
/// Frames share no mutable state: each call records the same plan.
pub struct FrameProcedure<T: RenderTarget> {
    pub(super) label: String,
    pub(super) device: wgpu::Device,
    pub(super) queue: wgpu::Queue,
    pub(super) target: T,
    pub(super) format: wgpu::TextureFormat,
    pub(super) pipeline: wgpu::RenderPipeline,
    pub(super) buffers: Vec<SlotBuffer>,
    pub(super) plan: FramePlan,
}

impl<T: RenderTarget> FrameProcedure<T> {
    /// Draws one frame: acquire, clear, draw, submit, present.
    pub fn render_frame(&mut self) -> Result<FrameStatus> {
        let Some(frame) = self.target.acquire(&self.device)? else {
            return Ok(FrameStatus::Skipped);
        };

        // Validation failures surface here instead of in wgpu's default handler.
        capture_validation(&self.device, "frame submission", || {
            let mut encoder = self
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some(&format!("{} frame encoder", self.label)),
                });

            // The pass borrows the encoder; it must end before `finish`.
            {
                let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some(&format!("{} pass", self.label)),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: frame.view(),
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.plan.clear_color()),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });

                let mut recorder = WgpuPassRecorder::new(pass, &self.pipeline, &self.buffers);
                self.plan.record(&mut recorder);
            }

            self.queue.submit(std::iter::once(encoder.finish()));
        })?;

        self.target.present(frame);

        Ok(FrameStatus::Submitted)
    }

    /// Applies a new drawable size; zero sizes defer reconfiguration.
    ///
    /// Sizes the device cannot allocate are clamped (swapchain) or rejected
    /// with `GpuValidation` (offscreen).
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.target.resize(&self.device, width, height)
    }

    /// Commands each frame records.
    pub fn draw_plan(&self) -> &FramePlan {
        &self.plan
    }

    /// Color format the pipeline renders to.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn target(&self) -> &T {
        &self.target
    }
}

impl FrameProcedure<OffscreenTarget> {
    /// Reads back the last rendered offscreen image as tightly packed texels.
    pub fn capture(&self) -> Result<Vec<u8>> {
        self.target.read_pixels(&self.device, &self.queue)
    }
}
