use std::ops::Range;

/// Sink for the commands of one render pass.
///
/// Resources are addressed by role (the pipeline, a vertex slot) so the same
/// plan can drive a live pass or a log.
pub trait PassRecorder {
    fn set_pipeline(&mut self);
    fn set_vertex_buffer(&mut self, slot: u32);
    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>);
}

/// A command captured by `CommandLog`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCommand {
    SetPipeline,
    SetVertexBuffer { slot: u32 },
    Draw { vertices: Range<u32>, instances: Range<u32> },
}

/// Records commands instead of issuing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLog {
    commands: Vec<RecordedCommand>,
}

impl CommandLog {
    pub fn commands(&self) -> &[RecordedCommand] {
        &self.commands
    }

    /// Every draw in the log, in order.
    pub fn draws(&self) -> impl Iterator<Item = (&Range<u32>, &Range<u32>)> {
        self.commands.iter().filter_map(|c| match c {
            RecordedCommand::Draw { vertices, instances } => Some((vertices, instances)),
            _ => None,
        })
    }
}

impl PassRecorder for CommandLog {
    fn set_pipeline(&mut self) {
        self.commands.push(RecordedCommand::SetPipeline);
    }

    fn set_vertex_buffer(&mut self, slot: u32) {
        self.commands.push(RecordedCommand::SetVertexBuffer { slot });
    }

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        self.commands.push(RecordedCommand::Draw { vertices, instances });
    }
}

/// A vertex buffer resident on the device, bound at `slot`.
pub struct SlotBuffer {
    pub slot: u32,
    pub buffer: wgpu::Buffer,
}

/// Issues commands into a live wgpu render pass.
pub struct WgpuPassRecorder<'p> {
    pass: wgpu::RenderPass<'p>,
    pipeline: &'p wgpu::RenderPipeline,
    buffers: &'p [SlotBuffer],
}

impl<'p> WgpuPassRecorder<'p> {
    pub fn new(
        pass: wgpu::RenderPass<'p>,
        pipeline: &'p wgpu::RenderPipeline,
        buffers: &'p [SlotBuffer],
    ) -> Self {
        Self {
            pass,
            pipeline,
            buffers,
        }
    }
}

impl PassRecorder for WgpuPassRecorder<'_> {
    fn set_pipeline(&mut self) {
        self.pass.set_pipeline(self.pipeline);
    }

    fn set_vertex_buffer(&mut self, slot: u32) {
        // `FramePlan::check_bindings` ran when the procedure was built.
        let buffer = self.buffers.iter().find(|b| b.slot == slot);
        debug_assert!(buffer.is_some(), "no vertex buffer uploaded for slot {slot}");
        if let Some(b) = buffer {
            self.pass.set_vertex_buffer(slot, b.buffer.slice(..));
        }
    }

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        self.pass.draw(vertices, instances);
    }
}
