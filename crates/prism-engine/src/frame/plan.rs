use crate::geometry::VertexLayout;
use crate::{RenderError, Result};

use super::recorder::PassRecorder;

/// Clear color of every frame: opaque black.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Parameters of the single draw command.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DrawCall {
    pub vertex_count: u32,
    pub instance_count: u32,
    pub first_vertex: u32,
    pub first_instance: u32,
}

impl DrawCall {
    /// One instance of `vertex_count` vertices starting at vertex 0.
    pub const fn vertices(vertex_count: u32) -> Self {
        Self {
            vertex_count,
            instance_count: 1,
            first_vertex: 0,
            first_instance: 0,
        }
    }

    pub fn vertex_range(&self) -> std::ops::Range<u32> {
        self.first_vertex..self.first_vertex + self.vertex_count
    }

    pub fn instance_range(&self) -> std::ops::Range<u32> {
        self.first_instance..self.first_instance + self.instance_count
    }
}

/// Immutable description of what one frame records inside its render pass.
///
/// Built once alongside the pipeline; replaying it never mutates it, so every
/// frame records the same commands.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    clear_color: wgpu::Color,
    vertex_slots: Vec<u32>,
    draw: DrawCall,
}

impl FramePlan {
    pub fn new(layout: &VertexLayout, vertex_count: u32) -> Self {
        Self {
            clear_color: CLEAR_COLOR,
            vertex_slots: layout.buffers().iter().map(|b| b.slot).collect(),
            draw: DrawCall::vertices(vertex_count),
        }
    }

    pub fn clear_color(&self) -> wgpu::Color {
        self.clear_color
    }

    /// Vertex buffer slots bound before the draw, in order.
    pub fn vertex_slots(&self) -> &[u32] {
        &self.vertex_slots
    }

    pub fn draw(&self) -> DrawCall {
        self.draw
    }

    /// Checks that every slot the plan binds has an uploaded buffer.
    pub fn check_bindings(&self, uploaded: &[u32]) -> Result<()> {
        match self.vertex_slots.iter().find(|&&slot| !uploaded.contains(&slot)) {
            Some(slot) => Err(RenderError::validation(format!(
                "frame plan binds vertex slot {slot} but no buffer was uploaded for it"
            ))),
            None => Ok(()),
        }
    }

    /// Replays the plan: pipeline, vertex buffers, then the draw.
    pub fn record<R: PassRecorder + ?Sized>(&self, recorder: &mut R) {
        recorder.set_pipeline();
        for &slot in &self.vertex_slots {
            recorder.set_vertex_buffer(slot);
        }
        recorder.draw(self.draw.vertex_range(), self.draw.instance_range());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{CommandLog, RecordedCommand};
    use crate::geometry::Geometry;

    fn plan_for(g: &Geometry) -> FramePlan {
        FramePlan::new(&g.layout(), g.vertex_count())
    }

    #[test]
    fn canonical_triangle_draws_three_vertices_once() {
        let draw = plan_for(&Geometry::triangle()).draw();
        assert_eq!(draw, DrawCall { vertex_count: 3, instance_count: 1, first_vertex: 0, first_instance: 0 });
    }

    #[test]
    fn clear_color_is_opaque_black() {
        let c = plan_for(&Geometry::colored_triangle()).clear_color();
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn records_bindings_in_slot_order() {
        let mut log = CommandLog::default();
        plan_for(&Geometry::colored_triangle()).record(&mut log);
        assert_eq!(
            log.commands(),
            &[
                RecordedCommand::SetPipeline,
                RecordedCommand::SetVertexBuffer { slot: 0 },
                RecordedCommand::SetVertexBuffer { slot: 1 },
                RecordedCommand::Draw { vertices: 0..3, instances: 0..1 },
            ]
        );
    }

    #[test]
    fn embedded_plan_binds_no_buffers() {
        let mut log = CommandLog::default();
        plan_for(&Geometry::embedded_triangle()).record(&mut log);
        assert_eq!(
            log.commands(),
            &[RecordedCommand::SetPipeline, RecordedCommand::Draw { vertices: 0..3, instances: 0..1 }]
        );
    }

    #[test]
    fn bindings_require_every_planned_slot() {
        let plan = plan_for(&Geometry::colored_triangle());
        assert!(plan.check_bindings(&[0, 1]).is_ok());
        assert!(matches!(plan.check_bindings(&[0]), Err(RenderError::GpuValidation(_))));
        assert!(plan_for(&Geometry::embedded_triangle()).check_bindings(&[]).is_ok());
    }

    #[test]
    fn replaying_twice_records_identical_frames() {
        let plan = plan_for(&Geometry::triangle());
        let mut first = CommandLog::default();
        let mut second = CommandLog::default();
        plan.record(&mut first);
        plan.record(&mut second);
        assert_eq!(first, second);
        assert_eq!(plan, plan_for(&Geometry::triangle()));
    }
}
