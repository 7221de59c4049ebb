//! Per-frame command description and recording.
//!
//! A `FramePlan` fixes what each frame records; a `PassRecorder` decides
//! where the commands go (a live render pass or a `CommandLog`).

mod plan;
mod recorder;

pub use plan::{DrawCall, FramePlan, CLEAR_COLOR};
pub use recorder::{CommandLog, PassRecorder, RecordedCommand, SlotBuffer, WgpuPassRecorder};
