//! Frame pipeline builder.
//!
//! `initialize` turns a `FrameConfig` into a `FrameProcedure`; the procedure
//! draws one frame per `render_frame` call until dropped.

mod builder;
mod config;
mod procedure;
mod render_pipeline;

pub use builder::{check_capability, check_geometry, compile_pair, initialize};
pub use config::FrameConfig;
pub use procedure::{FrameProcedure, FrameStatus};
