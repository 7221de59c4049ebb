//! Prism engine crate.
//!
//! Builds the one-triangle frame procedure: capability check, device
//! acquisition, shader compilation, vertex upload, pipeline construction and
//! per-frame draw submission. Window integration lives in the host binary.

pub mod device;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod pipeline;
pub mod shader;

mod error;

pub use error::{RenderError, Result};
pub use pipeline::{initialize, FrameConfig, FrameProcedure, FrameStatus};
pub use shader::{ShaderLanguage, ShaderSources, TriangleStyle};
