//! Shader sources, compilation and stage reflection.
//!
//! Sources are explicit configuration (`ShaderSources`), never globals. Each
//! stage is parsed and validated on the CPU with naga, its location-bound
//! interface is reflected, and the IR is handed to wgpu.

mod builtin;
mod compile;
mod interface;
mod source;

pub use builtin::TriangleStyle;
pub use compile::{compile_stage, CompiledStage, ENTRY_POINT};
pub use interface::{check_stage_link, InterfaceSlot, StageInterface};
pub use source::{ShaderLanguage, ShaderSources, ShaderStage};
