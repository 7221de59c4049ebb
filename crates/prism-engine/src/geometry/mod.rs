//! Vertex data and vertex buffer layouts.
//!
//! Slot numbering is a contract between the pipeline layout and draw-time
//! bindings: slot 0 carries positions, slot 1 carries colors.

mod layout;
mod mesh;
mod vertex;

pub use layout::{VertexBufferSpec, VertexLayout};
pub use mesh::{BufferData, Geometry};
pub use vertex::{
    Position, VertexColor, COLOR_SLOT, POSITION_SLOT, TRIANGLE_COLORS, TRIANGLE_POSITIONS,
};
