//! WebGPU render adapter
//!
//! Turns a `sim::Frame` into colored triangles and draws them. Text (score,
//! coins, game over) is drawn by the host page.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderInitError, RenderState, screen_to_ndc};
pub use shapes::frame_vertices;
pub use vertex::Vertex;
