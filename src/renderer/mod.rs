//! WebGPU rendering module
//!
//! Flat-colored triangle lists: the sim state is tessellated on the CPU
//! each frame and drawn in a single pass.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::build_scene;
pub use vertex::Vertex;
