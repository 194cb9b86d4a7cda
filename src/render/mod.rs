pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod shaders;

pub use context::GlWindow;
pub use mesh::{GpuMesh, MeshData};
pub use pipeline::{RenderPipeline, TriangleScene};
pub use shaders::ShaderProgram;
