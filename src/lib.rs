pub mod app;
pub mod config;
pub mod engine;
pub mod render;
pub mod utils;

// Re-export commonly used types
pub use app::{run, Variant};
pub use config::{EngineConfig, RenderConfig, WindowConfig};
pub use engine::{FrameLoop, FrameRenderer, LoopState};
pub use render::mesh::MeshData;
pub use render::pipeline::RenderPipeline;
pub use render::shaders::ShaderProgram;
pub use utils::error::EngineError;
