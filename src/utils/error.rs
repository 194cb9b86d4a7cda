use thiserror::Error;

use crate::config::ConfigError;
use crate::render::mesh::MeshError;
use crate::render::shaders::ShaderError;

/// Exit status reported when no window could be created.
pub const WINDOW_FAILURE_EXIT_CODE: i32 = -1;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Window creation failed: {0}")]
    WindowCreation(String),

    #[error("Surface error: {0}")]
    Surface(#[from] glutin::error::Error),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("Shader error: {0}")]
    Shader(#[from] ShaderError),

    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}

impl EngineError {
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineError::WindowCreation(_) => WINDOW_FAILURE_EXIT_CODE,
            _ => 1,
        }
    }
}
