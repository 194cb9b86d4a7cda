pub mod core;
pub mod rendering;
pub mod window;

pub use self::core::{ConfigError, EngineConfig, LoadedConfig};
pub use rendering::RenderConfig;
pub use window::WindowConfig;
