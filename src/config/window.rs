use serde::{Deserialize, Serialize};

/// Window and context request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Requested OpenGL context version. Always a core profile.
    pub gl_major: u8,
    pub gl_minor: u8,
    pub vsync: bool,
}

impl WindowConfig {
    pub const MIN_GL_VERSION: (u8, u8) = (3, 3);

    pub fn gl_version(&self) -> (u8, u8) {
        (self.gl_major, self.gl_minor)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Futium Game Engine".to_string(),
            width: 800,
            height: 800,
            gl_major: 3,
            gl_minor: 3,
            vsync: true,
        }
    }
}
