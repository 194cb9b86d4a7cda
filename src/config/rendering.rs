use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// RGBA background written by every frame's clear.
    pub clear_color: [f32; 4],
    /// RGBA output of the triangle's fragment stage.
    pub triangle_color: [f32; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.93, 1.0, 0.99, 1.0],
            triangle_color: [0.92, 0.25, 0.20, 1.0],
        }
    }
}
