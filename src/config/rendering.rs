use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Combined file holding `#shader vertex` and `#shader fragment` sections.
    pub shader_path: PathBuf,
    pub clear_color: [f32; 4],
    pub vsync: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            shader_path: PathBuf::from("res/shaders/Basic.shader"),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            vsync: true,
        }
    }
}
