pub mod config;
pub mod render;
pub mod shader;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use render::{GlDevice, GraphicsDevice, QuadMesh};
pub use shader::{build_program, load_program, parse_shader, ShaderProgram, ShaderProgramSource};
pub use utils::error::{ConfigError, ShaderError};
