pub mod program;
pub mod source;

pub use program::{build_program, compile_stage, load_program, CompiledStage, ShaderProgram, ShaderStage};
pub use source::{parse_shader, parse_shader_str, ShaderProgramSource, StageKind};
