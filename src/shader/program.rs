// program.rs - Compiles shader stages and links them into a program

use gl::types::*;
use log::{error, info, warn};
use std::ffi::{CStr, CString};
use std::fmt;
use std::path::Path;

use crate::render::device::GraphicsDevice;
use crate::shader::source::{parse_shader, ShaderProgramSource};
use crate::utils::error::{Result, ShaderError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A successfully compiled stage object. Dropping it deletes the object.
pub struct CompiledStage<'d, D: GraphicsDevice + ?Sized> {
    device: &'d D,
    id: GLuint,
    stage: ShaderStage,
}

impl<'d, D: GraphicsDevice + ?Sized> CompiledStage<'d, D> {
    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<D: GraphicsDevice + ?Sized> Drop for CompiledStage<'_, D> {
    fn drop(&mut self) {
        self.device.delete_shader(self.id);
    }
}

/// A linked program. Owns the program object and deletes it on drop.
pub struct ShaderProgram<'d, D: GraphicsDevice + ?Sized> {
    device: &'d D,
    id: GLuint,
}

impl<'d, D: GraphicsDevice + ?Sized> ShaderProgram<'d, D> {
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Binds the program for subsequent draw calls.
    pub fn set_used(&self) {
        self.device.use_program(self.id);
    }

    fn info_log(&self) -> String {
        let len = self.device.get_program_iv(self.id, gl::INFO_LOG_LENGTH);
        self.device.get_program_info_log(self.id, len)
    }
}

impl<D: GraphicsDevice + ?Sized> Drop for ShaderProgram<'_, D> {
    fn drop(&mut self) {
        self.device.delete_program(self.id);
    }
}

/// Compiles one stage. On failure the log is reported, the stage object is
/// deleted and [`ShaderError::Compilation`] is returned.
pub fn compile_stage<'d, D: GraphicsDevice + ?Sized>(
    device: &'d D,
    stage: ShaderStage,
    source: &str,
) -> Result<CompiledStage<'d, D>> {
    let source = CString::new(source)?;
    compile_cstr(device, stage, &source)
}

fn compile_cstr<'d, D: GraphicsDevice + ?Sized>(
    device: &'d D,
    stage: ShaderStage,
    source: &CStr,
) -> Result<CompiledStage<'d, D>> {
    let compiled = CompiledStage {
        device,
        id: device.create_shader(stage),
        stage,
    };
    device.shader_source(compiled.id, source);
    device.compile_shader(compiled.id);

    if device.get_shader_iv(compiled.id, gl::COMPILE_STATUS) == 0 {
        let len = device.get_shader_iv(compiled.id, gl::INFO_LOG_LENGTH);
        let log = device.get_shader_info_log(compiled.id, len);
        error!("Failed to compile {} shader", stage);
        error!("{}", log);
        return Err(ShaderError::Compilation { stage, log });
    }

    Ok(compiled)
}

/// Compiles both stages of `source` and links them into a program.
///
/// A failed stage stops the build before linking. Stage objects are deleted
/// exactly once on every path; the program object is deleted unless it is
/// returned.
pub fn build_program<'d, D: GraphicsDevice + ?Sized>(
    device: &'d D,
    source: &ShaderProgramSource,
) -> Result<ShaderProgram<'d, D>> {
    let vertex_source = CString::new(source.vertex())?;
    let fragment_source = CString::new(source.fragment())?;

    let program = ShaderProgram {
        device,
        id: device.create_program(),
    };

    let vertex = compile_cstr(device, ShaderStage::Vertex, &vertex_source)?;
    let fragment = compile_cstr(device, ShaderStage::Fragment, &fragment_source)?;

    device.attach_shader(program.id, vertex.id());
    device.attach_shader(program.id, fragment.id());
    device.link_program(program.id);
    device.validate_program(program.id);

    drop(vertex);
    drop(fragment);

    if device.get_program_iv(program.id, gl::LINK_STATUS) == 0 {
        let log = program.info_log();
        error!("Program linking failed: {}", log);
        return Err(ShaderError::Linking { log });
    }

    if device.get_program_iv(program.id, gl::VALIDATE_STATUS) == 0 {
        warn!("Program {} failed validation: {}", program.id, program.info_log());
    }

    info!("Linked shader program {}", program.id);
    Ok(program)
}

/// Reads a combined shader file and builds a program from it.
pub fn load_program<'d, D: GraphicsDevice + ?Sized, P: AsRef<Path>>(
    device: &'d D,
    path: P,
) -> Result<ShaderProgram<'d, D>> {
    let source = parse_shader(path);
    build_program(device, &source)
}
