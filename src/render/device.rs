// device.rs - The OpenGL calls the shader builder depends on

use gl::types::*;
use std::ffi::CStr;
use std::ptr;

use crate::shader::program::ShaderStage;

/// Shader and program operations of a graphics context.
///
/// Every call runs on the thread owning the current context. Status values are
/// queried after the fact with `get_shader_iv`/`get_program_iv`, as in OpenGL.
pub trait GraphicsDevice {
    fn create_shader(&self, stage: ShaderStage) -> GLuint;
    fn shader_source(&self, shader: GLuint, source: &CStr);
    fn compile_shader(&self, shader: GLuint);
    fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint;
    /// Reads up to `len` bytes of the shader's info log.
    fn get_shader_info_log(&self, shader: GLuint, len: GLint) -> String;
    fn delete_shader(&self, shader: GLuint);

    fn create_program(&self) -> GLuint;
    fn attach_shader(&self, program: GLuint, shader: GLuint);
    fn link_program(&self, program: GLuint);
    fn validate_program(&self, program: GLuint);
    fn get_program_iv(&self, program: GLuint, pname: GLenum) -> GLint;
    fn get_program_info_log(&self, program: GLuint, len: GLint) -> String;
    fn use_program(&self, program: GLuint);
    fn delete_program(&self, program: GLuint);
}

/// [`GraphicsDevice`] backed by the globally loaded `gl` function pointers.
///
/// Only construct this after `gl::load_with` has run against a current context.
#[derive(Debug, Default, Clone, Copy)]
pub struct GlDevice;

impl GlDevice {
    pub fn new() -> Self {
        Self
    }

    /// Driver version string, e.g. "3.3.0 NVIDIA 535.54".
    pub fn version(&self) -> String {
        unsafe {
            let version = gl::GetString(gl::VERSION);
            if version.is_null() {
                return String::from("unknown");
            }
            CStr::from_ptr(version as *const GLchar)
                .to_string_lossy()
                .into_owned()
        }
    }
}

fn log_buffer(len: GLint) -> Vec<u8> {
    vec![0u8; len.max(1) as usize]
}

fn buffer_to_string(mut buffer: Vec<u8>, written: GLsizei) -> String {
    buffer.truncate(written.max(0) as usize);
    String::from_utf8_lossy(&buffer).into_owned()
}

impl GraphicsDevice for GlDevice {
    fn create_shader(&self, stage: ShaderStage) -> GLuint {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn shader_source(&self, shader: GLuint, source: &CStr) {
        unsafe { gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null()) }
    }

    fn compile_shader(&self, shader: GLuint) {
        unsafe { gl::CompileShader(shader) }
    }

    fn get_shader_iv(&self, shader: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { gl::GetShaderiv(shader, pname, &mut value) };
        value
    }

    fn get_shader_info_log(&self, shader: GLuint, len: GLint) -> String {
        let mut buffer = log_buffer(len);
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(
                shader,
                buffer.len() as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        buffer_to_string(buffer, written)
    }

    fn delete_shader(&self, shader: GLuint) {
        unsafe { gl::DeleteShader(shader) }
    }

    fn create_program(&self) -> GLuint {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&self, program: GLuint, shader: GLuint) {
        unsafe { gl::AttachShader(program, shader) }
    }

    fn link_program(&self, program: GLuint) {
        unsafe { gl::LinkProgram(program) }
    }

    fn validate_program(&self, program: GLuint) {
        unsafe { gl::ValidateProgram(program) }
    }

    fn get_program_iv(&self, program: GLuint, pname: GLenum) -> GLint {
        let mut value = 0;
        unsafe { gl::GetProgramiv(program, pname, &mut value) };
        value
    }

    fn get_program_info_log(&self, program: GLuint, len: GLint) -> String {
        let mut buffer = log_buffer(len);
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(
                program,
                buffer.len() as GLsizei,
                &mut written,
                buffer.as_mut_ptr() as *mut GLchar,
            );
        }
        buffer_to_string(buffer, written)
    }

    fn use_program(&self, program: GLuint) {
        unsafe { gl::UseProgram(program) }
    }

    fn delete_program(&self, program: GLuint) {
        unsafe { gl::DeleteProgram(program) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_buffer_never_empty() {
        assert_eq!(log_buffer(0).len(), 1);
        assert_eq!(log_buffer(-4).len(), 1);
        assert_eq!(log_buffer(64).len(), 64);
    }

    #[test]
    fn test_buffer_truncated_to_written() {
        let mut buffer = log_buffer(16);
        buffer[..5].copy_from_slice(b"error");
        assert_eq!(buffer_to_string(buffer, 5), "error");
        assert_eq!(buffer_to_string(log_buffer(8), -1), "");
    }
}
