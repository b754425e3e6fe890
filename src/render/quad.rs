// quad.rs - The fixed two-triangle quad drawn by the demo

use gl::types::*;
use std::mem;
use std::ptr;

/// Corner positions, two floats each.
pub const POSITIONS: [f32; 8] = [
    -0.5, -0.5, //
    -0.5, 0.5, //
    0.5, -0.5, //
    0.5, 0.5,
];

/// Two triangles sharing the (-0.5, 0.5)/(0.5, -0.5) diagonal.
pub const INDICES: [u32; 6] = [0, 1, 2, 1, 2, 3];

const COMPONENTS: GLint = 2;

pub struct QuadMesh {
    vao: GLuint,
    vbo: GLuint,
    ibo: GLuint,
}

impl QuadMesh {
    /// Uploads the quad into new GL buffers. Requires a current context.
    pub fn upload() -> Self {
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&POSITIONS);
        let index_bytes: &[u8] = bytemuck::cast_slice(&INDICES);

        let mut vao = 0;
        let mut vbo = 0;
        let mut ibo = 0;
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            gl::GenBuffers(1, &mut vbo);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertex_bytes.len() as GLsizeiptr,
                vertex_bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            gl::GenBuffers(1, &mut ibo);
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                index_bytes.len() as GLsizeiptr,
                index_bytes.as_ptr() as *const _,
                gl::STATIC_DRAW,
            );

            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(
                0,
                COMPONENTS,
                gl::FLOAT,
                gl::FALSE,
                stride(),
                ptr::null(),
            );
        }

        log::debug!("Uploaded quad: vao {}, vbo {}, ibo {}", vao, vbo, ibo);
        Self { vao, vbo, ibo }
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                INDICES.len() as GLsizei,
                gl::UNSIGNED_INT,
                ptr::null(),
            );
        }
    }
}

impl Drop for QuadMesh {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.ibo);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

fn stride() -> GLsizei {
    COMPONENTS * mem::size_of::<f32>() as GLsizei
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_reference_existing_vertices() {
        let vertex_count = POSITIONS.len() / COMPONENTS as usize;
        assert_eq!(vertex_count, 4);
        assert!(INDICES.iter().all(|&i| (i as usize) < vertex_count));
    }

    #[test]
    fn test_layout_sizes() {
        assert_eq!(stride(), 8);
        assert_eq!(bytemuck::cast_slice::<f32, u8>(&POSITIONS).len(), 32);
        assert_eq!(bytemuck::cast_slice::<u32, u8>(&INDICES).len(), 24);
    }
}
