use gl::types::*;
use glam::Vec3;
use std::ffi::c_void;
use std::mem;
use thiserror::Error;

use crate::utils::gl_error::{check_gl_error, drain_gl_errors, GlError};

#[derive(Debug, Error)]
pub enum MeshError {
    #[error("Index count {0} is not a multiple of 3")]
    NotTriangles(usize),
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("Upload failed: {0}")]
    Gl(#[from] GlError),
}

/// CPU-side triangle list: tightly packed positions plus `u32` indices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Unit equilateral triangle split into three corner triangles by its
    /// edge midpoints. The middle triangle is left empty.
    pub fn subdivided_triangle() -> Self {
        let h = 3f32.sqrt();
        let vertices = vec![
            Vec3::new(-0.5, -0.5 * h / 3.0, 0.0),      // left corner
            Vec3::new(0.5, -0.5 * h / 3.0, 0.0),       // right corner
            Vec3::new(0.0, 0.5 * h * 2.0 / 3.0, 0.0),  // top corner
            Vec3::new(-0.5 / 2.0, 0.5 * h / 6.0, 0.0), // inner left
            Vec3::new(0.5 / 2.0, 0.5 * h / 6.0, 0.0),  // inner right
            Vec3::new(0.0, -0.5 * h / 3.0, 0.0),       // inner down
        ];
        let indices = vec![
            0, 3, 5, // lower left
            3, 2, 4, // top
            5, 4, 1, // lower right
        ];
        Self::new(vertices, indices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::NotTriangles(self.indices.len()));
        }
        let vertex_count = self.vertices.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(())
    }
}

/// Layout of one float vertex attribute inside the bound array buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub location: GLuint,
    pub components: GLint,
    pub normalized: bool,
    pub stride: GLsizei,
    pub offset: usize,
}

impl VertexAttribute {
    pub const POSITION: VertexAttribute = VertexAttribute {
        location: 0,
        components: 3,
        normalized: false,
        stride: mem::size_of::<Vec3>() as GLsizei,
        offset: 0,
    };

    /// Records the layout into the currently bound vertex array.
    unsafe fn apply(&self) {
        gl::VertexAttribPointer(
            self.location,
            self.components,
            gl::FLOAT,
            if self.normalized { gl::TRUE } else { gl::FALSE },
            self.stride,
            self.offset as *const c_void,
        );
        gl::EnableVertexAttribArray(self.location);
    }
}

/// Static mesh resident on the GPU.
pub struct GpuMesh {
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    index_count: GLsizei,
}

impl GpuMesh {
    pub fn upload(data: &MeshData) -> Result<Self, MeshError> {
        data.validate()?;

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&data.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&data.indices);

        drain_gl_errors("before mesh upload");

        let (mut vao, mut vbo, mut ebo) = (0, 0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            gl::GenBuffers(1, &mut ebo);

            // The element buffer binding is VAO state, so the VAO goes first.
            gl::BindVertexArray(vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertex_bytes.len() as GLsizeiptr,
                vertex_bytes.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
            gl::BufferData(
                gl::ELEMENT_ARRAY_BUFFER,
                index_bytes.len() as GLsizeiptr,
                index_bytes.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            VertexAttribute::POSITION.apply();

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
            // Only after the VAO is unbound, or it would forget its indices.
            gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, 0);
        }

        let mesh = GpuMesh {
            vao,
            vbo,
            ebo,
            index_count: data.index_count() as GLsizei,
        };
        check_gl_error("mesh upload")?;

        log::debug!(
            "Uploaded mesh: {} vertices, {} indices (vao {})",
            data.vertex_count(),
            data.index_count(),
            vao
        );
        Ok(mesh)
    }

    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.vao);
            gl::DrawElements(
                gl::TRIANGLES,
                self.index_count,
                gl::UNSIGNED_INT,
                std::ptr::null(),
            );
        }
    }
}

impl Drop for GpuMesh {
    fn drop(&mut self) {
        log::debug!("Deleting mesh (vao {})", self.vao);
        unsafe {
            gl::DeleteVertexArrays(1, &self.vao);
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteBuffers(1, &self.ebo);
        }
    }
}
