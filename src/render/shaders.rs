// shaders.rs - Shader compilation and linking

use gl::types::*;
use std::ffi::{CString, NulError};
use std::fmt;
use std::ptr;
use thiserror::Error;

use crate::utils::gl_error::drain_gl_errors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader compilation failed: {log}")]
    Compilation { stage: ShaderStage, log: String },
    #[error("Program linking failed: {0}")]
    Linking(String),
    #[error("Null byte error: {0}")]
    Nul(#[from] NulError),
}

/// A linked vertex + fragment program.
pub struct ShaderProgram {
    id: GLuint,
}

impl ShaderProgram {
    pub fn from_sources(vertex_src: &str, fragment_src: &str) -> Result<Self, ShaderError> {
        let vertex_shader = Self::compile_shader(vertex_src, ShaderStage::Vertex)?;
        let fragment_shader = match Self::compile_shader(fragment_src, ShaderStage::Fragment) {
            Ok(shader) => shader,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex_shader) };
                return Err(e);
            }
        };

        let program = unsafe { gl::CreateProgram() };
        let linked = unsafe {
            gl::AttachShader(program, vertex_shader);
            gl::AttachShader(program, fragment_shader);
            let linked = Self::link_program(program);
            gl::DeleteShader(vertex_shader);
            gl::DeleteShader(fragment_shader);
            linked
        };

        if let Err(e) = linked {
            unsafe { gl::DeleteProgram(program) };
            return Err(e);
        }

        drain_gl_errors("shader program setup");
        log::debug!("Linked shader program {}", program);
        Ok(ShaderProgram { id: program })
    }

    fn compile_shader(source: &str, stage: ShaderStage) -> Result<GLuint, ShaderError> {
        let source = CString::new(source.as_bytes())?;

        let shader = unsafe { gl::CreateShader(stage.gl_enum()) };
        let mut success = 0;
        unsafe {
            gl::ShaderSource(shader, 1, &source.as_ptr(), ptr::null());
            gl::CompileShader(shader);
            gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        }

        if success == 0 {
            let mut len = 0;
            unsafe {
                gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            }
            let mut buffer = vec![0u8; len.max(1) as usize];
            unsafe {
                gl::GetShaderInfoLog(
                    shader,
                    len,
                    ptr::null_mut(),
                    buffer.as_mut_ptr() as *mut GLchar,
                );
                gl::DeleteShader(shader);
            }
            return Err(ShaderError::Compilation {
                stage,
                log: info_log_to_string(buffer),
            });
        }

        Ok(shader)
    }

    unsafe fn link_program(program: GLuint) -> Result<(), ShaderError> {
        gl::LinkProgram(program);

        let mut success = 0;
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);
        if success == 0 {
            let mut len = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let mut buffer = vec![0u8; len.max(1) as usize];
            gl::GetProgramInfoLog(
                program,
                len,
                ptr::null_mut(),
                buffer.as_mut_ptr() as *mut GLchar,
            );
            return Err(ShaderError::Linking(info_log_to_string(buffer)));
        }
        Ok(())
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        log::debug!("Deleting shader program {}", self.id);
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}

/// Trims the trailing NUL and whitespace GL leaves in info logs.
fn info_log_to_string(buffer: Vec<u8>) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).trim_end().to_string()
}

/// Sources for the flat-colored triangle.
pub mod triangle_shaders {
    pub const VERTEX_SRC: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;

void main() {
    gl_Position = vec4(aPos.x, aPos.y, aPos.z, 1.0);
}
"#;

    /// Fragment stage writing a constant color.
    pub fn fragment_source(color: [f32; 4]) -> String {
        let [r, g, b, a] = color;
        format!(
            r#"#version 330 core
out vec4 FragColor;

void main() {{
    FragColor = vec4({:?}, {:?}, {:?}, {:?});
}}
"#,
            r, g, b, a
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_enums() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), gl::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), gl::FRAGMENT_SHADER);
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn test_fragment_source_embeds_color() {
        let src = triangle_shaders::fragment_source([0.92, 0.25, 0.2, 1.0]);
        assert!(src.starts_with("#version 330 core"));
        assert!(src.contains("FragColor = vec4(0.92, 0.25, 0.2, 1.0);"));
    }

    #[test]
    fn test_whole_numbers_stay_float_literals() {
        // "1" would be an int literal in GLSL.
        let src = triangle_shaders::fragment_source([1.0, 0.0, 0.0, 1.0]);
        assert!(src.contains("vec4(1.0, 0.0, 0.0, 1.0)"));
    }

    #[test]
    fn test_vertex_source_reads_location_zero() {
        assert!(triangle_shaders::VERTEX_SRC.contains("layout (location = 0) in vec3 aPos;"));
    }

    #[test]
    fn test_info_log_trimming() {
        let log = info_log_to_string(b"0:3(1): error: syntax error\n\0\0".to_vec());
        assert_eq!(log, "0:3(1): error: syntax error");
        assert_eq!(info_log_to_string(vec![0]), "");
    }

    #[test]
    fn test_compilation_error_names_stage() {
        let err = ShaderError::Compilation {
            stage: ShaderStage::Vertex,
            log: "bad".into(),
        };
        assert_eq!(err.to_string(), "vertex shader compilation failed: bad");
    }
}
