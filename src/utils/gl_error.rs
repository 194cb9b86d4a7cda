use gl::types::GLenum;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name} (0x{code:04X}) after {op}")]
pub struct GlError {
    pub code: GLenum,
    pub name: &'static str,
    pub op: &'static str,
}

impl GlError {
    pub fn new(code: GLenum, op: &'static str) -> Self {
        Self {
            code,
            name: error_name(code),
            op,
        }
    }
}

/// Symbolic name for a `glGetError` code.
pub fn error_name(code: GLenum) -> &'static str {
    match code {
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        gl::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        gl::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        _ => "GL_UNKNOWN_ERROR",
    }
}

/// Pops error codes from `next` until it yields `GL_NO_ERROR`.
fn collect_errors(mut next: impl FnMut() -> GLenum, op: &'static str) -> Vec<GlError> {
    let mut errors = Vec::new();
    loop {
        let code = next();
        if code == gl::NO_ERROR {
            return errors;
        }
        errors.push(GlError::new(code, op));
    }
}

/// Drains the GL error queue and returns the first recorded error, if any.
///
/// Requires a current context with loaded function pointers.
pub fn check_gl_error(op: &'static str) -> Result<(), GlError> {
    let errors = collect_errors(|| unsafe { gl::GetError() }, op);
    for err in &errors {
        log::warn!("OpenGL error: {}", err);
    }

    match errors.into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Logs and discards errors left by earlier calls so the next
/// [`check_gl_error`] only sees its own operation's errors.
pub fn drain_gl_errors(op: &'static str) {
    for err in collect_errors(|| unsafe { gl::GetError() }, op) {
        log::warn!("Stale OpenGL error: {}", err);
    }
}
