pub mod error;
pub mod gl_error;
pub mod logging;

pub use error::EngineError;
pub use gl_error::{check_gl_error, drain_gl_errors, GlError};
