//! Window bootstrap and the winit event loop shared by both binaries.

use anyhow::Context;
use log::{error, info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoopBuilder},
};

use crate::config::EngineConfig;
use crate::engine::FrameLoop;
use crate::render::{GlWindow, RenderPipeline};
use crate::utils::error::EngineError;
use crate::utils::logging;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Clear the window every frame, nothing else.
    ClearOnly,
    /// Clear, then draw the subdivided triangle.
    Triangle,
}

pub fn run(config: &EngineConfig, variant: Variant) -> Result<(), EngineError> {
    info!("Starting {:?} variant", variant);

    let event_loop = EventLoopBuilder::new().build()?;
    let gl_window = GlWindow::create(&event_loop, &config.window)?;

    let pipeline = match variant {
        Variant::ClearOnly => RenderPipeline::clear_only(gl_window),
        Variant::Triangle => RenderPipeline::with_triangle(gl_window, &config.rendering)?,
    };

    let mut frame_loop = FrameLoop::new(config.rendering.clear_color);
    let mut pipeline = Some(pipeline);
    let mut failure = None;

    event_loop.set_control_flow(ControlFlow::Poll);
    event_loop.run(|event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => {
            frame_loop.request_close();
            elwt.exit();
        }
        Event::WindowEvent {
            event: WindowEvent::RedrawRequested,
            ..
        } => {
            if let Some(pipeline) = pipeline.as_mut() {
                if let Err(e) = frame_loop.render_frame(pipeline) {
                    error!("Frame failed: {}", e);
                    failure = Some(e);
                    frame_loop.request_close();
                    elwt.exit();
                }
            }
        }
        Event::AboutToWait => {
            if frame_loop.is_running() {
                if let Some(pipeline) = &pipeline {
                    pipeline.request_redraw();
                }
            }
        }
        Event::LoopExiting => {
            if let Some(pipeline) = pipeline.take() {
                pipeline.teardown();
            }
        }
        _ => (),
    })?;

    info!("Event loop finished after {} frames", frame_loop.frames());
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Binary entry point: config, logging, then [`run`].
///
/// A window that can't be created ends the process with status -1.
pub fn launch(variant: Variant) -> anyhow::Result<()> {
    let loaded = EngineConfig::load_or_default().context("Failed to load config")?;
    let config = loaded.config;
    logging::init(&config.log_level)?;
    if let Some(reason) = loaded.fallback {
        warn!("Using default config: {}", reason);
    }

    let Err(e) = run(&config, variant) else {
        return Ok(());
    };
    match on_failure(&e) {
        Failure::Exit { code, message } => {
            println!("{}", message);
            error!("{}", e);
            std::process::exit(code);
        }
        Failure::Propagate => Err(e.into()),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Failure {
    /// Report on stdout and end the process with `code`.
    Exit { code: i32, message: String },
    /// Hand the error back to `main`.
    Propagate,
}

fn on_failure(e: &EngineError) -> Failure {
    match e {
        EngineError::WindowCreation(reason) => Failure::Exit {
            code: e.exit_code(),
            message: format!("FAILED to create window: {}", reason),
        },
        _ => Failure::Propagate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::shaders::ShaderError;

    #[test]
    fn test_window_failure_exits_with_minus_one() {
        let err = EngineError::WindowCreation("OpenGL 3.3 core context unavailable".into());
        assert_eq!(
            on_failure(&err),
            Failure::Exit {
                code: -1,
                message: "FAILED to create window: OpenGL 3.3 core context unavailable"
                    .to_string(),
            }
        );
    }

    #[test]
    fn test_other_failures_propagate() {
        let err = EngineError::Shader(ShaderError::Linking("no main".into()));
        assert_eq!(on_failure(&err), Failure::Propagate);
    }
}
