use glutin::{
    config::{Config, ConfigTemplateBuilder},
    context::{ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version},
    display::{GetGlDisplay, GlDisplay},
    prelude::*,
    surface::{Surface, SwapInterval, WindowSurface},
};
use glutin_winit::{DisplayBuilder, GlWindow as _};
use log::{info, warn};
use raw_window_handle::HasRawWindowHandle;
use std::{
    ffi::{CStr, CString},
    num::NonZeroU32,
    ptr,
};
use winit::{
    dpi::PhysicalSize,
    event_loop::EventLoop,
    window::{Window, WindowBuilder},
};

use crate::config::WindowConfig;
use crate::utils::error::EngineError;
use crate::utils::gl_error::drain_gl_errors;

/// A window with its surface and a current OpenGL core-profile context.
///
/// Field order is drop order: context and surface go before the window.
pub struct GlWindow {
    gl_context: PossiblyCurrentContext,
    gl_surface: Surface<WindowSurface>,
    window: Window,
}

impl GlWindow {
    pub fn create(event_loop: &EventLoop<()>, config: &WindowConfig) -> Result<Self, EngineError> {
        let window_builder = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(false);

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        let (window, gl_config) = display_builder
            .build(event_loop, template, pick_config)
            .map_err(|e| EngineError::WindowCreation(e.to_string()))?;
        let window = window.ok_or_else(|| {
            EngineError::WindowCreation("display builder returned no window".to_string())
        })?;

        let (major, minor) = config.gl_version();
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(window.raw_window_handle()));

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| {
                EngineError::WindowCreation(format!(
                    "OpenGL {}.{} core context unavailable: {}",
                    major, minor, e
                ))
            })?;

        let attrs = window.build_surface_attributes(Default::default());
        let gl_surface = unsafe { gl_display.create_window_surface(&gl_config, &attrs) }
            .map_err(|e| EngineError::WindowCreation(format!("surface: {}", e)))?;

        let gl_context = not_current
            .make_current(&gl_surface)
            .map_err(|e| EngineError::WindowCreation(format!("make current: {}", e)))?;

        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => ptr::null(),
        });

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            warn!("Failed to set swap interval: {}", e);
        }

        info!(
            "OpenGL context: {} ({})",
            gl_string(gl::VERSION),
            gl_string(gl::RENDERER)
        );

        let gl_window = GlWindow {
            gl_context,
            gl_surface,
            window,
        };
        gl_window.reset_viewport();
        drain_gl_errors("context setup");
        Ok(gl_window)
    }

    /// Covers the whole drawable area of the window.
    pub fn reset_viewport(&self) {
        let size = self.window.inner_size();
        unsafe {
            gl::Viewport(0, 0, size.width as i32, size.height as i32);
        }
    }

    pub fn swap_buffers(&self) -> Result<(), EngineError> {
        self.gl_surface.swap_buffers(&self.gl_context)?;
        Ok(())
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    // glutin-winit returns an error instead of calling the picker with no configs.
    most_samples(configs, |config| config.num_samples())
        .unwrap_or_else(|| unreachable!("config picker called with no configs"))
}

/// First config with the highest sample count.
fn most_samples<C>(configs: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
    configs.reduce(|best, config| {
        if samples(&config) > samples(&best) {
            config
        } else {
            best
        }
    })
}

fn gl_string(name: gl::types::GLenum) -> String {
    let raw = unsafe { gl::GetString(name) };
    if raw.is_null() {
        return "unknown".to_string();
    }
    unsafe { CStr::from_ptr(raw.cast()) }
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_samples_prefers_highest_then_first() {
        let configs = vec![("a", 0), ("b", 4), ("c", 2), ("d", 4)];
        let picked = most_samples(configs.into_iter(), |&(_, samples)| samples);
        assert_eq!(picked, Some(("b", 4)));
    }

    #[test]
    fn test_most_samples_empty() {
        let picked = most_samples(std::iter::empty::<(&str, u8)>(), |&(_, samples)| samples);
        assert_eq!(picked, None);
    }
}
