//! Frame loop state machine.
//!
//! Rendering is delegated to a [`FrameRenderer`] so the loop itself stays
//! independent of the window and GL context.

use crate::utils::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closed,
}

/// One frame's worth of GPU work.
pub trait FrameRenderer {
    fn clear(&mut self, color: [f32; 4]);
    /// Issues the frame's draw call. Does nothing when there is no scene.
    fn draw(&mut self);
    fn present(&mut self) -> Result<(), EngineError>;
}

#[derive(Debug)]
pub struct FrameLoop {
    state: LoopState,
    clear_color: [f32; 4],
    frames: u64,
}

impl FrameLoop {
    pub fn new(clear_color: [f32; 4]) -> Self {
        Self {
            state: LoopState::Running,
            clear_color,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Closing is one-way.
    pub fn request_close(&mut self) {
        if self.state == LoopState::Running {
            log::info!("Close requested after {} frames", self.frames);
        }
        self.state = LoopState::Closed;
    }

    /// Clears, draws and presents once. Returns `Ok(false)` once closed.
    pub fn render_frame<R: FrameRenderer + ?Sized>(
        &mut self,
        renderer: &mut R,
    ) -> Result<bool, EngineError> {
        if self.state == LoopState::Closed {
            return Ok(false);
        }

        renderer.clear(self.clear_color);
        renderer.draw();
        renderer.present()?;
        self.frames += 1;
        Ok(true)
    }
}
