use crate::config::RenderConfig;
use crate::engine::FrameRenderer;
use crate::render::context::GlWindow;
use crate::render::mesh::{GpuMesh, MeshData};
use crate::render::shaders::{triangle_shaders, ShaderProgram};
use crate::utils::error::EngineError;

/// A GPU-side object freed exactly once during teardown.
pub trait Release {
    fn release(self);
}

impl Release for GpuMesh {
    fn release(self) {
        drop(self);
    }
}

impl Release for ShaderProgram {
    fn release(self) {
        drop(self);
    }
}

impl Release for GlWindow {
    fn release(self) {
        drop(self);
    }
}

/// Program and mesh for the indexed triangle.
pub struct TriangleScene<M = GpuMesh, P = ShaderProgram> {
    mesh: M,
    program: P,
}

impl TriangleScene {
    pub fn new(config: &RenderConfig) -> Result<Self, EngineError> {
        let fragment_src = triangle_shaders::fragment_source(config.triangle_color);
        let program = ShaderProgram::from_sources(triangle_shaders::VERTEX_SRC, &fragment_src)?;
        let mesh = GpuMesh::upload(&MeshData::subdivided_triangle())?;
        Ok(Self { mesh, program })
    }

    pub fn draw(&self) {
        self.program.set_used();
        self.mesh.draw();
    }
}

/// Owns every GL resource of a run.
pub struct RenderPipeline<T = GlWindow, M = GpuMesh, P = ShaderProgram> {
    scene: Option<TriangleScene<M, P>>,
    target: T,
}

impl RenderPipeline {
    /// Plain clear-to-color pipeline.
    pub fn clear_only(target: GlWindow) -> Self {
        Self {
            scene: None,
            target,
        }
    }

    pub fn with_triangle(target: GlWindow, config: &RenderConfig) -> Result<Self, EngineError> {
        let scene = TriangleScene::new(config)?;
        log::info!("Triangle scene ready");
        Ok(Self {
            scene: Some(scene),
            target,
        })
    }

    pub fn request_redraw(&self) {
        self.target.request_redraw();
    }
}

impl<T: Release, M: Release, P: Release> RenderPipeline<T, M, P> {
    /// Releases the mesh, then the program, then the context and window.
    pub fn teardown(self) {
        let RenderPipeline { scene, target } = self;
        if let Some(TriangleScene { mesh, program }) = scene {
            mesh.release();
            program.release();
        }
        target.release();
        log::info!("Render resources released");
    }
}

impl FrameRenderer for RenderPipeline {
    fn clear(&mut self, color: [f32; 4]) {
        let [r, g, b, a] = color;
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }

    fn draw(&mut self) {
        if let Some(scene) = &self.scene {
            scene.draw();
        }
    }

    fn present(&mut self) -> Result<(), EngineError> {
        self.target.swap_buffers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    struct Tracked {
        name: &'static str,
        log: Log,
    }

    impl Release for Tracked {
        fn release(self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn tracked(name: &'static str, log: &Log) -> Tracked {
        Tracked {
            name,
            log: Rc::clone(log),
        }
    }

    #[test]
    fn test_teardown_releases_mesh_then_program_then_target() {
        let log = Log::default();
        let pipeline = RenderPipeline {
            scene: Some(TriangleScene {
                mesh: tracked("mesh", &log),
                program: tracked("program", &log),
            }),
            target: tracked("target", &log),
        };

        pipeline.teardown();
        assert_eq!(*log.borrow(), vec!["mesh", "program", "target"]);
    }

    #[test]
    fn test_clear_only_teardown_releases_only_target() {
        let log = Log::default();
        let pipeline: RenderPipeline<Tracked, Tracked, Tracked> = RenderPipeline {
            scene: None,
            target: tracked("target", &log),
        };

        pipeline.teardown();
        assert_eq!(*log.borrow(), vec!["target"]);
    }
}
