//! WebGPU rendering module
//!
//! `shapes` turns a frame into flat-colored triangles, `pipeline` puts them
//! on the canvas.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use crate::game::{Frame, Renderer};

/// [`Renderer`] backed by a wgpu surface
pub struct WgpuRenderer {
    state: RenderState,
    /// Reused between frames to avoid reallocating
    vertices: Vec<Vertex>,
}

impl WgpuRenderer {
    pub fn new(state: RenderState) -> Self {
        Self {
            state,
            vertices: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.state.resize(width, height);
    }
}

impl Renderer for WgpuRenderer {
    fn draw_frame(&mut self, frame: &Frame<'_>) {
        shapes::build_scene(frame, &mut self.vertices);
        match self.state.render(&self.vertices) {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let (w, h) = self.state.size;
                self.state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}
