/// Graphics-context collaborator trait
use nalgebra::{Matrix4, Vector3};

use crate::error::ContextError;
use crate::geometry::ExpandedMesh;

/// Primitive mode for draw calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
}

/// Value pushed to a named shader uniform.
#[derive(Debug, Clone, Copy)]
pub enum UniformValue {
    Vec3(Vector3<f32>),
    Mat4(Matrix4<f32>),
}

/// The surface the frame driver renders against.
///
/// Implementations own surface acquisition, shader mechanics, and buffer
/// binding; the pipeline only uploads once and then pushes uniforms and
/// draw calls each tick. A backend that cannot provide a drawing surface
/// fails construction with `ContextError::Unsupported` before the loop
/// ever starts.
pub trait GraphicsContext {
    /// Hand the shader source pair to the backend. Backends without a
    /// programmable stage may ignore the sources.
    fn compile_program(&mut self, vertex_src: &str, fragment_src: &str)
        -> Result<(), ContextError>;

    /// Upload the expanded vertex/color buffers. Called once per pipeline.
    fn upload_mesh(&mut self, mesh: &ExpandedMesh) -> Result<(), ContextError>;

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), ContextError>;

    /// Issue one non-indexed draw over `vertex_count` vertices.
    fn draw(&mut self, primitive: Primitive, vertex_count: usize) -> Result<(), ContextError>;
}
