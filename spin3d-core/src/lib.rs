/// Spin3D Core Library - Mesh expansion and rotation pipeline
///
/// This library provides the stateless core functionality for 3D rendering:
/// indexed-mesh expansion into flat vertex/color buffers, the two rotation
/// transform policies, camera/projection math, and the per-frame driver
/// that ties them to a graphics-context collaborator.

pub mod context;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod models;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use context::{GraphicsContext, Primitive, UniformValue};
pub use driver::{Pipeline, RotationPolicy, ToggleEvent};
pub use error::{ConfigError, ContextError, PipelineError};
pub use geometry::{Color, ExpandedMesh, Face, MeshVertex, Shape};
pub use projection::{project_to_screen, Camera};
pub use transform::{AccumulatedModel, Axis, RotationState, Transform};
