/// Frame driver: the per-tick control loop around one rendering pipeline
use std::collections::VecDeque;

use log::{debug, trace};
use nalgebra::{Matrix4, Vector3};

use crate::context::{GraphicsContext, Primitive, UniformValue};
use crate::error::{ContextError, PipelineError};
use crate::geometry::{ExpandedMesh, Face, Shape};
use crate::projection::Camera;
use crate::transform::{AccumulatedModel, Axis, RotationState};

/// Vertex shader for the composed-Euler policy: rotation is rebuilt from
/// the `theta` angle triple (degrees) every frame, X first, then Y, then Z.
const EULER_VERTEX_SHADER: &str = r#"
attribute vec4 position;
attribute vec4 vColor;
varying vec4 fColor;
uniform vec3 theta;

void main() {
    vec3 angles = radians(theta);
    vec3 c = cos(angles);
    vec3 s = sin(angles);

    mat4 rx = mat4(
        1.0, 0.0, 0.0, 0.0,
        0.0, c.x, s.x, 0.0,
        0.0, -s.x, c.x, 0.0,
        0.0, 0.0, 0.0, 1.0
    );
    mat4 ry = mat4(
        c.y, 0.0, -s.y, 0.0,
        0.0, 1.0, 0.0, 0.0,
        s.y, 0.0, c.y, 0.0,
        0.0, 0.0, 0.0, 1.0
    );
    mat4 rz = mat4(
        c.z, s.z, 0.0, 0.0,
        -s.z, c.z, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0
    );

    gl_Position = rz * ry * rx * position;
    fColor = vColor;
}
"#;

/// Vertex shader for the accumulated policy: the persistent model matrix
/// is combined with view and projection only at draw time.
const MATRIX_VERTEX_SHADER: &str = r#"
attribute vec3 position;
attribute vec4 vColor;
varying vec4 fColor;
uniform mat4 model;
uniform mat4 view;
uniform mat4 projection;

void main() {
    gl_Position = projection * view * model * vec4(position, 1.0);
    fColor = vColor;
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision mediump float;
varying vec4 fColor;

void main() {
    gl_FragColor = fColor;
}
"#;

/// External toggle events, delivered asynchronously and drained once per
/// tick. Single writer, no locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEvent {
    SelectAxis(Axis),
    ToggleRun,
}

/// Transform strategy for one pipeline instance.
///
/// The two policies are mutually exclusive and deliberately kept separate:
/// Euler composition rotates about fixed world axes from absolute angles,
/// while the accumulated matrix rotates about the object's own evolving
/// axes. They produce visibly different long-run trajectories.
pub enum RotationPolicy {
    /// Interactive: a fixed per-tick increment on the selected axis while
    /// the running flag is set.
    ComposedEuler {
        state: RotationState,
        step_degrees: f32,
    },
    /// Free-running: per-axis angular rates scaled by the frame delta and
    /// folded into a persistent model matrix, drawn behind fixed view and
    /// projection matrices.
    Accumulated {
        model: AccumulatedModel,
        rates: Vector3<f32>,
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
    },
}

impl RotationPolicy {
    pub fn euler(step_degrees: f32) -> Self {
        Self::ComposedEuler {
            state: RotationState::new(),
            step_degrees,
        }
    }

    pub fn accumulated(rates: Vector3<f32>, camera: &Camera) -> Self {
        Self::Accumulated {
            model: AccumulatedModel::new(),
            rates,
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
        }
    }

    fn vertex_shader(&self) -> &'static str {
        match self {
            Self::ComposedEuler { .. } => EULER_VERTEX_SHADER,
            Self::Accumulated { .. } => MATRIX_VERTEX_SHADER,
        }
    }
}

/// One parameterized rendering pipeline: expanded mesh, transform policy,
/// pending toggle events, and the graphics-context collaborator.
///
/// Owned by the caller and driven by repeated `tick` calls; there is no
/// process-wide state. Ticks are cooperative and single-threaded: each
/// completes its draw submission before the next is scheduled.
pub struct Pipeline<G: GraphicsContext> {
    context: G,
    vertex_count: usize,
    policy: RotationPolicy,
    events: VecDeque<ToggleEvent>,
    stopped: bool,
}

impl<G: GraphicsContext> Pipeline<G> {
    /// Expand and validate the shape, upload the flat buffers once, and
    /// hand the policy's shader pair to the context.
    pub fn new(
        mut context: G,
        shape: &Shape,
        faces: &[Face],
        policy: RotationPolicy,
    ) -> Result<Self, PipelineError> {
        let mesh = ExpandedMesh::expand(shape, faces)?;
        context.compile_program(policy.vertex_shader(), FRAGMENT_SHADER)?;
        context.upload_mesh(&mesh)?;

        debug!(
            "pipeline ready: {} triangles, {} vertices",
            mesh.triangle_count(),
            mesh.vertex_count()
        );

        Ok(Self {
            context,
            vertex_count: mesh.vertex_count(),
            policy,
            events: VecDeque::new(),
            stopped: false,
        })
    }

    /// Queue a toggle event for the next tick.
    pub fn push_event(&mut self, event: ToggleEvent) {
        self.events.push_back(event);
    }

    /// Graceful shutdown: the next tick becomes a no-op.
    pub fn request_stop(&mut self) {
        self.stopped = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    pub fn context(&self) -> &G {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut G {
        &mut self.context
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Run one frame: drain events, advance the transform, push uniforms,
    /// and issue the draw call. `dt` is the elapsed time in seconds since
    /// the previous tick (unused by the fixed-step Euler policy).
    ///
    /// Returns `Ok(false)` once a stop has been requested.
    pub fn tick(&mut self, dt: f32) -> Result<bool, ContextError> {
        if self.stopped {
            return Ok(false);
        }

        while let Some(event) = self.events.pop_front() {
            self.apply_event(event);
        }

        match &mut self.policy {
            RotationPolicy::ComposedEuler {
                state,
                step_degrees,
            } => {
                state.step(*step_degrees);
                self.context
                    .set_uniform("theta", UniformValue::Vec3(state.angles()))?;
            }
            RotationPolicy::Accumulated {
                model,
                rates,
                view,
                projection,
            } => {
                model.rotate(dt, rates);
                self.context
                    .set_uniform("model", UniformValue::Mat4(*model.matrix()))?;
                self.context
                    .set_uniform("view", UniformValue::Mat4(*view))?;
                self.context
                    .set_uniform("projection", UniformValue::Mat4(*projection))?;
            }
        }

        self.context.draw(Primitive::Triangles, self.vertex_count)?;
        Ok(true)
    }

    fn apply_event(&mut self, event: ToggleEvent) {
        match &mut self.policy {
            RotationPolicy::ComposedEuler { state, .. } => match event {
                ToggleEvent::SelectAxis(axis) => state.select_axis(axis),
                ToggleEvent::ToggleRun => state.toggle_running(),
            },
            RotationPolicy::Accumulated { .. } => {
                // Free-running policy has no interactive state.
                trace!("ignoring {:?} for accumulated policy", event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::models;

    #[derive(Default)]
    struct RecordingContext {
        programs: Vec<(String, String)>,
        uploads: Vec<usize>,
        uniforms: Vec<(String, UniformValue)>,
        draws: Vec<(Primitive, usize)>,
    }

    impl GraphicsContext for RecordingContext {
        fn compile_program(
            &mut self,
            vertex_src: &str,
            fragment_src: &str,
        ) -> Result<(), ContextError> {
            self.programs
                .push((vertex_src.to_string(), fragment_src.to_string()));
            Ok(())
        }

        fn upload_mesh(&mut self, mesh: &ExpandedMesh) -> Result<(), ContextError> {
            self.uploads.push(mesh.vertex_count());
            Ok(())
        }

        fn set_uniform(&mut self, name: &str, value: UniformValue) -> Result<(), ContextError> {
            self.uniforms.push((name.to_string(), value));
            Ok(())
        }

        fn draw(&mut self, primitive: Primitive, vertex_count: usize) -> Result<(), ContextError> {
            self.draws.push((primitive, vertex_count));
            Ok(())
        }
    }

    fn cube_pipeline(policy: RotationPolicy) -> Pipeline<RecordingContext> {
        let (shape, faces) = models::cube();
        Pipeline::new(RecordingContext::default(), &shape, &faces, policy).unwrap()
    }

    fn last_theta(context: &RecordingContext) -> Vector3<f32> {
        match context
            .uniforms
            .iter()
            .rev()
            .find(|(name, _)| name == "theta")
        {
            Some((_, UniformValue::Vec3(theta))) => *theta,
            other => panic!("expected theta uniform, got {:?}", other),
        }
    }

    #[test]
    fn test_construction_uploads_mesh_once() {
        let pipeline = cube_pipeline(RotationPolicy::euler(2.0));

        assert_eq!(pipeline.context().uploads, vec![36]);
        assert_eq!(pipeline.context().programs.len(), 1);
        assert_eq!(pipeline.vertex_count(), 36);
    }

    #[test]
    fn test_construction_rejects_bad_faces() {
        let (shape, _) = models::cube();
        let result = Pipeline::new(
            RecordingContext::default(),
            &shape,
            &[Face::Triangle([0, 1, 99])],
            RotationPolicy::euler(2.0),
        );

        assert!(matches!(
            result,
            Err(PipelineError::Config(ConfigError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn test_euler_ticks_step_active_axis() {
        let mut pipeline = cube_pipeline(RotationPolicy::euler(2.0));
        pipeline.push_event(ToggleEvent::SelectAxis(Axis::Y));
        pipeline.push_event(ToggleEvent::ToggleRun);

        for _ in 0..3 {
            pipeline.tick(0.016).unwrap();
        }

        let theta = last_theta(pipeline.context());
        assert_eq!(theta, Vector3::new(0.0, 6.0, 0.0));
        assert_eq!(pipeline.context().draws, vec![(Primitive::Triangles, 36); 3]);
    }

    #[test]
    fn test_idle_pipeline_holds_angles() {
        let mut pipeline = cube_pipeline(RotationPolicy::euler(2.0));
        pipeline.push_event(ToggleEvent::SelectAxis(Axis::Y));

        pipeline.tick(0.016).unwrap();

        assert_eq!(last_theta(pipeline.context()), Vector3::zeros());
    }

    #[test]
    fn test_events_drain_before_update() {
        let mut pipeline = cube_pipeline(RotationPolicy::euler(2.0));
        pipeline.push_event(ToggleEvent::ToggleRun);

        // The toggle queued before this tick must already take effect.
        pipeline.tick(0.016).unwrap();

        assert_eq!(last_theta(pipeline.context()).x, 2.0);
    }

    #[test]
    fn test_stop_flag_skips_ticks() {
        let mut pipeline = cube_pipeline(RotationPolicy::euler(2.0));
        pipeline.tick(0.016).unwrap();
        pipeline.request_stop();

        assert!(pipeline.is_stopped());
        assert!(!pipeline.tick(0.016).unwrap());
        assert_eq!(pipeline.context().draws.len(), 1);
    }

    #[test]
    fn test_accumulated_pushes_matrix_uniforms() {
        let camera = Camera::new(80, 40);
        let mut pipeline =
            cube_pipeline(RotationPolicy::accumulated(Vector3::new(0.3, 0.2, 0.5), &camera));

        pipeline.tick(0.1).unwrap();

        let names: Vec<&str> = pipeline
            .context()
            .uniforms
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(names, vec!["model", "view", "projection"]);

        match pipeline.context().uniforms[0].1 {
            UniformValue::Mat4(model) => {
                assert!((model - Matrix4::identity()).norm() > 1e-6);
            }
            _ => panic!("model uniform should be a matrix"),
        }
    }
}
