/// 3D transformation policies and rotation state
use nalgebra::{Matrix4, Vector3};

/// Rotation axis selector for interactive toggling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Rotation state for the composed-Euler policy: three angles in degrees,
/// an active-axis selector, and a running flag.
///
/// Single-writer: only the frame driver mutates this, between draws.
/// Angles are not wrapped; they accumulate for the life of the loop.
#[derive(Debug, Clone, Copy)]
pub struct RotationState {
    theta: Vector3<f32>,
    axis: Axis,
    running: bool,
}

impl RotationState {
    pub fn new() -> Self {
        Self {
            theta: Vector3::zeros(),
            axis: Axis::X,
            running: false,
        }
    }

    /// Current angles in degrees.
    pub fn angles(&self) -> Vector3<f32> {
        self.theta
    }

    pub fn active_axis(&self) -> Axis {
        self.axis
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record a new active axis. Never touches accumulated angles.
    pub fn select_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    /// Flip between idle and running. Accumulated angles are preserved.
    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    /// Advance the active axis by a fixed increment (degrees) if running.
    /// The other two axes hold their last value.
    pub fn step(&mut self, delta_degrees: f32) {
        if self.running {
            self.theta[self.axis.index()] += delta_degrees;
        }
    }

    /// Euler-composed rotation matrix for the current angles.
    pub fn matrix(&self) -> Matrix4<f32> {
        Transform::euler_rotation(&self.theta)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Persistent model matrix for the accumulated policy.
///
/// Each frame the per-axis increments are post-multiplied into the current
/// basis, so the object keeps rotating about its own evolving axes rather
/// than fixed world axes. Rounding error compounds; this is inherent to
/// the policy and must not be mixed with stateless recomposition.
#[derive(Debug, Clone, Copy)]
pub struct AccumulatedModel {
    matrix: Matrix4<f32>,
}

impl AccumulatedModel {
    pub fn new() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Apply one frame of rotation: Z, then Y, then X, each scaled by the
    /// elapsed time `dt` (seconds) and the per-axis rate (radians/second).
    pub fn rotate(&mut self, dt: f32, rates: &Vector3<f32>) {
        self.matrix *= Matrix4::new_rotation(Vector3::z() * (dt * rates.z));
        self.matrix *= Matrix4::new_rotation(Vector3::y() * (dt * rates.y));
        self.matrix *= Matrix4::new_rotation(Vector3::x() * (dt * rates.x));
    }

    pub fn matrix(&self) -> &Matrix4<f32> {
        &self.matrix
    }
}

impl Default for AccumulatedModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateless matrix builders shared by both policies.
pub struct Transform;

impl Transform {
    /// Composed Euler rotation from angles in degrees.
    ///
    /// Builds Rx, Ry, Rz with the right-handed convention and composes
    /// Rz * Ry * Rx: X is applied first, then Y, then Z. The order is
    /// fixed; reordering changes the final orientation.
    pub fn euler_rotation(degrees: &Vector3<f32>) -> Matrix4<f32> {
        let radians = degrees.map(f32::to_radians);
        let rx = Matrix4::new_rotation(Vector3::x() * radians.x);
        let ry = Matrix4::new_rotation(Vector3::y() * radians.y);
        let rz = Matrix4::new_rotation(Vector3::z() * radians.z);

        rz * ry * rx
    }

    /// Create a translation matrix
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a model-view-projection matrix
    pub fn mvp(
        model: &Matrix4<f32>,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) -> Matrix4<f32> {
        projection * view * model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_zero_angles_give_identity() {
        let matrix = Transform::euler_rotation(&Vector3::zeros());
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_x_rotation_takes_y_toward_z() {
        let matrix = Transform::euler_rotation(&Vector3::new(90.0, 0.0, 0.0));
        let rotated = matrix.transform_point(&Point3::new(0.0, 1.0, 0.0));
        assert!((rotated - Point3::new(0.0, 0.0, 1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_opposite_rotations_cancel() {
        let forward = Transform::euler_rotation(&Vector3::new(90.0, 0.0, 0.0));
        let back = Transform::euler_rotation(&Vector3::new(-90.0, 0.0, 0.0));

        let start = Point3::new(0.3, -0.7, 0.5);
        let round_trip = back.transform_point(&forward.transform_point(&start));
        assert!((round_trip - start).norm() < 1e-5);
    }

    #[test]
    fn test_accumulated_full_revolution_closes() {
        let n = 24;
        let step = std::f32::consts::TAU / n as f32;

        let mut model = AccumulatedModel::new();
        for _ in 0..n {
            model.rotate(1.0, &Vector3::new(0.0, step, 0.0));
        }

        assert!((model.matrix() - Matrix4::identity()).norm() < 1e-4);
    }

    #[test]
    fn test_idle_axis_select_leaves_angles_untouched() {
        let mut state = RotationState::new();
        state.select_axis(Axis::Y);
        state.step(2.0);

        assert_eq!(state.angles(), Vector3::zeros());
        assert_eq!(state.active_axis(), Axis::Y);
    }

    #[test]
    fn test_running_steps_accumulate_on_active_axis_only() {
        let mut state = RotationState::new();
        state.select_axis(Axis::Y);
        state.toggle_running();

        for _ in 0..5 {
            state.step(2.0);
        }

        assert_eq!(state.angles().x, 0.0);
        assert_eq!(state.angles().y, 10.0);
        assert_eq!(state.angles().z, 0.0);
    }

    #[test]
    fn test_pausing_freezes_all_angles() {
        let mut state = RotationState::new();
        state.select_axis(Axis::Z);
        state.toggle_running();
        state.step(2.0);
        state.toggle_running();

        state.step(2.0);
        state.step(2.0);

        assert_eq!(state.angles().z, 2.0);
        assert!(!state.is_running());
    }

    #[test]
    fn test_axis_switch_holds_previous_axis_value() {
        let mut state = RotationState::new();
        state.toggle_running();
        state.step(2.0); // default axis X

        state.select_axis(Axis::Z);
        state.step(2.0);

        assert_eq!(state.angles().x, 2.0);
        assert_eq!(state.angles().y, 0.0);
        assert_eq!(state.angles().z, 2.0);
    }
}
