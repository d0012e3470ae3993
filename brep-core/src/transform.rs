/// 3D transformation matrices and rotation tracking
use nalgebra::{Matrix4, Unit, Vector3};

/// Accumulates rotation since the last re-sort.
#[derive(Debug, Clone, Copy)]
pub struct RotationTracker {
    total: f64,
    threshold: f64,
}

impl RotationTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            total: 0.0,
            threshold,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Add `angle` radians. Returns `true` and starts over once the
    /// accumulated magnitude exceeds the threshold.
    pub fn accumulate(&mut self, angle: f64) -> bool {
        self.total += angle;
        if self.total.abs() > self.threshold {
            self.total = 0.0;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.total = 0.0;
    }
}

impl Default for RotationTracker {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation of `angle` radians about `axis`. Identity for a zero axis.
    pub fn rotation_matrix(axis: &Vector3<f64>, angle: f64) -> Matrix4<f64> {
        match Unit::try_new(*axis, f64::EPSILON) {
            Some(axis) => Matrix4::from_axis_angle(&axis, angle),
            None => Matrix4::identity(),
        }
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f64, y: f64, z: f64) -> Matrix4<f64> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    pub fn uniform_scale_matrix(s: f64) -> Matrix4<f64> {
        Matrix4::new_scaling(s)
    }

    /// `current` followed by `next`.
    pub fn then(current: &Matrix4<f64>, next: &Matrix4<f64>) -> Matrix4<f64> {
        next * current
    }
}
