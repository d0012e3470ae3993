/// Viewer configuration
use brep_core::Camera;

/// Tunables for the interactive viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Accumulated rotation (radians) that triggers a re-sort.
    pub rotation_threshold: f64,
    /// Rotation per key press (radians).
    pub rotation_step: f64,
    pub translation_step: f64,
    pub zoom_step: f64,
    /// Camera z position on start and after a view reset.
    pub camera_distance: f64,
    pub target_fps: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rotation_threshold: 0.1,
            rotation_step: 0.05,
            translation_step: 0.1,
            zoom_step: 0.25,
            camera_distance: Camera::DEFAULT_DISTANCE,
            target_fps: 30,
        }
    }
}

impl ViewerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_rotation_threshold(mut self, threshold: f64) -> Self {
        self.rotation_threshold = threshold;
        self
    }

    #[must_use]
    pub const fn with_rotation_step(mut self, step: f64) -> Self {
        self.rotation_step = step;
        self
    }

    #[must_use]
    pub const fn with_target_fps(mut self, fps: u64) -> Self {
        self.target_fps = fps;
        self
    }
}
