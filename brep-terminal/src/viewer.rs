/// Viewer state: the loaded model, its scene and the camera
use std::path::Path;

use brep_core::{
    default_model, BrepResult, BuildMode, Camera, LoaderConfig, MeshBuilder, RotationTracker,
    Scene, Solid,
};
use nalgebra::Vector3;

use crate::config::ViewerConfig;

/// Everything the display needs, independent of the terminal.
pub struct Viewer {
    scene: Scene,
    camera: Camera,
    solid: Option<Solid>,
    model_name: String,
    loader: LoaderConfig,
    builder: Box<dyn MeshBuilder>,
    tracker: RotationTracker,
    config: ViewerConfig,
}

impl Viewer {
    /// A viewer showing the built-in default model.
    pub fn new(config: ViewerConfig, loader: LoaderConfig, camera: Camera) -> Self {
        let mut viewer = Self {
            scene: Scene::new(),
            camera,
            solid: None,
            model_name: String::new(),
            builder: loader.builder(),
            loader,
            tracker: RotationTracker::new(config.rotation_threshold),
            config,
        };
        viewer.camera.set_distance(viewer.config.camera_distance);
        viewer.load_default();
        viewer
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn mode(&self) -> BuildMode {
        self.loader.mode
    }

    pub fn is_default(&self) -> bool {
        self.solid.is_none()
    }

    pub fn load_default(&mut self) {
        if self.is_default() && self.scene.meshes().next().is_some() {
            return;
        }
        self.scene = Scene::with_default_lights(default_model());
        self.solid = None;
        self.model_name = "Default Model".to_string();
        self.tracker.clear();
    }

    /// Load a model document. On failure the current scene is kept.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> BrepResult<()> {
        let path = path.as_ref();
        let solid = Solid::load_file(path)?;
        let group = self.builder.build(&solid)?;

        tracing::info!(
            path = %path.display(),
            faces = solid.faces().len(),
            meshes = group.len(),
            "model loaded"
        );
        self.scene = Scene::with_default_lights(group);
        self.solid = Some(solid);
        self.model_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.tracker.clear();
        self.reorder();
        Ok(())
    }

    /// Rebuild the current model, drawing fresh colours. The default model is
    /// left alone. On failure the current scene is kept.
    pub fn reload(&mut self) -> BrepResult<()> {
        let Some(solid) = &self.solid else {
            return Ok(());
        };
        let group = self.builder.build(solid)?;
        self.scene = Scene::with_default_lights(group);
        self.reorder();
        Ok(())
    }

    /// Switch between per-face and merged meshes and rebuild.
    pub fn set_mode(&mut self, mode: BuildMode) -> BrepResult<()> {
        self.loader = self.loader.clone().with_mode(mode);
        self.builder = self.loader.builder();
        self.reload()
    }

    pub fn toggle_mode(&mut self) -> BrepResult<()> {
        match self.mode() {
            BuildMode::PerFace => self.set_mode(BuildMode::Merged),
            BuildMode::Merged => self.set_mode(BuildMode::PerFace),
        }
    }

    /// Rotate every mesh and re-sort once enough rotation has built up.
    pub fn rotate(&mut self, axis: &Vector3<f64>, angle: f64) {
        self.scene.rotate(axis, angle);
        if self.tracker.accumulate(angle) {
            self.reorder();
        }
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        self.scene.translate(offset);
    }

    pub fn zoom(&mut self, delta: f64) {
        self.camera.zoom(delta);
    }

    pub fn reset_view(&mut self) {
        self.camera.set_distance(self.config.camera_distance);
        self.scene.reset_transforms();
    }

    /// Only per-face meshes of a loaded model are sorted.
    pub fn reorder(&mut self) {
        if !self.is_default() && self.mode() == BuildMode::PerFace {
            self.scene.alpha_sort(&self.camera);
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_core::BrepError;
    use std::io::Write;

    const CUBE: &str = include_str!("../../models/cube.json");

    fn write_model(name: &str, json: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("brep-viewer-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(json.as_bytes()).unwrap();
        path
    }

    fn per_face_viewer() -> Viewer {
        let loader = LoaderConfig::new()
            .with_mode(BuildMode::PerFace)
            .with_seed(9);
        Viewer::new(ViewerConfig::default(), loader, Camera::default())
    }

    fn mesh_colors(viewer: &Viewer) -> Vec<brep_core::Color> {
        viewer.scene().meshes().map(|m| m.front.diffuse).collect()
    }

    #[test]
    fn test_starts_with_default_model() {
        let viewer = per_face_viewer();
        assert!(viewer.is_default());
        assert_eq!(viewer.model_name(), "Default Model");
        assert_eq!(viewer.scene().meshes().count(), 2);
        assert_eq!(viewer.scene().lights().count(), 2);
    }

    #[test]
    fn test_load_file_and_failure_keeps_scene() {
        let mut viewer = per_face_viewer();
        let path = write_model("cube.json", CUBE);
        viewer.load_file(&path).unwrap();
        assert!(!viewer.is_default());
        assert_eq!(viewer.scene().meshes().count(), 6);

        let before = viewer.scene().clone();
        let bad = write_model("bad.json", r#"{"Vertices": [], "Edges": [], "Faces": []}"#);
        assert!(matches!(viewer.load_file(&bad), Err(BrepError::EmptyModel)));
        assert_eq!(viewer.scene(), &before);

        let missing = viewer.load_file("/no/such/model.json");
        assert!(matches!(missing, Err(BrepError::Io { .. })));
        assert_eq!(viewer.scene(), &before);

        let _ = std::fs::remove_file(path);
        let _ = std::fs::remove_file(bad);
    }

    #[test]
    fn test_toggle_mode_rebuilds() {
        let mut viewer = per_face_viewer();
        let path = write_model("toggle.json", CUBE);
        viewer.load_file(&path).unwrap();

        viewer.toggle_mode().unwrap();
        assert_eq!(viewer.mode(), BuildMode::Merged);
        assert_eq!(viewer.scene().meshes().count(), 1);

        viewer.toggle_mode().unwrap();
        assert_eq!(viewer.mode(), BuildMode::PerFace);
        assert_eq!(viewer.scene().meshes().count(), 6);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_reload_keeps_geometry() {
        let mut viewer = per_face_viewer();
        let path = write_model("reload.json", CUBE);
        viewer.load_file(&path).unwrap();
        let triangles: usize = viewer.scene().meshes().map(|m| m.triangle_count()).sum();

        viewer.reload().unwrap();
        let after: usize = viewer.scene().meshes().map(|m| m.triangle_count()).sum();
        assert_eq!(triangles, after);
        assert_eq!(mesh_colors(&viewer).len(), 6);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_rotation_resorts_past_threshold() {
        let mut viewer = per_face_viewer();
        let path = write_model("rotate.json", CUBE);
        viewer.load_file(&path).unwrap();

        // One small step stays below the threshold: order unchanged.
        let order = mesh_colors(&viewer);
        viewer.rotate(&Vector3::y(), 0.05);
        assert_eq!(mesh_colors(&viewer), order);

        // The third step crosses the threshold and re-sorts.
        viewer.rotate(&Vector3::y(), 0.05);
        viewer.rotate(&Vector3::y(), 0.05);
        let mut expected = viewer.scene().clone();
        expected.alpha_sort(viewer.camera());
        let expected: Vec<_> = expected.meshes().map(|m| m.front.diffuse).collect();
        assert_eq!(mesh_colors(&viewer), expected);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_reset_view() {
        let mut viewer = per_face_viewer();
        viewer.zoom(2.0);
        viewer.rotate(&Vector3::x(), 0.3);
        viewer.translate(&Vector3::new(0.5, 0.0, 0.0));
        viewer.reset_view();
        assert_eq!(viewer.camera().position.z, Camera::DEFAULT_DISTANCE);
        for mesh in viewer.scene().meshes() {
            assert_eq!(mesh.transform(), mesh.initial_transform());
        }
    }

    #[test]
    fn test_default_model_is_not_reloaded_or_sorted() {
        let mut viewer = per_face_viewer();
        let before = viewer.scene().clone();
        viewer.reload().unwrap();
        viewer.reorder();
        assert_eq!(viewer.scene(), &before);
    }
}
