/// Scene container mixing lights and meshes
use nalgebra::{Matrix4, Vector3};

use crate::color::Color;
use crate::mesh::{reset_all, rotate_all, translate_all, MeshGroup, RenderableMesh};
use crate::projection::Camera;
use crate::sort::alpha_sort;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient { color: Color },
    Directional { color: Color, direction: Vector3<f64> },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Light(Light),
    Mesh(RenderableMesh),
}

/// Everything handed to the display: lights followed by meshes in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two viewer lights plus the meshes of `group`, in group order.
    pub fn with_default_lights(group: MeshGroup) -> Self {
        let mut scene = Self::new();
        scene.add_light(Light::Ambient {
            color: Color::rgb(169, 169, 169),
        });
        scene.add_light(Light::Directional {
            color: Color::rgb(128, 128, 128),
            direction: Vector3::new(-1.0, -1.0, -1.0),
        });
        for mesh in group {
            scene.add_mesh(mesh);
        }
        scene
    }

    pub fn add_light(&mut self, light: Light) {
        self.nodes.push(SceneNode::Light(light));
    }

    /// Append a mesh; its load order becomes its position among the meshes.
    pub fn add_mesh(&mut self, mesh: RenderableMesh) {
        let order = self.meshes().count();
        self.nodes.push(SceneNode::Mesh(mesh.with_load_order(order)));
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    pub fn lights(&self) -> impl Iterator<Item = &Light> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Light(light) => Some(light),
            SceneNode::Mesh(_) => None,
        })
    }

    pub fn meshes(&self) -> impl Iterator<Item = &RenderableMesh> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Mesh(mesh) => Some(mesh),
            SceneNode::Light(_) => None,
        })
    }

    pub fn meshes_mut(&mut self) -> impl Iterator<Item = &mut RenderableMesh> {
        self.nodes.iter_mut().filter_map(|n| match n {
            SceneNode::Mesh(mesh) => Some(mesh),
            SceneNode::Light(_) => None,
        })
    }

    /// Sort the meshes farthest-first from the camera.
    ///
    /// Non-mesh nodes keep their relative order and end up ahead of the
    /// sorted meshes.
    pub fn alpha_sort(&mut self, camera: &Camera) {
        let mut meshes = Vec::new();
        let mut others = Vec::new();
        for node in self.nodes.drain(..) {
            match node {
                SceneNode::Mesh(mesh) => meshes.push(mesh),
                other => others.push(other),
            }
        }

        alpha_sort(&camera.position, &mut meshes, &Matrix4::identity());

        self.nodes = others;
        self.nodes.extend(meshes.into_iter().map(SceneNode::Mesh));
    }

    pub fn rotate(&mut self, axis: &Vector3<f64>, angle: f64) {
        rotate_all(self.meshes_mut(), axis, angle);
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        translate_all(self.meshes_mut(), offset);
    }

    pub fn reset_transforms(&mut self) {
        reset_all(self.meshes_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::transform::Transform;
    use nalgebra::Point3;

    fn marker(tag: u8, z: f64) -> RenderableMesh {
        RenderableMesh::new(
            vec![Point3::origin()],
            Vec::new(),
            Material::diffuse(Color::argb(96, tag, 0, 0)),
        )
        .with_transform(Transform::translation_matrix(0.0, 0.0, z))
    }

    #[test]
    fn test_alpha_sort_keeps_lights_first() {
        let group: MeshGroup = vec![marker(1, 2.0), marker(2, -3.0), marker(3, 0.0)]
            .into_iter()
            .collect();
        let mut scene = Scene::with_default_lights(group);
        let lights_before: Vec<Light> = scene.lights().copied().collect();

        let camera = Camera::default();
        scene.alpha_sort(&camera);

        assert!(matches!(scene.nodes()[0], SceneNode::Light(Light::Ambient { .. })));
        assert!(matches!(scene.nodes()[1], SceneNode::Light(Light::Directional { .. })));
        let lights_after: Vec<Light> = scene.lights().copied().collect();
        assert_eq!(lights_before, lights_after);

        let tags: Vec<u8> = scene.meshes().map(|m| m.front.diffuse.r).collect();
        assert_eq!(tags, vec![2, 3, 1]);
    }

    #[test]
    fn test_lights_after_meshes_move_ahead() {
        let mut scene = Scene::new();
        scene.add_mesh(marker(1, 0.0));
        scene.add_light(Light::Ambient {
            color: Color::rgb(1, 1, 1),
        });
        scene.alpha_sort(&Camera::default());
        assert!(matches!(scene.nodes()[0], SceneNode::Light(_)));
        assert_eq!(scene.nodes().len(), 2);
    }

    #[test]
    fn test_repeated_sort_with_ties_is_stable() {
        let group: MeshGroup = vec![marker(1, 0.0), marker(2, 0.0), marker(3, -2.0)]
            .into_iter()
            .collect();
        let mut scene = Scene::with_default_lights(group);
        let camera = Camera::default();

        scene.alpha_sort(&camera);
        let first: Vec<u8> = scene.meshes().map(|m| m.front.diffuse.r).collect();
        scene.alpha_sort(&camera);
        let second: Vec<u8> = scene.meshes().map(|m| m.front.diffuse.r).collect();
        assert_eq!(first, vec![3, 2, 1]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_reset_transforms() {
        let mut scene = Scene::with_default_lights(vec![marker(1, 1.0)].into_iter().collect());
        scene.rotate(&Vector3::x(), 0.4);
        scene.translate(&Vector3::new(1.0, 0.0, 0.0));
        scene.reset_transforms();
        let mesh = scene.meshes().next().unwrap();
        assert_eq!(mesh.transform(), mesh.initial_transform());
    }
}
