/// Renderable meshes and mesh groups
use nalgebra::{Matrix4, Point3, Vector3};

use crate::geometry::Aabb;
use crate::material::Material;
use crate::sort::alpha_sort;
use crate::transform::Transform;

/// Triangulated geometry with materials and a transform.
///
/// Positions and indices never change after creation; only the transform
/// does. The transform at creation time is kept so it can be restored.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableMesh {
    positions: Vec<Point3<f64>>,
    triangles: Vec<[usize; 3]>,
    pub front: Material,
    pub back: Option<Material>,
    transform: Matrix4<f64>,
    initial_transform: Matrix4<f64>,
    /// Position in the group at load time. Breaks distance ties.
    load_order: usize,
}

impl RenderableMesh {
    pub fn new(
        positions: Vec<Point3<f64>>,
        triangles: Vec<[usize; 3]>,
        front: Material,
    ) -> Self {
        Self {
            positions,
            triangles,
            front,
            back: None,
            transform: Matrix4::identity(),
            initial_transform: Matrix4::identity(),
            load_order: 0,
        }
    }

    pub fn with_back(mut self, back: Material) -> Self {
        self.back = Some(back);
        self
    }

    /// Start from `transform` instead of the identity. This also becomes the
    /// state restored by [`RenderableMesh::reset_transform`].
    pub fn with_transform(mut self, transform: Matrix4<f64>) -> Self {
        self.transform = transform;
        self.initial_transform = transform;
        self
    }

    pub fn with_load_order(mut self, order: usize) -> Self {
        self.load_order = order;
        self
    }

    pub fn load_order(&self) -> usize {
        self.load_order
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn transform(&self) -> &Matrix4<f64> {
        &self.transform
    }

    pub fn initial_transform(&self) -> &Matrix4<f64> {
        &self.initial_transform
    }

    /// Append `next` after the current transform.
    pub fn apply(&mut self, next: &Matrix4<f64>) {
        self.transform = Transform::then(&self.transform, next);
    }

    pub fn reset_transform(&mut self) {
        self.transform = self.initial_transform;
    }

    /// Bounds of the untransformed geometry. A mesh without positions is
    /// treated as a point at its local origin.
    pub fn local_bounds(&self) -> Aabb {
        Aabb::from_points(&self.positions).unwrap_or_else(|| Aabb::point(Point3::origin()))
    }

    /// Bounds after this mesh's transform and then `world`.
    pub fn world_bounds(&self, world: &Matrix4<f64>) -> Aabb {
        self.local_bounds()
            .transform(&self.transform)
            .transform(world)
    }
}

/// Ordered set of meshes produced by one model load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshGroup {
    meshes: Vec<RenderableMesh>,
}

impl MeshGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `mesh`; its load order becomes its position in the group.
    pub fn push(&mut self, mesh: RenderableMesh) {
        let order = self.meshes.len();
        self.meshes.push(mesh.with_load_order(order));
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn meshes(&self) -> &[RenderableMesh] {
        &self.meshes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RenderableMesh> {
        self.meshes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, RenderableMesh> {
        self.meshes.iter_mut()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(RenderableMesh::triangle_count).sum()
    }

    /// Reorder meshes farthest-first as seen from `viewpoint`.
    pub fn resort(&mut self, viewpoint: &Point3<f64>, world: &Matrix4<f64>) {
        alpha_sort(viewpoint, &mut self.meshes, world);
    }

    pub fn rotate(&mut self, axis: &Vector3<f64>, angle: f64) {
        rotate_all(self.meshes.iter_mut(), axis, angle);
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        translate_all(self.meshes.iter_mut(), offset);
    }

    /// Restore every mesh's transform to its state at load time.
    pub fn reset_transforms(&mut self) {
        reset_all(self.meshes.iter_mut());
    }
}

/// Append a rotation about `axis` to every mesh.
pub(crate) fn rotate_all<'a, I>(meshes: I, axis: &Vector3<f64>, angle: f64)
where
    I: IntoIterator<Item = &'a mut RenderableMesh>,
{
    let rotation = Transform::rotation_matrix(axis, angle);
    meshes.into_iter().for_each(|m| m.apply(&rotation));
}

pub(crate) fn translate_all<'a, I>(meshes: I, offset: &Vector3<f64>)
where
    I: IntoIterator<Item = &'a mut RenderableMesh>,
{
    let translation = Transform::translation_matrix(offset.x, offset.y, offset.z);
    meshes.into_iter().for_each(|m| m.apply(&translation));
}

pub(crate) fn reset_all<'a, I>(meshes: I)
where
    I: IntoIterator<Item = &'a mut RenderableMesh>,
{
    meshes.into_iter().for_each(RenderableMesh::reset_transform);
}

impl IntoIterator for MeshGroup {
    type Item = RenderableMesh;
    type IntoIter = std::vec::IntoIter<RenderableMesh>;

    fn into_iter(self) -> Self::IntoIter {
        self.meshes.into_iter()
    }
}

impl FromIterator<RenderableMesh> for MeshGroup {
    fn from_iter<I: IntoIterator<Item = RenderableMesh>>(iter: I) -> Self {
        let mut group = Self::new();
        iter.into_iter().for_each(|mesh| group.push(mesh));
        group
    }
}
