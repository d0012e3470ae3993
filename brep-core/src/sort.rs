/// Back-to-front ordering of translucent meshes
///
/// Each mesh is represented by the minimum corner of its transformed bounds.
/// This is only an approximation of visibility order: interpenetrating or
/// concave meshes can still layer incorrectly.
use std::cmp::Ordering;

use nalgebra::{Matrix4, Point3};

use crate::mesh::RenderableMesh;

/// Point used to measure a mesh's distance from the viewer.
pub fn representative_position(mesh: &RenderableMesh, world: &Matrix4<f64>) -> Point3<f64> {
    mesh.world_bounds(world).location()
}

/// Sort key of one mesh: distance from the viewpoint, load order and
/// current index.
type Key = (f64, usize, usize);

/// Farthest-first comparison. Equal distances put the later-loaded mesh
/// first, so ties resolve the same way no matter the current order.
fn far_to_near(a: &Key, b: &Key) -> Ordering {
    b.0.total_cmp(&a.0).then_with(|| b.1.cmp(&a.1))
}

/// Input indices of `meshes` in farthest-to-nearest order.
pub fn sorted_order(
    viewpoint: &Point3<f64>,
    meshes: &[RenderableMesh],
    world: &Matrix4<f64>,
) -> Vec<usize> {
    let mut keyed: Vec<Key> = meshes
        .iter()
        .enumerate()
        .map(|(i, mesh)| {
            let location = representative_position(mesh, world);
            ((viewpoint - location).norm(), mesh.load_order(), i)
        })
        .collect();
    keyed.sort_by(far_to_near);
    keyed.into_iter().map(|(_, _, i)| i).collect()
}

/// Reorder `meshes` in place, farthest from `viewpoint` first.
pub fn alpha_sort(
    viewpoint: &Point3<f64>,
    meshes: &mut Vec<RenderableMesh>,
    world: &Matrix4<f64>,
) {
    let order = sorted_order(viewpoint, meshes, world);
    let mut slots: Vec<Option<RenderableMesh>> = meshes.drain(..).map(Some).collect();
    meshes.extend(order.into_iter().filter_map(|i| slots[i].take()));
    tracing::debug!(meshes = meshes.len(), "meshes resorted");
}
