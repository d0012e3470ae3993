/// Fan triangulation of resolved face rings
use nalgebra::Point3;

use crate::error::TopologyError;
use crate::geometry::corner_normal;
use crate::model::{Edge, Face, Solid};
use crate::ring::resolve_ring;

/// Triangles of a single face with their own copy of the face's positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceTriangles {
    /// Ring vertex positions, in ring order.
    pub positions: Vec<Point3<f64>>,
    /// Index triples into `positions`.
    pub triangles: Vec<[usize; 3]>,
}

impl FaceTriangles {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Fan-triangulate a ring of `k` edges into `k - 2` triangles anchored at
/// `ring[0].start()`.
///
/// Winding is chosen so that the triangle normals point away from `center`.
pub fn fan_triangulate(solid: &Solid, ring: &[Edge], center: &Point3<f64>) -> FaceTriangles {
    let positions: Vec<Point3<f64>> = ring.iter().map(|e| solid.position(e.start())).collect();
    if ring.len() < 3 {
        return FaceTriangles {
            positions,
            triangles: Vec::new(),
        };
    }

    let base = solid.position(ring[0].start());
    let normal = corner_normal(
        &base,
        &solid.position(ring[0].end()),
        &solid.position(ring[1].end()),
    );
    let outward = normal.dot(&(center - base)) < 0.0;

    let triangles = (0..ring.len() - 2)
        .map(|i| {
            if outward {
                [0, i + 1, i + 2]
            } else {
                [0, i + 2, i + 1]
            }
        })
        .collect();

    FaceTriangles {
        positions,
        triangles,
    }
}

/// Resolve a face's ring and triangulate it.
pub fn triangulate_face(
    solid: &Solid,
    face: &Face,
    center: &Point3<f64>,
) -> Result<FaceTriangles, TopologyError> {
    let ring = resolve_ring(face.id, &solid.face_edges(face))?;
    Ok(fan_triangulate(solid, &ring, center))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{edge, face, vertex};
    use crate::model::{SolidDocument, VertexRecord};

    fn square(z: f64, edge_order: Vec<usize>) -> Solid {
        let corners = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let mut vertices: Vec<VertexRecord> = corners
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| vertex(id, x, y, z))
            .collect();
        // A point below the square so the center sits under it.
        vertices.push(vertex(4, 0.5, 0.5, z - 4.0));
        let doc = SolidDocument {
            vertices,
            edges: vec![
                edge(0, 0, 1),
                edge(1, 1, 2),
                edge(2, 2, 3),
                edge(3, 3, 0),
            ],
            faces: vec![face(0, edge_order)],
        };
        Solid::from_document(doc).unwrap()
    }

    fn normal_of(face: &FaceTriangles, t: usize) -> nalgebra::Vector3<f64> {
        let [a, b, c] = face.triangles[t];
        let (a, b, c) = (face.positions[a], face.positions[b], face.positions[c]);
        (b - a).cross(&(c - a))
    }

    #[test]
    fn test_square_gives_two_triangles_sharing_anchor() {
        let solid = square(0.0, vec![0, 1, 2, 3]);
        let face = &solid.faces()[0];
        let result = triangulate_face(&solid, face, &solid.geometric_center()).unwrap();
        assert_eq!(result.triangle_count(), 2);
        assert_eq!(result.positions.len(), 4);
        assert_eq!(result.triangles[0][0], 0);
        assert_eq!(result.triangles[1][0], 0);
        assert_eq!(result.positions[0], solid.position(0));
    }

    #[test]
    fn test_normals_point_away_from_center() {
        // Center below the square: normals should face +z whatever the edge order.
        for order in [vec![0, 1, 2, 3], vec![3, 2, 1, 0], vec![2, 0, 3, 1]] {
            let solid = square(0.0, order);
            let face = &solid.faces()[0];
            let result = triangulate_face(&solid, face, &solid.geometric_center()).unwrap();
            for t in 0..result.triangle_count() {
                assert!(normal_of(&result, t).z > 0.0);
            }
        }
    }

    #[test]
    fn test_center_above_flips_winding() {
        let solid = square(0.0, vec![0, 1, 2, 3]);
        let face = &solid.faces()[0];
        let above = Point3::new(0.5, 0.5, 3.0);
        let result = triangulate_face(&solid, face, &above).unwrap();
        for t in 0..result.triangle_count() {
            assert!(normal_of(&result, t).z < 0.0);
        }
    }

    #[test]
    fn test_fan_of_k_edges() {
        // A hexagon ring built directly.
        let n = 6;
        let vertices = (0..n)
            .map(|id| {
                let a = id as f64 * std::f64::consts::TAU / n as f64;
                vertex(id, a.cos(), a.sin(), 0.0)
            })
            .collect();
        let edges = (0..n)
            .map(|id| edge(id, id, (id + 1) % n))
            .collect();
        let doc = SolidDocument {
            vertices,
            edges,
            faces: vec![face(0, (0..n).collect())],
        };
        let solid = Solid::from_document(doc).unwrap();
        let center = Point3::new(0.0, 0.0, -1.0);
        let result = triangulate_face(&solid, &solid.faces()[0], &center).unwrap();
        assert_eq!(result.triangle_count(), n - 2);
        for (i, tri) in result.triangles.iter().enumerate() {
            assert_eq!(tri, &[0, i + 1, i + 2]);
        }
    }
}
