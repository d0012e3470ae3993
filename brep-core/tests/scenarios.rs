use brep_core::ring::resolve_ring;
use brep_core::{
    BrepError, BuildMode, Camera, LoaderConfig, MeshBuilder, PerFaceBuilder, Scene, Solid,
    TopologyError, ValidationError,
};
use nalgebra::{Matrix4, Point3, Vector3};

const TETRAHEDRON: &str = include_str!("../../models/tetrahedron.json");
const CUBE: &str = include_str!("../../models/cube.json");
const PYRAMID: &str = include_str!("../../models/pyramid.json");

fn per_face(seed: u64) -> Box<dyn MeshBuilder> {
    LoaderConfig::new()
        .with_mode(BuildMode::PerFace)
        .with_seed(seed)
        .builder()
}

#[test]
fn tetrahedron_gives_one_triangle_per_face() {
    let solid = Solid::load_json(TETRAHEDRON).unwrap();
    let group = per_face(1).build(&solid).unwrap();
    assert_eq!(group.len(), 4);
    assert_eq!(group.triangle_count(), 4);
    assert!(group.iter().all(|m| m.positions().len() == 3));
}

#[test]
fn every_face_yields_k_minus_two_triangles() {
    for json in [TETRAHEDRON, CUBE, PYRAMID] {
        let solid = Solid::load_json(json).unwrap();
        let group = per_face(2).build(&solid).unwrap();
        for (face, mesh) in solid.faces().iter().zip(group.iter()) {
            assert_eq!(mesh.triangle_count(), face.edges.len() - 2);

            let ring = resolve_ring(face.id, &solid.face_edges(face)).unwrap();
            assert_eq!(ring[0].start(), ring[ring.len() - 1].end());
            assert_eq!(ring, resolve_ring(face.id, &solid.face_edges(face)).unwrap());
        }
    }
}

#[test]
fn cube_triangles_face_outward() {
    let solid = Solid::load_json(CUBE).unwrap();
    let center = solid.geometric_center();
    let merged = LoaderConfig::new().with_seed(3).builder().build(&solid).unwrap();
    let mesh = &merged.meshes()[0];
    assert_eq!(mesh.triangle_count(), 12);
    for &[a, b, c] in mesh.triangles() {
        let p = mesh.positions();
        let normal = (p[b] - p[a]).cross(&(p[c] - p[a]));
        assert!(normal.dot(&(p[a] - center)) > 0.0);
    }
}

#[test]
fn lowercase_document_with_shuffled_ids() {
    let solid = Solid::load_json(PYRAMID).unwrap();
    assert_eq!(solid.position(4), Point3::new(0.0, 1.5, 0.0));
    let group = PerFaceBuilder::new(None).build(&solid).unwrap();
    assert_eq!(group.len(), 5);
    assert_eq!(group.meshes()[0].triangle_count(), 2);
}

#[test]
fn malformed_documents_fail_before_triangulation() {
    let missing_vertex = r#"{
        "Vertices": [{"Id": 0, "X": 0, "Y": 0, "Z": 0}, {"Id": 1, "X": 1, "Y": 0, "Z": 0}],
        "Edges": [{"Id": 0, "Vertices": [0, 2]}],
        "Faces": []
    }"#;
    match Solid::load_json(missing_vertex) {
        Err(BrepError::Validation(ValidationError::EdgeVertexOutOfRange { edge, vertex })) => {
            assert_eq!((edge, vertex), (0, 2));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn two_triangles_under_one_face_is_a_topology_error() {
    let json = r#"{
        "Vertices": [
            {"Id": 0, "X": 0, "Y": 0, "Z": 0}, {"Id": 1, "X": 1, "Y": 0, "Z": 0},
            {"Id": 2, "X": 0, "Y": 1, "Z": 0}, {"Id": 3, "X": 5, "Y": 0, "Z": 0},
            {"Id": 4, "X": 6, "Y": 0, "Z": 0}, {"Id": 5, "X": 5, "Y": 1, "Z": 0}
        ],
        "Edges": [
            {"Id": 0, "Vertices": [0, 1]}, {"Id": 1, "Vertices": [1, 2]},
            {"Id": 2, "Vertices": [2, 0]}, {"Id": 3, "Vertices": [3, 4]},
            {"Id": 4, "Vertices": [4, 5]}, {"Id": 5, "Vertices": [5, 3]}
        ],
        "Faces": [{"Id": 0, "Edges": [0, 1, 2, 3, 4, 5]}]
    }"#;
    let solid = Solid::load_json(json).unwrap();
    let error = per_face(0).build(&solid).unwrap_err();
    assert!(matches!(
        error,
        BrepError::Topology(TopologyError::EdgesNotConnected { face: 0 })
    ));
    assert_eq!(error.to_string(), "edges of face 0 not connected");
}

#[test]
fn rotate_resort_and_reset() {
    let solid = Solid::load_json(CUBE).unwrap();
    let group = per_face(4).build(&solid).unwrap();
    let loaded = group.clone();
    let mut scene = Scene::with_default_lights(group);
    let camera = Camera::default();

    scene.alpha_sort(&camera);
    let first: Vec<_> = scene.meshes().cloned().collect();
    scene.alpha_sort(&camera);
    let second: Vec<_> = scene.meshes().cloned().collect();
    assert_eq!(first, second);

    for _ in 0..20 {
        scene.rotate(&Vector3::new(0.3, 1.0, 0.0), 0.05);
        scene.translate(&Vector3::new(0.01, 0.0, 0.0));
        scene.alpha_sort(&camera);
    }
    scene.reset_transforms();
    assert!(scene
        .meshes()
        .all(|m| m.transform() == &Matrix4::identity()));
    assert_eq!(scene.meshes().count(), loaded.len());
    assert_eq!(scene.lights().count(), 2);
}

#[test]
fn cube_faces_sort_back_to_front() {
    let solid = Solid::load_json(CUBE).unwrap();
    let mut group = per_face(5).build(&solid).unwrap();
    group.resort(&Point3::new(0.0, 0.0, 5.0), &Matrix4::identity());

    // Five faces touch a corner at exactly sqrt(38) from the viewer; the tie
    // puts later faces first, so the x = +1 face (face 5) leads.
    let first = &group.meshes()[0];
    assert!(first.positions().iter().all(|p| p.x == 1.0));
    // The z = +1 face is the only one whose minimum corner is nearer.
    let last = &group.meshes()[5];
    assert!(last.positions().iter().all(|p| p.z == 1.0));
}
