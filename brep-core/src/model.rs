/// B-Rep solid model: vertices, edges and faces
use std::fs;
use std::path::Path;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::error::{BrepError, BrepResult, ValidationError};

/// A vertex record as it appears in a model document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    #[serde(rename = "Id", alias = "id")]
    pub id: usize,
    #[serde(rename = "X", alias = "x")]
    pub x: f64,
    #[serde(rename = "Y", alias = "y")]
    pub y: f64,
    #[serde(rename = "Z", alias = "z")]
    pub z: f64,
}

/// An edge record as it appears in a model document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    #[serde(rename = "Id", alias = "id")]
    pub id: usize,
    #[serde(rename = "Vertices", alias = "vertices")]
    pub vertices: Vec<usize>,
}

/// A face record as it appears in a model document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceRecord {
    #[serde(rename = "Id", alias = "id")]
    pub id: usize,
    #[serde(rename = "Edges", alias = "edges")]
    pub edges: Vec<usize>,
}

/// Unvalidated model document, straight from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SolidDocument {
    #[serde(rename = "Vertices", alias = "vertices", default)]
    pub vertices: Vec<VertexRecord>,
    #[serde(rename = "Edges", alias = "edges", default)]
    pub edges: Vec<EdgeRecord>,
    #[serde(rename = "Faces", alias = "faces", default)]
    pub faces: Vec<FaceRecord>,
}

impl SolidDocument {
    pub fn from_json(json: &str) -> BrepResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub id: usize,
    pub position: Point3<f64>,
}

/// An undirected edge between two distinct vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub id: usize,
    pub vertices: [usize; 2],
}

impl Edge {
    pub fn new(id: usize, v1: usize, v2: usize) -> Self {
        Self {
            id,
            vertices: [v1, v2],
        }
    }

    pub fn start(&self) -> usize {
        self.vertices[0]
    }

    pub fn end(&self) -> usize {
        self.vertices[1]
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Same edge walked the other way round.
    pub fn reversed(&self) -> Self {
        Self::new(self.id, self.vertices[1], self.vertices[0])
    }
}

/// A face bounded by edges listed in no particular order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub id: usize,
    pub edges: Vec<usize>,
}

/// A validated, immutable B-Rep solid.
///
/// Storage index equals identifier for vertices, edges and faces.
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
}

impl Solid {
    /// Validate a document and build a solid from it.
    pub fn from_document(document: SolidDocument) -> Result<Self, ValidationError> {
        validate(&document)?;

        let mut vertices: Vec<Vertex> = document
            .vertices
            .into_iter()
            .map(|v| Vertex {
                id: v.id,
                position: Point3::new(v.x, v.y, v.z),
            })
            .collect();
        vertices.sort_by_key(|v| v.id);

        let mut edges: Vec<Edge> = document
            .edges
            .into_iter()
            .map(|e| Edge::new(e.id, e.vertices[0], e.vertices[1]))
            .collect();
        edges.sort_by_key(|e| e.id);

        let mut faces: Vec<Face> = document
            .faces
            .into_iter()
            .map(|f| Face {
                id: f.id,
                edges: f.edges,
            })
            .collect();
        faces.sort_by_key(|f| f.id);

        Ok(Self {
            vertices,
            edges,
            faces,
        })
    }

    pub fn load_json(json: &str) -> BrepResult<Self> {
        let document = SolidDocument::from_json(json)?;
        Ok(Self::from_document(document)?)
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> BrepResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| BrepError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_json(&json)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn position(&self, vertex: usize) -> Point3<f64> {
        self.vertices[vertex].position
    }

    /// The edges of a face, in the order the face lists them.
    pub fn face_edges(&self, face: &Face) -> Vec<Edge> {
        face.edges.iter().map(|&id| self.edges[id]).collect()
    }

    /// Mean of all vertex positions.
    pub fn geometric_center(&self) -> Point3<f64> {
        crate::geometry::centroid(self.vertices.iter().map(|v| v.position))
    }
}

fn validate(document: &SolidDocument) -> Result<(), ValidationError> {
    if let Some(missing) = first_missing_id(document.vertices.iter().map(|v| v.id)) {
        return Err(ValidationError::VertexIdsNotDense { missing });
    }

    for edge in &document.edges {
        if edge.vertices.len() != 2 {
            return Err(ValidationError::EdgeVertexCount {
                edge: edge.id,
                count: edge.vertices.len(),
            });
        }
        if edge.vertices[0] == edge.vertices[1] {
            return Err(ValidationError::EdgeDegenerate {
                edge: edge.id,
                vertex: edge.vertices[0],
            });
        }
        if let Some(&vertex) = edge
            .vertices
            .iter()
            .find(|&&v| v >= document.vertices.len())
        {
            return Err(ValidationError::EdgeVertexOutOfRange {
                edge: edge.id,
                vertex,
            });
        }
    }

    if let Some(missing) = first_missing_id(document.edges.iter().map(|e| e.id)) {
        return Err(ValidationError::EdgeIdsNotDense { missing });
    }

    for face in &document.faces {
        if face.edges.len() < 3 {
            return Err(ValidationError::FaceTooFewEdges {
                face: face.id,
                count: face.edges.len(),
            });
        }
        if let Some(&edge) = face.edges.iter().find(|&&e| e >= document.edges.len()) {
            return Err(ValidationError::FaceEdgeOutOfRange {
                face: face.id,
                edge,
            });
        }
    }

    if let Some(missing) = first_missing_id(document.faces.iter().map(|f| f.id)) {
        return Err(ValidationError::FaceIdsNotDense { missing });
    }

    Ok(())
}

/// Smallest id in `[0, n)` that does not occur, where `n` is the number of ids.
fn first_missing_id<I>(ids: I) -> Option<usize>
where
    I: ExactSizeIterator<Item = usize>,
{
    let mut seen = vec![false; ids.len()];
    for id in ids {
        if let Some(slot) = seen.get_mut(id) {
            *slot = true;
        }
    }
    seen.iter().position(|&present| !present)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{EdgeRecord, FaceRecord, VertexRecord};

    pub fn vertex(id: usize, x: f64, y: f64, z: f64) -> VertexRecord {
        VertexRecord { id, x, y, z }
    }

    pub fn edge(id: usize, a: usize, b: usize) -> EdgeRecord {
        EdgeRecord {
            id,
            vertices: vec![a, b],
        }
    }

    pub fn face(id: usize, edges: Vec<usize>) -> FaceRecord {
        FaceRecord { id, edges }
    }
}
