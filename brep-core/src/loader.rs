/// Turning validated solids into mesh groups
use nalgebra::Point3;
use rand::rngs::StdRng;

use crate::color::{Color, ShuffledPalette, FACE_PALETTE};
use crate::error::{BrepError, BrepResult};
use crate::material::Material;
use crate::mesh::{MeshGroup, RenderableMesh};
use crate::model::Solid;
use crate::transform::Transform;
use crate::triangulate::triangulate_face;

/// How faces are assembled into meshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    /// One coloured mesh per face, suitable for transparency sorting.
    PerFace,
    /// All faces in a single mesh with one colour.
    #[default]
    Merged,
}

/// Configuration for building mesh groups.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    pub mode: BuildMode,
    /// Optional seed for reproducible colours.
    pub seed: Option<u64>,
}

impl LoaderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: BuildMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The builder selected by `mode`.
    pub fn builder(&self) -> Box<dyn MeshBuilder> {
        match self.mode {
            BuildMode::PerFace => Box::new(PerFaceBuilder::new(self.seed)),
            BuildMode::Merged => Box::new(MergedBuilder::new(self.seed)),
        }
    }
}

/// Builds the renderable meshes for a solid.
pub trait MeshBuilder {
    fn build(&mut self, solid: &Solid) -> BrepResult<MeshGroup>;

    fn mode(&self) -> BuildMode;
}

/// One mesh per face, each with its own colour from the palette.
pub struct PerFaceBuilder {
    colors: ShuffledPalette<StdRng>,
}

impl PerFaceBuilder {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            colors: ShuffledPalette::with_seed(&FACE_PALETTE, seed),
        }
    }
}

impl MeshBuilder for PerFaceBuilder {
    fn build(&mut self, solid: &Solid) -> BrepResult<MeshGroup> {
        if solid.faces().is_empty() {
            return Err(BrepError::EmptyModel);
        }

        let center = solid.geometric_center();
        let colors = self.colors.take_colors(solid.faces().len());

        let mut group = MeshGroup::new();
        for (face, color) in solid.faces().iter().zip(colors) {
            let triangles = triangulate_face(solid, face, &center)?;
            let front = Material::front(color);
            let mesh = RenderableMesh::new(triangles.positions, triangles.triangles, front)
                .with_back(Material::back(color));
            // Faces are stored by id, so load order matches the face id.
            group.push(mesh);
        }

        tracing::debug!(
            faces = solid.faces().len(),
            triangles = group.triangle_count(),
            "built per-face meshes"
        );
        Ok(group)
    }

    fn mode(&self) -> BuildMode {
        BuildMode::PerFace
    }
}

/// Every face concatenated into one mesh.
pub struct MergedBuilder {
    colors: ShuffledPalette<StdRng>,
}

impl MergedBuilder {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            colors: ShuffledPalette::with_seed(&FACE_PALETTE, seed),
        }
    }
}

impl MeshBuilder for MergedBuilder {
    fn build(&mut self, solid: &Solid) -> BrepResult<MeshGroup> {
        if solid.faces().is_empty() {
            return Err(BrepError::EmptyModel);
        }

        let center = solid.geometric_center();
        let mut positions: Vec<Point3<f64>> = Vec::new();
        let mut indices: Vec<[usize; 3]> = Vec::new();
        for face in solid.faces() {
            let triangles = triangulate_face(solid, face, &center)?;
            let offset = positions.len();
            positions.extend(triangles.positions);
            indices.extend(
                triangles
                    .triangles
                    .iter()
                    .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
            );
        }

        let color = self
            .colors
            .take_colors(1)
            .pop()
            .ok_or(BrepError::EmptyModel)?;
        let mesh = RenderableMesh::new(positions, indices, Material::front(color))
            .with_back(Material::back(color));

        tracing::debug!(
            faces = solid.faces().len(),
            triangles = mesh.triangle_count(),
            "built merged mesh"
        );
        Ok(std::iter::once(mesh).collect())
    }

    fn mode(&self) -> BuildMode {
        BuildMode::Merged
    }
}

/// Built-in demo scene: two tetrahedra sharing one set of triangles.
///
/// The inner one is opaque green at half size, the outer one translucent
/// yellow with an opaque brown back side.
pub fn default_model() -> MeshGroup {
    let sqrt2 = std::f64::consts::SQRT_2;
    let sqrt6 = 6.0_f64.sqrt();
    let corners = [
        Point3::new(0.0, 1.0, 0.0),
        Point3::new(2.0 * sqrt2 / 3.0, -1.0 / 3.0, 0.0),
        Point3::new(-sqrt2 / 3.0, -1.0 / 3.0, -sqrt6 / 3.0),
        Point3::new(-sqrt2 / 3.0, -1.0 / 3.0, sqrt6 / 3.0),
    ];
    // Faces (0, 1, 2), (1, 0, 3), (2, 3, 0), (3, 2, 1)
    let positions: Vec<Point3<f64>> = (0..12)
        .map(|i| {
            if (i / 3) % 2 == 0 {
                corners[i % 4]
            } else {
                corners[(i * 3) % 4]
            }
        })
        .collect();
    let triangles: Vec<[usize; 3]> = (0..4).map(|t| [3 * t, 3 * t + 1, 3 * t + 2]).collect();

    let inner = RenderableMesh::new(
        positions.clone(),
        triangles.clone(),
        Material::front(Color::rgb(0, 128, 0)),
    )
    .with_transform(Transform::uniform_scale_matrix(0.5));

    let outer = RenderableMesh::new(
        positions,
        triangles,
        Material::front(Color::argb(64, 255, 255, 0)),
    )
    .with_back(Material::diffuse(Color::rgb(200, 175, 0)));

    [inner, outer].into_iter().collect()
}
