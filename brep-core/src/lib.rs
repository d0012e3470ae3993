/// BRep Core Library - Solid model loading, triangulation and transparency sorting
///
/// This library turns validated boundary-representation solids into renderable
/// triangle meshes and keeps translucent meshes in back-to-front order as the
/// view changes.

pub mod color;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod material;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod ring;
pub mod scene;
pub mod sort;
pub mod transform;
pub mod triangulate;

// Re-export commonly used types
pub use color::Color;
pub use error::{BrepError, BrepResult, TopologyError, ValidationError};
pub use loader::{
    default_model, BuildMode, LoaderConfig, MergedBuilder, MeshBuilder, PerFaceBuilder,
};
pub use material::Material;
pub use mesh::{MeshGroup, RenderableMesh};
pub use model::{Solid, SolidDocument};
pub use projection::{Camera, ProjectionMode};
pub use scene::{Light, Scene, SceneNode};
pub use transform::{RotationTracker, Transform};
