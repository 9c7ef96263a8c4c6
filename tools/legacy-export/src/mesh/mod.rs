//! Mesh assembly (decoded components -> interchange meshes)

mod assemble;
mod materialize;
mod types;

// Re-export public API
pub use assemble::assemble;
pub use materialize::materialize;
pub use types::{
    AssembledMesh, Corner, Face, Geometry, Polygon, DEFAULT_NORMAL, QUAD_CORNER_ORDER,
};
pub(crate) use types::unit_or_default;
