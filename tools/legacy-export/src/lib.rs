//! legacy-export library
//!
//! Converts decoded legacy game models (fixed-point meshes, bone hierarchies,
//! paged texture atlases) into OBJ/MTL interchange files.

pub mod atlas;
pub mod error;
pub mod export;
pub mod formats;
pub mod manifest;
pub mod material;
pub mod mesh;
pub mod model;
pub mod pose;
pub mod skeleton;
pub mod texture;

pub use error::ExportError;

// Re-export key types for model conversion
pub use export::{
    convert_model_to_memory, export_model, ConvertedModel, ExportOptions, ExportStats,
};
pub use model::{load_model, DecodedModel};

// Re-export skeleton types
pub use skeleton::{build_bind_pose, BindPose};
