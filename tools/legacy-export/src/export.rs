//! Model exporter (decoded model -> .obj + .mtl + .png)

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::atlas::Atlas;
use crate::error::ExportError;
use crate::formats::{write_mtl, write_obj};
use crate::material::{Material, MaterialRegistry};
use crate::mesh::{assemble, materialize, AssembledMesh};
use crate::model::{load_model, DecodedModel};
use crate::pose::apply_pose;
use crate::skeleton::build_bind_pose;
use crate::texture::export_texture;

/// Materials file extension
pub const MTL_EXT: &str = "mtl";
/// Texture image extension
pub const TEXTURE_EXT: &str = "png";

/// Per-export switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Apply the skeleton's bind pose when the model has one
    pub pose: bool,
    /// Write the texture atlas next to the geometry
    pub export_texture: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pose: true,
            export_texture: true,
        }
    }
}

/// Summary counts of one export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub components: usize,
    pub triangles: usize,
    pub quads: usize,
    pub materials: usize,
    pub posed: bool,
}

/// Result of in-memory model conversion
#[derive(Debug, Clone)]
pub struct ConvertedModel {
    /// One mesh per component, in declaration order
    pub meshes: Vec<AssembledMesh>,
    /// Deduplicated materials, in first-use order
    pub materials: Vec<Material>,
    pub stats: ExportStats,
}

/// Convert a decoded model to interchange meshes without touching the disk
///
/// # Arguments
/// * `model` - Decoded mesh, skeleton and texture objects
/// * `name` - Base name for the exported meshes
/// * `texture_path` - Image path the materials reference (None for untextured)
/// * `options` - Export switches
pub fn convert_model_to_memory(
    model: &DecodedModel,
    name: &str,
    texture_path: Option<&str>,
    options: &ExportOptions,
) -> Result<ConvertedModel> {
    let mesh = model.mesh.as_ref().ok_or(ExportError::NoMeshData)?;

    let pose = match (&model.skeleton, options.pose) {
        (Some(skeleton), true) => Some(build_bind_pose(skeleton)?),
        (None, true) => {
            tracing::warn!("Model '{}' has no skeleton, exporting unposed geometry", name);
            None
        }
        (_, false) => None,
    };

    let atlas = model.texture.as_ref().map(Atlas::from_texture);
    if atlas.is_none() {
        tracing::warn!("Model '{}' has no texture, using page-less UVs", name);
    }

    let mut registry = MaterialRegistry::new(texture_path.map(str::to_string));
    let mut meshes = Vec::with_capacity(mesh.components.len());

    for (index, component) in mesh.components.iter().enumerate() {
        let mut geometry = materialize(component);
        apply_pose(&mut geometry, pose.as_ref(), index);

        let assembled = assemble(
            format!("{}_{:03}", name, index),
            geometry,
            component,
            atlas.as_ref(),
            &mut registry,
        );
        tracing::debug!(
            "Component {}: {} positions, {} normals, {} faces",
            index,
            assembled.positions.len(),
            assembled.normals.len(),
            assembled.faces.len()
        );
        meshes.push(assembled);
    }

    let stats = ExportStats {
        components: meshes.len(),
        triangles: meshes.iter().map(AssembledMesh::triangle_count).sum(),
        quads: meshes.iter().map(AssembledMesh::quad_count).sum(),
        materials: registry.len(),
        posed: pose.is_some(),
    };

    Ok(ConvertedModel {
        meshes,
        materials: registry.into_materials(),
        stats,
    })
}

/// Export a decoded model bundle to OBJ, with its MTL and PNG alongside
pub fn export_model(input: &Path, output: &Path, options: &ExportOptions) -> Result<ExportStats> {
    let model = load_model(input)?;

    let name = output
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Invalid output path: {:?}", output))?;
    let mtl_name = format!("{}.{}", name, MTL_EXT);
    let texture_name = format!("{}.{}", name, TEXTURE_EXT);

    let write_texture = options.export_texture && model.texture.is_some();
    let mut converted = convert_model_to_memory(
        &model,
        name,
        write_texture.then_some(texture_name.as_str()),
        options,
    )?;

    let dir = output.parent().unwrap_or(Path::new(""));
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    }

    // Both files are opened before either is written
    let mtl_path = dir.join(&mtl_name);
    let mut obj_writer = BufWriter::new(
        File::create(output).with_context(|| format!("Failed to create output: {:?}", output))?,
    );
    let mut mtl_writer = BufWriter::new(
        File::create(&mtl_path)
            .with_context(|| format!("Failed to create output: {:?}", mtl_path))?,
    );

    // The image goes out first so the materials never reference a missing file
    if let (true, Some(texture)) = (write_texture, &model.texture) {
        let texture_path = dir.join(&texture_name);
        if let Err(e) = export_texture(texture, &texture_path) {
            tracing::warn!("Skipping texture {:?}: {:#}", texture_path, e);
            for material in &mut converted.materials {
                material.texture = None;
            }
        }
    }

    write_obj(&mut obj_writer, Some(&mtl_name), &converted.meshes)?;
    obj_writer
        .flush()
        .with_context(|| format!("Failed to write output: {:?}", output))?;

    write_mtl(&mut mtl_writer, &converted.materials)?;
    mtl_writer
        .flush()
        .with_context(|| format!("Failed to write output: {:?}", mtl_path))?;

    let stats = converted.stats;
    tracing::info!(
        "Exported model: {} components, {} triangles, {} quads, {} materials{}",
        stats.components,
        stats.triangles,
        stats.quads,
        stats.materials,
        if stats.posed { " (posed)" } else { "" }
    );

    Ok(stats)
}
