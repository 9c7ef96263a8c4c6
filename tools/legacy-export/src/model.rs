//! Decoded model objects
//!
//! These are the structures produced by the container decoders: a mesh
//! object, an optional skeleton and an optional texture. On disk they travel
//! as a JSON bundle so the exporter can run without the decoders linked in.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed-point scale of raw normal components (4096 = 1.0)
pub const NORMAL_ONE: f32 = 4096.0;

/// Everything decoded from one model file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodedModel {
    #[serde(default)]
    pub mesh: Option<MeshObject>,
    #[serde(default)]
    pub skeleton: Option<SkeletonObject>,
    #[serde(default)]
    pub texture: Option<TextureObject>,
}

/// Mesh object: sub-mesh components in declaration order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshObject {
    pub components: Vec<MeshComponent>,
}

/// One sub-mesh unit with independent triangle and quad pools
///
/// Both pools index into the same vertex/normal space.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshComponent {
    #[serde(default)]
    pub triangles: PrimitivePool<Triangle>,
    #[serde(default)]
    pub quads: PrimitivePool<Quad>,
}

/// Raw vertices, normals and primitive records of one primitive type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimitivePool<P> {
    #[serde(default)]
    pub vertices: Vec<[i16; 3]>,
    #[serde(default)]
    pub normals: Vec<[i16; 3]>,
    #[serde(default = "Vec::new")]
    pub primitives: Vec<P>,
}

impl<P> Default for PrimitivePool<P> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            primitives: Vec::new(),
        }
    }
}

/// Texture selectors shared by every primitive type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureInfo {
    /// Texture page; the low two bits pick the atlas panel
    pub page: u8,
    /// Palette (CLUT) id
    pub palette: u16,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [u16; 3],
    pub normals: [u16; 3],
    pub uvs: [[u8; 2]; 3],
    #[serde(default)]
    pub texture: TextureInfo,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub vertices: [u16; 4],
    pub normals: [u16; 4],
    pub uvs: [[u8; 2]; 4],
    #[serde(default)]
    pub texture: TextureInfo,
}

/// Common view over triangle and quad records
pub trait Primitive {
    fn vertex_indices(&self) -> &[u16];
    fn normal_indices(&self) -> &[u16];
    fn uvs(&self) -> &[[u8; 2]];
    fn texture(&self) -> TextureInfo;
}

impl Primitive for Triangle {
    fn vertex_indices(&self) -> &[u16] {
        &self.vertices
    }

    fn normal_indices(&self) -> &[u16] {
        &self.normals
    }

    fn uvs(&self) -> &[[u8; 2]] {
        &self.uvs
    }

    fn texture(&self) -> TextureInfo {
        self.texture
    }
}

impl Primitive for Quad {
    fn vertex_indices(&self) -> &[u16] {
        &self.vertices
    }

    fn normal_indices(&self) -> &[u16] {
        &self.normals
    }

    fn uvs(&self) -> &[[u8; 2]] {
        &self.uvs
    }

    fn texture(&self) -> TextureInfo {
        self.texture
    }
}

/// Skeleton object: arena of bones, node 0 is the root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkeletonObject {
    pub nodes: Vec<SkeletonNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkeletonNode {
    /// Translation relative to the parent bone, in model units
    pub offset: [i16; 3],
    #[serde(default)]
    pub children: Vec<u16>,
}

/// Texture atlas: several horizontal panels packed into one image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureObject {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_panels")]
    pub panels: u32,
    /// RGBA8 pixels, row-major
    #[serde(default)]
    pub pixels: Vec<u8>,
}

fn default_panels() -> u32 {
    1
}

/// Load a decoded model bundle from disk
pub fn load_model(path: &Path) -> Result<DecodedModel> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model: {:?}", path))?;
    let model: DecodedModel = serde_json::from_str(&content)
        .with_context(|| format!("Failed to decode model: {:?}", path))?;
    Ok(model)
}

/// Log the contents of a model without converting it
pub fn describe_model(input: &Path) -> Result<()> {
    let model = load_model(input)?;

    tracing::info!("Model {:?}:", input);
    match &model.mesh {
        Some(mesh) => {
            tracing::info!("  {} components", mesh.components.len());
            for (i, component) in mesh.components.iter().enumerate() {
                tracing::info!(
                    "  [{}] {} triangles, {} quads",
                    i,
                    component.triangles.primitives.len(),
                    component.quads.primitives.len()
                );
            }
        }
        None => tracing::info!("  no mesh data"),
    }
    match &model.skeleton {
        Some(skeleton) => tracing::info!("  skeleton: {} bones", skeleton.nodes.len()),
        None => tracing::info!("  no skeleton"),
    }
    match &model.texture {
        Some(texture) => tracing::info!(
            "  texture: {}x{}, {} panels",
            texture.width,
            texture.height,
            texture.panels
        ),
        None => tracing::info!("  no texture"),
    }

    Ok(())
}
