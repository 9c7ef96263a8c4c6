//! Material registry
//!
//! One material per distinct (texture page, palette) pair. The registry lives
//! for a single export and is threaded through every component's assembly so
//! components that share a pair share the material.

use hashbrown::HashMap;

use crate::model::TextureInfo;

/// An exported material
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub name: String,
    pub key: TextureInfo,
    /// Texture image path relative to the materials file
    pub texture: Option<String>,
}

/// Deduplicating material store, in registration order
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    texture: Option<String>,
    materials: Vec<Material>,
    by_key: HashMap<TextureInfo, usize>,
}

impl MaterialRegistry {
    /// Create a registry whose materials all reference `texture`
    pub fn new(texture: Option<String>) -> Self {
        Self {
            texture,
            materials: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Look up the material for `key`, registering it on first use
    pub fn resolve(&mut self, key: TextureInfo) -> &Material {
        let index = match self.by_key.get(&key) {
            Some(&index) => index,
            None => {
                let index = self.materials.len();
                self.materials.push(Material {
                    name: material_name(key),
                    key,
                    texture: self.texture.clone(),
                });
                self.by_key.insert(key, index);
                tracing::debug!(
                    "Registered material {} (page={}, palette={})",
                    self.materials[index].name,
                    key.page,
                    key.palette
                );
                index
            }
        };
        &self.materials[index]
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn into_materials(self) -> Vec<Material> {
        self.materials
    }
}

/// Generated material name encoding both selectors
pub fn material_name(key: TextureInfo) -> String {
    format!("page{}_palette{}", key.page, key.palette)
}
