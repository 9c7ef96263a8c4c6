//! Texture atlas coordinate mapping
//!
//! Source UVs are bytes addressing one panel of a texture page. The exported
//! image holds every panel side by side, so each UV is shifted into its panel
//! and normalized against the full atlas.

use crate::model::TextureObject;

/// Largest raw texture coordinate, used when no atlas image is known
const RAW_UV_MAX: f32 = 255.0;

/// Dimensions of the shared atlas image
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atlas {
    pub width: f32,
    pub height: f32,
    pub panels: u32,
}

impl Atlas {
    pub fn new(width: u32, height: u32, panels: u32) -> Self {
        Self {
            width: width as f32,
            height: height as f32,
            panels: panels.max(1),
        }
    }

    pub fn from_texture(texture: &TextureObject) -> Self {
        Self::new(texture.width, texture.height, texture.panels)
    }

    fn panel_width(&self) -> f32 {
        self.width / self.panels as f32
    }
}

/// Map a raw UV pair into the 0..1 interchange range
///
/// Only the low two bits of `page` select a panel. V is flipped because the
/// interchange format's V axis points up.
pub fn map_uv(raw: [u8; 2], page: u8, atlas: Option<&Atlas>) -> [f32; 2] {
    let (u, v) = (raw[0] as f32, raw[1] as f32);
    match atlas {
        Some(atlas) if atlas.width > 0.0 && atlas.height > 0.0 => {
            let offset = atlas.panel_width() * (page & 3) as f32;
            [(u + offset) / atlas.width, 1.0 - v / atlas.height]
        }
        _ => [u / RAW_UV_MAX, 1.0 - v / RAW_UV_MAX],
    }
}
