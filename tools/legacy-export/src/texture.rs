//! Texture passthrough (decoded atlas -> PNG)
//!
//! Pixels are written exactly as decoded; no re-encoding beyond PNG framing.

use anyhow::{Context, Result};
use std::path::Path;

use crate::error::ExportError;
use crate::model::TextureObject;

/// Write the atlas image as an RGBA8 PNG
pub fn export_texture(texture: &TextureObject, output: &Path) -> Result<()> {
    if texture.pixels.is_empty() {
        return Err(ExportError::TextureUnavailable.into());
    }

    let expected = texture.width as usize * texture.height as usize * 4;
    if texture.pixels.len() != expected {
        return Err(ExportError::TextureSizeMismatch {
            width: texture.width,
            height: texture.height,
            expected,
            actual: texture.pixels.len(),
        }
        .into());
    }

    image::save_buffer(
        output,
        &texture.pixels,
        texture.width,
        texture.height,
        image::ColorType::Rgba8,
    )
    .with_context(|| format!("Failed to write texture: {:?}", output))?;

    tracing::info!(
        "Exported texture: {}x{}, {} panels",
        texture.width,
        texture.height,
        texture.panels
    );

    Ok(())
}
