//! Manifest parsing and build orchestration
//!
//! Parses models.toml and exports every model it lists.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::export::{export_model, ExportOptions, ExportStats};

/// Root manifest structure
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub models: BTreeMap<String, ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exported/")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ModelEntry {
    Simple(PathBuf),
    Detailed {
        path: PathBuf,
        #[serde(default = "default_true")]
        pose: bool,
        #[serde(default = "default_true")]
        texture: bool,
    },
}

impl ModelEntry {
    pub fn path(&self) -> &Path {
        match self {
            ModelEntry::Simple(p) => p,
            ModelEntry::Detailed { path, .. } => path,
        }
    }

    pub fn options(&self) -> ExportOptions {
        match self {
            ModelEntry::Simple(_) => ExportOptions::default(),
            ModelEntry::Detailed { pose, texture, .. } => ExportOptions {
                pose: *pose,
                export_texture: *texture,
            },
        }
    }
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    parse_manifest(&content).with_context(|| format!("Failed to parse manifest: {:?}", path))
}

fn parse_manifest(content: &str) -> Result<Manifest> {
    Ok(toml::from_str(content)?)
}

/// Validate a manifest without building
pub fn validate(manifest: &Manifest) -> Result<()> {
    // Check that all source files exist
    for (name, entry) in &manifest.models {
        if !entry.path().exists() {
            anyhow::bail!("Model '{}' source not found: {:?}", name, entry.path());
        }
    }
    Ok(())
}

/// Build all models from a manifest
pub fn build_all(manifest: &Manifest, output_override: Option<&Path>) -> Result<Vec<ExportStats>> {
    let output_dir = output_override.unwrap_or(&manifest.output.dir);
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    let mut all_stats = Vec::with_capacity(manifest.models.len());
    for (name, entry) in &manifest.models {
        let output = output_dir.join(format!("{}.obj", name));
        tracing::info!("Exporting model: {} -> {:?}", name, output);
        let stats = export_model(entry.path(), &output, &entry.options())
            .with_context(|| format!("Failed to export model '{}'", name))?;
        all_stats.push(stats);
    }

    tracing::info!("Exported {} models", all_stats.len());
    Ok(all_stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_and_detailed() {
        let manifest = parse_manifest(
            r#"
            [output]
            dir = "out/"

            [models]
            hero = "data/hero.json"
            prop = { path = "data/prop.json", pose = false }
            "#,
        )
        .unwrap();

        assert_eq!(manifest.output.dir, PathBuf::from("out/"));
        let hero = &manifest.models["hero"];
        assert_eq!(hero.path(), Path::new("data/hero.json"));
        assert_eq!(hero.options(), ExportOptions::default());

        let prop = &manifest.models["prop"];
        assert_eq!(prop.path(), Path::new("data/prop.json"));
        assert_eq!(
            prop.options(),
            ExportOptions {
                pose: false,
                export_texture: true
            }
        );
    }

    #[test]
    fn test_defaults() {
        let manifest = parse_manifest("").unwrap();
        assert_eq!(manifest.output.dir, PathBuf::from("exported/"));
        assert!(manifest.models.is_empty());
    }

    #[test]
    fn test_validate_missing_source() {
        let manifest = parse_manifest(
            r#"
            [models]
            ghost = "does/not/exist.json"
            "#,
        )
        .unwrap();
        let err = validate(&manifest).unwrap_err();
        assert!(err.to_string().contains("Model 'ghost' source not found"));
    }
}
