//! legacy-export - legacy model export tool
//!
//! Converts decoded legacy game models to OBJ geometry with MTL materials
//! and a PNG texture atlas.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Use modules from library
use legacy_export::{export, manifest, model};

#[derive(Parser)]
#[command(name = "legacy-export")]
#[command(about = "Legacy model export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a single model
    Model {
        /// Decoded model bundle (.json)
        input: PathBuf,

        /// Output .obj file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export raw geometry without applying the skeleton
        #[arg(long)]
        raw: bool,

        /// Do not write the texture atlas
        #[arg(long)]
        no_texture: bool,
    },

    /// Build models from a manifest file
    Build {
        /// Path to models.toml manifest
        #[arg(default_value = "models.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to models.toml manifest
        #[arg(default_value = "models.toml")]
        manifest: PathBuf,
    },

    /// Show what a model bundle contains
    Info {
        /// Decoded model bundle (.json)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Model {
            input,
            output,
            raw,
            no_texture,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("obj"));
            tracing::info!("Converting {:?} -> {:?}", input, output);
            let options = export::ExportOptions {
                pose: !raw,
                export_texture: !no_texture,
            };
            export::export_model(&input, &output, &options)?;
            tracing::info!("Done!");
        }

        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building models from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }

        Commands::Info { input } => {
            model::describe_model(&input)?;
        }
    }

    Ok(())
}
