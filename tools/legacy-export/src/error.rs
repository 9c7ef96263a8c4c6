//! Export error types
//!
//! Data problems that make a model impossible to export faithfully. I/O and
//! decoding failures travel as `anyhow` errors with path context instead.

/// Errors raised by the conversion pipeline itself
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// The decoded model carries no mesh object
    #[error("Model has no mesh data")]
    NoMeshData,

    /// A child id in the skeleton points past the node list
    #[error("Skeleton node {parent} references bone {bone}, but only {count} bones exist")]
    BoneOutOfRange { parent: usize, bone: usize, count: usize },

    /// A bone was reached twice while walking the hierarchy
    #[error("Skeleton bone {0} is reachable more than once (hierarchy is not a tree)")]
    BoneRevisited(usize),

    /// The texture object has no pixel data to hand to the image exporter
    #[error("Texture has no pixel data")]
    TextureUnavailable,

    /// Pixel buffer length disagrees with the declared dimensions
    #[error("Texture is {width}x{height} but carries {actual} bytes (expected {expected})")]
    TextureSizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ExportError::NoMeshData.to_string(), "Model has no mesh data");
        assert_eq!(
            ExportError::BoneOutOfRange {
                parent: 2,
                bone: 9,
                count: 4
            }
            .to_string(),
            "Skeleton node 2 references bone 9, but only 4 bones exist"
        );
        assert_eq!(
            ExportError::BoneRevisited(3).to_string(),
            "Skeleton bone 3 is reachable more than once (hierarchy is not a tree)"
        );
    }
}
