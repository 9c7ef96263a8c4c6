//! Types and constants for mesh assembly

use glam::{Vec2, Vec3};

/// Normal substituted for zero-length source normals
pub const DEFAULT_NORMAL: Vec3 = Vec3::Y;

/// Emission order of a quad's declared corners (0, 1, 2, 3)
///
/// The interchange winding differs from the source's strip-ordered quads.
pub const QUAD_CORNER_ORDER: [usize; 4] = [2, 3, 1, 0];

/// Unit-length normal, or the default normal for a zero vector
pub(crate) fn unit_or_default(n: Vec3) -> Vec3 {
    if n.length_squared() == 0.0 {
        DEFAULT_NORMAL
    } else {
        n.normalize()
    }
}

/// Per-component geometry before primitives are assembled
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

/// One face corner; each array is indexed independently (0-based, local)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub position: u32,
    pub uv: u32,
    pub normal: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polygon {
    Triangle([Corner; 3]),
    Quad([Corner; 4]),
}

impl Polygon {
    pub fn corners(&self) -> &[Corner] {
        match self {
            Polygon::Triangle(c) => c,
            Polygon::Quad(c) => c,
        }
    }

    pub fn is_quad(&self) -> bool {
        matches!(self, Polygon::Quad(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub polygon: Polygon,
    pub material: String,
}

/// A named mesh ready for the interchange writer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl AssembledMesh {
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().filter(|f| !f.polygon.is_quad()).count()
    }

    pub fn quad_count(&self) -> usize {
        self.faces.iter().filter(|f| f.polygon.is_quad()).count()
    }
}
