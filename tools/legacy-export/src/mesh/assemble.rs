//! Primitive assembly (triangle/quad records -> faces)

use glam::Vec2;

use super::types::{AssembledMesh, Corner, Face, Geometry, Polygon, QUAD_CORNER_ORDER};
use crate::atlas::{map_uv, Atlas};
use crate::material::MaterialRegistry;
use crate::model::{MeshComponent, Primitive};

/// Build the faces of one component over its (already posed) geometry
///
/// Triangles are emitted before quads, each in pool order. Every face corner
/// gets its own UV entry; UVs are never shared between corners.
pub fn assemble(
    name: String,
    geometry: Geometry,
    component: &MeshComponent,
    atlas: Option<&Atlas>,
    materials: &mut MaterialRegistry,
) -> AssembledMesh {
    let face_count = component.triangles.primitives.len() + component.quads.primitives.len();
    let uv_count =
        component.triangles.primitives.len() * 3 + component.quads.primitives.len() * 4;

    let mut mesh = AssembledMesh {
        name,
        positions: geometry.positions,
        uvs: Vec::with_capacity(uv_count),
        normals: geometry.normals,
        faces: Vec::with_capacity(face_count),
    };

    for triangle in &component.triangles.primitives {
        let corners: [Corner; 3] = push_corners(&mut mesh.uvs, triangle, atlas);
        let material = materials.resolve(triangle.texture()).name.clone();
        mesh.faces.push(Face {
            polygon: Polygon::Triangle(corners),
            material,
        });
    }

    for quad in &component.quads.primitives {
        let declared: [Corner; 4] = push_corners(&mut mesh.uvs, quad, atlas);
        let corners = QUAD_CORNER_ORDER.map(|i| declared[i]);
        let material = materials.resolve(quad.texture()).name.clone();
        mesh.faces.push(Face {
            polygon: Polygon::Quad(corners),
            material,
        });
    }

    mesh
}

/// Allocate a UV per corner and pair it with the corner's vertex and normal
fn push_corners<P: Primitive, const N: usize>(
    uvs: &mut Vec<Vec2>,
    primitive: &P,
    atlas: Option<&Atlas>,
) -> [Corner; N] {
    let page = primitive.texture().page;
    let vertices = primitive.vertex_indices();
    let normals = primitive.normal_indices();
    let raw_uvs = primitive.uvs();

    std::array::from_fn(|i| {
        let uv = uvs.len() as u32;
        uvs.push(Vec2::from(map_uv(raw_uvs[i], page, atlas)));
        Corner {
            position: vertices[i] as u32,
            uv,
            normal: normals[i] as u32,
        }
    })
}
