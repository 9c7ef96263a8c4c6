//! Vertex/normal materialization
//!
//! Triangle and quad pools share one index space. Arrays are sized by the
//! highest index any record uses, then filled pool by pool: the triangle
//! pool first, the quad pool second, so the quad pool wins on overlap.

use glam::Vec3;

use super::types::{unit_or_default, Geometry};
use crate::model::{MeshComponent, Primitive, PrimitivePool, NORMAL_ONE};

/// Convert one component's raw pools into float positions and unit normals
pub fn materialize(component: &MeshComponent) -> Geometry {
    let position_count = index_span(
        max_index(&component.triangles, |p| p.vertex_indices()),
        max_index(&component.quads, |p| p.vertex_indices()),
    );
    let normal_count = index_span(
        max_index(&component.triangles, |p| p.normal_indices()),
        max_index(&component.quads, |p| p.normal_indices()),
    );

    let to_position = |raw: &[i16; 3]| Vec3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32);
    let to_normal = |raw: &[i16; 3]| {
        Vec3::new(raw[0] as f32, raw[1] as f32, raw[2] as f32) / NORMAL_ONE
    };

    let mut positions = vec![Vec3::ZERO; position_count];
    fill(&mut positions, &component.triangles.vertices, to_position);
    fill(&mut positions, &component.quads.vertices, to_position);

    let mut normals = vec![Vec3::ZERO; normal_count];
    fill(&mut normals, &component.triangles.normals, to_normal);
    fill(&mut normals, &component.quads.normals, to_normal);
    for n in &mut normals {
        *n = unit_or_default(*n);
    }

    Geometry { positions, normals }
}

fn max_index<P, F>(pool: &PrimitivePool<P>, indices: F) -> Option<usize>
where
    F: Fn(&P) -> &[u16],
{
    pool.primitives
        .iter()
        .flat_map(|p| indices(p).iter())
        .map(|&i| i as usize)
        .max()
}

fn index_span(a: Option<usize>, b: Option<usize>) -> usize {
    a.max(b).map(|max| max + 1).unwrap_or(0)
}

/// Overwrite slots by pool position; entries past the sized array are dropped
fn fill(target: &mut [Vec3], raw: &[[i16; 3]], convert: impl Fn(&[i16; 3]) -> Vec3) {
    for (slot, value) in target.iter_mut().zip(raw) {
        *slot = convert(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::DEFAULT_NORMAL;
    use crate::model::{Quad, Triangle};

    fn triangle(vertices: [u16; 3], normals: [u16; 3]) -> Triangle {
        Triangle {
            vertices,
            normals,
            ..Default::default()
        }
    }

    fn quad(vertices: [u16; 4], normals: [u16; 4]) -> Quad {
        Quad {
            vertices,
            normals,
            ..Default::default()
        }
    }

    #[test]
    fn test_length_is_max_index_plus_one() {
        let mut component = MeshComponent::default();
        component.triangles.vertices = vec![[1, 1, 1]; 2];
        component.triangles.primitives = vec![triangle([0, 1, 4], [0, 0, 1])];
        component.quads.primitives = vec![quad([2, 3, 6, 5], [0, 2, 0, 0])];

        let geometry = materialize(&component);
        assert_eq!(geometry.positions.len(), 7);
        assert_eq!(geometry.normals.len(), 3);
        // Unfilled slots stay zero
        assert_eq!(geometry.positions[2], Vec3::ZERO);
        assert_eq!(geometry.positions[1], Vec3::ONE);
    }

    #[test]
    fn test_declared_entries_beyond_range_are_ignored() {
        let mut component = MeshComponent::default();
        component.triangles.vertices = vec![[0, 0, 0]; 10];
        component.triangles.normals = vec![[0, 4096, 0]; 10];
        component.triangles.primitives = vec![triangle([0, 1, 2], [0, 0, 0])];

        let geometry = materialize(&component);
        assert_eq!(geometry.positions.len(), 3);
        assert_eq!(geometry.normals.len(), 1);
    }

    #[test]
    fn test_quad_pool_overwrites_triangle_pool() {
        let mut component = MeshComponent::default();
        component.triangles.vertices = vec![[1, 0, 0], [2, 0, 0], [3, 0, 0]];
        component.triangles.primitives = vec![triangle([0, 1, 2], [0, 0, 0])];
        component.quads.vertices = vec![[9, 9, 9], [8, 8, 8]];
        component.quads.primitives = vec![quad([0, 1, 2, 3], [0, 0, 0, 0])];

        let geometry = materialize(&component);
        assert_eq!(
            geometry.positions,
            vec![
                Vec3::new(9.0, 9.0, 9.0),
                Vec3::new(8.0, 8.0, 8.0),
                Vec3::new(3.0, 0.0, 0.0),
                Vec3::ZERO,
            ]
        );
    }

    #[test]
    fn test_normals_are_unit_or_default() {
        let mut component = MeshComponent::default();
        component.triangles.normals = vec![[0, 0, 0], [4096, 4096, 0], [0, 0, -2048]];
        component.triangles.primitives = vec![triangle([0, 0, 0], [0, 1, 2])];

        let geometry = materialize(&component);
        assert_eq!(geometry.normals[0], DEFAULT_NORMAL);
        for n in &geometry.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
        assert!((geometry.normals[2] - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_empty_component() {
        let geometry = materialize(&MeshComponent::default());
        assert!(geometry.positions.is_empty());
        assert!(geometry.normals.is_empty());
    }
}
