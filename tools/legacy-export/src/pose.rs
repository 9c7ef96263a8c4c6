//! Pose application and coordinate conversion
//!
//! Source models are Y-down; the interchange format is Y-up. Every component
//! gets the Y flip, posed or not.

use glam::{Mat3, Mat4, Vec3};

use crate::mesh::{unit_or_default, Geometry};
use crate::skeleton::BindPose;

const FLIP_Y: Vec3 = Vec3::new(1.0, -1.0, 1.0);

/// Pose component `index` with its bone transform (if any), then flip Y
pub fn apply_pose(geometry: &mut Geometry, pose: Option<&BindPose>, index: usize) {
    if let Some(pose) = pose {
        match pose.get(index) {
            Some(transform) => transform_geometry(geometry, transform),
            None => tracing::warn!(
                "Component {} has no bone in a {}-bone skeleton, leaving it unposed",
                index,
                pose.len()
            ),
        }
    }

    flip_y(geometry);
}

/// Positions take the full affine transform; normals only the linear part
fn transform_geometry(geometry: &mut Geometry, transform: &Mat4) {
    for p in &mut geometry.positions {
        *p = transform.transform_point3(*p);
    }

    let rotation = Mat3::from_mat4(*transform);
    for n in &mut geometry.normals {
        *n = unit_or_default(rotation * *n);
    }
}

fn flip_y(geometry: &mut Geometry) {
    for p in &mut geometry.positions {
        *p *= FLIP_Y;
    }
    for n in &mut geometry.normals {
        *n *= FLIP_Y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SkeletonNode, SkeletonObject};
    use crate::skeleton::build_bind_pose;

    fn geometry() -> Geometry {
        Geometry {
            positions: vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.0, 5.0)],
            normals: vec![Vec3::Y, Vec3::X],
        }
    }

    fn two_bone_pose() -> BindPose {
        let skeleton = SkeletonObject {
            nodes: vec![
                SkeletonNode {
                    offset: [0, 0, 0],
                    children: vec![1],
                },
                SkeletonNode {
                    offset: [10, 0, 0],
                    children: vec![],
                },
            ],
        };
        build_bind_pose(&skeleton).unwrap()
    }

    #[test]
    fn test_flip_only_without_skeleton() {
        let mut g = geometry();
        apply_pose(&mut g, None, 0);
        assert_eq!(g.positions[0], Vec3::new(1.0, -2.0, 3.0));
        assert_eq!(g.positions[1], Vec3::new(-4.0, 0.0, 5.0));
        assert_eq!(g.normals[0], Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(g.normals[1], Vec3::X);
    }

    #[test]
    fn test_child_bone_translates_plus_ten_on_x() {
        let pose = two_bone_pose();
        let mut unposed = geometry();
        let mut posed = geometry();
        apply_pose(&mut unposed, None, 1);
        apply_pose(&mut posed, Some(&pose), 1);

        for (a, b) in unposed.positions.iter().zip(&posed.positions) {
            assert_eq!(*b - *a, Vec3::new(10.0, 0.0, 0.0));
        }
        // Translation leaves normals alone
        assert_eq!(posed.normals, unposed.normals);
    }

    #[test]
    fn test_missing_bone_leaves_geometry_unposed() {
        let pose = two_bone_pose();
        let mut unposed = geometry();
        let mut posed = geometry();
        apply_pose(&mut unposed, None, 7);
        apply_pose(&mut posed, Some(&pose), 7);
        assert_eq!(posed, unposed);
    }

    #[test]
    fn test_normals_renormalized_under_scale() {
        let mut g = geometry();
        let transform = Mat4::from_scale(Vec3::new(3.0, 1.0, 1.0));
        transform_geometry(&mut g, &transform);
        assert_eq!(g.positions[0], Vec3::new(3.0, 2.0, 3.0));
        for n in &g.normals {
            assert!((n.length() - 1.0).abs() < 1e-6);
        }
        assert_eq!(g.normals[1], Vec3::X);
    }
}
