//! Skeleton bind pose (node offsets -> per-bone transforms)
//!
//! Bones form a tree stored as an arena: each node lists its children by id
//! and node 0 is the root. The bind pose carries no rotation, so a bone's
//! transform is its parent's transform followed by its own offset.

use glam::{Mat4, Vec3};

use crate::error::ExportError;
use crate::model::SkeletonObject;

/// Root bone id
pub const ROOT_BONE: usize = 0;

/// World-space bind transforms, indexed by bone id
#[derive(Debug, Clone, Default)]
pub struct BindPose {
    transforms: Vec<Mat4>,
}

impl BindPose {
    /// Transform for a bone, if the skeleton has one at that id
    pub fn get(&self, bone: usize) -> Option<&Mat4> {
        self.transforms.get(bone)
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn transforms(&self) -> &[Mat4] {
        &self.transforms
    }
}

/// Compose the bind pose by walking the hierarchy depth-first from the root
///
/// A child id past the end of the node list, or a bone reached twice, means
/// the skeleton is corrupt and fails the export.
pub fn build_bind_pose(skeleton: &SkeletonObject) -> Result<BindPose, ExportError> {
    let count = skeleton.nodes.len();
    let mut transforms = vec![Mat4::IDENTITY; count];
    if count == 0 {
        return Ok(BindPose { transforms });
    }

    let mut visited = vec![false; count];
    // (bone, parent transform)
    let mut stack = vec![(ROOT_BONE, Mat4::IDENTITY)];

    while let Some((bone, parent)) = stack.pop() {
        if visited[bone] {
            return Err(ExportError::BoneRevisited(bone));
        }
        visited[bone] = true;

        let node = &skeleton.nodes[bone];
        let offset = Vec3::new(
            node.offset[0] as f32,
            node.offset[1] as f32,
            node.offset[2] as f32,
        );
        let transform = parent * Mat4::from_translation(offset);
        transforms[bone] = transform;

        // Reverse so children are visited in declaration order
        for &child in node.children.iter().rev() {
            let child = child as usize;
            if child >= count {
                return Err(ExportError::BoneOutOfRange {
                    parent: bone,
                    bone: child,
                    count,
                });
            }
            stack.push((child, transform));
        }
    }

    let orphans = visited.iter().filter(|v| !**v).count();
    if orphans > 0 {
        tracing::warn!(
            "{} of {} bones are not reachable from the root, leaving them at identity",
            orphans,
            count
        );
    }

    tracing::debug!("Built bind pose for {} bones", count);

    Ok(BindPose { transforms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SkeletonNode;

    fn node(offset: [i16; 3], children: &[u16]) -> SkeletonNode {
        SkeletonNode {
            offset,
            children: children.to_vec(),
        }
    }

    fn translation(pose: &BindPose, bone: usize) -> Vec3 {
        pose.get(bone).unwrap().w_axis.truncate()
    }

    #[test]
    fn test_translation_is_sum_along_path() {
        // 0 -> 1 -> 3, 0 -> 2
        let skeleton = SkeletonObject {
            nodes: vec![
                node([1, 2, 3], &[1, 2]),
                node([10, 0, 0], &[3]),
                node([0, -5, 0], &[]),
                node([0, 0, 7], &[]),
            ],
        };
        let pose = build_bind_pose(&skeleton).unwrap();

        assert_eq!(pose.len(), 4);
        assert_eq!(translation(&pose, 0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(translation(&pose, 1), Vec3::new(11.0, 2.0, 3.0));
        assert_eq!(translation(&pose, 2), Vec3::new(1.0, -3.0, 3.0));
        assert_eq!(translation(&pose, 3), Vec3::new(11.0, 2.0, 10.0));
    }

    #[test]
    fn test_bind_pose_has_no_rotation() {
        let skeleton = SkeletonObject {
            nodes: vec![node([0, 0, 0], &[1]), node([4, 5, 6], &[])],
        };
        let pose = build_bind_pose(&skeleton).unwrap();
        assert_eq!(
            *pose.get(1).unwrap(),
            Mat4::from_translation(Vec3::new(4.0, 5.0, 6.0))
        );
    }

    #[test]
    fn test_child_out_of_range_is_fatal() {
        let skeleton = SkeletonObject {
            nodes: vec![node([0, 0, 0], &[1]), node([1, 0, 0], &[5])],
        };
        assert_eq!(
            build_bind_pose(&skeleton).unwrap_err(),
            ExportError::BoneOutOfRange {
                parent: 1,
                bone: 5,
                count: 2
            }
        );
    }

    #[test]
    fn test_cycle_is_fatal() {
        let skeleton = SkeletonObject {
            nodes: vec![node([0, 0, 0], &[1]), node([1, 0, 0], &[0])],
        };
        assert_eq!(
            build_bind_pose(&skeleton).unwrap_err(),
            ExportError::BoneRevisited(0)
        );
    }

    #[test]
    fn test_empty_skeleton() {
        let pose = build_bind_pose(&SkeletonObject::default()).unwrap();
        assert!(pose.is_empty());
        assert!(pose.get(0).is_none());
    }

    #[test]
    fn test_unreachable_bone_stays_identity() {
        let skeleton = SkeletonObject {
            nodes: vec![node([1, 0, 0], &[]), node([9, 9, 9], &[])],
        };
        let pose = build_bind_pose(&skeleton).unwrap();
        assert_eq!(*pose.get(1).unwrap(), Mat4::IDENTITY);
    }
}
