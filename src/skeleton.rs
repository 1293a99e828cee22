//! Bone hierarchy.

use glam::Mat4;

use crate::errors::{MarrowError, Result};

/// A single joint in the hierarchy.
#[derive(Debug, Clone, Copy)]
pub struct Bone {
    /// Index of the parent bone, `None` for the root.
    parent: Option<usize>,
    /// Maps mesh-space bind geometry into this bone's local space.
    /// Constant for the skeleton's lifetime.
    inverse_bind_matrix: Mat4,
}

impl Bone {
    #[must_use]
    pub fn new(parent: Option<usize>, inverse_bind_matrix: Mat4) -> Self {
        Self {
            parent,
            inverse_bind_matrix,
        }
    }

    #[must_use]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    #[must_use]
    pub fn inverse_bind_matrix(&self) -> Mat4 {
        self.inverse_bind_matrix
    }
}

/// Static, immutable bone hierarchy and bind pose.
///
/// Bone index is stable identity: channels, poses, and the matrix
/// palette all use the same indexing. A skeleton is shared read-only
/// across every clip driven against it, typically behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    /// Builds a skeleton, validating that every parent index strictly
    /// precedes its child.
    ///
    /// That ordering makes plain ascending index order a topological
    /// order, which is what lets pose composition run as a single flat
    /// pass with no tree traversal.
    pub fn new(bones: Vec<Bone>) -> Result<Self> {
        for (index, bone) in bones.iter().enumerate() {
            if let Some(parent) = bone.parent {
                if parent >= index {
                    return Err(MarrowError::InvalidBoneParent {
                        bone: index,
                        parent,
                    });
                }
            }
        }

        log::debug!("Skeleton created with {} bones", bones.len());
        Ok(Self { bones })
    }

    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }
}
