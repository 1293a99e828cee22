//! Sampled poses and the skinning matrix palette.
//!
//! A [`Pose`] holds the latest sampled local transform per bone; the
//! [`MatrixPalette`] derives the hierarchical, bind-pose-relative
//! skinning matrices from it on request. The palette is a pure function
//! of (skeleton, local poses) and carries no state of its own beyond
//! reusable buffers.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};

use crate::skeleton::Skeleton;

/// One bone's transform relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl BonePose {
    /// Zero translation, identity rotation.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    #[must_use]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Local transform matrix: translation composed with rotation, no
    /// independent scale.
    #[must_use]
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

impl Default for BonePose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The latest sampled local pose per bone, indexed like the skeleton.
#[derive(Debug, Clone)]
pub struct Pose {
    skeleton: Arc<Skeleton>,
    local_poses: Vec<BonePose>,
}

impl Pose {
    /// An identity pose sized to the skeleton.
    #[must_use]
    pub fn new(skeleton: Arc<Skeleton>) -> Self {
        let local_poses = vec![BonePose::IDENTITY; skeleton.bone_count()];
        Self {
            skeleton,
            local_poses,
        }
    }

    #[must_use]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    #[must_use]
    pub fn local_poses(&self) -> &[BonePose] {
        &self.local_poses
    }

    /// Overwrites one bone's local pose.
    ///
    /// # Panics
    /// Panics if `bone` is out of bounds for the skeleton.
    pub fn set_local_pose(&mut self, bone: usize, pose: BonePose) {
        self.local_poses[bone] = pose;
    }

    /// Computes the skinning matrices into `palette`, resizing it to
    /// the skeleton's bone count if needed. Repeated calls into the
    /// same palette allocate nothing.
    ///
    /// Bones are processed in ascending index order; the skeleton's
    /// validated parent ordering guarantees each parent's global
    /// transform is already computed when its children need it.
    pub fn compute_matrix_palette(&self, palette: &mut MatrixPalette) {
        palette.resize(self.local_poses.len());

        for (index, bone) in self.skeleton.bones().iter().enumerate() {
            let local = self.local_poses[index].local_matrix();
            let global = match bone.parent() {
                Some(parent) => palette.globals[parent] * local,
                None => local,
            };
            palette.globals[index] = global;
            palette.joints[index] = global * bone.inverse_bind_matrix();
        }
    }

    /// Allocating convenience wrapper around
    /// [`Self::compute_matrix_palette`].
    #[must_use]
    pub fn matrix_palette(&self) -> MatrixPalette {
        let mut palette = MatrixPalette::new(self.local_poses.len());
        self.compute_matrix_palette(&mut palette);
        palette
    }
}

/// Per-bone skinning matrices in bone-index order, ready for upload as
/// a shader uniform/storage array.
#[derive(Debug, Clone)]
pub struct MatrixPalette {
    /// global transform × inverse bind matrix, per bone.
    joints: Vec<Mat4>,
    /// Scratch: per-bone global transforms, kept so children can read
    /// their parent's result without recomputation.
    globals: Vec<Mat4>,
}

impl MatrixPalette {
    #[must_use]
    pub fn new(bone_count: usize) -> Self {
        Self {
            joints: vec![Mat4::IDENTITY; bone_count],
            globals: vec![Mat4::IDENTITY; bone_count],
        }
    }

    fn resize(&mut self, bone_count: usize) {
        self.joints.resize(bone_count, Mat4::IDENTITY);
        self.globals.resize(bone_count, Mat4::IDENTITY);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// The skinning matrices, one per bone.
    #[must_use]
    pub fn joint_matrices(&self) -> &[Mat4] {
        &self.joints
    }

    /// Raw bytes of the joint matrices for direct GPU buffer upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.joints)
    }
}
