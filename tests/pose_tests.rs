//! Pose and Matrix Palette Tests
//!
//! Tests for:
//! - BonePose identity default and local matrix construction
//! - Root transform equivalence (identity in, identity out)
//! - Hierarchical composition down parent chains
//! - Inverse bind matrix application
//! - Palette buffer reuse and the GPU byte view

use std::f32::consts::FRAC_PI_2;
use std::sync::Arc;

use glam::{Mat4, Quat, Vec3, Vec4};

use marrow::pose::{BonePose, MatrixPalette, Pose};
use marrow::skeleton::{Bone, Skeleton};

const EPSILON: f32 = 1e-5;

fn approx_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

fn approx_mat4(a: Mat4, b: Mat4) -> bool {
    (0..4).all(|i| (a.col(i) - b.col(i)).abs().max_element() < EPSILON)
}

fn translation_of(m: Mat4) -> Vec3 {
    m.w_axis.truncate()
}

fn identity_skeleton(parents: &[Option<usize>]) -> Arc<Skeleton> {
    let bones = parents
        .iter()
        .map(|&parent| Bone::new(parent, Mat4::IDENTITY))
        .collect();
    Arc::new(Skeleton::new(bones).unwrap())
}

// ============================================================================
// BonePose
// ============================================================================

#[test]
fn default_bone_pose_is_identity() {
    let pose = BonePose::default();
    assert_eq!(pose.translation, Vec3::ZERO);
    assert_eq!(pose.rotation, Quat::IDENTITY);
    assert!(approx_mat4(pose.local_matrix(), Mat4::IDENTITY));
}

#[test]
fn local_matrix_is_translation_then_rotation() {
    let pose = BonePose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_z(FRAC_PI_2));

    let m = pose.local_matrix();
    // Translation lives in the last column, untouched by the rotation.
    assert!(approx_vec3(translation_of(m), Vec3::new(1.0, 2.0, 3.0)));
    // The rotation applies before the translation.
    let p = m.transform_point3(Vec3::new(1.0, 0.0, 0.0));
    assert!(approx_vec3(p, Vec3::new(1.0, 3.0, 3.0)));
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn identity_root_produces_identity_skinning_matrix() {
    let skeleton = identity_skeleton(&[None]);
    let pose = Pose::new(skeleton);

    let palette = pose.matrix_palette();
    assert_eq!(palette.len(), 1);
    assert!(approx_mat4(palette.joint_matrices()[0], Mat4::IDENTITY));
}

#[test]
fn two_bone_chain_composes_translations() {
    let skeleton = identity_skeleton(&[None, Some(0)]);
    let mut pose = Pose::new(skeleton);

    pose.set_local_pose(0, BonePose::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY));
    pose.set_local_pose(1, BonePose::new(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY));

    let palette = pose.matrix_palette();
    assert!(approx_vec3(
        translation_of(palette.joint_matrices()[1]),
        Vec3::new(1.0, 1.0, 0.0)
    ));
}

#[test]
fn parent_rotation_moves_child_origin() {
    let skeleton = identity_skeleton(&[None, Some(0)]);
    let mut pose = Pose::new(skeleton);

    // Root rotated a quarter turn about Z; child offset one unit along
    // the parent's X lands on the world Y axis.
    pose.set_local_pose(0, BonePose::new(Vec3::ZERO, Quat::from_rotation_z(FRAC_PI_2)));
    pose.set_local_pose(1, BonePose::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY));

    let palette = pose.matrix_palette();
    assert!(approx_vec3(
        translation_of(palette.joint_matrices()[1]),
        Vec3::new(0.0, 1.0, 0.0)
    ));
}

#[test]
fn deep_chain_accumulates_all_ancestors() {
    let skeleton = identity_skeleton(&[None, Some(0), Some(1), Some(2)]);
    let mut pose = Pose::new(skeleton);

    for bone in 0..4 {
        pose.set_local_pose(bone, BonePose::new(Vec3::new(0.0, 1.0, 0.0), Quat::IDENTITY));
    }

    let palette = pose.matrix_palette();
    assert!(approx_vec3(
        translation_of(palette.joint_matrices()[3]),
        Vec3::new(0.0, 4.0, 0.0)
    ));
}

#[test]
fn inverse_bind_matrix_is_applied_last() {
    // A bind pose one unit along X, animated back to the same spot:
    // the skinning matrix cancels to identity.
    let ibm = Mat4::from_translation(Vec3::new(-1.0, 0.0, 0.0));
    let skeleton = Arc::new(Skeleton::new(vec![Bone::new(None, ibm)]).unwrap());
    let mut pose = Pose::new(skeleton);

    pose.set_local_pose(0, BonePose::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY));

    let palette = pose.matrix_palette();
    assert!(approx_mat4(palette.joint_matrices()[0], Mat4::IDENTITY));
}

#[test]
fn siblings_compose_independently() {
    let skeleton = identity_skeleton(&[None, Some(0), Some(0)]);
    let mut pose = Pose::new(skeleton);

    pose.set_local_pose(0, BonePose::new(Vec3::new(0.0, 0.0, 1.0), Quat::IDENTITY));
    pose.set_local_pose(1, BonePose::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY));
    pose.set_local_pose(2, BonePose::new(Vec3::new(-1.0, 0.0, 0.0), Quat::IDENTITY));

    let palette = pose.matrix_palette();
    assert!(approx_vec3(
        translation_of(palette.joint_matrices()[1]),
        Vec3::new(1.0, 0.0, 1.0)
    ));
    assert!(approx_vec3(
        translation_of(palette.joint_matrices()[2]),
        Vec3::new(-1.0, 0.0, 1.0)
    ));
}

// ============================================================================
// Palette Buffers
// ============================================================================

#[test]
fn palette_buffer_is_reusable() {
    let skeleton = identity_skeleton(&[None, Some(0)]);
    let mut pose = Pose::new(Arc::clone(&skeleton));
    let mut palette = MatrixPalette::new(skeleton.bone_count());

    pose.set_local_pose(0, BonePose::new(Vec3::new(1.0, 0.0, 0.0), Quat::IDENTITY));
    pose.compute_matrix_palette(&mut palette);
    let first = translation_of(palette.joint_matrices()[1]);

    pose.set_local_pose(0, BonePose::new(Vec3::new(2.0, 0.0, 0.0), Quat::IDENTITY));
    pose.compute_matrix_palette(&mut palette);
    let second = translation_of(palette.joint_matrices()[1]);

    assert!(approx_vec3(first, Vec3::new(1.0, 0.0, 0.0)));
    assert!(approx_vec3(second, Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn palette_resizes_to_the_pose() {
    let skeleton = identity_skeleton(&[None, Some(0), Some(1)]);
    let pose = Pose::new(skeleton);

    let mut palette = MatrixPalette::new(0);
    pose.compute_matrix_palette(&mut palette);
    assert_eq!(palette.len(), 3);
}

#[test]
fn byte_view_matches_matrix_layout() {
    let skeleton = identity_skeleton(&[None, Some(0)]);
    let pose = Pose::new(skeleton);
    let palette = pose.matrix_palette();

    let bytes = palette.as_bytes();
    assert_eq!(bytes.len(), 2 * std::mem::size_of::<Mat4>());

    // Identity matrix: first float is 1.0.
    let first: f32 = bytemuck::cast_slice(bytes)[0];
    assert!((first - 1.0).abs() < EPSILON);
}

#[test]
fn column_vectors_are_shader_ready() {
    // Column-major layout: the translation column is the fourth Vec4.
    let skeleton = identity_skeleton(&[None]);
    let mut pose = Pose::new(skeleton);
    pose.set_local_pose(0, BonePose::new(Vec3::new(5.0, 6.0, 7.0), Quat::IDENTITY));

    let palette = pose.matrix_palette();
    let cols: &[Vec4] = bytemuck::cast_slice(palette.as_bytes());
    assert!((cols[3] - Vec4::new(5.0, 6.0, 7.0, 1.0)).abs().max_element() < EPSILON);
}
