use glam::{Quat, Vec3};

/// A value type a keyframe track can sample.
///
/// The track search in [`crate::tracks`] is written once; this trait
/// supplies the two type-specific pieces: the identity element used for
/// empty tracks and the implicit predecessor before the first keyframe,
/// and the blend operator applied between adjacent keyframes.
pub trait Interpolatable: Copy {
    /// The value an empty or not-yet-keyed track evaluates to.
    fn identity() -> Self;

    /// Blends `start` toward `end` by `t` in `[0, 1]`.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for Vec3 {
    fn identity() -> Self {
        Vec3::ZERO
    }

    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    fn identity() -> Self {
        Quat::IDENTITY
    }

    /// Shortest-path spherical interpolation.
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}
