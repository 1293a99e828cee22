//! Marrow is a skeletal animation sampling engine.
//!
//! Given a static bone hierarchy ([`Skeleton`]) and per-bone keyframe
//! tracks ([`BoneChannel`]), an [`AnimationClip`] produces, for any
//! playback time, a local pose per bone and the flattened array of
//! skinning matrices ([`MatrixPalette`]) consumed by a vertex shader.
//!
//! The crate deliberately stops at the pose/palette boundary: resource
//! loading and the rendering API live with the caller.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod errors;
pub mod values;
pub mod tracks;
pub mod skeleton;
pub mod pose;
pub mod clip;

pub use errors::{MarrowError, Result};
pub use values::Interpolatable;
pub use tracks::{KeyframeTrack, TrackCursor};
pub use skeleton::{Bone, Skeleton};
pub use pose::{BonePose, MatrixPalette, Pose};
pub use clip::{AnimationClip, BoneChannel};
