//! Animation clips.
//!
//! An [`AnimationClip`] owns one skeleton reference, one
//! [`BoneChannel`] per bone, and the looping playback time. Each frame
//! the driver calls [`AnimationClip::advance`] with the elapsed time
//! and [`AnimationClip::sample`] to refresh the internally reused pose
//! buffer; [`AnimationClip::current_pose`] reads the last result
//! without touching it.

use std::sync::Arc;

use glam::{Quat, Vec3};

use crate::errors::{MarrowError, Result};
use crate::pose::{BonePose, Pose};
use crate::skeleton::Skeleton;
use crate::tracks::{KeyframeTrack, TrackCursor};

/// The pair of keyframe tracks driving one bone.
///
/// The two tracks are independent: they need not share timestamps and
/// either may be empty (that component then holds its identity value).
#[derive(Debug, Clone, Default)]
pub struct BoneChannel {
    pub translations: KeyframeTrack<Vec3>,
    pub rotations: KeyframeTrack<Quat>,
}

impl BoneChannel {
    #[must_use]
    pub fn new(translations: KeyframeTrack<Vec3>, rotations: KeyframeTrack<Quat>) -> Self {
        Self {
            translations,
            rotations,
        }
    }

    /// A channel with no keyframes at all; the bone stays in its
    /// identity local pose.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
struct ChannelCursors {
    translation: TrackCursor,
    rotation: TrackCursor,
}

/// A single looping animation driven against one skeleton.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    skeleton: Arc<Skeleton>,
    channels: Vec<BoneChannel>,
    duration: f32,
    playback_rate: f32,
    time: f32,
    pose: Pose,
    cursors: Vec<ChannelCursors>,
}

impl AnimationClip {
    /// Builds a clip.
    ///
    /// `duration` must be positive and finite; `channels` must supply
    /// exactly one entry per skeleton bone. `playback_rate` is a time
    /// multiplier: 1.0 plays in real time, 0.0 freezes the clip, and a
    /// negative rate plays in reverse (looping wraps either direction).
    pub fn new(
        skeleton: Arc<Skeleton>,
        duration: f32,
        playback_rate: f32,
        channels: Vec<BoneChannel>,
    ) -> Result<Self> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(MarrowError::InvalidDuration(duration));
        }
        if channels.len() != skeleton.bone_count() {
            return Err(MarrowError::ChannelCountMismatch {
                channels: channels.len(),
                bones: skeleton.bone_count(),
            });
        }

        let pose = Pose::new(Arc::clone(&skeleton));
        let cursors = vec![ChannelCursors::default(); channels.len()];

        log::debug!(
            "Animation clip created: {} bones, duration {duration}s, rate {playback_rate}",
            channels.len()
        );

        Ok(Self {
            skeleton,
            channels,
            duration,
            playback_rate,
            time: 0.0,
            pose,
            cursors,
        })
    }

    /// Advances playback by `delta_seconds` of driver time, scaled by
    /// the playback rate, and wraps the result into `[0, duration)`
    /// with a floored modulo so looping is exact in both directions.
    pub fn advance(&mut self, delta_seconds: f32) {
        self.time = (self.time + delta_seconds * self.playback_rate).rem_euclid(self.duration);
    }

    /// Samples every bone channel at the current time into the internal
    /// pose buffer and returns it.
    ///
    /// Bones are visited in ascending index order; each channel's
    /// translation and rotation tracks are sampled independently
    /// through their cursors. No allocation happens here.
    pub fn sample(&mut self) -> &Pose {
        for (index, channel) in self.channels.iter().enumerate() {
            let cursors = &mut self.cursors[index];
            let pose = BonePose::new(
                channel
                    .translations
                    .sample_with_cursor(self.time, &mut cursors.translation),
                channel
                    .rotations
                    .sample_with_cursor(self.time, &mut cursors.rotation),
            );
            self.pose.set_local_pose(index, pose);
        }

        &self.pose
    }

    /// The pose produced by the most recent [`Self::sample`] call
    /// (identity for every bone before the first one).
    #[must_use]
    pub fn current_pose(&self) -> &Pose {
        &self.pose
    }

    #[must_use]
    pub fn skeleton(&self) -> &Arc<Skeleton> {
        &self.skeleton
    }

    #[must_use]
    pub fn channels(&self) -> &[BoneChannel] {
        &self.channels
    }

    /// Current playback time in `[0, duration)`.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[must_use]
    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    pub fn set_playback_rate(&mut self, rate: f32) {
        self.playback_rate = rate;
    }
}
