//! Error Types
//!
//! All validation happens when skeletons, tracks, and clips are
//! constructed; the per-frame sampling paths are total functions over
//! valid state and never fail. Public constructors return
//! [`Result<T>`], an alias for `std::result::Result<T, MarrowError>`.

use thiserror::Error;

/// The main error type for the marrow engine.
///
/// Every variant corresponds to a construction-time validation failure;
/// each carries enough context to locate the offending input.
#[derive(Error, Debug)]
pub enum MarrowError {
    // ========================================================================
    // Skeleton Errors
    // ========================================================================
    /// A bone's parent index does not strictly precede the bone itself.
    ///
    /// The hierarchy must be topologically ordered: pose composition
    /// walks bones in ascending index order and expects every parent
    /// to be resolved already.
    #[error("Bone {bone} references parent {parent}, which does not precede it")]
    InvalidBoneParent {
        /// Index of the offending bone
        bone: usize,
        /// The parent index it declared
        parent: usize,
    },

    // ========================================================================
    // Keyframe Track Errors
    // ========================================================================
    /// A track's timestamp and value arrays have different lengths.
    #[error("Keyframe track has {times} timestamps but {values} values")]
    KeyframeCountMismatch {
        /// Number of timestamps supplied
        times: usize,
        /// Number of values supplied
        values: usize,
    },

    /// A track's timestamps decrease somewhere.
    #[error("Keyframe timestamps decrease at index {index}")]
    UnsortedKeyframes {
        /// Index of the first out-of-order timestamp
        index: usize,
    },

    /// A keyframe carries a negative timestamp.
    #[error("Keyframe {index} has negative timestamp {time}")]
    NegativeKeyframeTime {
        /// Index of the offending keyframe
        index: usize,
        /// The negative timestamp
        time: f32,
    },

    // ========================================================================
    // Animation Clip Errors
    // ========================================================================
    /// The clip's channel list does not match the skeleton bone count.
    #[error("Clip supplies {channels} bone channels for a skeleton with {bones} bones")]
    ChannelCountMismatch {
        /// Number of channels supplied
        channels: usize,
        /// Number of bones in the skeleton
        bones: usize,
    },

    /// The clip duration is zero, negative, or non-finite.
    #[error("Clip duration must be positive and finite, got {0}")]
    InvalidDuration(f32),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MarrowError>;
