//! Keyframe tracks.
//!
//! A [`KeyframeTrack`] stores one time-ordered sequence of values
//! (translations or rotations for one bone) and maps a query time to an
//! interpolated value. Lookup is an upper-bound search: the track finds
//! the first keyframe whose timestamp is strictly greater than the
//! query time and blends from its predecessor. Before the first
//! keyframe the predecessor is the implicit identity value at time 0;
//! at or past the last keyframe the last value is held verbatim.

use crate::errors::{MarrowError, Result};
use crate::values::Interpolatable;

/// Steps of forward linear scan tried before falling back to a global
/// binary search.
const MAX_SCAN_OFFSET: usize = 3;

/// Remembers where the previous lookup landed.
///
/// Clip playback advances time monotonically, so the next query almost
/// always falls in the same keyframe interval or the one right after
/// it. The cursor caches the last upper-bound index and lets
/// [`KeyframeTrack::sample_with_cursor`] resolve those queries with a
/// short scan instead of a full binary search.
#[derive(Debug, Clone, Default)]
pub struct TrackCursor {
    next_index: usize,
}

/// A time-ordered keyframe sequence for one value type.
///
/// Timestamps and values are stored as parallel arrays. Construction
/// validates the arrays once (matching lengths, non-negative and
/// non-decreasing timestamps); the fields stay private so the sorted
/// invariant cannot be broken afterwards.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolatable> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Interpolatable> KeyframeTrack<T> {
    pub fn new(times: Vec<f32>, values: Vec<T>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(MarrowError::KeyframeCountMismatch {
                times: times.len(),
                values: values.len(),
            });
        }

        for (index, &time) in times.iter().enumerate() {
            if time < 0.0 {
                return Err(MarrowError::NegativeKeyframeTime { index, time });
            }
            if index > 0 && time < times[index - 1] {
                return Err(MarrowError::UnsortedKeyframes { index });
            }
        }

        Ok(Self { times, values })
    }

    /// A track with no keyframes. Samples to the identity value at any
    /// time.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            times: Vec::new(),
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    #[must_use]
    pub fn times(&self) -> &[f32] {
        &self.times
    }

    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Samples the track at `time` with a global binary search.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        // partition_point yields the first index whose timestamp is
        // strictly greater than `time` (upper-bound semantics: an
        // exact-match timestamp resolves to the next frame).
        let next = self.times.partition_point(|&t| t <= time);
        self.sample_at(next, time)
    }

    /// Samples the track at `time`, reusing `cursor` to skip the search
    /// when the query stays near the previous one.
    ///
    /// Observably identical to [`Self::sample`] for every input.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut TrackCursor) -> T {
        let next = self.upper_bound_near(time, cursor);
        self.sample_at(next, time)
    }

    /// Upper-bound lookup seeded by the cursor.
    ///
    /// If the cached index is still a valid lower boundary
    /// (`times[index - 1] <= time`), a few forward steps usually find
    /// the new upper bound. A loop reset or a scrub lands outside that
    /// window and falls back to the global binary search.
    fn upper_bound_near(&self, time: f32, cursor: &mut TrackCursor) -> usize {
        let len = self.times.len();
        let mut index = cursor.next_index.min(len);

        if index == 0 || self.times[index - 1] <= time {
            for _ in 0..=MAX_SCAN_OFFSET {
                if index == len || self.times[index] > time {
                    cursor.next_index = index;
                    return index;
                }
                index += 1;
            }
        }

        let index = self.times.partition_point(|&t| t <= time);
        cursor.next_index = index;
        index
    }

    /// Blends around the upper-bound index `next`.
    fn sample_at(&self, next: usize, time: f32) -> T {
        if next == self.times.len() {
            // At or past the last keyframe: hold its value. An empty
            // track has no last value and yields the identity.
            return self.values.last().copied().unwrap_or_else(T::identity);
        }

        let next_value = self.values[next];
        let (prev_value, prev_time) = if next == 0 {
            // Implicit predecessor: identity at time 0.
            (T::identity(), 0.0)
        } else {
            (self.values[next - 1], self.times[next - 1])
        };

        let delta = self.times[next] - prev_time;
        if delta <= 1e-6 {
            // Degenerate interval (first keyframe at t = 0, or
            // duplicate timestamps): no blend partner, take the frame.
            return next_value;
        }

        T::interpolate_linear(prev_value, next_value, (time - prev_time) / delta)
    }
}
