//! Keyframes and the per-kind ordered keyframe table

use crate::animation::AnimationValue;
use crate::frame::Frame;
use serde::{Deserialize, Serialize};

/// A (frame, value) pair recording intended state at a point in the timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Frame at which this keyframe occurs
    pub frame: Frame,
    /// Value at this keyframe
    pub value: AnimationValue,
}

impl Keyframe {
    /// Create a new keyframe
    #[inline]
    pub fn new(frame: impl Into<Frame>, value: impl Into<AnimationValue>) -> Self {
        Self {
            frame: frame.into(),
            value: value.into(),
        }
    }
}

/// Ordered frame-to-value table for one animation kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct KeyframeTable {
    keyframes: Vec<Keyframe>,
}

impl KeyframeTable {
    /// Create a new empty table
    #[inline]
    pub fn new() -> Self {
        Self {
            keyframes: Vec::new(),
        }
    }

    /// Empty table usable in constant position
    #[inline]
    pub const fn empty() -> Self {
        Self {
            keyframes: Vec::new(),
        }
    }

    /// Insert a keyframe in chronological order.
    ///
    /// A keyframe landing on an occupied frame replaces the previous value
    /// (last write wins), so equal start and end frames cannot occur in a
    /// well-formed table.
    pub fn insert(&mut self, keyframe: Keyframe) {
        match self
            .keyframes
            .binary_search_by(|k| k.frame.cmp(&keyframe.frame))
        {
            Ok(pos) => self.keyframes[pos] = keyframe,
            Err(pos) => self.keyframes.insert(pos, keyframe),
        }
    }

    /// Replace the value of an existing keyframe, keeping its frame.
    /// Returns false when no keyframe sits on that frame.
    pub fn replace(&mut self, frame: Frame, value: AnimationValue) -> bool {
        match self.keyframes.binary_search_by(|k| k.frame.cmp(&frame)) {
            Ok(pos) => {
                self.keyframes[pos].value = value;
                true
            }
            Err(_) => false,
        }
    }

    /// Find the segment active at `frame`: the first keyframe at or after it
    /// together with the prior keyframe, if any.
    ///
    /// Returns `None` past the last keyframe; with `frame >= 1` a frame-0
    /// entry can only ever be the prior keyframe, never the target.
    pub fn segment_at(&self, frame: Frame) -> Option<(Option<&Keyframe>, &Keyframe)> {
        let idx = self.keyframes.partition_point(|k| k.frame < frame);
        let next = self.keyframes.get(idx)?;
        let prev = if idx > 0 {
            Some(&self.keyframes[idx - 1])
        } else {
            None
        };
        Some((prev, next))
    }

    /// Get the keyframe sitting exactly on `frame`
    #[inline]
    pub fn get(&self, frame: Frame) -> Option<&Keyframe> {
        self.keyframes
            .binary_search_by(|k| k.frame.cmp(&frame))
            .ok()
            .map(|pos| &self.keyframes[pos])
    }

    /// Frame of the last keyframe
    #[inline]
    pub fn last_frame(&self) -> Option<Frame> {
        self.keyframes.last().map(|k| k.frame)
    }

    /// Iterate keyframes in chronological order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.iter()
    }

    /// Number of keyframes
    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    /// Whether the table has no keyframes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }
}
