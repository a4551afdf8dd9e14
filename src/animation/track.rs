//! Per-entity keyframe store

use crate::animation::{AnimationKind, AnimationValue, Keyframe, KeyframeTable};
use crate::frame::Frame;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static EMPTY_TABLE: KeyframeTable = KeyframeTable::empty();

/// Keyframe tables of one entity, one ordered table per animation kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationTrack {
    tables: HashMap<AnimationKind, KeyframeTable>,
    frame_count: Frame,
}

impl AnimationTrack {
    /// Create an empty track
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            frame_count: Frame::zero(),
        }
    }

    /// Insert a keyframe for a kind, keeping the total frame count current
    pub fn insert(&mut self, kind: AnimationKind, keyframe: Keyframe) {
        if keyframe.frame > self.frame_count {
            self.frame_count = keyframe.frame;
        }
        self.tables.entry(kind).or_default().insert(keyframe);
    }

    /// Record the implicit frame-0 base value for a kind
    #[inline]
    pub fn set_base(&mut self, kind: AnimationKind, value: impl Into<AnimationValue>) {
        self.tables
            .entry(kind)
            .or_default()
            .insert(Keyframe::new(Frame::zero(), value.into()));
    }

    /// Get the table of a kind; kinds never keyframed read as empty
    #[inline]
    pub fn table(&self, kind: AnimationKind) -> &KeyframeTable {
        self.tables.get(&kind).unwrap_or(&EMPTY_TABLE)
    }

    /// Get the mutable table of a kind
    #[inline]
    pub fn table_mut(&mut self, kind: AnimationKind) -> &mut KeyframeTable {
        self.tables.entry(kind).or_default()
    }

    /// Highest keyframe frame seen across all kinds
    #[inline]
    pub fn frame_count(&self) -> Frame {
        self.frame_count
    }

    /// Whether no kind carries a keyframe beyond frame 0
    pub fn is_static(&self) -> bool {
        self.frame_count.is_zero()
    }
}

impl Default for AnimationTrack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_frame_count_tracks_maximum() {
        let mut track = AnimationTrack::new();
        assert!(track.is_static());
        track.insert(
            AnimationKind::Translation,
            Keyframe::new(10u32, Point::new(1.0, 0.0)),
        );
        track.insert(AnimationKind::Opacity, Keyframe::new(30u32, 0.0));
        assert_eq!(track.frame_count(), Frame::new(30));
        assert!(!track.is_static());
    }

    #[test]
    fn test_base_is_frame_zero() {
        let mut track = AnimationTrack::new();
        track.set_base(AnimationKind::Opacity, 1.0);
        let table = track.table(AnimationKind::Opacity);
        assert_eq!(
            table.get(Frame::zero()).unwrap().value,
            AnimationValue::Scalar(1.0)
        );
        // a base alone keeps the track static
        assert!(track.is_static());
    }

    #[test]
    fn test_unkeyed_kind_reads_empty() {
        let track = AnimationTrack::new();
        assert!(track.table(AnimationKind::Rotation).is_empty());
    }
}
