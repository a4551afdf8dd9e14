//! Per-entity interpolation runtime.
//!
//! The animator turns sparse keyframes into one increment per kind per tick.
//! Each (entity, kind) pair is a small state machine: either inside a segment
//! with a memoized per-frame step, or terminal once the table is exhausted.
//! A cached step is valid until the clock crosses the segment end; crossing
//! forces a rescan of the frozen table.

use crate::animation::{AnimationKind, AnimationTrack, AnimationValue, Keyframe};
use crate::error::MotionError;
use crate::frame::{Frame, FrameSpan};
use crate::shapes::ShapeId;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Memoized per-frame increment for one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CachedSegment {
    span: FrameSpan,
    step: AnimationValue,
}

/// Outcome of reading one kind at the current frame
#[derive(Debug, Clone, PartialEq)]
pub enum SegmentRead {
    /// The clock entered a new segment; the step must be computed and cached
    New {
        prev: Option<Keyframe>,
        next: Keyframe,
    },
    /// Still inside the cached segment; reapply the memoized step
    Same(AnimationValue),
    /// No keyframe at or beyond the current frame; the kind no longer changes
    End,
}

/// Interpolation runtime owned by one shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animator {
    owner: ShapeId,
    track: AnimationTrack,
    frozen: Option<AnimationTrack>,
    current_frame: Frame,
    cached: HashMap<AnimationKind, CachedSegment>,
}

impl Animator {
    /// Create an animator for the shape with the given id
    pub fn new(owner: ShapeId) -> Self {
        Self {
            owner,
            track: AnimationTrack::new(),
            frozen: None,
            current_frame: Frame::zero(),
            cached: HashMap::new(),
        }
    }

    /// Id of the owning shape, used in error reports
    #[inline]
    pub fn owner(&self) -> ShapeId {
        self.owner
    }

    /// The live keyframe store
    #[inline]
    pub fn track(&self) -> &AnimationTrack {
        &self.track
    }

    /// Insert a keyframe into the live store
    #[inline]
    pub fn insert(&mut self, kind: AnimationKind, keyframe: Keyframe) {
        self.track.insert(kind, keyframe);
    }

    /// Record the implicit frame-0 base for a kind
    #[inline]
    pub fn set_base(&mut self, kind: AnimationKind, value: impl Into<AnimationValue>) {
        self.track.set_base(kind, value);
    }

    /// Highest keyframe frame across all kinds
    #[inline]
    pub fn frame_count(&self) -> Frame {
        self.track.frame_count()
    }

    /// Current position of the frame clock
    #[inline]
    pub fn current_frame(&self) -> Frame {
        self.current_frame
    }

    /// Freeze a deep snapshot of the keyframe store for playback.
    ///
    /// The per-frame reader only ever sees the snapshot, so the live tables
    /// can never be observed mid-run and freezing again reproduces playback.
    pub fn init(&mut self) {
        self.frozen = Some(self.track.clone());
        self.cached.clear();
    }

    /// Zero the clock, drop the snapshot and every cached segment
    pub fn reset(&mut self) {
        self.current_frame = Frame::zero();
        self.frozen = None;
        self.cached.clear();
    }

    /// Advance the frame clock by one; the clock never moves backwards
    #[inline]
    pub fn advance_frame(&mut self) -> Frame {
        self.current_frame = self.current_frame.next();
        self.current_frame
    }

    /// Read the segment state of one kind at the current frame
    pub fn read(&self, kind: AnimationKind) -> Result<SegmentRead> {
        let frozen = self
            .frozen
            .as_ref()
            .ok_or_else(|| MotionError::NotInitialized {
                id: self.owner.to_string(),
            })?;

        if let Some(cached) = self.cached.get(&kind) {
            if self.current_frame <= cached.span.end {
                return Ok(SegmentRead::Same(cached.step.clone()));
            }
        }

        match frozen.table(kind).segment_at(self.current_frame) {
            Some((prev, next)) => Ok(SegmentRead::New {
                prev: prev.cloned(),
                next: next.clone(),
            }),
            None => Ok(SegmentRead::End),
        }
    }

    /// Memoize the step of a freshly entered segment
    pub fn cache(&mut self, kind: AnimationKind, span: FrameSpan, step: AnimationValue) {
        self.cached.insert(kind, CachedSegment { span, step });
    }

    /// Rewrite a keyframe value inside the frozen snapshot.
    ///
    /// Used by vertex reconciliation; the live store stays untouched so a
    /// later `init` reproduces the original playback.
    pub fn replace_frozen(
        &mut self,
        kind: AnimationKind,
        frame: Frame,
        value: AnimationValue,
    ) -> Result<()> {
        let owner = self.owner;
        let frozen = self
            .frozen
            .as_mut()
            .ok_or_else(|| MotionError::NotInitialized {
                id: owner.to_string(),
            })?;
        if !frozen.table_mut(kind).replace(frame, value) {
            return Err(MotionError::KeyframeMismatch {
                id: owner.to_string(),
                kind,
                frame: frame.index(),
                reason: "no keyframe on that frame to rewrite".to_string(),
            });
        }
        Ok(())
    }

    /// Advance one kind by one tick and return the increment to apply,
    /// or `None` once the kind is terminal.
    pub fn step(&mut self, kind: AnimationKind) -> Result<Option<AnimationValue>> {
        match self.read(kind)? {
            SegmentRead::New { prev, next } => {
                let (span, step) = self.compute_step(kind, prev.as_ref(), &next)?;
                self.cache(kind, span, step.clone());
                Ok(Some(step))
            }
            SegmentRead::Same(step) => Ok(Some(step)),
            SegmentRead::End => Ok(None),
        }
    }

    /// Derive the per-frame step for the segment ending at `next`
    fn compute_step(
        &self,
        kind: AnimationKind,
        prev: Option<&Keyframe>,
        next: &Keyframe,
    ) -> Result<(FrameSpan, AnimationValue)> {
        let start_frame = prev.map(|k| k.frame).unwrap_or_else(Frame::zero);
        let span = FrameSpan::new(start_frame, next.frame);
        if span.frames() == 0 {
            // cannot happen in a well-formed table, guard the division anyway
            return Err(MotionError::ZeroFrameSpan {
                id: self.owner.to_string(),
                kind,
                frame: next.frame.index(),
            });
        }

        let base = prev
            .map(|k| k.value.clone())
            .unwrap_or_else(|| next.value.zero_like());

        match (&base, &next.value) {
            (AnimationValue::Vertices(p), AnimationValue::Vertices(n)) if p.len() != n.len() => {
                Err(MotionError::VertexCountMismatch {
                    id: self.owner.to_string(),
                    kind,
                    frame: next.frame.index(),
                    expected: p.len(),
                    actual: n.len(),
                })
            }
            _ => AnimationValue::step(&base, &next.value, span.frames())
                .map(|step| (span, step))
                .ok_or_else(|| MotionError::KeyframeMismatch {
                    id: self.owner.to_string(),
                    kind,
                    frame: next.frame.index(),
                    reason: format!(
                        "cannot interpolate {} into {}",
                        base.type_name(),
                        next.value.type_name()
                    ),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn translation_animator() -> Animator {
        let mut animator = Animator::new(ShapeId::new());
        animator.insert(
            AnimationKind::Translation,
            Keyframe::new(10u32, Point::new(100.0, 0.0)),
        );
        animator
    }

    #[test]
    fn test_step_requires_init() {
        let mut animator = translation_animator();
        animator.advance_frame();
        assert!(matches!(
            animator.step(AnimationKind::Translation),
            Err(MotionError::NotInitialized { .. })
        ));
    }

    #[test]
    fn test_constant_step_inside_segment() {
        let mut animator = translation_animator();
        animator.init();
        for _ in 0..10 {
            animator.advance_frame();
            let step = animator.step(AnimationKind::Translation).unwrap().unwrap();
            assert_eq!(step, AnimationValue::Vector(Point::new(10.0, 0.0)));
        }
        // past the last keyframe the kind is terminal
        animator.advance_frame();
        assert!(animator.step(AnimationKind::Translation).unwrap().is_none());
    }

    #[test]
    fn test_segment_change_recomputes_step() {
        let mut animator = translation_animator();
        animator.insert(
            AnimationKind::Translation,
            Keyframe::new(20u32, Point::new(100.0, 50.0)),
        );
        animator.init();
        for _ in 0..10 {
            animator.advance_frame();
            animator.step(AnimationKind::Translation).unwrap();
        }
        animator.advance_frame();
        let step = animator.step(AnimationKind::Translation).unwrap().unwrap();
        assert_eq!(step, AnimationValue::Vector(Point::new(0.0, 5.0)));
    }

    #[test]
    fn test_unkeyed_kind_is_terminal() {
        let mut animator = translation_animator();
        animator.init();
        animator.advance_frame();
        assert!(animator.step(AnimationKind::Rotation).unwrap().is_none());
    }

    #[test]
    fn test_reset_zeroes_clock_and_cache() {
        let mut animator = translation_animator();
        animator.init();
        animator.advance_frame();
        animator.step(AnimationKind::Translation).unwrap();
        animator.reset();
        assert_eq!(animator.current_frame(), Frame::zero());
        // playback needs a fresh init after reset
        animator.advance_frame();
        assert!(animator.step(AnimationKind::Translation).is_err());
    }

    #[test]
    fn test_replace_frozen_only_touches_snapshot() {
        let mut animator = translation_animator();
        animator.init();
        animator
            .replace_frozen(
                AnimationKind::Translation,
                Frame::new(10),
                AnimationValue::Vector(Point::new(0.0, 7.0)),
            )
            .unwrap();
        // the live table keeps the original value
        let live = animator
            .track()
            .table(AnimationKind::Translation)
            .get(Frame::new(10))
            .unwrap()
            .value
            .clone();
        assert_eq!(live, AnimationValue::Vector(Point::new(100.0, 0.0)));
    }
}
