//! Frame-production sessions.
//!
//! A session drives one playback run: it freezes the keyframe tables,
//! serializes one frame per `advance` call and ticks the scene afterwards.
//! Whatever way the session ends, the scene is restored to its start state,
//! so an aborted render never leaks half-played geometry.

use crate::frame::Frame;
use crate::svg::Svg;
use crate::Result;

/// One playback run over a scene
#[derive(Debug)]
pub struct RenderSession<'a> {
    svg: &'a mut Svg,
    frame: Frame,
    last: Frame,
    finished: bool,
}

impl<'a> RenderSession<'a> {
    /// Start a session covering every keyframed frame of the scene
    pub fn new(svg: &'a mut Svg) -> Self {
        let last = svg.frame_count();
        Self::with_end(svg, last)
    }

    /// Start a session ending at an explicit frame
    pub fn with_end(svg: &'a mut Svg, last: impl Into<Frame>) -> Self {
        svg.init_animation();
        Self {
            svg,
            frame: Frame::zero(),
            last: last.into(),
            finished: false,
        }
    }

    /// Serialize the next frame and advance the scene behind it.
    ///
    /// Returns `None` once the session is exhausted. All per-kind updates of
    /// a tick settle before the next serialization, so a frame can never mix
    /// updated and stale kinds. A returned error aborts the run; the reset
    /// still happens when the session is dropped.
    pub fn advance(&mut self) -> Result<Option<(u32, String)>> {
        if self.finished {
            return Ok(None);
        }
        if self.frame > self.last {
            self.finish();
            return Ok(None);
        }

        let markup = self.svg.render()?;
        let index = self.frame.index();
        self.svg.tick()?;
        self.frame = self.frame.next();
        Ok(Some((index, markup)))
    }

    /// Abort the run and restore the scene immediately
    pub fn abort(&mut self) {
        self.finish();
    }

    /// Index of the next frame to serialize
    #[inline]
    pub fn current_frame(&self) -> Frame {
        self.frame
    }

    fn finish(&mut self) {
        if !self.finished {
            self.svg.reset();
            self.finished = true;
        }
    }
}

impl Drop for RenderSession<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationKind;
    use crate::geometry::Point;
    use crate::shapes::Polygon;

    fn scene() -> Svg {
        let mut svg = Svg::new(100.0, 100.0);
        let mut square = crate::shapes::Shape::from(Polygon::square(Point::new(0.0, 0.0), 50.0));
        square
            .add_keyframe(10u32, AnimationKind::Translation, Point::new(100.0, 0.0))
            .unwrap();
        svg.append(square);
        svg
    }

    #[test]
    fn test_session_yields_every_frame_once() {
        let mut svg = scene();
        let mut session = RenderSession::new(&mut svg);
        let mut frames = Vec::new();
        while let Some((index, markup)) = session.advance().unwrap() {
            assert!(markup.contains("<polygon"));
            frames.push(index);
        }
        assert_eq!(frames, (0..=10).collect::<Vec<u32>>());
        assert!(session.advance().unwrap().is_none());
    }

    #[test]
    fn test_drop_resets_scene() {
        let mut svg = scene();
        let before = svg.clone();
        {
            let mut session = RenderSession::new(&mut svg);
            session.advance().unwrap();
            session.advance().unwrap();
            // session dropped mid-run
        }
        assert_eq!(svg, before);
    }

    #[test]
    fn test_abort_resets_scene() {
        let mut svg = scene();
        let before = svg.clone();
        let mut session = RenderSession::new(&mut svg);
        session.advance().unwrap();
        session.abort();
        assert!(session.advance().unwrap().is_none());
        drop(session);
        assert_eq!(svg, before);
    }
}
