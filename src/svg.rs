//! Scene root: view fitting and document serialization.
//!
//! The document computes the union of its members' quadrants once per frame
//! and fits it to the configured pixel size, so scenes of any extent render
//! into a consistent coordinate space.

use crate::error::MotionError;
use crate::frame::Frame;
use crate::geometry::{Point, Quadrant};
use crate::shapes::{Group, Shape};
use crate::Result;
use serde::{Deserialize, Serialize};

/// Margin added around the fitted scene so strokes are not clipped
const VIEW_MARGIN: f64 = 1.1;

/// Base stroke width before the 1/scale correction
const STROKE_BASE: f64 = 3.0;

/// Container of every element of one animated scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Svg {
    root: Group,
    width: f64,
    height: f64,
    view_box: Option<Quadrant>,
}

impl Svg {
    /// Create an empty scene rendered at the given pixel size
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            root: Group::new(),
            width,
            height,
            view_box: None,
        }
    }

    /// Append one shape to the scene
    #[inline]
    pub fn append(&mut self, shape: impl Into<Shape>) {
        self.root.append(shape);
    }

    /// Append every shape of an iterator
    #[inline]
    pub fn extend(&mut self, shapes: impl IntoIterator<Item = Shape>) {
        self.root.extend(shapes);
    }

    /// The root group holding every element
    #[inline]
    pub fn root(&self) -> &Group {
        &self.root
    }

    /// Mutable access to the root group
    #[inline]
    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Change the output pixel size
    #[inline]
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Pin the displayed region instead of fitting it per frame
    #[inline]
    pub fn set_view_box(&mut self, min: Point, max: Point) {
        self.view_box = Some(Quadrant::new(min, max));
    }

    /// Freeze every keyframe table for playback
    #[inline]
    pub fn init_animation(&mut self) {
        self.root.init_animation();
    }

    /// Advance the whole scene one frame
    #[inline]
    pub fn tick(&mut self) -> Result<()> {
        self.root.tick()
    }

    /// Restore the whole scene to its start state
    #[inline]
    pub fn reset(&mut self) {
        self.root.reset();
    }

    /// Highest keyframe frame across the scene
    #[inline]
    pub fn frame_count(&self) -> Frame {
        self.root.frame_count()
    }

    /// Union of the scene's quadrants, inflated unless a view box is pinned.
    /// A degenerate extent (collinear points or an empty scene) is a
    /// configuration error, never a NaN viewport.
    fn fitted_view(&self) -> Result<(Quadrant, f64)> {
        let view = match self.view_box {
            Some(view) => view,
            None => {
                let mut view = self.root.bounding_quadrant();
                view.inflate(VIEW_MARGIN);
                view
            }
        };

        if view.is_degenerate() {
            return Err(MotionError::DegenerateBounds {
                width: view.width(),
                height: view.height(),
            });
        }

        let scale = (self.width / view.width()).min(self.height / view.height());
        if !(scale > 0.0 && scale.is_finite()) {
            return Err(MotionError::DegenerateBounds {
                width: view.width(),
                height: view.height(),
            });
        }
        Ok((view, scale))
    }

    /// Serialize the current frame into a complete SVG document
    pub fn render(&self) -> Result<String> {
        let (view, scale) = self.fitted_view()?;
        let min = view.min();

        let mut document = format!(
            "<svg width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            self.width,
            self.height,
            min.x,
            min.y,
            view.width(),
            view.height(),
        );
        document.push_str(&format!(
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"white\"/>\n",
            min.x,
            min.y,
            view.width(),
            view.height(),
        ));
        // emitted strokes scale inversely so they stay visually constant
        document.push_str(&format!("<g stroke-width=\"{}\">\n", STROKE_BASE / scale));
        if self.root.is_visible() {
            document.push_str(&self.root.svg_content());
        }
        document.push_str("</g>\n</svg>\n");
        Ok(document)
    }

    /// Write the current frame to a file
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        std::fs::write(path, self.render()?)?;
        Ok(())
    }
}

impl Default for Svg {
    fn default() -> Self {
        Self::new(500.0, 500.0)
    }
}
