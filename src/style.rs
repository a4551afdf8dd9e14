//! Presentation attributes of serialized shapes

use serde::{Deserialize, Serialize};

/// Fill, stroke and opacity attributes of one shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Fill color, omitted from the markup when unset
    pub fill: Option<String>,
    /// Stroke color
    pub stroke: Option<String>,
    /// Stroke width; unset inherits the scene-level scaled width
    pub stroke_width: Option<f64>,
    /// Stroke linecap variant
    pub stroke_linecap: Option<String>,
    /// Opacity level; a shape with opacity 0 is not serialized
    pub opacity: f64,
    /// Free-form extra attribute rules appended verbatim
    pub extra_rules: Vec<String>,
    /// Whether the style was customized by the user
    pub custom: bool,
}

impl Style {
    /// Create a style with the given opacity and default attributes
    pub fn new(opacity: f64) -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: None,
            stroke_linecap: None,
            opacity,
            extra_rules: Vec::new(),
            custom: false,
        }
    }

    /// Update only the given attributes, marking the style customized
    pub fn set(
        &mut self,
        fill: Option<&str>,
        stroke: Option<&str>,
        stroke_width: Option<f64>,
        stroke_linecap: Option<&str>,
        opacity: Option<f64>,
    ) {
        if let Some(fill) = fill {
            self.fill = Some(fill.to_string());
        }
        if let Some(stroke) = stroke {
            self.stroke = Some(stroke.to_string());
        }
        if let Some(width) = stroke_width {
            self.stroke_width = Some(width);
        }
        if let Some(linecap) = stroke_linecap {
            self.stroke_linecap = Some(linecap.to_string());
        }
        if let Some(opacity) = opacity {
            self.opacity = opacity;
        }
        self.custom = true;
    }

    /// Append an extra attribute rule
    #[inline]
    pub fn add_rule(&mut self, rule: impl Into<String>) {
        self.extra_rules.push(rule.into());
    }

    /// Drop every extra rule
    #[inline]
    pub fn clear_rules(&mut self) {
        self.extra_rules.clear();
    }

    /// Attribute fragment describing this style
    pub fn to_attributes(&self) -> String {
        let mut parts = vec![format!("opacity=\"{}\"", self.opacity)];
        if let Some(fill) = &self.fill {
            parts.push(format!("fill=\"{fill}\""));
        }
        if let Some(stroke) = &self.stroke {
            parts.push(format!("stroke=\"{stroke}\""));
        }
        if let Some(width) = self.stroke_width {
            parts.push(format!("stroke-width=\"{width}\""));
        }
        if let Some(linecap) = &self.stroke_linecap {
            parts.push(format!("stroke-linecap=\"{linecap}\""));
        }
        parts.extend(self.extra_rules.iter().cloned());
        parts.join(" ")
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new(1.0)
    }
}
