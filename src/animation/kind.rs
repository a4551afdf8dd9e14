//! Enumeration of the supported animation kinds

use serde::{Deserialize, Serialize};

/// The property a keyframe table animates.
///
/// Every kind is interpolated independently; vertex modification is always
/// resolved first within a frame because morphing defines the vertex set the
/// other kinds act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationKind {
    /// Cumulative displacement of the geometry from its start position
    Translation,
    /// Cumulative growth of the shape extent, in coordinate units
    Inflation,
    /// Cumulative rotation in degrees, applied at serialization time
    Rotation,
    /// Absolute opacity level
    Opacity,
    /// Absolute vertex list of a polygon
    VertexModification,
    /// Cumulative offset of an arc's start and end angles, in degrees
    AngularTranslation,
}

impl AnimationKind {
    /// All kinds, in the order they are applied within one tick
    pub const ALL: [AnimationKind; 6] = [
        AnimationKind::VertexModification,
        AnimationKind::Translation,
        AnimationKind::Inflation,
        AnimationKind::Rotation,
        AnimationKind::Opacity,
        AnimationKind::AngularTranslation,
    ];

    /// Lowercase label used in error reports and logs
    pub fn name(&self) -> &'static str {
        match self {
            AnimationKind::Translation => "translation",
            AnimationKind::Inflation => "inflation",
            AnimationKind::Rotation => "rotation",
            AnimationKind::Opacity => "opacity",
            AnimationKind::VertexModification => "vertex modification",
            AnimationKind::AngularTranslation => "angular translation",
        }
    }
}

impl std::fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
