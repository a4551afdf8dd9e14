//! Keyframe store, interpolation engine and vertex reconciliation

pub mod engine;
pub mod keyframe;
pub mod kind;
pub mod reshape;
pub mod track;
pub mod value;

pub use engine::{Animator, SegmentRead};
pub use keyframe::{Keyframe, KeyframeTable};
pub use kind::AnimationKind;
pub use track::AnimationTrack;
pub use value::AnimationValue;
