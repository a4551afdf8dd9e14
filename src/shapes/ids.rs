//! Shape identifiers

use crate::error::MotionError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a shape or group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ShapeId(Uuid);

impl ShapeId {
    /// Generate a new shape ID
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a shape ID from a UUID string
    #[inline]
    pub fn from_string(id: impl AsRef<str>) -> Result<Self, MotionError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| MotionError::Serialization {
                reason: format!("invalid shape ID: {}", id.as_ref()),
            })
    }

    /// Get the underlying UUID
    #[inline]
    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for ShapeId {
    #[inline]
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_through_string() {
        let id = ShapeId::new();
        let parsed = ShapeId::from_string(id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_invalid_string_rejected() {
        assert!(ShapeId::from_string("not-a-uuid").is_err());
    }
}
