//! Rigid transforms.

use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position and orientation of a body in world space (Y-up).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// World-space position of the body origin.
    pub position: Point3<f64>,
    /// World-space orientation.
    pub rotation: UnitQuaternion<f64>,
}

impl Default for Pose {
    fn default() -> Self {
        Self::identity()
    }
}

impl Pose {
    /// Pose at the origin with no rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Pose at a position with no rotation.
    #[must_use]
    pub fn from_position(position: Point3<f64>) -> Self {
        Self {
            position,
            rotation: UnitQuaternion::identity(),
        }
    }

    /// Pose from a position and rotation.
    #[must_use]
    pub fn from_position_rotation(position: Point3<f64>, rotation: UnitQuaternion<f64>) -> Self {
        Self { position, rotation }
    }

    /// Convert to an isometry.
    #[must_use]
    pub fn to_isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(Translation3::from(self.position.coords), self.rotation)
    }

    /// Build from an isometry.
    #[must_use]
    pub fn from_isometry(iso: &Isometry3<f64>) -> Self {
        Self {
            position: Point3::from(iso.translation.vector),
            rotation: iso.rotation,
        }
    }
}
