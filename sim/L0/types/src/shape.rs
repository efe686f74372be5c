//! Collision shape kinds for dynamic objects.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mass given to every sphere (kg).
pub const SPHERE_MASS: f64 = 1.0;

/// Mass given to every box (kg).
pub const BOX_MASS: f64 = 2.0;

/// Shape of a dynamic object.
///
/// Mass is fixed by kind rather than derived from volume: every sphere
/// weighs [`SPHERE_MASS`] and every box [`BOX_MASS`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShapeKind {
    /// Sphere centered on the body origin.
    Sphere {
        /// Radius (m).
        radius: f64,
    },
    /// Cube centered on the body origin.
    Box {
        /// Half of the edge length (m).
        half_extent: f64,
    },
}

impl ShapeKind {
    /// A sphere with the given radius.
    #[must_use]
    pub fn sphere(radius: f64) -> Self {
        Self::Sphere { radius }
    }

    /// A cube with the given full edge length.
    #[must_use]
    pub fn cube(size: f64) -> Self {
        Self::Box {
            half_extent: size * 0.5,
        }
    }

    /// Mass for this kind of object.
    #[must_use]
    pub fn mass(&self) -> f64 {
        match self {
            Self::Sphere { .. } => SPHERE_MASS,
            Self::Box { .. } => BOX_MASS,
        }
    }

    /// Whether this is a box. Boxes mirror orientation, spheres do not.
    #[must_use]
    pub fn is_box(&self) -> bool {
        matches!(self, Self::Box { .. })
    }

    /// Scale to apply to a unit visual (unit-radius sphere, unit-edge cube).
    #[must_use]
    pub fn visual_scale(&self) -> Vector3<f64> {
        match *self {
            Self::Sphere { radius } => Vector3::repeat(radius),
            Self::Box { half_extent } => Vector3::repeat(half_extent * 2.0),
        }
    }

    /// Human-readable name, used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sphere { .. } => "sphere",
            Self::Box { .. } => "box",
        }
    }

    /// Whether every dimension is strictly positive and finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let d = match *self {
            Self::Sphere { radius } => radius,
            Self::Box { half_extent } => half_extent,
        };
        d.is_finite() && d > 0.0
    }
}
