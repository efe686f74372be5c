//! Default contact properties.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Friction and restitution applied to every contact pair.
///
/// Friction is fixed when the world is built. Restitution can be changed
/// while the simulation runs and takes effect from the next step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactMaterial {
    /// Coulomb friction coefficient.
    pub friction: f64,
    /// Coefficient of restitution in `[0, 1]`.
    pub restitution: f64,
}

impl Default for ContactMaterial {
    fn default() -> Self {
        Self {
            friction: 0.1,
            restitution: 0.7,
        }
    }
}

impl ContactMaterial {
    /// Create a material.
    #[must_use]
    pub fn new(friction: f64, restitution: f64) -> Self {
        Self {
            friction,
            restitution,
        }
    }

    /// Contacts that lose all normal velocity.
    #[must_use]
    pub fn inelastic() -> Self {
        Self {
            restitution: 0.0,
            ..Default::default()
        }
    }

    /// Set the restitution.
    #[must_use]
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Validate the material.
    pub fn validate(&self) -> crate::Result<()> {
        if !self.friction.is_finite() || self.friction < 0.0 {
            return Err(crate::SimError::invalid_config(
                "friction must be finite and non-negative",
            ));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(crate::SimError::invalid_config(
                "restitution must be in [0, 1]",
            ));
        }
        Ok(())
    }
}
