//! Error types for simulation setup and queries.

use thiserror::Error;

/// Errors raised while configuring or querying the simulation.
///
/// The per-frame path never produces these: stepping, syncing and feedback
/// are infallible once a world exists.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The fixed timestep is zero, negative or not finite.
    #[error("invalid timestep: {0}")]
    InvalidTimestep(f64),

    /// No body with this id exists in the world.
    #[error("body not found: {0}")]
    BodyNotFound(String),

    /// The static floor cannot be removed or replaced.
    #[error("the floor body is permanent")]
    FloorIsPermanent,
}

impl SimError {
    /// Create an invalid config error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create a body not found error.
    pub fn body_not_found(msg: impl Into<String>) -> Self {
        Self::BodyNotFound(msg.into())
    }
}

/// Result alias used throughout the simulation crates.
pub type Result<T> = std::result::Result<T, SimError>;
