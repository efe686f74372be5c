//! Shared types for the clatter drop scene.
//!
//! This crate holds the plain value types every other layer agrees on:
//! identifiers, collision shapes, poses, the contact material and the
//! typed configuration. It has no physics or rendering dependencies beyond
//! `nalgebra`.
//!
//! # Layer 0 Crate
//!
//! Like the rest of `sim/L0`, this crate has **zero Bevy dependencies** and
//! can be used from headless runners and tests.
//!
//! # Example
//!
//! ```
//! use clatter_types::{ShapeKind, SimulationConfig};
//!
//! let config = SimulationConfig::default().seed(7);
//! assert!(config.validate().is_ok());
//!
//! let sphere = ShapeKind::sphere(0.5);
//! assert_eq!(sphere.mass(), 1.0);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(
    clippy::missing_const_for_fn, // nalgebra constructors are not const
    clippy::doc_markdown,
)]

mod config;
mod error;
mod ids;
mod material;
mod pose;
mod shape;

pub use config::{BroadPhaseStrategy, SimulationConfig, SpawnConfig, EARTH_GRAVITY};
pub use error::{Result, SimError};
pub use ids::{BodyId, ProxyId};
pub use material::ContactMaterial;
pub use pose::Pose;
pub use shape::{ShapeKind, BOX_MASS, SPHERE_MASS};

// Re-export nalgebra types so downstream crates agree on versions.
pub use nalgebra::{Point3, UnitQuaternion, Vector3};
