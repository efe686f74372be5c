//! Bevy host for the clatter drop scene.
//!
//! This crate is **Layer 1**: it depends on Bevy and hosts the Layer 0
//! simulation (`clatter-core`, `clatter-types`) inside an app.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      clatter-bevy (L1)                       │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐   │
//! │  │ ClatterSet::  │   │ ClatterSet::  │   │ ClatterSet::  │   │
//! │  │   Control     │──▶│     Step      │──▶│     Sync      │   │
//! │  │ keys, queue   │   │ tick + audio  │   │ spawn/despawn │   │
//! │  └───────────────┘   └───────┬───────┘   │ transforms    │   │
//! │                              │           └───────▲───────┘   │
//! └──────────────────────────────┼───────────────────┼───────────┘
//!                                │ owns              │ reads proxies
//! ┌──────────────────────────────▼───────────────────┴───────────┐
//! │               clatter-core SimulationContext (L0)            │
//! │  World, ObjectPool, FeedbackHandler, ProxyScene, controls    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design
//!
//! - The simulation context is the source of truth; entities only mirror it
//! - The context is stepped from `Time::elapsed`, so its own accumulator
//!   decides how many fixed steps run per frame
//! - Only [`convert`] knows both nalgebra and Bevy types
//!
//! # Example
//!
//! ```no_run,ignore
//! use bevy::prelude::*;
//! use clatter_bevy::prelude::*;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(ClatterPlugin::new())
//!         .run();
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod components;
pub mod convert;
pub mod plugin;
pub mod resources;
pub mod scenery;
pub mod systems;

/// Common imports for clatter apps.
pub mod prelude {
    pub use crate::components::{ProxyVisual, Scenery};
    pub use crate::plugin::ClatterPlugin;
    pub use crate::resources::{
        ClatterConfig, ControlQueue, LastFrameReport, ProxyAssets, ProxyEntityMap,
        SimulationResource,
    };
    pub use crate::systems::ClatterSet;
    pub use clatter_core::{ControlAction, SimulationContext};
    pub use clatter_types::{SimulationConfig, SpawnConfig};
}
