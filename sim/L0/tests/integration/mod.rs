//! Integration tests for the clatter simulation core.
//!
//! These tests drive a full [`SimulationContext`](clatter_core::SimulationContext)
//! through many frames and check the end-to-end behaviour:
//! - dropped objects come to rest on the floor and stay mirrored in the scene
//! - reset clears every pool, listener and body and is idempotent
//! - restitution changes only affect later contacts
//! - the frame timer and sub-step cap handle zero, negative and long frames
//! - the headless frame loop starts and stops deterministically

#![allow(clippy::unwrap_used, clippy::expect_used)] // Standard in tests

pub mod common;
pub mod drop_scene;
pub mod frame_loop;
pub mod reset;
pub mod restitution;
pub mod timestep;
