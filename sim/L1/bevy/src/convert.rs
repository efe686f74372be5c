//! Type conversions between the simulation and Bevy.
//!
//! This module is THE ONLY place that knows both nalgebra and Bevy types.
//! Both sides are Y-up, so conversions are plain narrowing casts.

#![allow(clippy::cast_possible_truncation)] // f64 -> f32 is intentional for Bevy

use bevy::math::{Quat, Vec3};
use bevy::transform::components::Transform;
use clatter_core::VisualProxy;
use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Convert a nalgebra Point3 to Bevy Vec3.
#[inline]
#[must_use]
pub fn vec3_from_point(p: &Point3<f64>) -> Vec3 {
    Vec3::new(p.x as f32, p.y as f32, p.z as f32)
}

/// Convert a nalgebra Vector3 to Bevy Vec3.
#[inline]
#[must_use]
pub fn vec3_from_vector(v: &Vector3<f64>) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Convert a nalgebra `UnitQuaternion` to Bevy `Quat`.
#[inline]
#[must_use]
pub fn quat_from_unit_quaternion(q: &UnitQuaternion<f64>) -> Quat {
    let q = q.quaternion();
    Quat::from_xyzw(q.i as f32, q.j as f32, q.k as f32, q.w as f32)
}

/// Full transform for a proxy, scale included.
#[must_use]
pub fn transform_from_proxy(proxy: &VisualProxy) -> Transform {
    Transform::from_translation(vec3_from_point(&proxy.position))
        .with_rotation(quat_from_unit_quaternion(&proxy.orientation))
        .with_scale(vec3_from_vector(&proxy.scale))
}
