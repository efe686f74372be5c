//! Impact events produced while stepping.
//!
//! [`ImpactCollector`] is installed as the pipeline's physics hooks. On every
//! step, before the solver runs, rapier hands it each active contact manifold
//! and the collector samples how fast the two bodies are closing along the
//! contact normal. When the step is done the strongest sample per body pair
//! becomes one [`ImpactEvent`] for each body of the pair.
//!
//! Sampling every step means a hard hit inside a pair that is already
//! touching (a box landing on an edge, then slapping onto a face) is
//! reported like a fresh contact. Resting and separating contacts sample at
//! or near zero and are left to the feedback threshold.

use std::sync::{Mutex, PoisonError};

use clatter_types::BodyId;
use hashbrown::HashMap;
use rapier3d_f64::prelude::*;

/// Two bodies hit each other during a step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactEvent {
    /// The body this event is delivered to.
    pub body: BodyId,
    /// The body it hit.
    pub other: BodyId,
    /// Closing speed along the contact normal before the solver ran (m/s).
    pub strength: f64,
}

/// Per-step contact samples and the queue of finished impacts.
#[derive(Debug, Default)]
pub(crate) struct ImpactCollector {
    pending: Mutex<HashMap<(BodyId, BodyId), f64>>,
    impacts: Mutex<Vec<ImpactEvent>>,
}

impl ImpactCollector {
    pub(crate) fn drain(&self) -> Vec<ImpactEvent> {
        let mut queue = self.impacts.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *queue)
    }

    /// Keep the strongest sample seen for the pair this step.
    fn record(&self, a: BodyId, b: BodyId, strength: f64) {
        let key = if a <= b { (a, b) } else { (b, a) };
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = pending.entry(key).or_insert(strength);
        *entry = entry.max(strength);
    }

    /// Turn this step's samples into events, ordered by body id.
    pub(crate) fn finish_step(&self) {
        let mut pairs: Vec<_> = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain()
            .collect();
        if pairs.is_empty() {
            return;
        }
        pairs.sort_by_key(|&(key, _)| key);

        let mut queue = self.impacts.lock().unwrap_or_else(PoisonError::into_inner);
        for ((a, b), strength) in pairs {
            queue.push(ImpactEvent {
                body: a,
                other: b,
                strength,
            });
            queue.push(ImpactEvent {
                body: b,
                other: a,
                strength,
            });
        }
    }
}

/// Id stored in a rigid body's user data.
#[allow(clippy::cast_possible_truncation)] // ids are written from u64
pub(crate) fn body_id(body: &RigidBody) -> BodyId {
    BodyId::new(body.user_data as u64)
}

/// Speed at which two bodies approach each other along `normal` at `point`.
///
/// `normal` points from the first body toward the second. Separating
/// bodies give zero.
pub(crate) fn closing_speed(
    b1: Option<&RigidBody>,
    b2: Option<&RigidBody>,
    normal: &Vector<Real>,
    point: &Point<Real>,
) -> f64 {
    let v1 = b1.map_or_else(Vector::zeros, |b| b.velocity_at_point(point));
    let v2 = b2.map_or_else(Vector::zeros, |b| b.velocity_at_point(point));
    (v1 - v2).dot(normal).max(0.0)
}

impl PhysicsHooks for ImpactCollector {
    fn modify_solver_contacts(&self, context: &mut ContactModificationContext) {
        let bodies = context.bodies;
        let b1 = context.rigid_body1.and_then(|h| bodies.get(h));
        let b2 = context.rigid_body2.and_then(|h| bodies.get(h));
        let (Some(first), Some(second)) = (b1, b2) else {
            return;
        };

        let normal = *context.normal;
        let strength = context
            .solver_contacts
            .iter()
            .map(|contact| closing_speed(b1, b2, &normal, &contact.point))
            .fold(0.0, f64::max);

        if strength > 0.0 {
            self.record(body_id(first), body_id(second), strength);
        }
    }
}
