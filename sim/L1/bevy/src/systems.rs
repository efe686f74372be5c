//! Per-frame systems: controls, stepping, and visual sync.
//!
//! ```text
//! ClatterSet::Control   keyboard -> ControlQueue -> SimulationContext::apply
//!        │
//! ClatterSet::Step      Time::elapsed -> SimulationContext::tick (physics, cues, proxy sync)
//!        │
//! ClatterSet::Sync      SceneChange -> spawn/despawn, proxy -> Transform
//! ```

use bevy::prelude::*;
use clatter_core::{NullAudio, SceneChange};
use tracing::{debug, trace};

use crate::components::ProxyVisual;
use crate::convert::{quat_from_unit_quaternion, transform_from_proxy, vec3_from_point};
use crate::resources::{
    ControlQueue, LastFrameReport, ProxyAssets, ProxyEntityMap, SimulationResource,
};

/// Ordering of the clatter systems within `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClatterSet {
    /// Input handling and queued actions.
    Control,
    /// Simulation tick.
    Step,
    /// Entity reconciliation and transform copy.
    Sync,
}

/// Translate key presses into control actions.
///
/// | Key        | Action                      |
/// |------------|-----------------------------|
/// | `S`        | spawn a sphere              |
/// | `B`        | spawn a box                 |
/// | `R`        | reset all dynamic objects   |
/// | `Up`/`Down`| nudge restitution by 0.01   |
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters
pub fn read_keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    mut sim: ResMut<SimulationResource>,
    mut queue: ResMut<ControlQueue>,
) {
    let controls = sim.context_mut().controls();

    if keys.just_pressed(KeyCode::KeyS) {
        queue.push(controls.spawn_sphere());
    }
    if keys.just_pressed(KeyCode::KeyB) {
        queue.push(controls.spawn_box());
    }
    if keys.just_pressed(KeyCode::KeyR) {
        queue.push(controls.reset());
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        queue.push(controls.nudge_restitution(1));
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        queue.push(controls.nudge_restitution(-1));
    }
}

/// Apply every queued action to the simulation, in order.
pub fn apply_control_actions(mut sim: ResMut<SimulationResource>, mut queue: ResMut<ControlQueue>) {
    for action in queue.drain() {
        debug!(?action, "applying control action");
        sim.context_mut().apply(action);
    }
}

/// Advance the simulation to the current app time.
///
/// Plays cues through the audio engine when one is installed.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters
pub fn tick_simulation(
    time: Res<Time>,
    mut sim: ResMut<SimulationResource>,
    mut last: ResMut<LastFrameReport>,
    #[cfg(feature = "audio")] audio: Option<NonSendMut<clatter_audio::AudioEngine>>,
) {
    let elapsed = time.elapsed_secs_f64();

    #[cfg(feature = "audio")]
    let report = match audio {
        Some(mut engine) => sim.context_mut().tick(elapsed, &mut *engine),
        None => sim.context_mut().tick(elapsed, &mut NullAudio),
    };
    #[cfg(not(feature = "audio"))]
    let report = sim.context_mut().tick(elapsed, &mut NullAudio);

    if report.substeps > 0 {
        trace!(
            substeps = report.substeps,
            impacts = report.impacts,
            cues = report.cues,
            "simulation tick"
        );
    }
    last.0 = report;
}

/// Spawn and despawn entities to follow proxy additions and removals.
///
/// A proxy added and removed within the same frame never gets an entity.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters
pub fn reconcile_proxies(
    mut commands: Commands,
    mut sim: ResMut<SimulationResource>,
    mut map: ResMut<ProxyEntityMap>,
    assets: Option<Res<ProxyAssets>>,
) {
    let changes = sim.context_mut().scene_mut().drain_changes();
    let scene = sim.context().scene();

    for change in changes {
        match change {
            SceneChange::Added(id) => {
                let Some(proxy) = scene.proxy(id) else {
                    continue;
                };
                let mut entity =
                    commands.spawn((ProxyVisual::new(id), transform_from_proxy(proxy)));
                if let Some(assets) = assets.as_deref() {
                    entity.insert((
                        Mesh3d(assets.mesh(proxy.shape)),
                        MeshMaterial3d(assets.material(proxy.shape)),
                    ));
                }
                map.insert(id, entity.id());
            }
            SceneChange::Removed(id) => {
                if let Some(entity) = map.remove_proxy(id) {
                    commands.entity(entity).despawn();
                }
            }
        }
    }
}

/// Copy proxy poses onto entity transforms.
#[allow(clippy::needless_pass_by_value)] // Bevy system parameters
pub fn sync_proxy_transforms(
    sim: Res<SimulationResource>,
    mut visuals: Query<(&ProxyVisual, &mut Transform)>,
) {
    let scene = sim.context().scene();
    for (visual, mut transform) in &mut visuals {
        if let Some(proxy) = scene.proxy(visual.id()) {
            transform.translation = vec3_from_point(&proxy.position);
            transform.rotation = quat_from_unit_quaternion(&proxy.orientation);
        }
    }
}
