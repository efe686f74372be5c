//! The clatter Bevy plugin.

use bevy::prelude::*;
use clatter_core::SimulationContext;
use clatter_types::{SimulationConfig, SpawnConfig};
use tracing::{error, info};

use crate::resources::{
    ClatterConfig, ControlQueue, LastFrameReport, ProxyEntityMap, SimulationResource,
};
use crate::scenery::{setup_proxy_assets, spawn_scenery};
use crate::systems::{
    apply_control_actions, read_keyboard_controls, reconcile_proxies, sync_proxy_transforms,
    tick_simulation, ClatterSet,
};

/// Main plugin for the drop scene.
///
/// Adds the simulation context as a resource, steps it from `Time` every
/// frame, and mirrors its proxies as mesh entities.
///
/// # Example
///
/// ```ignore
/// use bevy::prelude::*;
/// use clatter_bevy::prelude::*;
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(ClatterPlugin::new())
///     .run();
/// ```
#[derive(Debug, Clone)]
pub struct ClatterPlugin {
    /// Simulation and spawn configuration.
    pub config: ClatterConfig,
    /// Spawn camera, light, and floor plane.
    pub spawn_scenery: bool,
    /// Open an output device for impact sounds.
    pub enable_audio: bool,
}

impl Default for ClatterPlugin {
    fn default() -> Self {
        Self {
            config: ClatterConfig::default(),
            spawn_scenery: true,
            enable_audio: true,
        }
    }
}

impl ClatterPlugin {
    /// Plugin with scenery and audio.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugin for tests and servers: no scenery, no audio device.
    #[must_use]
    pub fn headless() -> Self {
        Self {
            spawn_scenery: false,
            enable_audio: false,
            ..Self::default()
        }
    }

    /// Use a custom simulation configuration.
    #[must_use]
    pub fn with_simulation(mut self, config: SimulationConfig) -> Self {
        self.config.simulation = config;
        self
    }

    /// Use a custom spawn configuration.
    #[must_use]
    pub fn with_spawn(mut self, spawn: SpawnConfig) -> Self {
        self.config.spawn = spawn;
        self
    }

    /// Skip the camera, light, and floor plane.
    #[must_use]
    pub fn without_scenery(mut self) -> Self {
        self.spawn_scenery = false;
        self
    }

    /// Never open an audio device.
    #[must_use]
    pub fn without_audio(mut self) -> Self {
        self.enable_audio = false;
        self
    }
}

impl Plugin for ClatterPlugin {
    fn build(&self, app: &mut App) {
        match SimulationContext::new(self.config.simulation.clone(), self.config.spawn.clone()) {
            Ok(context) => {
                info!(
                    timestep = context.config().fixed_timestep,
                    restitution = context.config().contact.restitution,
                    "clatter simulation ready"
                );
                app.insert_resource(SimulationResource::new(context));
            }
            Err(err) => error!(%err, "invalid clatter configuration, simulation disabled"),
        }

        app.insert_resource(self.config.clone())
            .init_resource::<ControlQueue>()
            .init_resource::<ProxyEntityMap>()
            .init_resource::<LastFrameReport>();

        #[cfg(feature = "audio")]
        if self.enable_audio {
            app.insert_non_send_resource(clatter_audio::AudioEngine::new());
        }
        #[cfg(not(feature = "audio"))]
        if self.enable_audio {
            info!("built without the audio feature, impacts are silent");
        }

        app.add_systems(
            Startup,
            setup_proxy_assets
                .run_if(resource_exists::<Assets<Mesh>>)
                .run_if(resource_exists::<Assets<StandardMaterial>>),
        );

        if self.spawn_scenery {
            app.insert_resource(AmbientLight {
                color: Color::WHITE,
                brightness: 300.0,
            })
            .add_systems(Startup, spawn_scenery);
        }

        app.configure_sets(
            Update,
            (ClatterSet::Control, ClatterSet::Step, ClatterSet::Sync).chain(),
        );
        for set in [ClatterSet::Control, ClatterSet::Step, ClatterSet::Sync] {
            app.configure_sets(Update, set.run_if(resource_exists::<SimulationResource>));
        }

        app.add_systems(
            Update,
            (
                read_keyboard_controls.run_if(resource_exists::<ButtonInput<KeyCode>>),
                apply_control_actions,
            )
                .chain()
                .in_set(ClatterSet::Control),
        )
        .add_systems(Update, tick_simulation.in_set(ClatterSet::Step))
        .add_systems(
            Update,
            (reconcile_proxies, sync_proxy_transforms)
                .chain()
                .in_set(ClatterSet::Sync),
        );
    }
}
