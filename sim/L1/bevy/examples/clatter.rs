//! Interactive drop scene.
//!
//! Keys: `S` sphere, `B` box, `R` reset, `Up`/`Down` restitution.
//!
//! Run with: `cargo run -p clatter-bevy --example clatter --release`

use bevy::prelude::*;
use clatter_bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "clatter".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ClatterPlugin::new())
        .add_systems(Update, log_restitution_changes)
        .run();
}

#[allow(clippy::needless_pass_by_value)] // Bevy system parameters
fn log_restitution_changes(keys: Res<ButtonInput<KeyCode>>, sim: Res<SimulationResource>) {
    if keys.any_just_released([KeyCode::ArrowUp, KeyCode::ArrowDown]) {
        info!(
            restitution = sim.context().world().contact_material().restitution,
            "restitution"
        );
    }
}
