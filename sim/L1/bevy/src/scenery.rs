//! Startup systems: shared proxy assets and the static scene.

use bevy::prelude::*;

use crate::components::Scenery;
use crate::resources::ProxyAssets;

/// Side length of the visible floor plane.
pub const FLOOR_SIZE: f32 = 10.0;

/// Create the unit meshes and materials shared by all proxy entities.
pub fn setup_proxy_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let assets = ProxyAssets {
        sphere_mesh: meshes.add(Sphere::new(1.0).mesh().build()),
        cube_mesh: meshes.add(Cuboid::new(1.0, 1.0, 1.0).mesh().build()),
        sphere_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.85, 0.35, 0.2),
            perceptual_roughness: 0.4,
            ..default()
        }),
        box_material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.25, 0.5, 0.85),
            perceptual_roughness: 0.6,
            ..default()
        }),
    };
    commands.insert_resource(assets);
}

/// Spawn the camera, a key light, and the floor plane.
pub fn spawn_scenery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-3.0, 3.0, 3.0).looking_at(Vec3::ZERO, Vec3::Y),
        Scenery,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 2.0).looking_at(Vec3::ZERO, Vec3::Y),
        Scenery,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.3, 0.3, 0.32),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::IDENTITY,
        Scenery,
    ));
}
