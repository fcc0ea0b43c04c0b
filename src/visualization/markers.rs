//! Click ring and location marker.

use bevy::prelude::*;

use crate::config::GlobeConfig;
use crate::core::geo_to_point;
use crate::globe::pulse::{click_ring_expired, click_ring_scale, location_marker_scale};
use crate::globe::{LocationPicked, SelectedLocation};
use crate::ui::MainCamera;
use crate::visualization::earth::Earth;

const CLICK_RING_INNER: f32 = 0.1;
const CLICK_RING_OUTER: f32 = 0.15;
const LOCATION_MARKER_RADIUS: f32 = 0.08;

/// Short-lived ring at the last click, in world space.
#[derive(Component, Debug, Clone, Copy)]
pub struct ClickRing {
    pub spawned_at: f32,
}

/// Pulsing dot parented to the globe.
#[derive(Component, Debug, Clone, Copy)]
pub struct LocationMarker;

#[derive(Resource)]
pub struct MarkerAssets {
    ring_mesh: Handle<Mesh>,
    ring_material: Handle<StandardMaterial>,
    marker_mesh: Handle<Mesh>,
    marker_material: Handle<StandardMaterial>,
}

pub fn setup_marker_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ring_mesh = meshes.add(Annulus::new(CLICK_RING_INNER, CLICK_RING_OUTER));
    let marker_mesh = meshes.add(Sphere::new(LOCATION_MARKER_RADIUS).mesh().uv(24, 16));

    let ring_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.0, 1.0, 0.0, 0.8),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let marker_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.0, 0.0),
        emissive: LinearRgba::new(1.5, 0.1, 0.1, 1.0),
        unlit: true,
        ..default()
    });

    commands.insert_resource(MarkerAssets {
        ring_mesh,
        ring_material,
        marker_mesh,
        marker_material,
    });
}

/// World-space placement of a click ring: lifted to `radius` along the hit
/// normal and turned towards the camera.
pub fn click_ring_transform(hit: Vec3, radius: f32, camera_position: Vec3) -> Transform {
    let normal = hit.normalize_or_zero();
    let translation = if normal == Vec3::ZERO {
        hit
    } else {
        normal * radius
    };
    Transform::from_translation(translation).looking_at(camera_position, Vec3::Y)
}

pub fn spawn_click_rings(
    mut picks: MessageReader<LocationPicked>,
    rings: Query<Entity, With<ClickRing>>,
    camera: Single<&GlobalTransform, With<MainCamera>>,
    assets: Res<MarkerAssets>,
    config: Res<GlobeConfig>,
    time: Res<Time>,
    mut commands: Commands,
) {
    let Some(pick) = picks.read().last() else {
        return;
    };

    // The ring may already be gone if it expired this frame
    for entity in rings.iter() {
        commands.entity(entity).try_despawn();
    }

    commands.spawn((
        Mesh3d(assets.ring_mesh.clone()),
        MeshMaterial3d(assets.ring_material.clone()),
        click_ring_transform(
            pick.point.as_vec3(),
            config.click_marker_radius,
            camera.translation(),
        ),
        ClickRing {
            spawned_at: time.elapsed_secs(),
        },
        Name::new("Click Ring"),
    ));
}

pub fn animate_click_rings(
    time: Res<Time>,
    config: Res<GlobeConfig>,
    mut rings: Query<(Entity, &ClickRing, &mut Transform)>,
    mut commands: Commands,
) {
    let now = time.elapsed_secs();
    for (entity, ring, mut transform) in rings.iter_mut() {
        let age = now - ring.spawned_at;
        if click_ring_expired(age, config.click_marker_lifetime_secs) {
            commands.entity(entity).despawn();
            continue;
        }
        transform.scale = Vec3::splat(click_ring_scale(age));
    }
}

/// Replace the location marker whenever the selection moves.
pub fn sync_location_marker(
    selection: Res<SelectedLocation>,
    earth: Single<Entity, With<Earth>>,
    markers: Query<Entity, With<LocationMarker>>,
    assets: Res<MarkerAssets>,
    config: Res<GlobeConfig>,
    mut commands: Commands,
) {
    if !selection.is_changed() {
        return;
    }

    let local = match geo_to_point(selection.geo, config.location_marker_radius as f64) {
        Ok(point) => point.as_vec3(),
        Err(err) => {
            warn!("Cannot place location marker at {}: {err}", selection.geo);
            return;
        }
    };

    for entity in markers.iter() {
        commands.entity(entity).despawn();
    }

    commands.entity(*earth).with_children(|parent| {
        parent.spawn((
            Mesh3d(assets.marker_mesh.clone()),
            MeshMaterial3d(assets.marker_material.clone()),
            Transform::from_translation(local),
            LocationMarker,
            Name::new("Location Marker"),
        ));
    });
}

pub fn animate_location_marker(
    time: Res<Time>,
    mut markers: Query<&mut Transform, With<LocationMarker>>,
) {
    let scale = location_marker_scale(time.elapsed_secs());
    for mut transform in markers.iter_mut() {
        transform.scale = Vec3::splat(scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_ring_lifted_to_radius() {
        let transform = click_ring_transform(Vec3::new(0.0, 0.0, 2.0), 2.05, Vec3::new(0.0, 0.0, 5.0));
        assert!((transform.translation - Vec3::new(0.0, 0.0, 2.05)).length() < 1e-6);
    }

    #[test]
    fn test_click_ring_faces_camera() {
        let hit = Vec3::new(1.2, 0.8, 1.4);
        let camera = Vec3::new(0.5, 1.0, 6.0);
        let transform = click_ring_transform(hit, 2.05, camera);
        let to_camera = (camera - transform.translation).normalize();
        assert!(transform.forward().dot(to_camera) > 0.9999);
    }
}
