use bevy::math::DVec3;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::config::GlobeConfig;
use crate::core::{GeoError, point_to_geo, ray_sphere_hit};
use crate::globe::{
    ClickGesture, GlobeSpin, LocationPicked, SelectedLocation, SelectionSource,
};
use crate::ui::MainCamera;
use crate::weather::ForecastData;

pub fn init_selected_location(config: Res<GlobeConfig>, mut selection: ResMut<SelectedLocation>) {
    *selection = SelectedLocation {
        geo: config.default_location,
        source: SelectionSource::Default,
    };
}

pub fn handle_spin_keys(keys: Res<ButtonInput<KeyCode>>, mut spin: ResMut<GlobeSpin>) {
    if keys.just_pressed(KeyCode::Space) {
        spin.toggle_auto_rotate();
        info!(
            "Auto-rotate {}",
            if spin.auto_rotate { "on" } else { "off" }
        );
    }
}

/// Left button: horizontal drag spins the globe, a short click picks a location.
#[allow(clippy::too_many_arguments)]
pub fn handle_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    window: Single<&Window, With<PrimaryWindow>>,
    camera: Single<(&Camera, &GlobalTransform), With<MainCamera>>,
    time: Res<Time>,
    config: Res<GlobeConfig>,
    mut spin: ResMut<GlobeSpin>,
    mut gesture: ResMut<ClickGesture>,
    mut last_cursor: Local<Option<Vec2>>,
    mut picked: MessageWriter<LocationPicked>,
) {
    let cursor = window.cursor_position();
    let now = time.elapsed();

    if mouse.just_pressed(MouseButton::Left)
        && let Some(pos) = cursor
    {
        gesture.press(pos, now);
        spin.begin_drag();
    }

    if spin.dragging
        && let (Some(pos), Some(prev)) = (cursor, *last_cursor)
    {
        spin.drag(pos.x - prev.x, config.drag_sensitivity);
    }

    if mouse.just_released(MouseButton::Left) {
        spin.end_drag();
        let click = match cursor {
            Some(pos) => gesture
                .release(
                    pos,
                    now,
                    config.click_max_duration(),
                    config.click_max_distance_px,
                )
                .then_some(pos),
            None => {
                gesture.cancel();
                None
            }
        };

        if let Some(pos) = click {
            let (camera, camera_transform) = *camera;
            match camera.viewport_to_world(camera_transform, pos) {
                Ok(ray) => match pick_location(
                    ray.origin.as_dvec3(),
                    Vec3::from(ray.direction).as_dvec3(),
                    config.globe_radius as f64,
                    spin.angle as f64,
                ) {
                    Some(Ok(pick)) => {
                        picked.write(pick);
                    }
                    Some(Err(err)) => warn!("Ignoring click: {err}"),
                    None => debug!("Click missed the globe"),
                },
                Err(err) => warn!("Cannot cast click ray: {err:?}"),
            }
        }
    }

    *last_cursor = cursor;
}

/// Intersect a world-space ray with the globe (centred at the origin) and map
/// the hit back to the globe's unrotated frame. `None` when the ray misses.
pub fn pick_location(
    origin: DVec3,
    direction: DVec3,
    radius: f64,
    spin_angle: f64,
) -> Option<Result<LocationPicked, GeoError>> {
    let hit = ray_sphere_hit(origin, direction, DVec3::ZERO, radius)?;
    Some(point_to_geo(hit, spin_angle).map(|geo| LocationPicked { geo, point: hit }))
}

pub fn apply_auto_rotate(time: Res<Time>, config: Res<GlobeConfig>, mut spin: ResMut<GlobeSpin>) {
    spin.tick(time.delta_secs(), config.auto_rotate_speed);
}

pub fn follow_forecast_location(data: Res<ForecastData>, mut selection: ResMut<SelectedLocation>) {
    if !data.is_changed() {
        return;
    }
    let Some(forecast) = data.forecast.as_ref() else {
        return;
    };
    match forecast.geo() {
        Ok(geo) => {
            *selection = SelectedLocation {
                geo,
                source: SelectionSource::Forecast,
            };
        }
        Err(err) => warn!("Forecast location unusable: {err}"),
    }
}

pub fn apply_location_picks(
    mut picks: MessageReader<LocationPicked>,
    mut selection: ResMut<SelectedLocation>,
) {
    // Only the latest pick of the frame matters
    if let Some(pick) = picks.read().last() {
        info!("Picked {}", pick.geo);
        *selection = SelectedLocation {
            geo: pick.geo,
            source: SelectionSource::Picked,
        };
    }
}
