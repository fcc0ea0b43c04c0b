use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use std::path::PathBuf;

use bevy_panorbit_camera::{PanOrbitCamera, PanOrbitCameraPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod config;
mod core;
mod globe;
mod ui;
mod visualization;
mod weather;

use config::resolve_config;
use globe::GlobePlugin;
use ui::{MainCamera, UiPlugin};
use visualization::VisualizationPlugin;
use weather::WeatherPlugin;

const CAMERA_DISTANCE: f32 = 5.0;

// Setup camera and lights
fn setup(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        brightness: 400.0,
        ..default()
    });

    // Left mouse is reserved for spinning and picking the globe
    let pan_orbit = PanOrbitCamera {
        focus: Vec3::ZERO,
        radius: Some(CAMERA_DISTANCE),
        yaw: Some(0.0),
        pitch: Some(0.0),
        button_orbit: MouseButton::Right,
        button_pan: MouseButton::Middle,
        force_update: true,
        ..default()
    };

    commands.spawn((
        Camera3d::default(),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        pan_orbit,
        MainCamera,
        Tonemapping::TonyMcMapface,
        Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Main Camera"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 3.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Sun"),
    ));
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Weather Globe".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    // Logging is up once DefaultPlugins is added, so config warnings are visible
    let config = resolve_config(std::env::args().nth(1).map(PathBuf::from));
    info!(
        "Globe radius {}, auto-rotate {} rad/s",
        config.globe_radius, config.auto_rotate_speed
    );
    app.insert_resource(config);

    app.add_plugins(PanOrbitCameraPlugin);

    app.add_plugins(WeatherPlugin);
    app.add_plugins(GlobePlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(UiPlugin);
    app.add_systems(Startup, setup);

    app.run();
}
