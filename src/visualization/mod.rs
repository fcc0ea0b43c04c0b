//! Globe rendering: textured Earth, click ring, location marker.

use bevy::prelude::*;

pub mod earth;
pub mod markers;

pub use earth::Earth;

use crate::globe::GlobeSet;

pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (earth::spawn_earth, markers::setup_marker_assets),
        )
        .add_systems(
            Update,
            (
                earth::apply_globe_spin,
                earth::report_texture_load.run_if(resource_exists::<earth::EarthTexture>),
                markers::animate_click_rings,
                markers::spawn_click_rings,
                markers::sync_location_marker,
                markers::animate_location_marker,
            )
                .chain()
                .after(GlobeSet),
        );
    }
}
