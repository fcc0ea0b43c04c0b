//! On-screen HUD and unit switching.

use bevy::prelude::*;

pub mod hud;

use crate::globe::GlobeSet;

/// The camera used for picking and for orienting click rings.
#[derive(Component)]
pub struct MainCamera;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, hud::spawn_hud).add_systems(
            Update,
            (hud::handle_unit_keys, hud::update_hud)
                .chain()
                .after(GlobeSet),
        );
    }
}
