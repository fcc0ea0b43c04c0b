//! Globe interaction: spin, click picking, and the selected location.

use bevy::prelude::*;

pub mod gesture;
pub mod pulse;
pub mod spin;
pub mod systems;

pub use gesture::ClickGesture;
pub use spin::GlobeSpin;

use crate::config::DEFAULT_LOCATION;
use crate::core::{GeoCoordinate, Point3};

/// A click that landed on the globe.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct LocationPicked {
    /// Geographic position, with the spin at click time removed
    pub geo: GeoCoordinate,
    /// World-space hit on the sphere surface
    pub point: Point3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionSource {
    Default,
    Forecast,
    Picked,
}

/// Where the location marker sits.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SelectedLocation {
    pub geo: GeoCoordinate,
    pub source: SelectionSource,
}

impl Default for SelectedLocation {
    fn default() -> Self {
        Self {
            geo: DEFAULT_LOCATION,
            source: SelectionSource::Default,
        }
    }
}

/// Input and selection updates; rendering systems run after this set.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobeSet;

pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GlobeSpin>()
            .init_resource::<ClickGesture>()
            .init_resource::<SelectedLocation>()
            .add_message::<LocationPicked>()
            .add_systems(Startup, systems::init_selected_location)
            .add_systems(
                Update,
                (
                    systems::handle_spin_keys,
                    systems::handle_pointer,
                    systems::apply_auto_rotate,
                    systems::follow_forecast_location,
                    systems::apply_location_picks,
                )
                    .chain()
                    .in_set(GlobeSet),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlobeConfig;

    #[test]
    fn test_default_selection_matches_config_default() {
        let selection = SelectedLocation::default();
        assert_eq!(selection.geo, GlobeConfig::default().default_location);
        assert_eq!(selection.source, SelectionSource::Default);
        assert!(selection.geo.validate().is_ok());
    }
}
