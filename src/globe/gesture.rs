//! Click vs. drag discrimination for the left mouse button.

use bevy::prelude::*;
use std::time::Duration;

#[derive(Resource, Debug, Clone, Default)]
pub struct ClickGesture {
    press: Option<(Vec2, Duration)>,
}

impl ClickGesture {
    pub fn press(&mut self, position: Vec2, now: Duration) {
        self.press = Some((position, now));
    }

    /// Ends the gesture. A click is a release within `max_duration` that moved
    /// less than `max_distance` pixels from the press.
    pub fn release(
        &mut self,
        position: Vec2,
        now: Duration,
        max_duration: Duration,
        max_distance: f32,
    ) -> bool {
        let Some((start, pressed_at)) = self.press.take() else {
            return false;
        };
        let held = now.saturating_sub(pressed_at);
        held < max_duration && start.distance(position) < max_distance
    }

    pub fn cancel(&mut self) {
        self.press = None;
    }
}
