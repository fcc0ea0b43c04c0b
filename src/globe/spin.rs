//! Globe spin about +Y: auto-rotation and horizontal drag.

use bevy::prelude::*;
use std::f32::consts::TAU;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GlobeSpin {
    /// Radians, kept in [0, 2π)
    pub angle: f32,
    pub auto_rotate: bool,
    pub dragging: bool,
}

impl Default for GlobeSpin {
    fn default() -> Self {
        Self {
            angle: 0.0,
            auto_rotate: true,
            dragging: false,
        }
    }
}

impl GlobeSpin {
    /// Advance auto-rotation by `dt` seconds at `speed` rad/s. Paused while dragging.
    pub fn tick(&mut self, dt: f32, speed: f32) {
        if self.auto_rotate && !self.dragging {
            self.add(speed * dt);
        }
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    /// Horizontal cursor motion in pixels; ignored unless a drag is active.
    pub fn drag(&mut self, dx_px: f32, sensitivity: f32) {
        if self.dragging {
            self.add(dx_px * sensitivity);
        }
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    pub fn toggle_auto_rotate(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.angle)
    }

    fn add(&mut self, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.angle = (self.angle + delta).rem_euclid(TAU);
        // rem_euclid can round up to TAU for tiny negative inputs
        if self.angle >= TAU {
            self.angle = 0.0;
        }
    }
}
