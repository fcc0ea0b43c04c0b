//! Marker animation curves.

/// Per-second growth of the click ring (0.02 per frame at 60 fps).
const CLICK_RING_GROWTH: f32 = 1.2;
const CLICK_RING_SPAN: f32 = 0.5;

/// Click ring scale after `age_secs`: grows from 1 to 1.5, then starts over.
pub fn click_ring_scale(age_secs: f32) -> f32 {
    1.0 + (CLICK_RING_GROWTH * age_secs.max(0.0)).rem_euclid(CLICK_RING_SPAN)
}

pub fn click_ring_expired(age_secs: f32, lifetime_secs: f32) -> bool {
    age_secs >= lifetime_secs
}

/// Location marker breathing: 1 ± 0.3.
pub fn location_marker_scale(elapsed_secs: f32) -> f32 {
    let elapsed_ms = elapsed_secs * 1000.0;
    1.0 + (elapsed_ms * 0.005).sin() * 0.3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_ring_grows_then_wraps() {
        assert!((click_ring_scale(0.0) - 1.0).abs() < 1e-6);
        assert!((click_ring_scale(0.25) - 1.3).abs() < 1e-5);
        // past one cycle
        assert!((click_ring_scale(0.5) - 1.1).abs() < 1e-5);
        for i in 0..200 {
            let s = click_ring_scale(i as f32 * 0.01);
            assert!((1.0..1.5).contains(&s), "scale {s} at step {i}");
        }
    }

    #[test]
    fn test_click_ring_negative_age() {
        assert_eq!(click_ring_scale(-1.0), 1.0);
    }

    #[test]
    fn test_click_ring_lifetime() {
        assert!(!click_ring_expired(1.99, 2.0));
        assert!(click_ring_expired(2.0, 2.0));
        assert!(click_ring_expired(3.5, 2.0));
    }

    #[test]
    fn test_location_marker_pulse_bounds() {
        assert!((location_marker_scale(0.0) - 1.0).abs() < 1e-6);
        // sin peaks at 0.005 * ms = π/2
        let peak = std::f32::consts::FRAC_PI_2 / 0.005 / 1000.0;
        assert!((location_marker_scale(peak) - 1.3).abs() < 1e-4);
        for i in 0..500 {
            let s = location_marker_scale(i as f32 * 0.037);
            assert!((0.7 - 1e-6..=1.3 + 1e-6).contains(&s));
        }
    }
}
