//! Ray picking against the globe.

use bevy::math::DVec3;

use crate::core::geodetic::Point3;

/// Nearest intersection (t >= 0) of a ray with a sphere, in world space.
///
/// A ray that starts inside the sphere returns its exit point.
pub fn ray_sphere_hit(origin: DVec3, direction: DVec3, center: DVec3, radius: f64) -> Option<Point3> {
    // |O + tD - C|^2 = R^2  ->  (D.D) t^2 + 2 (OC.D) t + (OC.OC - R^2) = 0
    let oc = origin - center;
    let a = direction.length_squared();
    if a == 0.0 || !a.is_finite() {
        return None;
    }
    let b = 2.0 * oc.dot(direction);
    let c = oc.length_squared() - radius * radius;

    let discr = b * b - 4.0 * a * c;
    if discr < 0.0 {
        return None;
    }

    let sqrt_d = discr.sqrt();
    let t_near = (-b - sqrt_d) / (2.0 * a);
    let t_far = (-b + sqrt_d) / (2.0 * a);

    let t = if t_near >= 0.0 {
        t_near
    } else if t_far >= 0.0 {
        t_far
    } else {
        return None;
    };

    Some(origin + direction * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geodetic::{GeoCoordinate, geo_to_point, point_to_geo};
    use bevy::math::DQuat;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_hit_on_spun_globe_maps_back_to_same_geo() {
        let geo = GeoCoordinate::new(-33.8688, 151.2093).unwrap();
        let local = geo_to_point(geo, 2.0).unwrap();
        for angle in [0.0, 0.3, 2.9, -1.4] {
            let world = DQuat::from_rotation_y(angle) * local;
            let hit = ray_sphere_hit(world * 3.0, -world, DVec3::ZERO, 2.0).unwrap();
            let back = point_to_geo(hit, angle).unwrap();
            assert!((back.lat - geo.lat).abs() < 1e-6);
            assert!((back.lon - geo.lon).abs() < 1e-6);
        }
    }

    #[test]
    fn test_positive_spin_moves_longitude_east() {
        // Quarter turn carries lon 0 to lon 90 in world space
        let local = geo_to_point(GeoCoordinate::new(0.0, 0.0).unwrap(), 1.0).unwrap();
        let world = DQuat::from_rotation_y(std::f64::consts::FRAC_PI_2) * local;
        let seen = point_to_geo(world, 0.0).unwrap();
        assert!((seen.lon - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_hits_front_of_sphere() {
        let hit = ray_sphere_hit(
            DVec3::new(0.0, 0.0, 5.0),
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::ZERO,
            2.0,
        )
        .unwrap();
        assert!((hit - DVec3::new(0.0, 0.0, 2.0)).length() < EPSILON);
    }

    #[test]
    fn test_ray_direction_length_does_not_matter() {
        let hit = ray_sphere_hit(
            DVec3::new(0.5, 0.0, 5.0),
            DVec3::new(0.0, 0.0, -10.0),
            DVec3::ZERO,
            2.0,
        )
        .unwrap();
        assert!((hit.length() - 2.0).abs() < EPSILON);
        assert!(hit.z > 0.0);
    }

    #[test]
    fn test_ray_misses_sphere() {
        assert!(
            ray_sphere_hit(
                DVec3::new(3.0, 0.0, 5.0),
                DVec3::new(0.0, 0.0, -1.0),
                DVec3::ZERO,
                2.0
            )
            .is_none()
        );
    }

    #[test]
    fn test_sphere_behind_ray() {
        assert!(
            ray_sphere_hit(
                DVec3::new(0.0, 0.0, 5.0),
                DVec3::new(0.0, 0.0, 1.0),
                DVec3::ZERO,
                2.0
            )
            .is_none()
        );
    }

    #[test]
    fn test_ray_from_inside_returns_exit() {
        let hit = ray_sphere_hit(DVec3::ZERO, DVec3::X, DVec3::ZERO, 2.0).unwrap();
        assert!((hit - DVec3::new(2.0, 0.0, 0.0)).length() < EPSILON);
    }

    #[test]
    fn test_zero_direction() {
        assert!(ray_sphere_hit(DVec3::new(0.0, 0.0, 5.0), DVec3::ZERO, DVec3::ZERO, 2.0).is_none());
    }

    #[test]
    fn test_offset_center() {
        let center = DVec3::new(10.0, 0.0, 0.0);
        let hit = ray_sphere_hit(DVec3::new(10.0, 5.0, 0.0), DVec3::NEG_Y, center, 1.0).unwrap();
        assert!((hit - DVec3::new(10.0, 1.0, 0.0)).length() < EPSILON);
    }
}
