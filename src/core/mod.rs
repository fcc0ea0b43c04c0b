//! Core globe math: geographic mapping and ray picking.

pub mod frame;
pub mod geodetic;

pub use frame::ray_sphere_hit;
pub use geodetic::{GeoCoordinate, GeoError, Point3, geo_to_point, point_to_geo};
