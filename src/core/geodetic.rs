//! Sphere <-> geographic coordinate mapping
//!
//! Converts between points on the globe sphere and latitude/longitude in degrees.
//! Axis convention (Bevy, +Y up):
//! - latitude 90 is +Y
//! - (0, 0) sits on +X
//! - longitude grows towards -Z (east when looking down from +Y)
//!
//! This matches an equirectangular texture mapped with `u = (lon + 180) / 360`,
//! `v = (90 - lat) / 180`.

use bevy::math::DVec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A point in the sphere's frame, in scene units.
pub type Point3 = DVec3;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoError {
    #[error("invalid input: {0}")]
    InvalidInput(InvalidInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidInput {
    #[error("direction vector has zero length")]
    ZeroVector,
    #[error("non-finite component")]
    NonFinite,
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("radius {0} must be positive")]
    RadiusNotPositive(f64),
}

impl From<InvalidInput> for GeoError {
    fn from(value: InvalidInput) -> Self {
        GeoError::InvalidInput(value)
    }
}

/// Latitude/longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        let geo = GeoCoordinate { lat, lon };
        geo.validate()?;
        Ok(geo)
    }

    /// Checks latitude in [-90, 90] and longitude in [-180, 180].
    pub fn validate(&self) -> Result<(), GeoError> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(InvalidInput::LatitudeOutOfRange(self.lat).into());
        }
        if !(-180.0..=180.0).contains(&self.lon) {
            return Err(InvalidInput::LongitudeOutOfRange(self.lon).into());
        }
        Ok(())
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat: {:.2}, Lon: {:.2}", self.lat, self.lon)
    }
}

/// Wrap any finite angle in degrees into (-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Map a point on (or near) the sphere to latitude/longitude.
///
/// `point` is relative to the sphere centre and still carries the sphere's live
/// spin about +Y; `rotation_angle_radians` is that spin and is removed from the
/// longitude. Passing an already de-rotated point with a zero angle gives the
/// same answer. Magnitude is irrelevant.
pub fn point_to_geo(point: Point3, rotation_angle_radians: f64) -> Result<GeoCoordinate, GeoError> {
    if !point.is_finite() || !rotation_angle_radians.is_finite() {
        return Err(InvalidInput::NonFinite.into());
    }
    if point == DVec3::ZERO {
        return Err(InvalidInput::ZeroVector.into());
    }

    // Angles from the raw components; normalizing would overflow or underflow
    // the squared length at extreme scales
    let lat = point.y.atan2(point.x.hypot(point.z)).to_degrees();
    let lon_raw = (-point.z).atan2(point.x).to_degrees();
    let lon = normalize_longitude(lon_raw - rotation_angle_radians.to_degrees());

    Ok(GeoCoordinate { lat, lon })
}

/// Place a geographic coordinate on a sphere of `radius`, in the sphere's
/// unrotated frame.
pub fn geo_to_point(geo: GeoCoordinate, radius: f64) -> Result<Point3, GeoError> {
    if radius.is_nan() || radius <= 0.0 {
        return Err(InvalidInput::RadiusNotPositive(radius).into());
    }
    if !radius.is_finite() {
        return Err(InvalidInput::NonFinite.into());
    }
    geo.validate()?;

    // Polar angle from +Y, azimuth offset by half a turn
    let phi = (90.0 - geo.lat).to_radians();
    let theta = (geo.lon + 180.0).to_radians();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();

    Ok(DVec3::new(
        -radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    ))
}
