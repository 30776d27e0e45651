//! Distance ranking of catalog places relative to the user's position.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Place;
use crate::EARTH_RADIUS_M;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude {0} is out of valid range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is out of valid range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("Coordinate value is not finite (NaN or Infinity)")]
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidatedCoordinate {
    lat: f64,
    lon: f64,
}

impl ValidatedCoordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }
}

/// Great-circle distance in meters.
#[must_use]
pub fn haversine_distance(p1: ValidatedCoordinate, p2: ValidatedCoordinate) -> f64 {
    const EPSILON: f64 = 1e-10;

    if (p1.lat - p2.lat).abs() < EPSILON && (p1.lon - p2.lon).abs() < EPSILON {
        return 0.0;
    }

    let lat1_rad = p1.lat.to_radians();
    let lat2_rad = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lon = (p2.lon - p1.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().asin();

    let result = EARTH_RADIUS_M * c;

    if result.is_finite() {
        result
    } else {
        f64::MAX
    }
}

/// Distance from `reference` to `place`, or `f64::MAX` when the place has unusable coordinates.
#[must_use]
pub fn distance_to_place(reference: ValidatedCoordinate, place: &Place) -> f64 {
    place
        .coordinate()
        .map_or(f64::MAX, |coord| haversine_distance(reference, coord))
}

/// Returns a copy of `places` ordered by non-decreasing distance from `reference`.
///
/// The sort is stable: places at the same distance keep their catalog order.
#[must_use]
pub fn sort_by_distance(places: &[Place], reference: ValidatedCoordinate) -> Vec<Place> {
    let mut ranked: Vec<(f64, &Place)> = places
        .iter()
        .map(|place| (distance_to_place(reference, place), place))
        .collect();

    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

    ranked.into_iter().map(|(_, place)| place.clone()).collect()
}

#[must_use]
pub fn format_distance(meters: f64) -> String {
    if !meters.is_finite() || meters < 0.0 || meters >= f64::MAX {
        return "Unknown".to_string();
    }

    if meters < 1000.0 {
        format!("{meters:.0} m")
    } else if meters < 10_000.0 {
        format!("{:.1} km", meters / 1000.0)
    } else {
        format!("{:.0} km", meters / 1000.0)
    }
}
