#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Great-circle distance math shared by the radius query engine.
//!
//! Counties are represented by a single point (the most populous city
//! stands in for the county's location), so radius membership checks reduce
//! to point-to-point distances on a spherical Earth. The haversine formula
//! is used for its numerical stability at small central angles.

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per statute mile.
pub const KM_PER_MILE: f64 = 1.609_34;

/// Great-circle distance in statute miles between two coordinates.
///
/// Inputs are degrees: latitude in `[-90, 90]`, longitude in `[-180, 180]`.
/// Symmetric in its arguments and zero for identical coordinates.
///
/// # Example
///
/// ```
/// use covid_map_spatial::distance_miles;
///
/// let dist = distance_miles(37.7749, -122.4194, 34.0522, -118.2437);
/// assert!((dist - 347.42).abs() < 0.01); // San Francisco -> Los Angeles
/// ```
#[must_use]
pub fn distance_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c / KM_PER_MILE
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    #[test]
    fn zero_for_identical_coordinates() {
        assert!(distance_miles(40.0, -100.0, 40.0, -100.0).abs() < EPSILON);
    }

    #[test]
    fn symmetric() {
        let there = distance_miles(36.12, -86.67, 33.94, -118.40);
        let back = distance_miles(33.94, -118.40, 36.12, -86.67);
        assert!((there - back).abs() < EPSILON);
    }

    #[test]
    fn nashville_to_los_angeles() {
        // Reference value computed with the same radius and km/mile
        // constants as the implementation.
        let dist = distance_miles(36.12, -86.67, 33.94, -118.40);
        assert!((dist - 1793.557_882).abs() < 1e-3, "got {dist}");
    }

    #[test]
    fn one_degree_of_latitude() {
        let dist = distance_miles(10.0, 20.0, 11.0, 20.0);
        assert!((dist - 69.093_495).abs() < 1e-3, "got {dist}");
    }

    #[test]
    fn antimeridian_neighbors_are_close() {
        let dist = distance_miles(0.0, 179.9, 0.0, -179.9);
        assert!(dist < 20.0, "got {dist}");
    }
}
