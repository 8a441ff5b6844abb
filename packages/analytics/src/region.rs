//! Target lookup and radius membership resolution.

use covid_map_analytics_models::{RadiusQuery, RegionSelection};
use covid_map_geo::GeoIndex;

use crate::AnalyticsError;

/// Resolves a query to its member county set.
///
/// Only the target county must be geolocatable. The membership scan is
/// O(index size) per query; with a few thousand counties and batch-sized
/// query counts there is nothing to cache.
///
/// # Errors
///
/// Returns [`AnalyticsError::TargetNotGeolocatable`] if the target county
/// has no geocode record.
pub fn resolve_region(
    geo: &GeoIndex,
    query: &RadiusQuery,
) -> Result<RegionSelection, AnalyticsError> {
    let target = geo
        .lookup(&query.target)
        .ok_or_else(|| AnalyticsError::TargetNotGeolocatable {
            target: query.target.clone(),
        })?;

    let members = geo.find_within_radius(target, query.radius_miles);
    log::debug!(
        "{} counties within {:.2} mi of {}",
        members.len(),
        query.radius_miles,
        query.target
    );

    Ok(RegionSelection {
        target: target.clone(),
        members,
    })
}

#[cfg(test)]
mod tests {
    use covid_map_geo_models::{CityObservation, CountyKey};

    use super::*;

    fn index() -> GeoIndex {
        let mut geo = GeoIndex::new();
        geo.ingest(&CityObservation {
            state: "KS".to_string(),
            county: "Center".to_string(),
            latitude: 40.0,
            longitude: -100.0,
            population: 100,
        });
        geo.ingest(&CityObservation {
            state: "NE".to_string(),
            county: "Near".to_string(),
            latitude: 40.5,
            longitude: -100.0,
            population: 100,
        });
        geo
    }

    #[test]
    fn resolves_target_and_members() {
        let geo = index();
        let query = RadiusQuery::new(CountyKey::new("KS", "Center"), 40.0).unwrap();
        let selection = resolve_region(&geo, &query).unwrap();
        assert_eq!(selection.members.len(), 2);
        assert!((selection.target.latitude - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_target_is_fatal() {
        let geo = index();
        let query = RadiusQuery::new(CountyKey::new("ZZ", "Nowhere"), 40.0).unwrap();
        let err = resolve_region(&geo, &query).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::TargetNotGeolocatable { .. }
        ));
        assert_eq!(err.to_string(), "County nowhere, ZZ not found in location data");
    }
}
