#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static ocean-basin catalog and point classification.
//!
//! The catalog is an immutable table of named lat/lon bounding boxes
//! approximating the major ocean divisions, built into the binary and
//! shared read-only across concurrent requests. Classification is a
//! first-match point-in-rectangle test after longitude normalization.

pub mod catalog;
pub mod distance;
pub mod sql;

use serde::{Deserialize, Serialize};

pub use catalog::REGIONS;
pub use distance::haversine_km;
pub use sql::region_boxes_cte;

/// A named rectangular ocean region.
///
/// Basins crossing the antimeridian are split into two rectangles sharing
/// a `display_name`, so `min_lon <= max_lon` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OceanRegion {
    /// Stable region identifier (e.g. "north-pacific-west").
    pub id: &'static str,
    /// Human-readable basin name, shared by split halves.
    pub display_name: &'static str,
    /// Southern bound, degrees.
    pub min_lat: f64,
    /// Northern bound, degrees.
    pub max_lat: f64,
    /// Western bound, degrees in [-180, 180].
    pub min_lon: f64,
    /// Eastern bound, degrees in [-180, 180].
    pub max_lon: f64,
}

/// One entry of the de-duplicated region listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInfo {
    /// First catalog id carrying this display name.
    pub id: String,
    /// Basin display name.
    pub display_name: String,
}

/// Normalizes a longitude into [-180, 180] by folding whole turns.
///
/// Closed-form, so any finite input returns in constant time. An input
/// on the 180 meridian (or a whole number of turns past it) stays at
/// 180 rather than folding onto -180.
#[must_use]
pub fn normalize_lon(lon: f64) -> f64 {
    if !lon.is_finite() {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon >= 180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Classifies a point into the first catalog rectangle containing it.
///
/// Longitude is normalized before testing. Returns `None` when the point
/// falls outside every cataloged region (an explicit "unclassified"
/// result, not an error) or when either coordinate is non-finite.
#[must_use]
pub fn classify(lat: f64, lon: f64) -> Option<&'static OceanRegion> {
    if !lat.is_finite() || !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return None;
    }
    let lon = normalize_lon(lon);

    REGIONS.iter().find(|region| {
        lat >= region.min_lat
            && lat <= region.max_lat
            && lon >= region.min_lon
            && lon <= region.max_lon
    })
}

/// Lists regions de-duplicated by display name.
///
/// Split-basin pairs collapse to one entry, keeping the first id
/// encountered in catalog order.
#[must_use]
pub fn list_regions() -> Vec<RegionInfo> {
    let mut seen: Vec<&str> = Vec::new();
    let mut infos = Vec::new();

    for region in REGIONS {
        if seen.contains(&region.display_name) {
            continue;
        }
        seen.push(region.display_name);
        infos.push(RegionInfo {
            id: region.id.to_string(),
            display_name: region.display_name.to_string(),
        });
    }

    infos
}

/// Looks up a catalog rectangle by its id.
#[must_use]
pub fn find_region(id: &str) -> Option<&'static OceanRegion> {
    REGIONS.iter().find(|region| region.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_north_pacific_west() {
        let region = classify(10.0, 150.0).expect("point should classify");
        assert_eq!(region.id, "north-pacific-west");
        assert_eq!(region.min_lat, 0.0);
        assert_eq!(region.max_lat, 66.5);
        assert_eq!(region.min_lon, 120.0);
        assert_eq!(region.max_lon, 180.0);
    }

    #[test]
    fn longitude_wraparound_normalizes() {
        assert_eq!(
            classify(10.0, 185.0).map(|r| r.id),
            classify(10.0, -175.0).map(|r| r.id),
        );
        // 185 E normalizes to -175, inside the eastern Pacific half.
        assert_eq!(classify(10.0, 185.0).map(|r| r.id), Some("north-pacific-east"));
    }

    #[test]
    fn poles_classify_into_polar_basins() {
        assert_eq!(classify(89.0, 13.0).map(|r| r.id), Some("arctic-ocean"));
        assert_eq!(classify(-75.0, -120.0).map(|r| r.id), Some("southern-ocean"));
    }

    #[test]
    fn unclassified_point_is_none() {
        // Mid-continent Asia: north of the Indian Ocean box, east of the
        // Atlantic box, west of the Pacific box.
        assert!(classify(45.0, 90.0).is_none());
    }

    #[test]
    fn invalid_coordinates_are_unclassified() {
        assert!(classify(f64::NAN, 0.0).is_none());
        assert!(classify(0.0, f64::INFINITY).is_none());
        assert!(classify(91.0, 0.0).is_none());
    }

    #[test]
    fn normalize_lon_shifts_whole_turns() {
        assert_eq!(normalize_lon(185.0), -175.0);
        assert_eq!(normalize_lon(-185.0), 175.0);
        assert_eq!(normalize_lon(545.0), -175.0);
        assert_eq!(normalize_lon(150.0), 150.0);
    }

    #[test]
    fn normalize_lon_keeps_antimeridian_edges() {
        assert_eq!(normalize_lon(180.0), 180.0);
        assert_eq!(normalize_lon(-180.0), -180.0);
        assert_eq!(normalize_lon(540.0), 180.0);
        assert_eq!(normalize_lon(-540.0), -180.0);
    }

    #[test]
    fn normalize_lon_bounds_huge_magnitudes() {
        // At these magnitudes a 360-degree step is below one ulp, so a
        // shift-by-turns loop would never make progress.
        for lon in [1e20, -1e20, 1e300, -1e300, f64::MAX, f64::MIN] {
            let normalized = normalize_lon(lon);
            assert!(
                (-180.0..=180.0).contains(&normalized),
                "normalize_lon({lon}) = {normalized}"
            );
        }
    }

    #[test]
    fn classify_terminates_for_huge_longitudes() {
        // Must return (classified or not), never spin.
        let _ = classify(10.0, 1e300);
        let _ = classify(10.0, -1e300);
        let _ = classify(10.0, f64::MAX);
    }

    #[test]
    fn list_regions_dedups_split_basins() {
        let infos = list_regions();

        for (i, a) in infos.iter().enumerate() {
            for b in &infos[i + 1..] {
                assert_ne!(a.display_name, b.display_name, "duplicate display name");
            }
        }

        // The first Pacific id in catalog order is kept.
        let pacific = infos
            .iter()
            .find(|r| r.display_name == "North Pacific")
            .expect("North Pacific listed");
        assert_eq!(pacific.id, "north-pacific-west");

        assert_eq!(infos.len(), 7);
    }

    #[test]
    fn catalog_rectangles_partition_first_match() {
        // Points inside exactly one rectangle classify into it.
        for region in REGIONS {
            let lat = f64::midpoint(region.min_lat, region.max_lat);
            let lon = f64::midpoint(region.min_lon, region.max_lon);
            let containing: Vec<&str> = REGIONS
                .iter()
                .filter(|r| {
                    lat >= r.min_lat && lat <= r.max_lat && lon >= r.min_lon && lon <= r.max_lon
                })
                .map(|r| r.id)
                .collect();
            if containing.len() == 1 {
                assert_eq!(classify(lat, lon).map(|r| r.id), Some(region.id));
            }
        }
    }

    #[test]
    fn find_region_by_id() {
        assert_eq!(
            find_region("indian-ocean").map(|r| r.display_name),
            Some("Indian Ocean")
        );
        assert!(find_region("atlantis").is_none());
    }
}
