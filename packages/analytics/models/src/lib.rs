#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Input and output types for the analytics queries.
//!
//! All results are request-scoped value objects derived from the
//! read-only store; nothing here is ever persisted.

use serde::{Deserialize, Serialize};

/// Which region(s) an aggregation query targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionSelector {
    /// One row per populated region.
    All,
    /// A single region by catalog id.
    Id(String),
}

impl RegionSelector {
    /// Parses the `"all"` sentinel used by the original API, any other
    /// value being a region id.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Id(s.to_string())
        }
    }
}

/// Per-region climate averages and species inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAggregate {
    /// Catalog region id.
    pub region_id: String,
    /// Basin display name.
    pub display_name: String,
    /// Average water temperature, degrees C; `None` when unavailable.
    pub avg_temperature: Option<f64>,
    /// Average salinity; `None` when unavailable.
    pub avg_salinity: Option<f64>,
    /// Average pH; `None` when unavailable.
    pub avg_ph: Option<f64>,
    /// Distinct species observed in the region, alphabetical, bounded.
    pub species: Vec<String>,
    /// Full distinct species count ("{species.len()} of {species_total}").
    pub species_total: u64,
}

/// Parameters for the centroid-shift analysis.
///
/// Dates are `YYYY-MM-DD`; only month and day matter (they are reduced
/// to day-of-year in a fixed reference year).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesShiftParams {
    /// Scientific-name substring to match (required, non-blank).
    pub name: String,
    /// Period A start date.
    pub period_a_from: String,
    /// Period A end date.
    pub period_a_to: String,
    /// Period B start date.
    pub period_b_from: String,
    /// Period B end date.
    pub period_b_to: String,
    /// Minimum observation count required in each period.
    pub min_count: Option<u32>,
}

/// Centroid shift of one species between two periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftResult {
    /// WoRMS AphiaID.
    pub aphiaid: i32,
    /// Canonical scientific name.
    pub scientificname: String,
    /// Observation count in period A.
    pub period_a_count: u64,
    /// Observation count in period B.
    pub period_b_count: u64,
    /// Period A centroid latitude.
    pub a_lat: f64,
    /// Period A centroid longitude.
    pub a_lon: f64,
    /// Period B centroid latitude.
    pub b_lat: f64,
    /// Period B centroid longitude.
    pub b_lon: f64,
    /// Great-circle distance between the centroids, kilometers.
    pub shift_km: f64,
}

/// One month of the occurrence/temperature trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// Calendar month, 1-12.
    pub month: u32,
    /// Occurrence count for the month.
    pub occ_count: u64,
    /// Count of the previous present month in the series, if any.
    pub prev_count: Option<u64>,
    /// Percent change vs. the previous present month; `None` when that
    /// month is absent or had zero observations.
    pub pct_change: Option<f64>,
    /// Average ocean temperature for the month, degrees C; `None` when
    /// climate coverage is missing.
    pub avg_temperature: Option<f64>,
}

/// Optional filters for the multi-predicate species search.
///
/// Absent filters are omitted from the generated predicate set entirely,
/// never encoded as always-true comparisons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesSearchParams {
    /// Scientific-name substring (case-insensitive).
    pub scientific_name: Option<String>,
    /// Require the marine habitat flag.
    pub marine: Option<bool>,
    /// Require the brackish habitat flag.
    pub brackish: Option<bool>,
    /// Restrict to observations inside these catalog region ids.
    pub regions: Vec<String>,
    /// Minimum per-species sighting count (aggregate filter).
    pub sightings_min: Option<i64>,
    /// Maximum per-species sighting count (aggregate filter).
    pub sightings_max: Option<i64>,
    /// Minimum observation depth, meters.
    pub depth_min: Option<f64>,
    /// Maximum observation depth, meters.
    pub depth_max: Option<f64>,
    /// Minimum sea surface temperature, degrees C.
    pub temp_min: Option<f64>,
    /// Maximum sea surface temperature, degrees C.
    pub temp_max: Option<f64>,
}

/// One species search result row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesSearchRow {
    /// WoRMS AphiaID.
    pub aphiaid: i32,
    /// Canonical scientific name.
    pub scientificname: String,
    /// Matching sighting count.
    pub sightings: u64,
}

/// A species ranked by total observation count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesCount {
    /// Canonical scientific name.
    pub scientificname: String,
    /// Total observations.
    pub obs_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_selector_all_is_case_insensitive() {
        assert_eq!(RegionSelector::parse("all"), RegionSelector::All);
        assert_eq!(RegionSelector::parse("ALL"), RegionSelector::All);
        assert_eq!(
            RegionSelector::parse("indian-ocean"),
            RegionSelector::Id("indian-ocean".to_string())
        );
    }

    #[test]
    fn search_params_default_has_no_filters() {
        let params = SpeciesSearchParams::default();
        assert!(params.scientific_name.is_none());
        assert!(params.regions.is_empty());
        assert!(params.sightings_min.is_none());
    }
}
