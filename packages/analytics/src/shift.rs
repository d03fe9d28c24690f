//! Species centroid shift between two day-of-year windows.
//!
//! Each period groups matching observations by species, keeps groups
//! meeting the minimum count, and computes the arithmetic centroid in
//! the store. The two period results inner-join on species id, so only
//! species sufficiently observed in both periods survive; survivors are
//! ranked by great-circle distance between their centroids.

use std::collections::BTreeMap;

use moosicbox_json_utils::database::ToValue as _;
use ocean_atlas_analytics_models::{ShiftResult, SpeciesShiftParams};
use ocean_atlas_regions::haversine_km;
use switchy_database::{Database, DatabaseValue};

use crate::{AnalyticsError, doy::Period};

/// Result cap, matching the other bounded listings.
const MAX_RESULTS: usize = 100;

#[derive(Debug, Clone)]
struct PeriodCentroid {
    scientificname: String,
    count: u64,
    lat: f64,
    lon: f64,
}

/// Computes per-species centroid shifts between two periods.
///
/// Zero surviving species is an empty success, not an error.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] for a blank species name or
/// malformed period dates (rejected before any query executes), and
/// [`AnalyticsError::Database`] if either period query fails.
pub async fn species_shift(
    db: &dyn Database,
    params: &SpeciesShiftParams,
) -> Result<Vec<ShiftResult>, AnalyticsError> {
    let (name, period_a, period_b, min_count) = validate_params(params)?;

    // The periods are disjoint windows over the same table; both results
    // are needed for the inner join, but nothing orders them, so they
    // run concurrently.
    let (centroids_a, centroids_b) = futures::join!(
        period_centroids(db, name, period_a, min_count),
        period_centroids(db, name, period_b, min_count),
    );
    let centroids_a = centroids_a?;
    let centroids_b = centroids_b?;

    let mut results: Vec<ShiftResult> = centroids_a
        .into_iter()
        .filter_map(|(aphiaid, a)| {
            centroids_b.get(&aphiaid).map(|b| ShiftResult {
                aphiaid,
                scientificname: a.scientificname.clone(),
                period_a_count: a.count,
                period_b_count: b.count,
                a_lat: a.lat,
                a_lon: a.lon,
                b_lat: b.lat,
                b_lon: b.lon,
                shift_km: haversine_km(a.lat, a.lon, b.lat, b.lon),
            })
        })
        .collect();

    results.sort_by(|a, b| {
        b.shift_km
            .partial_cmp(&a.shift_km)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    results.truncate(MAX_RESULTS);

    Ok(results)
}

/// Validates shift parameters before any query executes.
fn validate_params(
    params: &SpeciesShiftParams,
) -> Result<(&str, Period, Period, i64), AnalyticsError> {
    let name = params.name.trim();
    if name.is_empty() {
        return Err(AnalyticsError::InvalidInput {
            message: "Species name is required for shift analysis".to_string(),
        });
    }

    let period_a = Period::from_dates(&params.period_a_from, &params.period_a_to)?;
    let period_b = Period::from_dates(&params.period_b_from, &params.period_b_to)?;
    let min_count = i64::from(params.min_count.unwrap_or(1).max(1));

    Ok((name, period_a, period_b, min_count))
}

async fn period_centroids(
    db: &dyn Database,
    name: &str,
    period: Period,
    min_count: i64,
) -> Result<BTreeMap<i32, PeriodCentroid>, AnalyticsError> {
    let mut params: Vec<DatabaseValue> = vec![DatabaseValue::String(format!("%{name}%"))];
    let (day_frag, day_params, next_idx) = period.predicate("o.day_of_year", 2);
    params.extend(day_params);
    params.push(DatabaseValue::Int64(min_count));

    let sql = format!(
        "SELECT o.aphiaid, sn.scientificname,
                COUNT(*) as obs_count,
                AVG(o.latitude) as centroid_lat,
                AVG(o.longitude) as centroid_lon
         FROM obis o
         JOIN scientific_names sn ON o.aphiaid = sn.aphiaid
         WHERE sn.scientificname ILIKE $1
           AND o.day_of_year IS NOT NULL
           AND {day_frag}
         GROUP BY o.aphiaid, sn.scientificname
         HAVING COUNT(*) >= ${next_idx}"
    );

    let rows = db.query_raw_params(&sql, &params).await?;

    let mut map = BTreeMap::new();
    for row in &rows {
        let aphiaid: i32 = row.to_value("aphiaid").unwrap_or(0);
        let count: i64 = row.to_value("obs_count").unwrap_or(0);
        let lat: Option<f64> = row.to_value("centroid_lat").unwrap_or(None);
        let lon: Option<f64> = row.to_value("centroid_lon").unwrap_or(None);

        // A group with no usable coordinates cannot contribute a centroid.
        let (Some(lat), Some(lon)) = (lat, lon) else {
            continue;
        };

        #[allow(clippy::cast_sign_loss)]
        map.insert(
            aphiaid,
            PeriodCentroid {
                scientificname: row.to_value("scientificname").unwrap_or_default(),
                count: count as u64,
                lat,
                lon,
            },
        );
    }

    Ok(map)
}
