//! Monthly occurrence trend joined with ocean temperature.
//!
//! Occurrence counts and climate temperatures are fetched as per-day
//! aggregates and folded into calendar months in Rust through the one
//! canonical day-of-year lookup, so month bucketing never depends on the
//! store's date representation. Percent change is computed against the
//! immediately preceding month that is *present* in the series; absent
//! months are skipped, never treated as zero.

use std::collections::BTreeMap;

use moosicbox_json_utils::database::ToValue as _;
use ocean_atlas_analytics_models::TrendPoint;
use switchy_database::{Database, DatabaseValue};

use crate::{AnalyticsError, doy::month_of_day};

/// Year of the World Ocean Database snapshot the temperature averages
/// are drawn from.
pub const CLIMATE_YEAR: i32 = 2015;

/// Computes the monthly occurrence/temperature trend for a species.
///
/// Returns one [`TrendPoint`] per month with at least one observation,
/// ordered by month. Months with occurrences but no climate coverage
/// appear with `avg_temperature: None`; a climate-facet store failure
/// likewise degrades to temperature-less points, because the facets are
/// logically independent.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] for a blank species name
/// (rejected before any query executes) and [`AnalyticsError::Database`]
/// if the occurrence query fails.
pub async fn monthly_trend(
    db: &dyn Database,
    name: &str,
) -> Result<Vec<TrendPoint>, AnalyticsError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AnalyticsError::InvalidInput {
            message: "Species name is required for trend analysis".to_string(),
        });
    }

    let (occurrences, climate) =
        futures::join!(occurrence_day_counts(db, name), climate_day_sums(db));

    let month_counts = fold_occurrences(&occurrences?);

    let monthly_temp = match climate {
        Ok(day_sums) => fold_temperatures(&day_sums),
        Err(e) => {
            log::error!("Climate query failed, returning trend without temperatures: {e}");
            BTreeMap::new()
        }
    };

    Ok(build_trend_points(&month_counts, &monthly_temp))
}

/// Folds per-day occurrence counts into per-month totals.
fn fold_occurrences(day_counts: &BTreeMap<u32, u64>) -> [u64; 12] {
    let mut months = [0u64; 12];
    for (&doy, &count) in day_counts {
        if let Some(month) = month_of_day(doy) {
            months[month as usize - 1] += count;
        }
    }
    months
}

/// Folds per-day `(sum, count)` temperature pairs into monthly weighted
/// means.
fn fold_temperatures(day_sums: &BTreeMap<u32, (f64, u64)>) -> BTreeMap<u32, f64> {
    let mut acc: BTreeMap<u32, (f64, u64)> = BTreeMap::new();
    for (&doy, &(sum, count)) in day_sums {
        if let Some(month) = month_of_day(doy) {
            let entry = acc.entry(month).or_insert((0.0, 0));
            entry.0 += sum;
            entry.1 += count;
        }
    }

    acc.into_iter()
        .filter(|&(_, (_, count))| count > 0)
        .map(|(month, (sum, count))| {
            #[allow(clippy::cast_precision_loss)]
            let mean = sum / count as f64;
            (month, mean)
        })
        .collect()
}

/// Builds the ordered series from monthly counts and temperatures.
///
/// `pct_change` is `None` exactly when there is no previous present
/// month or the previous present month had zero count.
fn build_trend_points(month_counts: &[u64; 12], monthly_temp: &BTreeMap<u32, f64>) -> Vec<TrendPoint> {
    let mut points = Vec::new();
    let mut prev: Option<u64> = None;

    for (i, &count) in month_counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let month = u32::try_from(i).unwrap_or(0) + 1;

        #[allow(clippy::cast_precision_loss)]
        let pct_change = prev
            .filter(|&p| p > 0)
            .map(|p| (count as f64 - p as f64) / p as f64 * 100.0);

        points.push(TrendPoint {
            month,
            occ_count: count,
            prev_count: prev,
            pct_change,
            avg_temperature: monthly_temp.get(&month).copied(),
        });

        prev = Some(count);
    }

    points
}

async fn occurrence_day_counts(
    db: &dyn Database,
    name: &str,
) -> Result<BTreeMap<u32, u64>, AnalyticsError> {
    let rows = db
        .query_raw_params(
            "SELECT o.day_of_year, COUNT(*) as occ_count
             FROM obis o
             JOIN scientific_names sn ON o.aphiaid = sn.aphiaid
             WHERE sn.scientificname ILIKE $1
               AND o.day_of_year IS NOT NULL
             GROUP BY o.day_of_year",
            &[DatabaseValue::String(format!("%{name}%"))],
        )
        .await?;

    let mut map = BTreeMap::new();
    for row in &rows {
        let doy: i32 = row.to_value("day_of_year").unwrap_or(0);
        let count: i64 = row.to_value("occ_count").unwrap_or(0);
        if let (Ok(doy), Ok(count)) = (u32::try_from(doy), u64::try_from(count)) {
            map.insert(doy, count);
        }
    }

    Ok(map)
}

async fn climate_day_sums(
    db: &dyn Database,
) -> Result<BTreeMap<u32, (f64, u64)>, AnalyticsError> {
    let rows = db
        .query_raw_params(
            "SELECT day_of_year,
                    SUM(temperature) as temp_sum,
                    COUNT(temperature) as temp_count
             FROM wod
             WHERE year = $1
               AND day_of_year IS NOT NULL
               AND temperature IS NOT NULL
             GROUP BY day_of_year",
            &[DatabaseValue::Int32(CLIMATE_YEAR)],
        )
        .await?;

    let mut map = BTreeMap::new();
    for row in &rows {
        let doy: i32 = row.to_value("day_of_year").unwrap_or(0);
        let sum: Option<f64> = row.to_value("temp_sum").unwrap_or(None);
        let count: i64 = row.to_value("temp_count").unwrap_or(0);
        if let (Ok(doy), Some(sum), Ok(count)) = (u32::try_from(doy), sum, u64::try_from(count)) {
            map.insert(doy, (sum, count));
        }
    }

    Ok(map)
}
