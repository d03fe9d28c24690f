//! Species catalog lookups and observation-count rankings.

use moosicbox_json_utils::database::ToValue as _;
use ocean_atlas_analytics_models::SpeciesCount;
use ocean_atlas_species_models::SpeciesCatalogEntry;
use switchy_database::{Database, DatabaseValue};

use crate::AnalyticsError;

/// Returns the most-observed species, ranked by occurrence count.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the database query fails.
pub async fn most_observed_species(
    db: &dyn Database,
    limit: u32,
) -> Result<Vec<SpeciesCount>, AnalyticsError> {
    let rows = db
        .query_raw_params(
            "SELECT sn.scientificname, COUNT(*) as obs_count
             FROM obis o
             JOIN scientific_names sn ON o.aphiaid = sn.aphiaid
             GROUP BY sn.scientificname
             ORDER BY obs_count DESC
             LIMIT $1",
            &[DatabaseValue::Int64(i64::from(limit))],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| {
            let obs_count: i64 = row.to_value("obs_count").unwrap_or(0);
            SpeciesCount {
                scientificname: row.to_value("scientificname").unwrap_or_default(),
                #[allow(clippy::cast_sign_loss)]
                obs_count: obs_count as u64,
            }
        })
        .collect())
}

/// Looks up catalog entries by exact scientific name.
///
/// # Errors
///
/// Returns [`AnalyticsError`] if the database query fails.
pub async fn species_by_name(
    db: &dyn Database,
    scientific_name: &str,
) -> Result<Vec<SpeciesCatalogEntry>, AnalyticsError> {
    let rows = db
        .query_raw_params(
            "SELECT aphiaid, scientificname
             FROM scientific_names
             WHERE scientificname = $1
             ORDER BY aphiaid",
            &[DatabaseValue::String(scientific_name.to_string())],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| SpeciesCatalogEntry {
            aphiaid: row.to_value("aphiaid").unwrap_or(0),
            scientificname: row.to_value("scientificname").unwrap_or_default(),
        })
        .collect())
}
