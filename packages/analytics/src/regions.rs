//! Per-region climate averages and species inventories.
//!
//! Joins the climate and occurrence tables spatially against the static
//! region catalog (rendered as a `region_boxes` CTE). The climate and
//! species facets are independent sub-queries executed concurrently;
//! when one fails the other still populates the response.

use std::collections::BTreeMap;

use moosicbox_json_utils::database::ToValue as _;
use ocean_atlas_analytics_models::{RegionAggregate, RegionSelector};
use ocean_atlas_regions::{REGIONS, find_region, region_boxes_cte};
use switchy_database::{Database, DatabaseValue};

use crate::AnalyticsError;

/// Species list bound per region; the full distinct count is still
/// reported so truncation is never silent.
pub const SPECIES_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
struct ClimateRow {
    avg_temperature: Option<f64>,
    avg_salinity: Option<f64>,
    avg_ph: Option<f64>,
}

#[derive(Debug, Clone, Default)]
struct SpeciesInventory {
    species: Vec<String>,
    total: u64,
}

/// Computes climate averages and the species inventory per region.
///
/// For [`RegionSelector::All`], returns one row per populated region in
/// catalog order; a region is populated when either facet has data for
/// it. For a single region, returns exactly one row (facets may be
/// empty).
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] for an unknown region id,
/// and [`AnalyticsError::Database`] only when both facet queries fail.
pub async fn region_aggregates(
    db: &dyn Database,
    selector: &RegionSelector,
) -> Result<Vec<RegionAggregate>, AnalyticsError> {
    let region_filter = validate_selector(selector)?;

    let (climate, species) = futures::join!(
        climate_averages(db, region_filter),
        species_inventory(db, region_filter),
    );

    // Partial results: the facets are logically independent, so one
    // failing query degrades that facet instead of failing the request.
    let (climate, species) = match (climate, species) {
        (Err(climate_err), Err(species_err)) => {
            log::error!("Both aggregation facets failed: {climate_err}; {species_err}");
            return Err(climate_err);
        }
        (Ok(climate), Err(e)) => {
            log::error!("Species inventory query failed, returning climate facet only: {e}");
            (climate, BTreeMap::new())
        }
        (Err(e), Ok(species)) => {
            log::error!("Climate averages query failed, returning species facet only: {e}");
            (BTreeMap::new(), species)
        }
        (Ok(climate), Ok(species)) => (climate, species),
    };

    let mut rows = Vec::new();
    for region in REGIONS {
        let populated = climate.contains_key(region.id) || species.contains_key(region.id);
        let selected = region_filter.is_none_or(|id| id == region.id);
        if !selected || (region_filter.is_none() && !populated) {
            continue;
        }

        let climate_row = climate.get(region.id).copied().unwrap_or_default();
        let inventory = species.get(region.id).cloned().unwrap_or_default();

        rows.push(RegionAggregate {
            region_id: region.id.to_string(),
            display_name: region.display_name.to_string(),
            avg_temperature: climate_row.avg_temperature,
            avg_salinity: climate_row.avg_salinity,
            avg_ph: climate_row.avg_ph,
            species: inventory.species,
            species_total: inventory.total,
        });
    }

    Ok(rows)
}

/// Resolves the selector to an optional region-id filter, rejecting
/// unknown ids before any query executes.
fn validate_selector(selector: &RegionSelector) -> Result<Option<&str>, AnalyticsError> {
    match selector {
        RegionSelector::All => Ok(None),
        RegionSelector::Id(id) => {
            if find_region(id).is_none() {
                return Err(AnalyticsError::InvalidInput {
                    message: format!("Unknown region id '{id}'"),
                });
            }
            Ok(Some(id.as_str()))
        }
    }
}

async fn climate_averages(
    db: &dyn Database,
    region_filter: Option<&str>,
) -> Result<BTreeMap<String, ClimateRow>, AnalyticsError> {
    let cte = region_boxes_cte();
    let (wc, params) = region_filter.map_or_else(
        || (String::new(), Vec::new()),
        |id| {
            (
                " WHERE rb.region_id = $1".to_string(),
                vec![DatabaseValue::String(id.to_string())],
            )
        },
    );

    let sql = format!(
        "WITH {cte}
         SELECT rb.region_id,
                AVG(w.temperature) as avg_temperature,
                AVG(w.salinity) as avg_salinity,
                AVG(w.ph) as avg_ph
         FROM wod w
         JOIN region_boxes rb
           ON w.latitude BETWEEN rb.min_lat AND rb.max_lat
          AND w.longitude BETWEEN rb.min_lon AND rb.max_lon
         {wc}
         GROUP BY rb.region_id"
    );

    let rows = db.query_raw_params(&sql, &params).await?;

    let mut map = BTreeMap::new();
    for row in &rows {
        let region_id: String = row.to_value("region_id").unwrap_or_default();
        map.insert(
            region_id,
            ClimateRow {
                avg_temperature: row.to_value("avg_temperature").unwrap_or(None),
                avg_salinity: row.to_value("avg_salinity").unwrap_or(None),
                avg_ph: row.to_value("avg_ph").unwrap_or(None),
            },
        );
    }

    Ok(map)
}

async fn species_inventory(
    db: &dyn Database,
    region_filter: Option<&str>,
) -> Result<BTreeMap<String, SpeciesInventory>, AnalyticsError> {
    let cte = region_boxes_cte();
    let (wc, params) = region_filter.map_or_else(
        || (String::new(), Vec::new()),
        |id| {
            (
                " WHERE rb.region_id = $1".to_string(),
                vec![DatabaseValue::String(id.to_string())],
            )
        },
    );

    let sql = format!(
        "WITH {cte}
         SELECT rb.region_id, sn.scientificname
         FROM obis o
         JOIN scientific_names sn ON o.aphiaid = sn.aphiaid
         JOIN region_boxes rb
           ON o.latitude BETWEEN rb.min_lat AND rb.max_lat
          AND o.longitude BETWEEN rb.min_lon AND rb.max_lon
         {wc}
         GROUP BY rb.region_id, sn.scientificname
         ORDER BY rb.region_id, sn.scientificname"
    );

    let rows = db.query_raw_params(&sql, &params).await?;

    let mut map: BTreeMap<String, SpeciesInventory> = BTreeMap::new();
    for row in &rows {
        let region_id: String = row.to_value("region_id").unwrap_or_default();
        let name: String = row.to_value("scientificname").unwrap_or_default();

        let inventory = map.entry(region_id).or_default();
        inventory.total += 1;
        if inventory.species.len() < SPECIES_LIMIT {
            inventory.species.push(name);
        }
    }

    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_region_rejected_before_query() {
        let selector = RegionSelector::Id("atlantis".to_string());
        assert!(matches!(
            validate_selector(&selector),
            Err(AnalyticsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn valid_selectors_resolve() {
        assert_eq!(validate_selector(&RegionSelector::All).unwrap(), None);
        let selector = RegionSelector::Id("indian-ocean".to_string());
        assert_eq!(validate_selector(&selector).unwrap(), Some("indian-ocean"));
    }

    #[test]
    fn inventory_truncates_but_counts_all() {
        let mut inventory = SpeciesInventory::default();
        for i in 0..250 {
            inventory.total += 1;
            if inventory.species.len() < SPECIES_LIMIT {
                inventory.species.push(format!("Species {i}"));
            }
        }
        assert_eq!(inventory.species.len(), SPECIES_LIMIT);
        assert_eq!(inventory.total, 250);
    }
}
