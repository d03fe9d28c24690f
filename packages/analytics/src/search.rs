//! Multi-predicate species search.
//!
//! Filters accumulate as `$n` fragments with bound parameters and render
//! into one statement; values are never concatenated into the SQL.
//! Evaluation is two-staged: raw-row predicates land in WHERE, the
//! per-species sighting-count bounds apply to the grouped intermediate
//! via HAVING.

use moosicbox_json_utils::database::ToValue as _;
use ocean_atlas_analytics_models::{SpeciesSearchParams, SpeciesSearchRow};
use ocean_atlas_regions::find_region;
use switchy_database::{Database, DatabaseValue};

use crate::AnalyticsError;

/// Result cap for the search listing.
const MAX_RESULTS: i64 = 100;

/// Runs the species search.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] for an unknown region id in
/// the filter set and [`AnalyticsError::Database`] if the query fails.
pub async fn search_species(
    db: &dyn Database,
    params: &SpeciesSearchParams,
) -> Result<Vec<SpeciesSearchRow>, AnalyticsError> {
    let (sql, db_params) = build_search_query(params)?;

    let rows = db.query_raw_params(&sql, &db_params).await?;

    Ok(rows
        .iter()
        .map(|row| {
            let sightings: i64 = row.to_value("sightings").unwrap_or(0);
            SpeciesSearchRow {
                aphiaid: row.to_value("aphiaid").unwrap_or(0),
                scientificname: row.to_value("scientificname").unwrap_or_default(),
                #[allow(clippy::cast_sign_loss)]
                sightings: sightings as u64,
            }
        })
        .collect())
}

/// Renders the parameterized search statement.
///
/// Absent filters contribute nothing to the predicate set; present ones
/// bind their values. Region ids resolve to their catalog rectangles and
/// join the same WHERE set as the raw-column filters (one predicate set,
/// not separate narrowing passes).
fn build_search_query(
    params: &SpeciesSearchParams,
) -> Result<(String, Vec<DatabaseValue>), AnalyticsError> {
    let mut frags: Vec<String> = Vec::new();
    let mut having: Vec<String> = Vec::new();
    let mut db_params: Vec<DatabaseValue> = Vec::new();
    let mut idx = 1u32;

    if let Some(ref name) = params.scientific_name
        && !name.trim().is_empty()
    {
        frags.push(format!("sn.scientificname ILIKE ${idx}"));
        db_params.push(DatabaseValue::String(format!("%{}%", name.trim())));
        idx += 1;
    }

    if let Some(marine) = params.marine {
        frags.push(format!("o.marine = ${idx}"));
        db_params.push(DatabaseValue::Bool(marine));
        idx += 1;
    }

    if let Some(brackish) = params.brackish {
        frags.push(format!("o.brackish = ${idx}"));
        db_params.push(DatabaseValue::Bool(brackish));
        idx += 1;
    }

    if !params.regions.is_empty() {
        let mut boxes = Vec::new();
        for id in &params.regions {
            let region = find_region(id).ok_or_else(|| AnalyticsError::InvalidInput {
                message: format!("Unknown region id '{id}'"),
            })?;
            boxes.push(format!(
                "(o.latitude BETWEEN ${} AND ${} AND o.longitude BETWEEN ${} AND ${})",
                idx,
                idx + 1,
                idx + 2,
                idx + 3,
            ));
            db_params.push(DatabaseValue::Real64(region.min_lat));
            db_params.push(DatabaseValue::Real64(region.max_lat));
            db_params.push(DatabaseValue::Real64(region.min_lon));
            db_params.push(DatabaseValue::Real64(region.max_lon));
            idx += 4;
        }
        frags.push(format!("({})", boxes.join(" OR ")));
    }

    if let Some(depth_min) = params.depth_min {
        frags.push(format!("o.depth >= ${idx}"));
        db_params.push(DatabaseValue::Real64(depth_min));
        idx += 1;
    }

    if let Some(depth_max) = params.depth_max {
        frags.push(format!("o.depth <= ${idx}"));
        db_params.push(DatabaseValue::Real64(depth_max));
        idx += 1;
    }

    if let Some(temp_min) = params.temp_min {
        frags.push(format!("o.sst >= ${idx}"));
        db_params.push(DatabaseValue::Real64(temp_min));
        idx += 1;
    }

    if let Some(temp_max) = params.temp_max {
        frags.push(format!("o.sst <= ${idx}"));
        db_params.push(DatabaseValue::Real64(temp_max));
        idx += 1;
    }

    // Stage two: aggregate bounds over the grouped per-species counts.
    if let Some(min) = params.sightings_min {
        having.push(format!("COUNT(*) >= ${idx}"));
        db_params.push(DatabaseValue::Int64(min));
        idx += 1;
    }

    if let Some(max) = params.sightings_max {
        having.push(format!("COUNT(*) <= ${idx}"));
        db_params.push(DatabaseValue::Int64(max));
        idx += 1;
    }

    let wc = if frags.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", frags.join(" AND "))
    };

    let hc = if having.is_empty() {
        String::new()
    } else {
        format!(" HAVING {}", having.join(" AND "))
    };

    let limit_idx = idx;
    db_params.push(DatabaseValue::Int64(MAX_RESULTS));

    let sql = format!(
        "SELECT o.aphiaid, sn.scientificname, COUNT(*) as sightings
         FROM obis o
         JOIN scientific_names sn ON o.aphiaid = sn.aphiaid
         {wc}
         GROUP BY o.aphiaid, sn.scientificname
         {hc}
         ORDER BY sightings DESC, sn.scientificname
         LIMIT ${limit_idx}"
    );

    Ok((sql, db_params))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_renders_only_limit() {
        let (sql, params) = build_search_query(&SpeciesSearchParams::default()).unwrap();
        assert!(!sql.contains("WHERE"));
        assert!(!sql.contains("HAVING"));
        assert!(sql.contains("LIMIT $1"));
        assert_eq!(params.len(), 1);
        assert!(matches!(params[0], DatabaseValue::Int64(MAX_RESULTS)));
    }

    #[test]
    fn sighting_bounds_land_in_having_not_where() {
        let params = SpeciesSearchParams {
            sightings_min: Some(10),
            sightings_max: Some(5000),
            ..SpeciesSearchParams::default()
        };
        let (sql, db_params) = build_search_query(&params).unwrap();

        assert!(!sql.contains("WHERE"));
        assert!(sql.contains("HAVING COUNT(*) >= $1 AND COUNT(*) <= $2"));
        assert_eq!(db_params.len(), 3); // min, max, limit
    }

    #[test]
    fn name_filter_binds_ilike_pattern() {
        let params = SpeciesSearchParams {
            scientific_name: Some("Gadus".to_string()),
            ..SpeciesSearchParams::default()
        };
        let (sql, db_params) = build_search_query(&params).unwrap();

        assert!(sql.contains("sn.scientificname ILIKE $1"));
        assert!(matches!(
            &db_params[0],
            DatabaseValue::String(s) if s == "%Gadus%"
        ));
    }

    #[test]
    fn region_filter_composes_into_where_set() {
        let params = SpeciesSearchParams {
            marine: Some(true),
            regions: vec!["north-atlantic".to_string(), "indian-ocean".to_string()],
            sightings_min: Some(2),
            ..SpeciesSearchParams::default()
        };
        let (sql, db_params) = build_search_query(&params).unwrap();

        // One WHERE, region boxes OR-joined inside it, aggregate bound in
        // HAVING after it.
        assert_eq!(sql.matches("WHERE").count(), 1);
        assert!(sql.contains("o.marine = $1"));
        assert!(sql.contains(
            "((o.latitude BETWEEN $2 AND $3 AND o.longitude BETWEEN $4 AND $5) \
             OR (o.latitude BETWEEN $6 AND $7 AND o.longitude BETWEEN $8 AND $9))"
        ));
        assert!(sql.contains("HAVING COUNT(*) >= $10"));
        // marine + 8 box bounds + min + limit
        assert_eq!(db_params.len(), 11);
    }

    #[test]
    fn unknown_region_id_rejected() {
        let params = SpeciesSearchParams {
            regions: vec!["atlantis".to_string()],
            ..SpeciesSearchParams::default()
        };
        assert!(matches!(
            build_search_query(&params),
            Err(AnalyticsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn every_placeholder_has_a_bound_parameter() {
        let params = SpeciesSearchParams {
            scientific_name: Some("Thunnus".to_string()),
            marine: Some(true),
            brackish: Some(false),
            regions: vec!["south-pacific-east".to_string()],
            sightings_min: Some(1),
            sightings_max: Some(100),
            depth_min: Some(0.0),
            depth_max: Some(200.0),
            temp_min: Some(5.0),
            temp_max: Some(30.0),
            ..SpeciesSearchParams::default()
        };
        let (sql, db_params) = build_search_query(&params).unwrap();

        let highest = (1..=db_params.len())
            .all(|n| sql.contains(&format!("${n}")));
        assert!(highest, "placeholders and parameters out of sync");
        assert!(!sql.contains(&format!("${}", db_params.len() + 1)));
    }

    #[test]
    fn blank_name_filter_is_omitted() {
        let params = SpeciesSearchParams {
            scientific_name: Some("   ".to_string()),
            ..SpeciesSearchParams::default()
        };
        let (sql, db_params) = build_search_query(&params).unwrap();
        assert!(!sql.contains("ILIKE"));
        assert_eq!(db_params.len(), 1);
    }
}
