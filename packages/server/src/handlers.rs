//! HTTP handler functions for the ocean atlas API.

use actix_web::{HttpResponse, web};
use ocean_atlas_analytics::{AnalyticsError, regions, search, shift, species, trend};
use ocean_atlas_analytics_models::{
    RegionSelector, SpeciesSearchParams, SpeciesShiftParams,
};
use ocean_atlas_server_models::{
    ApiHealth, ClassifyQueryParams, MostObservedQueryParams, SearchQueryParams, ShiftQueryParams,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/regions`
///
/// Lists cataloged ocean basins, de-duplicated by display name.
pub async fn list_regions() -> HttpResponse {
    HttpResponse::Ok().json(ocean_atlas_regions::list_regions())
}

/// `GET /api/regions/classify?lat=..&lng=..`
///
/// Classifies a coordinate into an ocean basin. An unclassified point is
/// a 404 (an explicit not-found, distinct from a query error).
pub async fn classify_point(params: web::Query<ClassifyQueryParams>) -> HttpResponse {
    ocean_atlas_regions::classify(params.lat, params.lng).map_or_else(
        || {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "Coordinate is outside every cataloged region"
            }))
        },
        |region| HttpResponse::Ok().json(region),
    )
}

/// `GET /api/regions/aggregates` and `GET /api/regions/aggregates/{region}`
///
/// Per-region climate averages and species inventories. The path
/// parameter is a catalog region id or `all`.
pub async fn region_aggregates(
    state: web::Data<AppState>,
    path: Option<web::Path<String>>,
) -> HttpResponse {
    let selector = path.map_or(RegionSelector::All, |p| RegionSelector::parse(&p));

    match regions::region_aggregates(state.db.as_ref(), &selector).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response("query region aggregates", &e),
    }
}

/// `GET /api/species/monthly-trends/{name}`
///
/// Monthly occurrence trend joined with ocean temperature.
pub async fn monthly_trends(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> HttpResponse {
    match trend::monthly_trend(state.db.as_ref(), &name).await {
        Ok(points) => HttpResponse::Ok().json(points),
        Err(e) => error_response("compute monthly trend", &e),
    }
}

/// `GET /api/species/shift?name=..&aFrom=..&aTo=..&bFrom=..&bTo=..&minCount=..`
///
/// Centroid shift between two seasonal windows.
pub async fn species_shift(
    state: web::Data<AppState>,
    params: web::Query<ShiftQueryParams>,
) -> HttpResponse {
    let shift_params = SpeciesShiftParams {
        name: params.name.clone().unwrap_or_default(),
        period_a_from: params.a_from.clone().unwrap_or_default(),
        period_a_to: params.a_to.clone().unwrap_or_default(),
        period_b_from: params.b_from.clone().unwrap_or_default(),
        period_b_to: params.b_to.clone().unwrap_or_default(),
        min_count: params.min_count,
    };

    match shift::species_shift(state.db.as_ref(), &shift_params).await {
        Ok(results) => HttpResponse::Ok().json(results),
        Err(e) => error_response("compute species shift", &e),
    }
}

/// `GET /api/search_species`
///
/// Multi-predicate species search with optional aggregate filters.
pub async fn search_species(
    state: web::Data<AppState>,
    params: web::Query<SearchQueryParams>,
) -> HttpResponse {
    let regions: Vec<String> = params
        .regions
        .as_deref()
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default();

    let search_params = SpeciesSearchParams {
        scientific_name: params.scientific_name.clone(),
        marine: params.marine,
        brackish: params.brackish,
        regions,
        sightings_min: params.sightings_min,
        sightings_max: params.sightings_max,
        depth_min: params.depth_min,
        depth_max: params.depth_max,
        temp_min: params.temp_min,
        temp_max: params.temp_max,
    };

    match search::search_species(state.db.as_ref(), &search_params).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response("search species", &e),
    }
}

/// `GET /api/species/most-observed`
pub async fn most_observed(
    state: web::Data<AppState>,
    params: web::Query<MostObservedQueryParams>,
) -> HttpResponse {
    let limit = params.limit.unwrap_or(10).min(100);

    match species::most_observed_species(state.db.as_ref(), limit).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response("query most-observed species", &e),
    }
}

/// `GET /api/species/name/{name}`
pub async fn species_by_name(
    state: web::Data<AppState>,
    name: web::Path<String>,
) -> HttpResponse {
    match species::species_by_name(state.db.as_ref(), &name).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response("look up species by name", &e),
    }
}

/// Maps an [`AnalyticsError`] to the uniform API error response.
///
/// Client input errors surface as 400 with the validation message; store
/// failures are logged and collapsed to a retryable 500 with a safe
/// payload, never the raw driver error.
fn error_response(context: &str, err: &AnalyticsError) -> HttpResponse {
    match err {
        AnalyticsError::InvalidInput { message } => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": message }))
        }
        AnalyticsError::Database(_) | AnalyticsError::Conversion { .. } => {
            log::error!("Failed to {context}: {err}");
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to {context}")
            }))
        }
    }
}
