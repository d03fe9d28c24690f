#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the ocean atlas.
//!
//! Serves the REST API over the read-only observation store: region
//! classification and aggregation, species shift and trend analysis, and
//! the multi-predicate species search. All handlers are stateless; the
//! only shared resource is the store connection.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use ocean_atlas_database::db;
use std::sync::Arc;
use switchy_database::Database;

/// Shared application state.
pub struct AppState {
    /// Observation store connection.
    pub db: Arc<dyn Database>,
}

/// Starts the ocean atlas API server.
///
/// Connects to the observation store and starts the Actix-Web HTTP
/// server. This is a regular async function; the caller provides the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the store connection fails.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Connecting to observation store...");
    let db_conn = db::connect_from_env()
        .await
        .expect("Failed to connect to observation store");

    let state = web::Data::new(AppState {
        db: Arc::from(db_conn),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/regions", web::get().to(handlers::list_regions))
                    .route("/regions/classify", web::get().to(handlers::classify_point))
                    .route(
                        "/regions/aggregates",
                        web::get().to(handlers::region_aggregates),
                    )
                    .route(
                        "/regions/aggregates/{region}",
                        web::get().to(handlers::region_aggregates),
                    )
                    .route(
                        "/species/monthly-trends/{name}",
                        web::get().to(handlers::monthly_trends),
                    )
                    .route("/species/shift", web::get().to(handlers::species_shift))
                    .route(
                        "/species/most-observed",
                        web::get().to(handlers::most_observed),
                    )
                    .route(
                        "/species/name/{name}",
                        web::get().to(handlers::species_by_name),
                    )
                    .route("/search_species", web::get().to(handlers::search_species)),
            )
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
