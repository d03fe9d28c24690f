#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytical queries over the read-only observation store.
//!
//! Each module implements one operation exposed to the presentation
//! layer: per-region climate/species aggregation, seasonal centroid
//! shifts, monthly occurrence trends, and the multi-predicate species
//! search. Queries run raw parameterized SQL via `query_raw_params()`;
//! all operations are stateless request/response computations.

pub mod doy;
pub mod regions;
pub mod search;
pub mod shift;
pub mod species;
pub mod trend;

use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// A required parameter was missing or malformed; rejected before
    /// any query executes.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// Data conversion error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
