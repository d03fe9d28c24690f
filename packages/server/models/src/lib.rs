#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the ocean atlas server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the analytics value objects to allow independent
//! evolution of the API contract.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Query parameters for the point classifier endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifyQueryParams {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees (any value; normalized server-side).
    pub lng: f64,
}

/// Query parameters for the centroid-shift endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftQueryParams {
    /// Scientific-name substring (required).
    pub name: Option<String>,
    /// Period A start date (`YYYY-MM-DD`).
    pub a_from: Option<String>,
    /// Period A end date.
    pub a_to: Option<String>,
    /// Period B start date.
    pub b_from: Option<String>,
    /// Period B end date.
    pub b_to: Option<String>,
    /// Minimum observation count required in each period.
    pub min_count: Option<u32>,
}

/// Query parameters for the species search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQueryParams {
    /// Scientific-name substring.
    pub scientific_name: Option<String>,
    /// Require the marine habitat flag.
    pub marine: Option<bool>,
    /// Require the brackish habitat flag.
    pub brackish: Option<bool>,
    /// Comma-separated catalog region ids.
    pub regions: Option<String>,
    /// Minimum per-species sighting count.
    pub sightings_min: Option<i64>,
    /// Maximum per-species sighting count.
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

/// Query parameters for the most-observed species endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MostObservedQueryParams {
    /// Number of species to return (default 10).
    pub limit: Option<u32>,
}
