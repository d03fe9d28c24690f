#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Species catalog row types.
//!
//! The catalog is populated by external ingestion and read-only here.

use serde::{Deserialize, Serialize};

/// A species catalog entry from the `scientific_names` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesCatalogEntry {
    /// WoRMS AphiaID.
    pub aphiaid: i32,
    /// Canonical scientific name.
    pub scientificname: String,
}
