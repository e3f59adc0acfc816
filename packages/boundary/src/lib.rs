#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood council boundary loading and lookup.
//!
//! Reads council polygons (and the choropleth metric table, which is the
//! same polygons with extra numeric properties) from `GeoJSON`
//! `FeatureCollection` files, normalizes them into [`Boundary`] and
//! [`MetricRow`] values, and indexes boundaries by display name for region
//! selection.

pub mod normalize;
pub mod table;

use std::path::Path;

use geojson::GeoJson;
use nc_map_boundary_models::{BoundaryFieldMapping, MetricRow};
use thiserror::Error;

pub use table::BoundaryTable;

/// Errors that can occur while loading boundaries.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The input does not have the expected shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Parses a `GeoJSON` document and returns its features.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the document is not valid `GeoJSON` or is
/// not a `FeatureCollection`.
pub fn parse_features(body: &str) -> Result<Vec<geojson::Feature>, BoundaryError> {
    let geojson: GeoJson = body.parse()?;
    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection.features),
        GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(BoundaryError::Conversion {
            message: "Expected a GeoJSON FeatureCollection of boundaries".to_string(),
        }),
    }
}

/// Loads council boundaries from a `GeoJSON` file into a name-indexed table.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the file cannot be read or parsed.
pub fn load_boundaries(
    path: &Path,
    fields: &BoundaryFieldMapping,
) -> Result<BoundaryTable, BoundaryError> {
    let body = std::fs::read_to_string(path)?;
    let features = parse_features(&body)?;
    let boundaries = normalize::normalize_boundaries(&features, fields);

    log::info!(
        "Loaded {} boundaries from {} ({} features)",
        boundaries.len(),
        path.display(),
        features.len()
    );

    Ok(BoundaryTable::new(boundaries))
}

/// Loads the choropleth metric table from a `GeoJSON` file.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the file cannot be read or parsed.
pub fn load_metric_rows(
    path: &Path,
    fields: &BoundaryFieldMapping,
) -> Result<Vec<MetricRow>, BoundaryError> {
    let body = std::fs::read_to_string(path)?;
    let features = parse_features(&body)?;
    let rows = normalize::normalize_metric_rows(&features, fields);

    log::info!(
        "Loaded {} metric rows from {} ({} features)",
        rows.len(),
        path.display(),
        features.len()
    );

    Ok(rows)
}
