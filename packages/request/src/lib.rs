#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading of 311 service request observations.
//!
//! Reads the joined request export (one row per request, already attributed
//! to a neighborhood council) from either a CSV file or a `GeoJSON`
//! `FeatureCollection` of points. Column names come from
//! [`ObservationColumns`] so differently-shaped exports can be read without
//! code changes. Rows that cannot be parsed are skipped and counted rather
//! than failing the whole load.

pub mod csv_table;
pub mod geojson_points;
pub mod parsing;

use std::path::Path;

use nc_map_request_models::{Observation, ObservationColumns};
use thiserror::Error;

/// Errors that can occur while loading observations.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Reading the input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A configured column is not present in the input.
    #[error("Missing column '{column}'")]
    MissingColumn {
        /// Name of the column that was expected.
        column: String,
    },

    /// The input does not have the expected shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Loads observations from a file, choosing the reader by extension.
///
/// `.geojson` and `.json` files are read as point `FeatureCollection`s,
/// everything else as CSV.
///
/// # Errors
///
/// Returns [`RequestError`] if the file cannot be opened or is not a valid
/// CSV / `GeoJSON` document.
pub fn load_observations(
    path: &Path,
    columns: &ObservationColumns,
) -> Result<Vec<Observation>, RequestError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);

    let is_geojson = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("geojson") || ext.eq_ignore_ascii_case("json"));

    let observations = if is_geojson {
        geojson_points::read_observations(reader, columns)?
    } else {
        csv_table::read_observations(reader, columns)?
    };

    log::info!(
        "Loaded {} observations from {}",
        observations.len(),
        path.display()
    );

    Ok(observations)
}
