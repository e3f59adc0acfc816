//! `GeoJSON` point observation reader.
//!
//! Reads a `FeatureCollection` whose features are `Point` geometries with
//! the region id and day stored as properties. This is the shape of a
//! geodataframe export of the joined request table.

use std::io::Read;

use geojson::GeoJson;
use nc_map_request_models::{Observation, ObservationColumns};

use crate::RequestError;
use crate::parsing::{day_from_json, region_id_from_json, valid_location};

/// Reads observations from a `GeoJSON` `FeatureCollection`.
///
/// Features without a point geometry, region id, or day are skipped and
/// counted.
///
/// # Errors
///
/// Returns [`RequestError`] if the input is not valid `GeoJSON` or is not a
/// `FeatureCollection`.
pub fn read_observations<R: Read>(
    mut reader: R,
    columns: &ObservationColumns,
) -> Result<Vec<Observation>, RequestError> {
    let mut body = String::new();
    reader.read_to_string(&mut body)?;

    let geojson: GeoJson = body.parse()?;
    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(RequestError::Conversion {
            message: "Expected a GeoJSON FeatureCollection of observations".to_string(),
        });
    };

    let mut observations = Vec::with_capacity(collection.features.len());
    let mut skipped = 0u64;

    for feature in &collection.features {
        match parse_feature(feature, columns) {
            Some(observation) => observations.push(observation),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} GeoJSON features with missing or invalid fields");
    }

    Ok(observations)
}

fn parse_feature(feature: &geojson::Feature, columns: &ObservationColumns) -> Option<Observation> {
    let region_id = region_id_from_json(feature.property(&columns.region_id)?)?;
    let day = day_from_json(feature.property(&columns.day)?)?;

    let geometry = feature.geometry.as_ref()?;
    let geojson::Value::Point(coords) = &geometry.value else {
        return None;
    };
    // GeoJSON positions are [lng, lat]
    let longitude = *coords.first()?;
    let latitude = *coords.get(1)?;
    let location = valid_location(latitude, longitude)?;

    Some(Observation::new(region_id, day, location))
}
