//! Normalizes raw `GeoJSON` features into [`Boundary`] and [`MetricRow`]
//! values.
//!
//! Uses the configured [`BoundaryFieldMapping`] to extract the council name
//! and id from each feature, regardless of how the export named them.

use std::collections::BTreeMap;

use geo::MultiPolygon;
use nc_map_boundary_models::{Boundary, BoundaryFieldMapping, MetricRow};
use nc_map_request::parsing::region_id_from_json;
use nc_map_request_models::RegionId;

/// Normalizes a list of features into boundaries.
///
/// Skips features with a missing name, missing id, or non-polygonal
/// geometry.
#[must_use]
pub fn normalize_boundaries(
    features: &[geojson::Feature],
    fields: &BoundaryFieldMapping,
) -> Vec<Boundary> {
    let boundaries: Vec<Boundary> = features
        .iter()
        .filter_map(|feature| normalize_boundary(feature, fields))
        .collect();

    let skipped = features.len() - boundaries.len();
    if skipped > 0 {
        log::warn!("Skipped {skipped} boundary features without a name, id, or polygon");
    }

    boundaries
}

/// Normalizes a list of features into metric rows.
///
/// Every numeric property other than the id becomes a metric. Numeric
/// strings are accepted as well.
#[must_use]
pub fn normalize_metric_rows(
    features: &[geojson::Feature],
    fields: &BoundaryFieldMapping,
) -> Vec<MetricRow> {
    let rows: Vec<MetricRow> = features
        .iter()
        .filter_map(|feature| {
            let boundary = normalize_boundary(feature, fields)?;
            let metrics = extract_metrics(feature, fields);
            Some(MetricRow {
                region_id: boundary.region_id,
                name: boundary.name,
                geometry: boundary.geometry,
                metrics,
            })
        })
        .collect();

    let skipped = features.len() - rows.len();
    if skipped > 0 {
        log::warn!("Skipped {skipped} metric features without a name, id, or polygon");
    }

    rows
}

fn normalize_boundary(
    feature: &geojson::Feature,
    fields: &BoundaryFieldMapping,
) -> Option<Boundary> {
    // Kept verbatim: region lookup matches the dataset value exactly.
    let name = feature
        .property(&fields.name)
        .and_then(serde_json::Value::as_str)
        .filter(|s| !s.trim().is_empty())?
        .to_string();

    let region_id: RegionId = region_id_from_json(feature.property(&fields.region_id)?)?;

    let geometry = feature.geometry.clone()?;
    let geometry = to_multipolygon(geometry)?;
    if geometry.0.is_empty() {
        return None;
    }

    Some(Boundary::new(region_id, name, geometry))
}

fn extract_metrics(
    feature: &geojson::Feature,
    fields: &BoundaryFieldMapping,
) -> BTreeMap<String, f64> {
    let Some(properties) = feature.properties.as_ref() else {
        return BTreeMap::new();
    };

    properties
        .iter()
        .filter(|(key, _)| **key != fields.region_id && **key != fields.name)
        .filter_map(|(key, value)| {
            let number = match value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            }?;
            number.is_finite().then_some((key.clone(), number))
        })
        .collect()
}

/// Converts a `GeoJSON` geometry into a [`MultiPolygon`].
/// Handles both `Polygon` and `MultiPolygon` geometry types.
fn to_multipolygon(geometry: geojson::Geometry) -> Option<MultiPolygon<f64>> {
    let geo_geom: geo::Geometry<f64> = geometry.try_into().ok()?;
    match geo_geom {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_features;

    const COUNCILS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-118.26, 34.04], [-118.24, 34.04], [-118.24, 34.06], [-118.26, 34.06], [-118.26, 34.04]]]
                },
                "properties": { "name": "Downtown", "nc_id": 7, "count": 120, "density": "3.5", "service": "Bulky Items" }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[-118.5, 34.2], [-118.4, 34.2], [-118.4, 34.3], [-118.5, 34.2]]]]
                },
                "properties": { "name": "  Arleta  ", "nc_id": "9" }
            },
            {
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [-118.3, 34.1] },
                "properties": { "name": "Pointy", "nc_id": 11 }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                },
                "properties": { "name": "", "nc_id": 12 }
            }
        ]
    }"#;

    #[test]
    fn normalizes_polygon_and_multipolygon_features() {
        let features = parse_features(COUNCILS).unwrap();
        let boundaries = normalize_boundaries(&features, &BoundaryFieldMapping::default());

        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries[0].name, "Downtown");
        assert_eq!(boundaries[0].region_id, RegionId(7));
        assert_eq!(boundaries[0].geometry.0.len(), 1);
        assert_eq!(boundaries[1].name, "  Arleta  ");
        assert_eq!(boundaries[1].region_id, RegionId(9));
    }

    #[test]
    fn padded_names_match_only_verbatim() {
        let features = parse_features(COUNCILS).unwrap();
        let table =
            crate::BoundaryTable::new(normalize_boundaries(&features, &BoundaryFieldMapping::default()));

        assert_eq!(table.find_by_name("  Arleta  ").len(), 1);
        assert!(table.find_by_name("Arleta").is_empty());
    }

    #[test]
    fn extracts_numeric_metrics_only() {
        let features = parse_features(COUNCILS).unwrap();
        let rows = normalize_metric_rows(&features, &BoundaryFieldMapping::default());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].metric("count"), Some(120.0));
        assert_eq!(rows[0].metric("density"), Some(3.5));
        assert_eq!(rows[0].metric("service"), None);
        assert_eq!(rows[0].metric("nc_id"), None);
        assert!(rows[1].metrics.is_empty());
    }

    #[test]
    fn honors_custom_field_names() {
        let body = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                },
                "properties": { "NC_NAME": "Venice", "NC_ID": 53 }
            }]
        }"#;
        let fields = BoundaryFieldMapping {
            name: "NC_NAME".to_string(),
            region_id: "NC_ID".to_string(),
        };
        let features = parse_features(body).unwrap();
        let boundaries = normalize_boundaries(&features, &fields);
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].name, "Venice");
        assert_eq!(boundaries[0].region_id, RegionId(53));
    }
}
