#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Neighborhood council boundary and metric table types.
//!
//! A [`Boundary`] is one council polygon with its id and display name. A
//! [`MetricRow`] is the same polygon carrying pre-joined request metrics
//! for the choropleth. Neither is mutated after loading.

use std::collections::BTreeMap;

use geo::{Centroid, MultiPolygon};
use nc_map_request_models::{Location, RegionId};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A neighborhood council boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    /// Unique council id (`nc_id`).
    pub region_id: RegionId,
    /// Display name (e.g. "Downtown Los Angeles").
    pub name: String,
    /// Boundary polygon. Single polygons are stored as one-member
    /// multipolygons.
    pub geometry: MultiPolygon<f64>,
}

impl Boundary {
    /// Creates a boundary.
    #[must_use]
    pub const fn new(region_id: RegionId, name: String, geometry: MultiPolygon<f64>) -> Self {
        Self {
            region_id,
            name,
            geometry,
        }
    }

    /// Area-weighted centroid of the boundary, used as a map view center.
    ///
    /// Returns `None` for an empty geometry.
    #[must_use]
    pub fn centroid(&self) -> Option<Location> {
        self.geometry
            .centroid()
            .map(|point| Location::new(point.y(), point.x()))
    }
}

/// One row of the choropleth metric table.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    /// Council id.
    pub region_id: RegionId,
    /// Display name.
    pub name: String,
    /// Boundary polygon.
    pub geometry: MultiPolygon<f64>,
    /// Numeric metrics keyed by column name (e.g. `count`, `density`).
    pub metrics: BTreeMap<String, f64>,
}

impl MetricRow {
    /// Returns the value of a metric column, if present.
    #[must_use]
    pub fn metric(&self, field: &str) -> Option<f64> {
        self.metrics.get(field).copied()
    }
}

/// Well-known metric columns of the joined council table.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    /// Number of requests in the council.
    Count,
    /// Requests per unit of council area.
    Density,
}

impl Metric {
    /// Returns the property name holding this metric.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Density => "density",
        }
    }

    /// Returns the default display label for this metric.
    #[must_use]
    pub const fn label(self) -> &'static str {
        self.field_name()
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Count, Self::Density]
    }
}

/// Property names used to read boundaries from `GeoJSON`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryFieldMapping {
    /// Property holding the display name.
    pub name: String,
    /// Property holding the council id.
    pub region_id: String,
}

impl Default for BoundaryFieldMapping {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            region_id: "nc_id".to_string(),
        }
    }
}
