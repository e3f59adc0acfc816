#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! 311 service request observation types.
//!
//! An [`Observation`] is a single logged service request: the neighborhood
//! council it was attributed to, the calendar day it was opened, and where
//! it happened. These are plain read-only rows; loading them lives in
//! `nc_map_request`.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a neighborhood council region (the `nc_id` column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub i32);

impl RegionId {
    /// Returns the raw numeric identifier.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for RegionId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Location {
    /// Creates a location from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the point as `[lat, lng]`, the order Leaflet expects.
    #[must_use]
    pub const fn lat_lng(self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

/// Column names used to read observations from tabular or `GeoJSON`
/// sources.
///
/// Defaults match the joined 311 export: `nc`, `day`, `latitude`,
/// `longitude`. `GeoJSON` sources only use `region_id` and `day`; the
/// location comes from the point geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationColumns {
    /// Column holding the neighborhood council id.
    pub region_id: String,
    /// Column holding the request date.
    pub day: String,
    /// Latitude column.
    pub latitude: String,
    /// Longitude column.
    pub longitude: String,
}

impl Default for ObservationColumns {
    fn default() -> Self {
        Self {
            region_id: "nc".to_string(),
            day: "day".to_string(),
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
        }
    }
}

/// A single 311 service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Neighborhood council the request was attributed to.
    pub region_id: RegionId,
    /// Calendar day the request was opened. No finer resolution is kept.
    pub day: NaiveDate,
    /// Where the request was reported.
    pub location: Location,
}

impl Observation {
    /// Creates an observation.
    #[must_use]
    pub const fn new(region_id: RegionId, day: NaiveDate, location: Location) -> Self {
        Self {
            region_id,
            day,
            location,
        }
    }
}
