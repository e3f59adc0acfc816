#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region selection and daily bucketing of 311 requests.
//!
//! [`select::RegionSelector`] resolves a council by name against the
//! boundary table and filters the request table down to that council.
//! [`bucket::bucket`] then groups the selected requests by calendar day
//! into the ordered frames an animated heatmap plays through.
//!
//! Both steps only read their inputs. A selector borrows the two tables and
//! can be pointed at any number of councils.

pub mod bucket;
pub mod select;

use thiserror::Error;

pub use bucket::{DayBucket, DayBuckets, bucket};
pub use select::{DuplicateNamePolicy, RegionSelection, RegionSelector, SelectionWarning};

/// Errors that can occur while selecting a region.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegionError {
    /// No boundary carries the requested name.
    #[error("Region not found: '{name}'")]
    RegionNotFound {
        /// Requested region name.
        name: String,
    },

    /// More than one boundary carries the requested name and the duplicate
    /// policy is [`DuplicateNamePolicy::Error`].
    #[error("Region name '{name}' is ambiguous: {matches} boundaries share it")]
    AmbiguousRegion {
        /// Requested region name.
        name: String,
        /// Number of boundaries with that name.
        matches: usize,
    },

    /// The boundary has no polygon area to center the map on.
    #[error("Region '{name}' has an empty geometry")]
    DegenerateGeometry {
        /// Region name.
        name: String,
    },
}
