#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Interactive map documents for 311 request data.
//!
//! Two maps are supported: an animated heatmap of one council's requests,
//! one frame per day, drawn over the council outline; and a choropleth of
//! every council colored by a pre-computed request metric. Both are built
//! as a [`MapDocument`], a serializable description that
//! [`MapDocument::to_html`] turns into a standalone Leaflet page.

pub mod config;
pub mod document;
pub mod html;
pub mod leaflet;
pub mod scale;

use geo::MultiPolygon;
use nc_map_boundary_models::MetricRow;
use nc_map_region::DayBuckets;
use nc_map_request_models::Location;
use thiserror::Error;

pub use config::RenderConfig;
pub use document::MapDocument;
pub use leaflet::LeafletRenderer;

/// Errors that can occur while writing a map document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds map documents from selected region data or a metric table.
pub trait MapRenderer {
    /// Renders a council outline with an auto-playing heatmap timeline,
    /// one frame per bucket in order. Empty buckets render the outline
    /// only.
    fn render_region_heatmap(
        &self,
        center: Location,
        boundary: &MultiPolygon<f64>,
        buckets: &DayBuckets,
    ) -> MapDocument;

    /// Renders every row as a region filled by `metric_field`, with
    /// tooltips labelling the value as `display_label`.
    fn render_choropleth(
        &self,
        rows: &[MetricRow],
        metric_field: &str,
        display_label: &str,
    ) -> MapDocument;
}
