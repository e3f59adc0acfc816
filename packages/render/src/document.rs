//! The map document produced by a [`crate::MapRenderer`].
//!
//! A [`MapDocument`] is a plain description of an interactive map: view,
//! base tiles, controls, and an ordered list of layers. It serializes to
//! JSON and is turned into a standalone page by [`MapDocument::to_html`].

use nc_map_request_models::RegionId;
use serde::{Deserialize, Serialize};

use crate::RenderError;
use crate::config::TileLayer;

/// Leaflet path style options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    /// Fill color.
    pub fill_color: String,
    /// Stroke color.
    pub color: String,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Stroke weight.
    pub weight: f64,
}

/// Map controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Control {
    /// Full-screen toggle button.
    Fullscreen {
        /// Corner the button sits in.
        position: String,
    },
    /// Base/overlay layer visibility switcher.
    LayerControl {
        /// Start collapsed.
        collapsed: bool,
    },
}

/// A `GeoJSON` outline layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoJsonLayer {
    /// Layer name.
    pub name: String,
    /// Geometry to draw.
    pub geometry: geojson::Geometry,
    /// Path style; `None` uses the library default.
    pub style: Option<PathStyle>,
}

/// A heatmap that steps through one frame per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapWithTimeLayer {
    /// Layer name.
    pub name: String,
    /// Frame labels, one per frame.
    pub index: Vec<String>,
    /// `[lat, lng]` points per frame.
    pub frames: Vec<Vec<[f64; 2]>>,
    /// Heat point radius in pixels.
    pub radius: f64,
    /// Minimum heat opacity.
    pub min_opacity: f64,
    /// Maximum heat opacity.
    pub max_opacity: f64,
    /// Start playing on load.
    pub auto_play: bool,
    /// Milliseconds per frame while playing.
    pub frame_interval_ms: u32,
}

/// One filled region of a choropleth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethRegion {
    /// Council id.
    pub region_id: RegionId,
    /// Council name.
    pub name: String,
    /// Metric value, `None` when the row lacks the metric.
    pub value: Option<f64>,
    /// Resolved fill color.
    pub fill_color: String,
    /// Region polygon.
    pub geometry: geojson::Geometry,
}

/// Color legend of a choropleth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Legend {
    /// Legend title.
    pub title: String,
    /// Bin edges (`colors.len() + 1` values).
    pub thresholds: Vec<f64>,
    /// One color per bin.
    pub colors: Vec<String>,
}

/// Filled regions colored by a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoroplethLayer {
    /// Layer name.
    pub name: String,
    /// Metric column the fills encode.
    pub metric_field: String,
    /// One entry per metric row.
    pub regions: Vec<ChoroplethRegion>,
    /// Fill opacity.
    pub fill_opacity: f64,
    /// Outline opacity.
    pub line_opacity: f64,
    /// Outline weight.
    pub line_weight: f64,
    /// Polyline simplification factor.
    pub smooth_factor: f64,
    /// Legend, absent when no region has a value.
    pub legend: Option<Legend>,
}

/// One hoverable shape of a [`TooltipOverlay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipRow {
    /// Display values, aligned with [`TooltipOverlay::aliases`].
    pub values: Vec<String>,
    /// Shape that triggers the tooltip.
    pub geometry: geojson::Geometry,
}

/// Near-transparent shapes drawn over the choropleth to carry tooltips and
/// the hover highlight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOverlay {
    /// Layer name.
    pub name: String,
    /// Labels shown before each value.
    pub aliases: Vec<String>,
    /// Hoverable shapes.
    pub rows: Vec<TooltipRow>,
    /// Resting style.
    pub style: PathStyle,
    /// Hover style.
    pub highlight_style: PathStyle,
    /// Inline tooltip CSS.
    pub css: String,
    /// List in the layer control.
    pub control: bool,
    /// Keep above every other overlay.
    pub keep_in_front: bool,
}

/// Map layers, drawn in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    /// Outline of a region.
    GeoJson(GeoJsonLayer),
    /// Animated daily heatmap.
    HeatmapWithTime(HeatmapWithTimeLayer),
    /// Metric-colored regions.
    Choropleth(ChoroplethLayer),
    /// Tooltip and highlight overlay.
    TooltipOverlay(TooltipOverlay),
}

/// An interactive map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    /// Page title.
    pub title: String,
    /// Initial view center as `[lat, lng]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom_start: u8,
    /// Map width (CSS length).
    pub width: String,
    /// Map height (CSS length).
    pub height: String,
    /// Base map.
    pub tiles: TileLayer,
    /// Controls.
    pub controls: Vec<Control>,
    /// Layers, bottom first.
    pub layers: Vec<Layer>,
}

impl MapDocument {
    /// Replaces the page title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Number of filled choropleth regions across all layers.
    #[must_use]
    pub fn region_layer_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| match layer {
                Layer::Choropleth(choropleth) => choropleth.regions.len(),
                _ => 0,
            })
            .sum()
    }

    /// The animated heatmap layer, if any.
    #[must_use]
    pub fn heatmap(&self) -> Option<&HeatmapWithTimeLayer> {
        self.layers.iter().find_map(|layer| match layer {
            Layer::HeatmapWithTime(heatmap) => Some(heatmap),
            _ => None,
        })
    }

    /// Number of animation frames (zero without a heatmap).
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.heatmap().map_or(0, |heatmap| heatmap.frames.len())
    }

    /// Returns `true` if the document has a control of this kind.
    #[must_use]
    pub fn has_control(&self, predicate: impl Fn(&Control) -> bool) -> bool {
        self.controls.iter().any(predicate)
    }

    /// Serializes the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string(self)?)
    }
}
