//! Rendering configuration.
//!
//! Every value here is inert styling passed straight through to the map
//! document. Defaults reproduce the council analysis maps: a Toner-style
//! base map with a 10px heat radius for the animated view, and a `YlOrRd`
//! six-bin choropleth centered on Los Angeles.

use serde::{Deserialize, Serialize};

use crate::document::PathStyle;
use crate::scale::Palette;

/// Base map tile layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    /// Display name in the layer control.
    pub name: String,
    /// XYZ URL template.
    pub url: String,
    /// Attribution HTML.
    pub attribution: String,
}

impl TileLayer {
    /// Stamen Toner (served by Stadia Maps).
    #[must_use]
    pub fn stamen_toner() -> Self {
        Self {
            name: "Stamen Toner".to_string(),
            url: "https://tiles.stadiamaps.com/tiles/stamen_toner/{z}/{x}/{y}{r}.png".to_string(),
            attribution: "&copy; <a href=\"https://stadiamaps.com/\">Stadia Maps</a> \
                          &copy; <a href=\"https://stamen.com/\">Stamen Design</a> \
                          &copy; <a href=\"https://openmaptiles.org/\">OpenMapTiles</a> \
                          &copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
        }
    }

    /// Standard `OpenStreetMap` tiles.
    #[must_use]
    pub fn openstreetmap() -> Self {
        Self {
            name: "OpenStreetMap".to_string(),
            url: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
        }
    }
}

/// All rendering settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Animated region heatmap settings.
    pub heatmap: HeatmapConfig,
    /// Council choropleth settings.
    pub choropleth: ChoroplethConfig,
}

/// Settings for the animated region heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Base map.
    pub tiles: TileLayer,
    /// Initial zoom level.
    pub zoom_start: u8,
    /// Map width (CSS length).
    pub width: String,
    /// Map height (CSS length).
    pub height: String,
    /// Heat point radius in pixels.
    pub radius: f64,
    /// Minimum heat opacity.
    pub min_opacity: f64,
    /// Maximum heat opacity.
    pub max_opacity: f64,
    /// Start playing the timeline on load.
    pub auto_play: bool,
    /// Milliseconds each day stays on screen while playing.
    pub frame_interval_ms: u32,
    /// Boundary outline style. `None` uses the map library default.
    pub boundary_style: Option<PathStyle>,
    /// Add a fullscreen toggle.
    pub fullscreen: bool,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            tiles: TileLayer::stamen_toner(),
            zoom_start: 14,
            width: "100%".to_string(),
            height: "100%".to_string(),
            radius: 10.0,
            min_opacity: 0.0,
            max_opacity: 0.8,
            auto_play: true,
            frame_interval_ms: 200,
            boundary_style: None,
            fullscreen: true,
        }
    }
}

/// Settings for the council choropleth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChoroplethConfig {
    /// Base map.
    pub tiles: TileLayer,
    /// Map center as `[lat, lng]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom_start: u8,
    /// Map width (CSS length).
    pub width: String,
    /// Map height (CSS length).
    pub height: String,
    /// Sequential color palette.
    pub palette: Palette,
    /// Number of equal-width color bins.
    pub bins: usize,
    /// Region fill opacity.
    pub fill_opacity: f64,
    /// Region outline opacity.
    pub line_opacity: f64,
    /// Region outline weight.
    pub line_weight: f64,
    /// Polyline simplification factor.
    pub smooth_factor: f64,
    /// Fill for regions without a value for the metric.
    pub nan_fill_color: String,
    /// Prefix of the legend title; the metric label follows it.
    pub legend_prefix: String,
    /// Tooltip alias for the region name.
    pub name_alias: String,
    /// Tooltip alias for the region id.
    pub id_alias: String,
    /// Resting style of the hover overlay.
    pub overlay_style: PathStyle,
    /// Hover style of the overlay.
    pub highlight_style: PathStyle,
    /// Inline CSS for tooltips.
    pub tooltip_css: String,
    /// Add a fullscreen toggle.
    pub fullscreen: bool,
    /// Add a layer visibility control.
    pub layer_control: bool,
}

impl Default for ChoroplethConfig {
    fn default() -> Self {
        Self {
            tiles: TileLayer::openstreetmap(),
            center: [34.05, -118.25],
            zoom_start: 10,
            width: "100%".to_string(),
            height: "100%".to_string(),
            palette: Palette::YlOrRd,
            bins: 6,
            fill_opacity: 1.0,
            line_opacity: 0.2,
            line_weight: 1.0,
            smooth_factor: 0.0,
            nan_fill_color: "black".to_string(),
            legend_prefix: "311 ".to_string(),
            name_alias: "Neighborhood: ".to_string(),
            id_alias: "NC ID: ".to_string(),
            overlay_style: PathStyle {
                fill_color: "#ffffff".to_string(),
                color: "#000000".to_string(),
                fill_opacity: 0.1,
                weight: 0.1,
            },
            highlight_style: PathStyle {
                fill_color: "#000000".to_string(),
                color: "#000000".to_string(),
                fill_opacity: 0.5,
                weight: 0.1,
            },
            tooltip_css: "background-color: white; color: #333333; font-family: arial; \
                          font-size: 12px; padding: 10px;"
                .to_string(),
            fullscreen: true,
            layer_control: true,
        }
    }
}
