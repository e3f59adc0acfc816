//! [`MapRenderer`] producing Leaflet map documents.

use geo::MultiPolygon;
use nc_map_boundary_models::MetricRow;
use nc_map_region::DayBuckets;
use nc_map_request_models::Location;

use crate::MapRenderer;
use crate::config::RenderConfig;
use crate::document::{
    ChoroplethLayer, ChoroplethRegion, Control, GeoJsonLayer, HeatmapWithTimeLayer, Layer, Legend,
    MapDocument, TooltipOverlay, TooltipRow,
};
use crate::scale::ColorScale;

/// Renders Leaflet map documents using a [`RenderConfig`].
#[derive(Debug, Clone, Default)]
pub struct LeafletRenderer {
    config: RenderConfig,
}

impl LeafletRenderer {
    /// Creates a renderer with the given configuration.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub const fn config(&self) -> &RenderConfig {
        &self.config
    }
}

fn to_geojson(geometry: &MultiPolygon<f64>) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::from(geometry))
}

/// Formats a metric for tooltips: whole numbers without a fraction.
fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

impl MapRenderer for LeafletRenderer {
    fn render_region_heatmap(
        &self,
        center: Location,
        boundary: &MultiPolygon<f64>,
        buckets: &DayBuckets,
    ) -> MapDocument {
        let config = &self.config.heatmap;

        let mut layers = vec![Layer::GeoJson(GeoJsonLayer {
            name: "boundary".to_string(),
            geometry: to_geojson(boundary),
            style: config.boundary_style.clone(),
        })];

        if buckets.is_empty() {
            log::warn!("No daily frames to animate; rendering the boundary only");
        } else {
            layers.push(Layer::HeatmapWithTime(HeatmapWithTimeLayer {
                name: "requests".to_string(),
                index: buckets.labels(),
                frames: buckets.iter().map(nc_map_region::DayBucket::lat_lngs).collect(),
                radius: config.radius,
                min_opacity: config.min_opacity,
                max_opacity: config.max_opacity,
                auto_play: config.auto_play,
                frame_interval_ms: config.frame_interval_ms,
            }));
        }

        let mut controls = Vec::new();
        if config.fullscreen {
            controls.push(Control::Fullscreen {
                position: "topleft".to_string(),
            });
        }

        log::debug!(
            "Rendered region heatmap: {} frames, {} points",
            buckets.len(),
            buckets.total_points()
        );

        MapDocument {
            title: "311 requests".to_string(),
            center: center.lat_lng(),
            zoom_start: config.zoom_start,
            width: config.width.clone(),
            height: config.height.clone(),
            tiles: config.tiles.clone(),
            controls,
            layers,
        }
    }

    fn render_choropleth(
        &self,
        rows: &[MetricRow],
        metric_field: &str,
        display_label: &str,
    ) -> MapDocument {
        let config = &self.config.choropleth;

        let scale = ColorScale::from_values(
            rows.iter().filter_map(|row| row.metric(metric_field)),
            config.palette,
            config.bins,
        );

        let missing = rows
            .iter()
            .filter(|row| row.metric(metric_field).is_none())
            .count();
        if missing > 0 {
            log::warn!("{missing} of {} regions have no '{metric_field}' value", rows.len());
        }

        let regions: Vec<ChoroplethRegion> = rows
            .iter()
            .map(|row| {
                let value = row.metric(metric_field).filter(|v| v.is_finite());
                let fill_color = match (value, scale.as_ref()) {
                    (Some(v), Some(scale)) => scale.color(v).to_string(),
                    _ => config.nan_fill_color.clone(),
                };
                ChoroplethRegion {
                    region_id: row.region_id,
                    name: row.name.clone(),
                    value,
                    fill_color,
                    geometry: to_geojson(&row.geometry),
                }
            })
            .collect();

        let legend = scale.as_ref().map(|scale| Legend {
            title: format!("{}{display_label}", config.legend_prefix),
            thresholds: scale.thresholds().to_vec(),
            colors: scale.colors().iter().map(|c| (*c).to_string()).collect(),
        });

        let tooltip_rows: Vec<TooltipRow> = regions
            .iter()
            .map(|region| TooltipRow {
                values: vec![
                    region.name.clone(),
                    region.region_id.to_string(),
                    format_value(region.value),
                ],
                geometry: region.geometry.clone(),
            })
            .collect();

        let mut layers = vec![Layer::Choropleth(ChoroplethLayer {
            name: "choropleth".to_string(),
            metric_field: metric_field.to_string(),
            regions,
            fill_opacity: config.fill_opacity,
            line_opacity: config.line_opacity,
            line_weight: config.line_weight,
            smooth_factor: config.smooth_factor,
            legend,
        })];

        if !tooltip_rows.is_empty() {
            layers.push(Layer::TooltipOverlay(TooltipOverlay {
                name: "nc_info".to_string(),
                aliases: vec![
                    config.name_alias.clone(),
                    config.id_alias.clone(),
                    format!("{display_label}: "),
                ],
                rows: tooltip_rows,
                style: config.overlay_style.clone(),
                highlight_style: config.highlight_style.clone(),
                css: config.tooltip_css.clone(),
                control: false,
                keep_in_front: true,
            }));
        }

        let mut controls = Vec::new();
        if config.fullscreen {
            controls.push(Control::Fullscreen {
                position: "topleft".to_string(),
            });
        }
        if config.layer_control {
            controls.push(Control::LayerControl { collapsed: true });
        }

        log::debug!(
            "Rendered choropleth of '{metric_field}' over {} regions",
            rows.len()
        );

        MapDocument {
            title: format!("{}{display_label}", config.legend_prefix),
            center: config.center,
            zoom_start: config.zoom_start,
            width: config.width.clone(),
            height: config.height.clone(),
            tiles: config.tiles.clone(),
            controls,
            layers,
        }
    }
}
