//! Map generation commands shared by the flag-driven and interactive modes.

use std::path::Path;

use nc_map_boundary::BoundaryTable;
use nc_map_boundary_models::BoundaryFieldMapping;
use nc_map_region::RegionSelector;
use nc_map_render::{LeafletRenderer, MapDocument, MapRenderer as _};

use crate::config::NcMapConfig;

/// Default output of the `heatmap` command.
pub const DEFAULT_HEATMAP_OUTPUT: &str = "nc_heatmap.html";

/// Default output of the `choropleth` command.
pub const DEFAULT_CHOROPLETH_OUTPUT: &str = "nc_choropleth.html";

/// Where to write a rendered map.
pub struct Output<'a> {
    /// HTML page path.
    pub html: &'a Path,
    /// Optional path for the raw map document JSON.
    pub json: Option<&'a Path>,
}

/// Inputs of the `heatmap` command.
pub struct HeatmapArgs<'a> {
    /// Boundary `GeoJSON` file.
    pub boundaries: &'a Path,
    /// Observation CSV or `GeoJSON` file.
    pub observations: &'a Path,
    /// Council name to animate.
    pub region: &'a str,
}

/// Inputs of the `choropleth` command.
pub struct ChoroplethArgs<'a> {
    /// Metric table `GeoJSON` file.
    pub metrics: &'a Path,
    /// Metric property to color by.
    pub metric_field: &'a str,
    /// Label shown in the legend and tooltips.
    pub label: &'a str,
}

fn write_document(
    document: &MapDocument,
    output: &Output<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    document.write_html(output.html)?;
    if let Some(json_path) = output.json {
        std::fs::write(json_path, document.to_json()?)?;
        log::info!("Wrote map document to {}", json_path.display());
    }
    Ok(())
}

/// Loads the boundary table and reports duplicated names.
///
/// # Errors
///
/// Returns an error if the boundary file cannot be loaded.
pub fn load_boundaries(
    path: &Path,
    fields: &BoundaryFieldMapping,
) -> Result<BoundaryTable, Box<dyn std::error::Error>> {
    let table = nc_map_boundary::load_boundaries(path, fields)?;
    for (name, count) in table.duplicate_names() {
        log::warn!("Boundary name '{name}' appears {count} times");
    }
    Ok(table)
}

/// Renders the animated daily heatmap of one council.
///
/// # Errors
///
/// * If an input file cannot be loaded
/// * If the region cannot be resolved
/// * If the output cannot be written
pub fn heatmap(
    config: &NcMapConfig,
    args: &HeatmapArgs<'_>,
    output: &Output<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    let boundaries = load_boundaries(args.boundaries, &config.dataset.boundaries)?;
    let observations =
        nc_map_request::load_observations(args.observations, &config.dataset.observations)?;

    let selector = RegionSelector::new(&boundaries, &observations)
        .with_policy(config.region.duplicate_names);
    let selection = selector.select(args.region)?;
    for warning in &selection.warnings {
        log::warn!("{}: {warning}", args.region);
    }

    let buckets = selection.day_buckets();
    if let Some((first, last)) = buckets.span() {
        log::info!(
            "{} ({}): {} requests over {} days, {first} to {last}",
            selection.boundary.name,
            selection.boundary.region_id,
            buckets.total_points(),
            buckets.len()
        );
    }

    let renderer = LeafletRenderer::new(config.render.clone());
    let document = renderer
        .render_region_heatmap(selection.center, &selection.boundary.geometry, &buckets)
        .with_title(format!("311 requests: {}", selection.boundary.name));

    write_document(&document, output)
}

/// Renders the council choropleth of a metric.
///
/// # Errors
///
/// * If the metric table cannot be loaded
/// * If the output cannot be written
pub fn choropleth(
    config: &NcMapConfig,
    args: &ChoroplethArgs<'_>,
    output: &Output<'_>,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = nc_map_boundary::load_metric_rows(args.metrics, &config.dataset.boundaries)?;

    let renderer = LeafletRenderer::new(config.render.clone());
    let document = renderer.render_choropleth(&rows, args.metric_field, args.label);

    write_document(&document, output)
}

/// Prints every region name and id.
///
/// # Errors
///
/// Returns an error if the boundary file cannot be loaded.
pub fn regions(config: &NcMapConfig, boundaries: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let table = load_boundaries(boundaries, &config.dataset.boundaries)?;
    for boundary in table.rows() {
        println!("{:>4}  {}", boundary.region_id.value(), boundary.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use nc_map_region::RegionError;

    use super::*;

    const COUNCILS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-118.26, 34.04], [-118.24, 34.04], [-118.24, 34.06], [-118.26, 34.06], [-118.26, 34.04]]]
                },
                "properties": { "name": "Downtown", "nc_id": 7, "count": 120 }
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-118.46, 34.22], [-118.44, 34.22], [-118.44, 34.24], [-118.46, 34.24], [-118.46, 34.22]]]
                },
                "properties": { "name": "Arleta", "nc_id": 9, "count": 40 }
            }
        ]
    }"#;

    const REQUESTS: &str = "\
nc,day,latitude,longitude
7,2020-01-02,34.05,-118.25
9,2020-01-01,34.23,-118.45
7,2020-01-01,34.06,-118.26
";

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    fn temp_file(name: &str, body: &str) -> PathBuf {
        let path = temp_path(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn heatmap_writes_page_with_daily_frames() {
        let boundaries = temp_file("nc_map_cli_heatmap_councils.geojson", COUNCILS);
        let observations = temp_file("nc_map_cli_heatmap_requests.csv", REQUESTS);
        let html = temp_path("nc_map_cli_heatmap_out.html");
        let json = temp_path("nc_map_cli_heatmap_out.json");

        heatmap(
            &NcMapConfig::default(),
            &HeatmapArgs {
                boundaries: &boundaries,
                observations: &observations,
                region: "Downtown",
            },
            &Output {
                html: &html,
                json: Some(&json),
            },
        )
        .unwrap();

        let page = std::fs::read_to_string(&html).unwrap();
        let document: MapDocument =
            serde_json::from_str(&std::fs::read_to_string(&json).unwrap()).unwrap();
        for path in [&boundaries, &observations, &html, &json] {
            std::fs::remove_file(path).unwrap();
        }

        assert!(page.contains("<title>311 requests: Downtown</title>"));
        assert!(page.contains("\"2020-01-01\",\"2020-01-02\""));
        assert_eq!(document.frame_count(), 2);
        assert_eq!(document.heatmap().unwrap().frames[0], vec![[34.06, -118.26]]);
    }

    #[test]
    fn heatmap_reports_unknown_region() {
        let boundaries = temp_file("nc_map_cli_unknown_councils.geojson", COUNCILS);
        let observations = temp_file("nc_map_cli_unknown_requests.csv", REQUESTS);
        let html = temp_path("nc_map_cli_unknown_out.html");

        let err = heatmap(
            &NcMapConfig::default(),
            &HeatmapArgs {
                boundaries: &boundaries,
                observations: &observations,
                region: "Atlantis",
            },
            &Output {
                html: &html,
                json: None,
            },
        )
        .unwrap_err();
        std::fs::remove_file(&boundaries).unwrap();
        std::fs::remove_file(&observations).unwrap();

        assert_eq!(
            err.downcast_ref::<RegionError>(),
            Some(&RegionError::RegionNotFound {
                name: "Atlantis".to_string()
            })
        );
        assert!(!html.exists());
    }

    #[test]
    fn choropleth_writes_page_with_legend() {
        let metrics = temp_file("nc_map_cli_choropleth_councils.geojson", COUNCILS);
        let html = temp_path("nc_map_cli_choropleth_out.html");

        choropleth(
            &NcMapConfig::default(),
            &ChoroplethArgs {
                metrics: &metrics,
                metric_field: "count",
                label: "Requests",
            },
            &Output {
                html: &html,
                json: None,
            },
        )
        .unwrap();

        let page = std::fs::read_to_string(&html).unwrap();
        std::fs::remove_file(&metrics).unwrap();
        std::fs::remove_file(&html).unwrap();

        assert!(page.contains("<title>311 Requests</title>"));
        assert!(page.contains("\"Neighborhood: \""));
        assert!(page.contains("\"Downtown\",\"7\",\"120\""));
    }

    #[test]
    fn regions_fails_on_missing_file() {
        let path = temp_path("nc_map_cli_missing_councils.geojson");
        assert!(regions(&NcMapConfig::default(), &path).is_err());
    }
}
