//! Interactive menu for the map generator.
//!
//! Walks the user through picking a map type, the input files, and (for the
//! heatmap) a council from the loaded boundary list.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use nc_map_boundary_models::Metric;

use crate::commands::{self, ChoroplethArgs, HeatmapArgs, Output};
use crate::config::NcMapConfig;

fn prompt_path(prompt: &str, default: Option<&str>) -> Result<PathBuf, dialoguer::Error> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    Ok(PathBuf::from(input.interact_text()?.trim()))
}

fn prompt_json_output() -> Result<Option<PathBuf>, dialoguer::Error> {
    let write_json = Confirm::new()
        .with_prompt("Also write the map document as JSON?")
        .default(false)
        .interact()?;

    if write_json {
        Ok(Some(prompt_path("JSON output path", Some("map.json"))?))
    } else {
        Ok(None)
    }
}

/// Runs the interactive menu.
///
/// # Errors
///
/// Returns an error if user input fails or the chosen command fails.
pub fn run(config: &NcMapConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("Neighborhood Council 311 Maps");
    println!();

    let choices = &[
        "Animated heatmap of one council",
        "Choropleth of all councils",
        "List councils",
    ];

    let selection = Select::new()
        .with_prompt("What would you like to do?")
        .items(choices)
        .default(0)
        .interact()?;

    match selection {
        0 => run_heatmap(config),
        1 => run_choropleth(config),
        2 => {
            let boundaries = prompt_path("Boundaries GeoJSON", None)?;
            commands::regions(config, &boundaries)
        }
        _ => unreachable!(),
    }
}

fn run_heatmap(config: &NcMapConfig) -> Result<(), Box<dyn std::error::Error>> {
    let boundaries_path = prompt_path("Boundaries GeoJSON", None)?;
    let table = commands::load_boundaries(&boundaries_path, &config.dataset.boundaries)?;

    let names = table.names();
    if names.is_empty() {
        return Err(format!("No councils found in {}", boundaries_path.display()).into());
    }

    let idx = Select::new()
        .with_prompt("Council")
        .items(&names)
        .default(0)
        .interact()?;
    let region = names[idx].to_string();

    let observations = prompt_path("Requests (CSV or GeoJSON)", None)?;
    let output = prompt_path("Output HTML path", Some(commands::DEFAULT_HEATMAP_OUTPUT))?;
    let json = prompt_json_output()?;

    commands::heatmap(
        config,
        &HeatmapArgs {
            boundaries: &boundaries_path,
            observations: &observations,
            region: &region,
        },
        &Output {
            html: &output,
            json: json.as_deref(),
        },
    )
}

fn run_choropleth(config: &NcMapConfig) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = prompt_path("Council metrics GeoJSON", None)?;

    let metric_names: Vec<&str> = Metric::all()
        .iter()
        .copied()
        .map(Metric::field_name)
        .collect();
    let idx = Select::new()
        .with_prompt("Metric")
        .items(&metric_names)
        .default(0)
        .interact()?;
    let metric = Metric::all()[idx];

    let label: String = Input::new()
        .with_prompt("Legend label")
        .default(metric.label().to_string())
        .interact_text()?;

    let output = prompt_path("Output HTML path", Some(commands::DEFAULT_CHOROPLETH_OUTPUT))?;
    let json = prompt_json_output()?;

    commands::choropleth(
        config,
        &ChoroplethArgs {
            metrics: &metrics,
            metric_field: metric.field_name(),
            label: label.trim(),
        },
        &Output {
            html: &output,
            json: json.as_deref(),
        },
    )
}
