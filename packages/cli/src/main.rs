#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map generator for neighborhood council 311 requests.
//!
//! `nc_map heatmap` animates one council's requests day by day over its
//! outline, `nc_map choropleth` colors every council by a request metric, and
//! `nc_map regions` lists the councils a boundary file knows about. Run
//! without a subcommand for an interactive menu.

mod commands;
mod config;
mod interactive;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nc_map_boundary_models::Metric;

use crate::commands::{ChoroplethArgs, HeatmapArgs, Output};
use crate::config::NcMapConfig;

#[derive(Parser)]
#[command(name = "nc_map", about = "Neighborhood council 311 request maps")]
struct Cli {
    /// TOML config file (falls back to `NC_MAP_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Animated daily heatmap of one council's requests
    Heatmap {
        /// Council boundaries (`GeoJSON`)
        #[arg(long)]
        boundaries: PathBuf,

        /// Requests (CSV or `GeoJSON` points)
        #[arg(long)]
        observations: PathBuf,

        /// Council name, matched exactly
        #[arg(long)]
        region: String,

        /// Output HTML path
        #[arg(long, default_value = commands::DEFAULT_HEATMAP_OUTPUT)]
        output: PathBuf,

        /// Also write the map document as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Choropleth of every council colored by a metric
    Choropleth {
        /// Council table with metric properties (`GeoJSON`)
        #[arg(long)]
        metrics: PathBuf,

        /// Metric to color by
        #[arg(long, default_value_t = Metric::Count)]
        metric: Metric,

        /// Legend and tooltip label (defaults to the metric name)
        #[arg(long)]
        label: Option<String>,

        /// Output HTML path
        #[arg(long, default_value = commands::DEFAULT_CHOROPLETH_OUTPUT)]
        output: PathBuf,

        /// Also write the map document as JSON
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// List council names and ids
    Regions {
        /// Council boundaries (`GeoJSON`)
        #[arg(long)]
        boundaries: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = NcMapConfig::load(cli.config.as_deref())?;

    match cli.command {
        None => interactive::run(&config)?,
        Some(Commands::Heatmap {
            boundaries,
            observations,
            region,
            output,
            json,
        }) => commands::heatmap(
            &config,
            &HeatmapArgs {
                boundaries: &boundaries,
                observations: &observations,
                region: &region,
            },
            &Output {
                html: &output,
                json: json.as_deref(),
            },
        )?,
        Some(Commands::Choropleth {
            metrics,
            metric,
            label,
            output,
            json,
        }) => commands::choropleth(
            &config,
            &ChoroplethArgs {
                metrics: &metrics,
                metric_field: metric.field_name(),
                label: label.as_deref().unwrap_or_else(|| metric.label()),
            },
            &Output {
                html: &output,
                json: json.as_deref(),
            },
        )?,
        Some(Commands::Regions { boundaries }) => commands::regions(&config, &boundaries)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn command_line_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_choropleth_metric() {
        let cli = Cli::try_parse_from([
            "nc_map",
            "choropleth",
            "--metrics",
            "councils.geojson",
            "--metric",
            "density",
        ])
        .unwrap();

        let Some(Commands::Choropleth { metric, label, output, .. }) = cli.command else {
            panic!("expected choropleth command");
        };
        assert_eq!(metric, Metric::Density);
        assert_eq!(label, None);
        assert_eq!(output, PathBuf::from(commands::DEFAULT_CHOROPLETH_OUTPUT));
    }

    #[test]
    fn rejects_unknown_metric() {
        let result = Cli::try_parse_from([
            "nc_map",
            "choropleth",
            "--metrics",
            "councils.geojson",
            "--metric",
            "volume",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn no_subcommand_selects_interactive_mode() {
        let cli = Cli::try_parse_from(["nc_map", "--config", "nc_map.toml"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, Some(PathBuf::from("nc_map.toml")));
    }
}
