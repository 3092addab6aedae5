use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

use watermap::config::{CliOverrides, FileConfig, OutputFormat, RunConfig};
use watermap::data::water_points;
use watermap::domain::WaterRoute;
use watermap::render::{GeoJsonCollector, LeafletPage, RenderSummary, render_route};

/// Render Bogotá's rivers, lagoons and wetlands as a numbered route on a map
///
/// Examples:
///   # Write bogota_water.html with default settings
///   watermap
///
///   # Export the route as GeoJSON
///   watermap -f geojson -o route.geojson
///
///   # Tighter framing with a different tile server
///   watermap --padding 0.1 --tile-url "https://tile.openstreetmap.de/{z}/{x}/{y}.png"
///
///   # Use a config file
///   watermap --config my-map.toml
#[derive(Parser, Debug)]
#[command(name = "watermap")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches watermap.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file path (defaults to bogota_water.html or bogota_water.geojson)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum)]
    format: Option<OutputFormat>,

    /// Page title for HTML output
    #[arg(long)]
    title: Option<String>,

    /// Initial zoom level before the view is fitted to the route
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=22))]
    zoom: Option<u8>,

    /// Padding around the route when fitting the view, as a fraction of its extent
    #[arg(long)]
    padding: Option<f64>,

    /// Tile URL template, e.g. https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png
    #[arg(long)]
    tile_url: Option<String>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config: Option<FileConfig> = if let Some(ref config_path) = args.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Some(toml::from_str(&contents).context("Failed to parse config file")?)
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load()
    };

    let overrides = CliOverrides {
        output: args.output.clone(),
        format: args.format,
        title: args.title.clone(),
        zoom: args.zoom,
        padding: args.padding,
        tile_url: args.tile_url.clone(),
        verbose: args.verbose,
    };
    let RunConfig {
        settings,
        format,
        title,
        output: output_path,
        verbose,
    } = RunConfig::resolve(file_config.as_ref(), &overrides);

    println!("watermap - Water Route Map Generator");
    println!("====================================");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Format: {:?}", format);
        println!("  Title: {}", title);
        println!("  Container: #{}", settings.container_id);
        println!(
            "  Center: ({:.4}, {:.4})",
            settings.center.0, settings.center.1
        );
        println!("  Zoom: {}", settings.zoom);
        println!("  Padding: {}", settings.padding);
        println!("  Tiles: {}", settings.tiles.url_template);
        println!(
            "  Route style: {} weight {} opacity {}",
            settings.route_style.color, settings.route_style.weight, settings.route_style.opacity
        );
        println!("  Output: {}", output_path.display());
        println!();
    }

    let spinner = create_spinner("Ordering water points...");
    let start = Instant::now();
    let points = water_points();
    let route = WaterRoute::new(&points);
    spinner.finish_with_message(format!(
        "Ordered {} water points by latitude [{:.1}s]",
        route.len(),
        start.elapsed().as_secs_f32()
    ));

    if verbose {
        for (index, point) in route.iter().enumerate() {
            println!("  {:>2}. {}", index + 1, point);
        }
        println!("  Route length: {:.4} degrees", route.length());
    }

    let spinner = create_spinner("Rendering map...");
    let start = Instant::now();
    let summary = match format {
        OutputFormat::Html => {
            let mut page = LeafletPage::new();
            let summary =
                render_route(&mut page, &route, &settings).context("Failed to render map")?;
            page.write_html(&output_path, &title)
                .context("Failed to write HTML file")?;
            summary
        }
        OutputFormat::Geojson => {
            let mut collector = GeoJsonCollector::new();
            let summary = render_route(&mut collector, &route, &settings)
                .context("Failed to render map")?;
            collector
                .write_geojson(&output_path)
                .context("Failed to write GeoJSON file")?;
            summary
        }
    };
    spinner.finish_with_message(format!(
        "Drew {} markers and a {}-vertex route [{:.1}s]",
        summary.markers,
        summary.polyline_vertices,
        start.elapsed().as_secs_f32()
    ));

    if verbose {
        print_bounds(&summary);
    }

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );
    println!();
    println!("Output: {}", output_path.display());

    Ok(())
}

fn print_bounds(summary: &RenderSummary) {
    match summary.bounds {
        Some(bounds) => println!(
            "  View fitted to ({:.4}, {:.4}) -> ({:.4}, {:.4})",
            bounds.south, bounds.west, bounds.north, bounds.east
        ),
        None => println!("  Route is empty, view left at the initial center"),
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
