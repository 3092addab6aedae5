use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

use crate::data::{BOGOTA_CENTER, BOGOTA_ZOOM};
use crate::render::{PolylineStyle, TileLayerOptions};

pub const DEFAULT_CONTAINER_ID: &str = "map";
pub const DEFAULT_TITLE: &str = "Ríos y humedales de Bogotá";
pub const DEFAULT_PADDING: f64 = 0.5;

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Standalone Leaflet page
    #[default]
    Html,
    /// GeoJSON FeatureCollection
    Geojson,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Html => "html",
            OutputFormat::Geojson => "geojson",
        }
    }
}

fn default_url_template() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}
fn default_max_zoom() -> u8 {
    19
}
fn default_attribution() -> String {
    "&copy; OpenStreetMap contributors".to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TileConfig {
    #[serde(default = "default_url_template")]
    pub url_template: String,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: u8,
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            max_zoom: default_max_zoom(),
            attribution: default_attribution(),
        }
    }
}

impl TileConfig {
    pub fn options(&self) -> TileLayerOptions {
        TileLayerOptions {
            max_zoom: self.max_zoom,
            attribution: self.attribution.clone(),
        }
    }
}

fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub container_id: Option<String>,
    /// [lat, lng]
    #[serde(default)]
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub zoom: Option<u8>,
    #[serde(default)]
    pub padding: Option<f64>,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub tiles: Option<TileConfig>,
    #[serde(default)]
    pub route_style: Option<PolylineStyle>,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("watermap.toml"));
    paths.push(PathBuf::from(".watermap.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("watermap").join("config.toml"));
        paths.push(config_dir.join("watermap.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".watermap.toml"));
        paths.push(home.join(".config").join("watermap").join("config.toml"));
    }

    paths
}

/// Everything the rendering driver needs to draw a route
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub container_id: String,
    /// (lat, lng) of the initial view
    pub center: (f64, f64),
    pub zoom: u8,
    pub tiles: TileConfig,
    pub route_style: PolylineStyle,
    /// Fraction of the route's extent added on every side when fitting the view
    pub padding: f64,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            center: BOGOTA_CENTER,
            zoom: BOGOTA_ZOOM,
            tiles: TileConfig::default(),
            route_style: PolylineStyle::default(),
            padding: DEFAULT_PADDING,
        }
    }
}

impl MapSettings {
    /// Defaults overlaid with whatever the config file sets
    pub fn from_file(file: Option<&FileConfig>) -> Self {
        let mut settings = Self::default();
        let Some(file) = file else {
            return settings;
        };

        if let Some(ref id) = file.container_id {
            settings.container_id = id.clone();
        }
        if let Some([lat, lng]) = file.center {
            settings.center = (lat, lng);
        }
        if let Some(zoom) = file.zoom {
            settings.zoom = zoom;
        }
        if let Some(padding) = file.padding {
            settings.padding = padding;
        }
        if let Some(ref tiles) = file.tiles {
            settings.tiles = tiles.clone();
        }
        if let Some(ref style) = file.route_style {
            settings.route_style = style.clone();
        }
        settings
    }

    /// Apply command-line values on top of these settings
    pub fn with_overrides(mut self, overrides: &CliOverrides) -> Self {
        if let Some(zoom) = overrides.zoom {
            self.zoom = zoom;
        }
        if let Some(padding) = overrides.padding {
            self.padding = padding;
        }
        if let Some(ref url) = overrides.tile_url {
            self.tiles.url_template = url.clone();
        }
        self
    }
}

/// Values given on the command line. `None` (or `false`) means not given.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub title: Option<String>,
    pub zoom: Option<u8>,
    pub padding: Option<f64>,
    pub tile_url: Option<String>,
    pub verbose: bool,
}

/// Fully resolved run options.
///
/// Precedence per key: command line, then config file, then built-in default.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub settings: MapSettings,
    pub format: OutputFormat,
    pub title: String,
    pub output: PathBuf,
    pub verbose: bool,
}

impl RunConfig {
    pub fn resolve(file: Option<&FileConfig>, overrides: &CliOverrides) -> Self {
        let settings = MapSettings::from_file(file).with_overrides(overrides);

        let format = overrides
            .format
            .or_else(|| file.and_then(|c| c.format))
            .unwrap_or_default();
        let title = overrides
            .title
            .clone()
            .or_else(|| file.and_then(|c| c.title.clone()))
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let output = overrides
            .output
            .clone()
            .or_else(|| file.and_then(|c| c.output.clone()))
            .unwrap_or_else(|| default_output(format));
        let verbose = overrides.verbose || file.map(|c| c.verbose).unwrap_or(false);

        Self {
            settings,
            format,
            title,
            output,
            verbose,
        }
    }
}

/// Output path used when neither the command line nor the file names one
pub fn default_output(format: OutputFormat) -> PathBuf {
    PathBuf::from(format!("bogota_water.{}", format.extension()))
}
