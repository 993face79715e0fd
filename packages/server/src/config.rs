//! Server options and the map configuration document derived from them.

use std::path::{Path, PathBuf};

use geojson_show_map::bootstrap::DEFAULT_PROTOMAPS_THEME;
use geojson_show_map_models::{MapConfig, MapProvider, PathStyle, ProtomapsConfig};
use thiserror::Error;

/// Default raster tile URL template.
pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Protomaps API tile URL template; `{key}` is replaced with the API key.
pub const PROTOMAPS_API_TILE_URL: &str =
    "https://api.protomaps.com/tiles/v3/{z}/{x}/{y}.mvt?key={key}";

/// Route local Protomaps archives are served under.
pub const TILES_ROUTE: &str = "/tiles";

/// Errors building the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The Protomaps tile URI did not parse or names no file.
    #[error("Failed to parse Protomaps tile URL '{uri}': {message}")]
    TileUri {
        /// The offending URI.
        uri: String,
        /// What is wrong with it.
        message: String,
    },

    /// A local tile path could not be made absolute.
    #[error("Failed to determine absolute path for '{path}': {source}")]
    TilePath {
        /// The path from the URI.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A style definition was blank.
    #[error("Empty style definition")]
    EmptyStyle,

    /// A style definition file could not be read.
    #[error("Failed to read style definition {path}: {source}")]
    StyleFile {
        /// Path to the definition.
        path: String,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A style definition was not valid JSON.
    #[error("Invalid style definition: {0}")]
    StyleJson(#[from] serde_json::Error),
}

/// Parses a style definition.
///
/// A definition starting with `{` is inline JSON; anything else is a path
/// to a JSON file.
///
/// # Errors
///
/// Returns [`ConfigError`] if the definition is blank, the file cannot be
/// read, or the JSON is invalid.
pub fn load_style(raw: &str) -> Result<PathStyle, ConfigError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ConfigError::EmptyStyle);
    }

    if raw.starts_with('{') {
        return Ok(serde_json::from_str(raw)?);
    }

    let body = std::fs::read_to_string(raw).map_err(|source| ConfigError::StyleFile {
        path: raw.to_string(),
        source,
    })?;

    Ok(serde_json::from_str(&body)?)
}

/// Everything needed to start the server.
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Basemap provider.
    pub provider: MapProvider,
    /// Tile URL template, or for Protomaps a `file://` or `api://` URI.
    pub tile_uri: String,
    /// Protomaps theme label.
    pub protomaps_theme: String,
    /// Style for non-point geometries.
    pub style: Option<PathStyle>,
    /// Style for point markers.
    pub point_style: Option<PathStyle>,
    /// Properties listed in feature popups.
    pub label_properties: Vec<String>,
    /// Address to bind.
    pub bind_addr: String,
    /// Port to bind; 0 picks any free port.
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            provider: MapProvider::Leaflet,
            tile_uri: OSM_TILE_URL.to_string(),
            protomaps_theme: DEFAULT_PROTOMAPS_THEME.to_string(),
            style: None,
            point_style: None,
            label_properties: vec![],
            bind_addr: "localhost".to_string(),
            port: 0,
        }
    }
}

/// The map configuration document plus any local tile directory to serve.
#[derive(Debug, Clone)]
pub struct TileSetup {
    /// Document served at `/map.json`.
    pub map_config: MapConfig,
    /// Directory served at [`TILES_ROUTE`], for local Protomaps archives.
    pub tiles_dir: Option<PathBuf>,
}

/// Builds the map configuration document for `options`.
///
/// For Protomaps, a `file://` URI serves the archive's directory at
/// [`TILES_ROUTE`] and points the tile URL at the archive there, and an
/// `api://KEY` URI becomes the Protomaps API template with the key filled
/// in. Other URIs are used as-is.
///
/// # Errors
///
/// Returns [`ConfigError`] if a Protomaps tile URI cannot be resolved.
pub fn build_map_config(options: &ServerOptions) -> Result<TileSetup, ConfigError> {
    let mut map_config = MapConfig {
        provider: options.provider.to_string(),
        tile_url: options.tile_uri.clone(),
        protomaps: None,
        style: options.style.clone(),
        point_style: options.point_style.clone(),
        label_properties: options.label_properties.clone(),
    };
    let mut tiles_dir = None;

    if options.provider == MapProvider::Protomaps {
        let url = reqwest::Url::parse(&options.tile_uri).map_err(|e| ConfigError::TileUri {
            uri: options.tile_uri.clone(),
            message: e.to_string(),
        })?;

        match url.scheme() {
            "file" => {
                let (dir, file_name) = split_archive_path(url.path())?;
                log::info!("Serving Protomaps tiles from {}", dir.display());
                map_config.tile_url = format!("{TILES_ROUTE}/{file_name}");
                tiles_dir = Some(dir);
            }
            "api" => {
                let key = url.host_str().unwrap_or_default();
                map_config.tile_url = PROTOMAPS_API_TILE_URL.replacen("{key}", key, 1);
            }
            _ => {}
        }

        map_config.protomaps = Some(ProtomapsConfig {
            theme: options.protomaps_theme.clone(),
        });
    }

    Ok(TileSetup {
        map_config,
        tiles_dir,
    })
}

fn split_archive_path(path: &str) -> Result<(PathBuf, String), ConfigError> {
    let absolute = std::path::absolute(Path::new(path)).map_err(|source| ConfigError::TilePath {
        path: path.to_string(),
        source,
    })?;

    let file_name = absolute
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ConfigError::TileUri {
            uri: path.to_string(),
            message: "no archive file name".to_string(),
        })?;

    let dir = absolute
        .parent()
        .map_or_else(|| PathBuf::from("/"), Path::to_path_buf);

    Ok((dir, file_name))
}
