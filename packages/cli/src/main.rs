#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line tool for showing `GeoJSON` features on a map.
//!
//! ```text
//! geojson_show serve [--map-provider protomaps --map-tile-uri file:///tiles/sfo.pmtiles] a.geojson b.geojson
//! cat a.geojson | geojson_show serve --label name -
//! geojson_show bbox a.geojson
//! geojson_show render a.geojson
//! geojson_show render --url http://localhost:8080/
//! ```
//!
//! If the only path given is `-`, features are read from stdin.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use geojson_show_features::bounds::collection_bbox;
use geojson_show_features::input::load_features;
use geojson_show_format::PrettyJsonFormatter;
use geojson_show_map::headless::RenderedMap;
use geojson_show_map::source::{HttpSource, InMemorySource, MapSource};
use geojson_show_map_models::MapProvider;
use geojson_show_server::config::{OSM_TILE_URL, ServerOptions};
use geojson_show_server::{build_map_config, load_style, run_server};
use geojson_show_server_models::ApiBounds;

#[derive(Parser)]
#[command(
    name = "geojson_show",
    about = "Show GeoJSON features on an interactive map"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the features and a map page showing them
    Serve {
        #[command(flatten)]
        map: MapArgs,
        /// Address to bind
        #[arg(long, default_value = "localhost")]
        bind_addr: String,
        /// Port to listen on; 0 picks any free port
        #[arg(long, default_value_t = 0)]
        port: u16,
        /// GeoJSON files to show ("-" alone reads stdin)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the bounding box and viewport corners of the features
    Bbox {
        /// GeoJSON files to measure ("-" alone reads stdin)
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Print the rendered map as JSON
    Render {
        #[command(flatten)]
        map: MapArgs,
        /// Render what a running server serves instead of local files
        #[arg(long, conflicts_with = "paths")]
        url: Option<String>,
        /// GeoJSON files to render ("-" alone reads stdin)
        #[arg(required_unless_present = "url")]
        paths: Vec<PathBuf>,
    },
}

#[derive(Args)]
struct MapArgs {
    /// Basemap provider (leaflet or protomaps)
    #[arg(long, default_value = "leaflet")]
    map_provider: MapProvider,
    /// Tile URL template; for protomaps also file:///path.pmtiles or api://KEY
    #[arg(long, default_value = OSM_TILE_URL)]
    map_tile_uri: String,
    /// Protomaps theme label
    #[arg(long, default_value = "white")]
    protomaps_theme: String,
    /// Style for geometries: a JSON string or a path on disk
    #[arg(long)]
    style: Option<String>,
    /// Style for point markers: a JSON string or a path on disk
    #[arg(long)]
    point_style: Option<String>,
    /// Feature property to list in popups (repeatable)
    #[arg(long = "label")]
    labels: Vec<String>,
}

impl MapArgs {
    fn into_options(self) -> Result<ServerOptions, Box<dyn std::error::Error>> {
        Ok(ServerOptions {
            provider: self.map_provider,
            tile_uri: self.map_tile_uri,
            protomaps_theme: self.protomaps_theme,
            style: self.style.as_deref().map(load_style).transpose()?,
            point_style: self.point_style.as_deref().map(load_style).transpose()?,
            label_properties: self.labels,
            ..ServerOptions::default()
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            map,
            bind_addr,
            port,
            paths,
        } => {
            let options = ServerOptions {
                bind_addr,
                port,
                ..map.into_options()?
            };
            let features = load_features(&paths)?;

            // The server uses actix-web's runtime, so run it on a blocking
            // thread to avoid nesting runtimes.
            tokio::task::spawn_blocking(move || {
                actix_web::rt::System::new().block_on(run_server(&options, features))
            })
            .await??;
        }
        Commands::Bbox { paths } => {
            let features = load_features(&paths)?;
            let bounds = ApiBounds::from(collection_bbox(features.collection()));
            println!("{}", serde_json::to_string_pretty(&bounds)?);
        }
        Commands::Render { map, url, paths } => {
            let source: Box<dyn MapSource> = if let Some(url) = url {
                Box::new(HttpSource::new(&url)?)
            } else {
                let options = map.into_options()?;
                let setup = build_map_config(&options)?;
                let features = load_features(&paths)?;
                Box::new(InMemorySource::new(setup.map_config, features))
            };

            let rendered =
                RenderedMap::load(source.as_ref(), &PrettyJsonFormatter::default()).await?;
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
    }

    Ok(())
}
