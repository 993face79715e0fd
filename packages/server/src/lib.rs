#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for geojson-show.
//!
//! Serves the map page and its script, the merged features at
//! `/features.geojson`, the map configuration at `/map.json`, and a
//! headless render of both at `/render.json`. Local Protomaps archives
//! are served under `/tiles`.

pub mod config;
mod handlers;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use geojson_show_features::FeatureSet;
use geojson_show_map_models::MapConfig;
use thiserror::Error;

pub use config::{ConfigError, ServerOptions, TileSetup, build_map_config, load_style};

/// Errors that stop the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The options could not be turned into a map configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Binding or running the HTTP server failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// Every loaded feature, in input order.
    pub features: FeatureSet,
    /// The map configuration document.
    pub map_config: MapConfig,
}

/// Registers the page and document routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/javascript/show.js", web::get().to(handlers::show_js))
        .route("/features.geojson", web::get().to(handlers::features))
        .route("/map.json", web::get().to(handlers::map_config))
        .route("/render.json", web::get().to(handlers::render))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/bounds", web::get().to(handlers::bounds)),
        );
}

/// Serves `features` until the server is stopped.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `actix_web::rt::System`).
///
/// # Errors
///
/// Returns [`ServerError`] if the options are invalid or the server fails
/// to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(
    options: &ServerOptions,
    features: FeatureSet,
) -> Result<(), ServerError> {
    let TileSetup {
        map_config,
        tiles_dir,
    } = build_map_config(options)?;

    log::info!(
        "Serving {} features with the {} map provider",
        features.len(),
        map_config.provider
    );

    let state = web::Data::new(AppState {
        features,
        map_config,
    });

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure);

        match &tiles_dir {
            Some(dir) => app.service(Files::new(config::TILES_ROUTE, dir)),
            None => app,
        }
    })
    .bind((options.bind_addr.as_str(), options.port))?;

    for addr in server.addrs() {
        log::info!("Features are viewable at http://{addr}");
    }

    server.run().await?;

    Ok(())
}
