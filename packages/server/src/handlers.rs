//! HTTP handler functions for the map page and its documents.

use actix_web::{HttpResponse, web};
use geojson_show_features::bounds::collection_bbox;
use geojson_show_format::PrettyJsonFormatter;
use geojson_show_map::headless::RenderedMap;
use geojson_show_map::source::InMemorySource;
use geojson_show_server_models::{ApiBounds, ApiError, ApiHealth};

use crate::AppState;

const INDEX_HTML: &str = include_str!("../www/index.html");
const SHOW_JS: &str = include_str!("../www/javascript/show.js");

/// `GET /`
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// `GET /javascript/show.js`
pub async fn show_js() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript; charset=utf-8")
        .body(SHOW_JS)
}

/// `GET /features.geojson`
pub async fn features(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/geo+json")
        .json(&state.features)
}

/// `GET /map.json`
pub async fn map_config(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.map_config)
}

/// `GET /render.json`
///
/// Loads the served documents into a headless map and returns what it
/// painted: view, basemap, layers and display entries.
pub async fn render(state: web::Data<AppState>) -> HttpResponse {
    let source = InMemorySource::new(state.map_config.clone(), state.features.clone());

    match RenderedMap::load(&source, &PrettyJsonFormatter::default()).await {
        Ok(rendered) => HttpResponse::Ok().json(&rendered),
        Err(e) => {
            log::error!("Failed to render map: {e}");
            HttpResponse::InternalServerError().json(ApiError {
                message: e.to_string(),
            })
        }
    }
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        feature_count: state.features.len(),
    })
}

/// `GET /api/bounds`
pub async fn bounds(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiBounds::from(collection_bbox(state.features.collection())))
}
