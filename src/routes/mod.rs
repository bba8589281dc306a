use crate::error::Error;
use crate::state::State;
use axum::http::HeaderValue;
use std::sync::Arc;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

pub mod api;
pub mod page;

pub fn app(state: Arc<State>, allow_origin: Option<HeaderValue>) -> NormalizePath<axum::Router> {
    let mut api = api::route();
    if let Some(origin) = allow_origin {
        api = api.layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::AllowOrigin::exact(origin))
                .allow_headers(tower_http::cors::Any),
        );
    }

    let page_compression_layer = CompressionLayer::new().br(true);

    NormalizePathLayer::trim_trailing_slash().layer(
        axum::Router::new()
            .nest("/api", api)
            .merge(page::route().layer(page_compression_layer))
            .fallback(|| async { Error::NotFound })
            .with_state(state),
    )
}
