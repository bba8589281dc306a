use crate::error::Error;
use crate::state::NestedRouter;
use axum::routing::get;

mod trpc;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/trpc/:procedure", get(trpc::get))
        .fallback(|uri: axum::http::Uri| async move {
            Error::NoSuchQuery(format!("no such endpoint {}", uri.path()))
        })
}
