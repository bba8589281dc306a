use axum::ServiceExt;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod booking;
mod config;
mod error;
mod i18n;
mod loader;
mod paths;
mod query;
mod render;
mod routes;
mod state;
mod store;
mod theme;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run(config::Config::parse()).await {
        tracing::error!(%err, "fatal error");
        std::process::exit(1);
    }
}

async fn run(config: config::Config) -> error::Result<()> {
    let allow_origin = config.allow_origin_header()?;
    let state = std::sync::Arc::new(state::State::new(
        store::Store::new(&config.store),
        i18n::I18n::new(config.default_locale),
    ));

    if config.skip_prerender {
        tracing::info!("skipping pre-rendering");
    } else {
        let generated = state.prerender().await?;
        tracing::info!(generated, "pre-rendered static profile pages");
    }

    tracing::info!(bind = %config.bind, store = ?state.store.root(), "serving booking pages");
    let app = routes::app(state, allow_origin);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .await?;

    Ok(())
}
