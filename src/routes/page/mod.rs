use crate::error::Error;
use crate::i18n::Locale;
use crate::state::{NestedRouter, SharedState};
use axum::extract::{Path, RawQuery, State};
use axum::response::Html;
use axum::routing::get;

mod event_type;
mod user;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/:user", get(user_in_default_locale))
        .route("/:first/:second", get(locale_user_or_event_type))
}

async fn user_in_default_locale(
    state: SharedState,
    Path(username): Path<String>,
    query: RawQuery,
) -> Result<Html<String>, Error> {
    let locale = state.i18n.default_locale;
    user::get(state, locale, username, query).await
}

/// `/{locale}/{user}` when the first segment is a supported locale,
/// `/{user}/{slug}` otherwise.
async fn locale_user_or_event_type(
    State(state): SharedState,
    Path((first, second)): Path<(String, String)>,
    query: RawQuery,
) -> Result<Html<String>, Error> {
    match Locale::from_code(&first) {
        Some(locale) => user::get(State(state), locale, second, query).await,
        None => event_type::get(State(state), first, second).await,
    }
}
