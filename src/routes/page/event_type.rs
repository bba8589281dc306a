use crate::booking::EventType;
use crate::error::Error;
use crate::query::Query;
use crate::render::event_type::render_event_type_page;
use crate::state::SharedState;
use axum::extract::State;
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    username: String,
    slug: String,
) -> Result<Html<String>, Error> {
    let query = Query::event_type_by_username(slug, username.clone());

    let Some(data) = state.cached_query(&query).await? else {
        return Err(Error::NotFound);
    };
    let event_type = serde_json::from_value::<EventType>(data)?;

    let locale = state.i18n.default_locale;
    Ok(Html(render_event_type_page(
        &state.i18n,
        locale,
        &username,
        &event_type,
    )))
}
