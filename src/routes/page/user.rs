use crate::error::Error;
use crate::i18n::Locale;
use crate::query::QueryClient;
use crate::render::user::{parse_query, render_user_page, PageState};
use crate::state::SharedState;
use axum::extract::{RawQuery, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    locale: Locale,
    username: String,
    RawQuery(query): RawQuery,
) -> Result<Html<String>, Error> {
    let Some(props) = state.page_props(locale, &username).await? else {
        return Err(Error::NotFound);
    };

    let client = QueryClient::hydrate(state.store.clone(), props.trpc_state);
    let page = PageState::of(&client, &props.username);
    let query = parse_query(query.as_deref());

    let html = render_user_page(&client, &page, &state.i18n, locale, &props.username, &query);
    state.prefetch(page.prefetch_queries(&props.username));

    Ok(Html(html))
}
