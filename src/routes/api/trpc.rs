use crate::error::Error;
use crate::query::Query;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct QueryParams {
    input: String,
}

/// `GET /api/trpc/{procedure}?input={json}`
pub(super) async fn get(
    State(state): SharedState,
    Path(procedure): Path<String>,
    axum::extract::Query(params): axum::extract::Query<QueryParams>,
) -> Result<Json<serde_json::Value>, Error> {
    let query = Query::parse(&procedure, &params.input)?;

    match query.execute(&state.store).await? {
        Some(data) => Ok(Json(data)),
        None => Err(Error::NoSuchQuery(format!("{procedure}: no data"))),
    }
}
