use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("not found")]
    NotFound,

    /// 404 from the query API, answered in plain text
    #[error("{0}")]
    NoSuchQuery(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound | Error::NoSuchQuery(_) => StatusCode::NOT_FOUND,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Io(_) | Error::Json(_) | Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Error::NotFound => (status, Html(crate::render::not_found_page())).into_response(),
            Error::BadRequest(reason) | Error::NoSuchQuery(reason) => {
                (status, reason.clone()).into_response()
            }
            _ => {
                tracing::error!(error = %self, "request failed");
                status.into_response()
            }
        }
    }
}
