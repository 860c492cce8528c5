use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum BonjourError {
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

// Callers get a bare 500; the cause only goes to the logs.
impl IntoResponse for BonjourError {
    fn into_response(self) -> Response {
        error!("{}", self);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
