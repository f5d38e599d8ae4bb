use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use duel_client::error::ClientError;
use tracing::error;

/// Handler failure. Always answered with a bare 500.
#[derive(Debug)]
pub struct ApiError(pub ClientError);

impl From<ClientError> for ApiError {
    fn from(e: ClientError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}
