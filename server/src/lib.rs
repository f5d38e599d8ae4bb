pub mod error;
pub mod routes;
pub mod session;

use axum::http::{HeaderValue, Method};
use duel_client::error::ClientError;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// CORS policy for the browser frontend.
pub fn cors(origins: &[String]) -> Result<CorsLayer, ClientError> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| ClientError::InvalidConfig {
                    key: "CORS_ORIGINS",
                    value: origin.clone(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any)
        .expose_headers(Any)
        .allow_credentials(false))
}
