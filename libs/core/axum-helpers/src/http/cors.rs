use axum::http::{
    HeaderName, HeaderValue, Method,
    header::{ACCEPT, CONTENT_TYPE, LOCATION},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Response header carrying the id of a deleted resource.
pub const ENTITY_HEADER: HeaderName = HeaderName::from_static("entity");

/// CORS policy for the API.
///
/// - Methods: GET, POST, PUT, DELETE
/// - Request headers: Content-Type, Accept
/// - Exposed headers: Location, Entity
/// - Credentials allowed
///
/// An empty `allowed_origins` mirrors the request's `Origin` back.
pub fn create_cors_layer(allowed_origins: &[HeaderValue]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(allowed_origins.iter().cloned())
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, ACCEPT])
        .expose_headers([LOCATION, ENTITY_HEADER])
        .allow_credentials(true)
}

/// Parse a comma-separated origin list such as `CORS_ALLOWED_ORIGIN`.
pub fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<HeaderValue>()
                .map_err(|e| format!("invalid origin '{}': {}", s, e))
        })
        .collect()
}
