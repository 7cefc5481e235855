pub mod handlers;
pub mod types;

use crate::{
    Result,
    config::{Config, CorsConfig, ServerConfig},
    detection::FaceDetectionService,
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, HeaderValue, Method},
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

// Allowance over the image cap for the JSON object wrapped around the payload.
const BODY_ENVELOPE_BYTES: usize = 4 * 1024;

pub async fn run(config: Config) -> Result<()> {
    let detector = FaceDetectionService::new(config.vision.clone(), &config.server);

    let app_state = handlers::AppState {
        detector: Arc::new(detector),
    };

    let app = router(app_state, &config.server);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Versioned API routes live under the configured prefix; the health probe
/// stays at the root.
pub fn router(state: handlers::AppState, server: &ServerConfig) -> Router {
    let api = Router::new().route("/detect-face-issues", post(handlers::detect_face_issues));

    // axum caps request bodies at 2 MB out of the box; the configured image
    // cap has to govern instead, with room for the JSON envelope around it.
    let body_limit = server.max_image_bytes.saturating_add(BODY_ENVELOPE_BYTES);

    Router::new()
        .route("/health", get(handlers::health))
        .nest(&server.api_prefix, api)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer(&server.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    if is_wildcard(&cors.origins) {
        layer = layer.allow_origin(Any);
    } else {
        layer = layer.allow_origin(AllowOrigin::list(parse_cors_list::<HeaderValue>(
            &cors.origins,
            "origin",
        )));
    }

    if is_wildcard(&cors.methods) {
        layer = layer.allow_methods(Any);
    } else {
        layer = layer.allow_methods(AllowMethods::list(parse_cors_list::<Method>(
            &cors.methods,
            "method",
        )));
    }

    if is_wildcard(&cors.headers) {
        layer = layer.allow_headers(Any);
    } else {
        layer = layer.allow_headers(AllowHeaders::list(parse_cors_list::<HeaderName>(
            &cors.headers,
            "header",
        )));
    }

    // Wildcards cannot be combined with credentials; the flag is only
    // honored when every list is explicit.
    if cors.credentials
        && !is_wildcard(&cors.origins)
        && !is_wildcard(&cors.methods)
        && !is_wildcard(&cors.headers)
    {
        layer = layer.allow_credentials(true);
    }

    layer
}

// Entries that do not parse are dropped from the policy, loudly.
fn parse_cors_list<T: FromStr>(values: &[String], kind: &str) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| match value.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!("Ignoring unparseable CORS {} entry: {:?}", kind, value);
                None
            }
        })
        .collect()
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value == "*")
}
