pub mod config;
pub mod error;
pub mod state;
pub mod relay;
pub mod routes;
pub mod submission;

use std::sync::Arc;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::relay::intake::WebhookIntake;
use crate::relay::log::TracingLog;
use crate::relay::Relay;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> Router {
    if config.intake.credentials.is_empty() {
        tracing::warn!("No intake credentials configured, submissions will be refused");
    }

    let relay = Relay::new(
        config.intake.credentials.clone(),
        Arc::new(WebhookIntake::new(config.intake.url.clone())),
        Arc::new(TracingLog),
    );

    build_router(&config, relay)
}

/// Assemble the HTTP surface around an already constructed relay.
pub fn build_router(config: &Config, relay: Relay) -> Router {
    let state: SharedState = Arc::new(AppState { relay });

    let router = Router::new()
        .merge(routes::contact_routes())
        .layer(RequestBodyLimitLayer::new(config.max_body_size))
        .layer(TraceLayer::new_for_http());

    let router = match cors_layer(&config.cors_origins) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    // Security headers
    router
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    if origins.is_empty() {
        return None;
    }

    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{o}'");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    Some(
        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
