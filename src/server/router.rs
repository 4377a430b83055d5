//! Route table.
//!
//! A command's routes are bound only when its capability is present, so a
//! request for an unconfigured capability gets a plain 404.

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use super::config::LimitsConfig;
use super::routes::{compare, domain, locations, system, text};
use super::state::AppState;
use crate::Gateway;

/// Build the HTTP router for `gateway`.
pub fn router(gateway: Gateway, limits: &LimitsConfig) -> Router {
    let registry = gateway.registry();
    let mut router = Router::new()
        .route("/health", get(system::health))
        .route("/capabilities", get(system::capabilities));

    if registry.tokenizers().is_present() {
        router = router
            .route("/tokenize", get(text::tokenize).post(text::tokenize))
            .route("/tokenize/{lang}", get(text::tokenize).post(text::tokenize));
    }
    if registry.language_detector().is_present() {
        router = router
            .route(
                "/detect-language",
                get(text::detect_language).post(text::detect_language),
            )
            .route(
                "/detect-language/per-token",
                get(text::detect_language_per_token).post(text::detect_language_per_token),
            );
    }
    if registry.parsers().is_present() {
        router = router
            .route("/parse", get(text::parse).post(text::parse))
            .route("/parse/{lang}", get(text::parse).post(text::parse));
    }
    if registry.classifiers().is_present() {
        router = router
            .route("/categorize", get(domain::categorize).post(domain::categorize))
            .route(
                "/categorize/{domain}",
                get(domain::categorize).post(domain::categorize),
            )
            .route(
                "/categorize/{lang}/{domain}",
                get(domain::categorize).post(domain::categorize),
            );
    }
    if registry.frame_extractors().is_present() {
        router = router
            .route("/frames", get(domain::frames).post(domain::frames))
            .route("/frames/{domain}", get(domain::frames).post(domain::frames));
    }
    if registry.labelers().is_present() {
        router = router
            .route("/label", post(domain::label))
            .route("/label/{domain}", post(domain::label))
            .route("/label/{lang}/{domain}", post(domain::label));
    }
    if registry.locations().is_present() {
        router = router
            .route("/locations", post(locations::locations))
            .route("/locations/{lang}", post(locations::locations));
    }
    if registry.comparators().is_present() {
        router = router
            .route("/compare", post(compare::compare))
            .route("/compare/{lang}", post(compare::compare));
    }
    if registry.summarizers().is_present() {
        router = router
            .route("/summarize", post(text::summarize))
            .route("/summarize/{lang}", post(text::summarize));
    }
    debug!(capabilities = ?gateway.capabilities(), "routes bound");

    router
        .layer(DefaultBodyLimit::max(limits.max_body_bytes))
        // One semaphore for the whole router; `Router::layer` wraps each route separately.
        .layer(GlobalConcurrencyLimitLayer::new(limits.max_concurrent_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(gateway))
}
