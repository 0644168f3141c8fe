use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use resourcery_auth::require_auth;

use crate::{
    handlers::{
        docs::{api_docs, openapi_spec},
        health::{healthz, readyz},
        resources::{
            create_resource, delete_resource, get_resource, list_resources, update_resource,
        },
        tokens::{issue_tokens, refresh_tokens},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // CORS configuration for API endpoints
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // Mutating resource routes sit behind the bearer-token middleware,
    // applied here at route-registration time.
    let protected_routes = Router::new()
        .route(
            "/resources/{id}",
            axum::routing::patch(update_resource).delete(delete_resource),
        )
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_auth,
        ));

    let public_routes = Router::new()
        // Resource routes
        .route("/resources", get(list_resources).post(create_resource))
        .route("/resources/{id}", get(get_resource))
        // Token routes
        .route("/tokens", get(issue_tokens))
        .route("/tokens/refresh", get(refresh_tokens))
        // Health probes
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // API documentation
        .route("/docs", get(api_docs))
        .route("/openapi.json", get(openapi_spec));

    let api_routes = public_routes.merge(protected_routes).layer(cors);

    // Main application router
    Router::new()
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}
