use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod account;
pub mod auth;
pub mod category;
pub mod news_article;
pub mod tag;

use auth::{Policy, ServerState};

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: anonymous auth endpoints, the
/// policy-guarded resource groups and the API docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login));

    let profile = Router::new()
        .route("/api/auth/profile", get(auth::profile))
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), Policy::Authenticated),
            auth::require_policy,
        ));

    let admin = account::routes().route_layer(middleware::from_fn_with_state(
        (state.clone(), Policy::AdminOnly),
        auth::require_policy,
    ));

    let staff = Router::new()
        .merge(category::routes())
        .merge(tag::routes())
        .merge(news_article::routes())
        .route_layer(middleware::from_fn_with_state(
            (state.clone(), Policy::StaffOnly),
            auth::require_policy,
        ));

    public
        .merge(profile)
        .merge(admin)
        .merge(staff)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
