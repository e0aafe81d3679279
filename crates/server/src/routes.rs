use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Deserializer};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::{Health, WELCOME_MESSAGE};

use crate::openapi;

pub mod groups;
pub mod users;

/// Shared handler state. The store handle is built once at startup and
/// cloned into each request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

/// Maps a present key (even `null`) to `Some`, so a missing key stays `None`.
/// Used on nullable update fields where `null` clears the stored value.
pub(crate) fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "Welcome text", body = String, content_type = "text/plain")))]
pub async fn index() -> &'static str {
    WELCOME_MESSAGE
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up")))]
pub async fn health() -> Json<Health> {
    Json(Health::ok())
}

/// Build the full application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi::openapi_json));

    let group_routes = Router::new()
        .route("/groups", get(groups::list_groups).post(groups::create_group))
        .route(
            "/groups/:id",
            get(groups::get_group).put(groups::update_group).delete(groups::delete_group),
        );

    let user_routes = Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        );

    public
        .merge(group_routes)
        .merge(user_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
