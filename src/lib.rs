use std::sync::Arc;

use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod clients;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;

use clients::SchoolClient;
use config::AppConfig;
use database::Stores;

/// Everything a request handler needs, injected at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub stores: Stores,
    pub school_client: SchoolClient,
}

/// Assemble the full router: the three service surfaces behind the
/// gateway token filter, with CORS and request tracing on the outside.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(school_routes())
        .merge(student_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::jwt_gateway,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;
    use handlers::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/protected", get(auth::protected))
}

fn school_routes() -> Router<AppState> {
    use handlers::schools;

    Router::new()
        .route(
            "/api/schools",
            get(schools::list_schools).post(schools::create_school),
        )
        .route(
            "/api/schools/:id",
            get(schools::get_school).delete(schools::delete_school),
        )
}

fn student_routes() -> Router<AppState> {
    use handlers::students;

    Router::new()
        .route(
            "/api/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/api/students/:id",
            get(students::get_student).delete(students::delete_student),
        )
}

async fn health() -> axum::response::Json<Value> {
    axum::response::Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now()
        }
    }))
}
