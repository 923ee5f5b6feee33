use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::database::models::{NewSchool, School};
use crate::error::ApiError;
use crate::AppState;

/// GET /api/schools - list all schools
pub async fn list_schools(State(state): State<AppState>) -> Result<Json<Vec<School>>, ApiError> {
    let schools = state.stores.schools.list().await?;
    Ok(Json(schools))
}

/// GET /api/schools/:id - fetch one school or 404
pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<School>, ApiError> {
    state
        .stores
        .schools
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("school {} not found", id)))
}

/// POST /api/schools - persist a school; the store assigns the id
pub async fn create_school(
    State(state): State<AppState>,
    Json(school): Json<NewSchool>,
) -> Result<Json<School>, ApiError> {
    let saved = state.stores.schools.insert(school).await?;
    tracing::info!(school_id = saved.id, name = %saved.name, "created school");
    Ok(Json(saved))
}

/// DELETE /api/schools/:id - idempotent, 200 with no body either way
pub async fn delete_school(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.stores.schools.delete(id).await?;
    Ok(StatusCode::OK)
}
