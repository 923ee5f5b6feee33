use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde::Serialize;

use crate::database::models::{NewStudent, School, Student};
use crate::error::ApiError;
use crate::middleware::auth::bearer_token;
use crate::AppState;

/// Composite read result. `school` is null whenever the referenced
/// school is gone or the school service cannot be reached; the student
/// half is always present.
#[derive(Debug, Serialize)]
pub struct StudentWithSchool {
    pub student: Student,
    pub school: Option<School>,
}

/// GET /api/students - list all students
pub async fn list_students(State(state): State<AppState>) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.stores.students.list().await?;
    Ok(Json(students))
}

/// GET /api/students/:id - composite read: the student plus its school,
/// fetched live from the school service
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<StudentWithSchool>, ApiError> {
    let student = state
        .stores
        .students
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("student {} not found", id)))?;

    let bearer = bearer_token(&headers);
    let school = state
        .school_client
        .get_school(student.school_id, bearer.as_deref())
        .await;

    Ok(Json(StudentWithSchool { student, school }))
}

/// POST /api/students - persist a student; the store assigns the id
pub async fn create_student(
    State(state): State<AppState>,
    Json(student): Json<NewStudent>,
) -> Result<Json<Student>, ApiError> {
    let saved = state.stores.students.insert(student).await?;
    tracing::info!(student_id = %saved.id, name = %saved.name, "created student");
    Ok(Json(saved))
}

/// DELETE /api/students/:id - idempotent, 200 with no body either way
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.stores.students.delete(&id).await?;
    Ok(StatusCode::OK)
}
