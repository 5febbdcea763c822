//! One handler per consultant operation: validate presence of one field,
//! issue one storage call, map the outcome to a response.

use crate::error::AppError;
use crate::model::{json_is_empty, Consultant, NewConsultant, UpdateFields};
use crate::response::StatusMessage;
use crate::sql::Filter;
use crate::state::AppState;
use crate::store::ConsultantStore;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SkillsPayload {
    pub skills: Option<Value>,
}

pub async fn create(
    State(state): State<AppState>,
    body: Option<Json<NewConsultant>>,
) -> Result<Json<Consultant>, AppError> {
    let new = body.map(|Json(b)| b).unwrap_or_default();
    if new.name.as_deref().unwrap_or("").is_empty() {
        return Err(AppError::Validation("Name can not be empty!"));
    }
    let row = ConsultantStore::create(&state.pool, &new)
        .await
        .map_err(|e| e.or_fallback("Some error occurred while creating the consultant."))?;
    Ok(Json(row))
}

/// `?name=` filters by substring; no query returns every record.
pub async fn find_by_name(
    State(state): State<AppState>,
    Query(query): Query<NameQuery>,
) -> Result<Json<Vec<Consultant>>, AppError> {
    let filter = match query.name {
        Some(name) if !name.is_empty() => Filter::Contains("name", name),
        _ => Filter::None,
    };
    let rows = ConsultantStore::find(&state.pool, &filter)
        .await
        .map_err(|e| e.or_fallback("Some error occurred while retrieving consultants."))?;
    Ok(Json(rows))
}

/// Records whose skill set contains every queried skill.
pub async fn find_by_skills(
    State(state): State<AppState>,
    body: Option<Json<SkillsPayload>>,
) -> Result<Json<Vec<Consultant>>, AppError> {
    let payload = body.map(|Json(b)| b).unwrap_or_default();
    let skills = match payload.skills {
        Some(v) if !json_is_empty(&v) => v,
        _ => return Err(AppError::Validation("Skills can not be empty!")),
    };
    let rows = ConsultantStore::find(&state.pool, &Filter::AllOf("skills", skills))
        .await
        .map_err(|e| e.or_fallback("Some error occurred while retrieving consultants."))?;
    Ok(Json(rows))
}

pub async fn find_assigned(
    State(state): State<AppState>,
) -> Result<Json<Vec<Consultant>>, AppError> {
    let rows = ConsultantStore::find(&state.pool, &Filter::Equals("assigned", true))
        .await
        .map_err(|e| e.or_fallback("Some error occurred while retrieving consultants."))?;
    Ok(Json(rows))
}

/// Anything other than exactly one affected row is reported as a 200 status
/// message, never a 404.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Option<Json<UpdateFields>>,
) -> Result<Json<StatusMessage>, AppError> {
    let fields = body.map(|Json(b)| b).unwrap_or_default();
    let affected = match id.parse::<i64>() {
        Ok(numeric_id) => ConsultantStore::update_by_id(&state.pool, numeric_id, &fields)
            .await
            .map_err(|_| AppError::Persistence {
                message: format!("Error updating consultant with id={}", id),
            })?,
        Err(_) => 0,
    };
    let message = if affected == 1 {
        "Consultant was updated successfully.".to_string()
    } else {
        format!(
            "Cannot update consultant with id={}. Maybe consultant was not found or req.body is empty!",
            id
        )
    };
    Ok(Json(StatusMessage::new(message)))
}

/// Same no-op contract as update: zero matches is a 200 status message.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatusMessage>, AppError> {
    let affected = match id.parse::<i64>() {
        Ok(numeric_id) => ConsultantStore::delete_by_id(&state.pool, numeric_id)
            .await
            .map_err(|_| AppError::Persistence {
                message: format!("Could not delete Consultant with id={}", id),
            })?,
        Err(_) => 0,
    };
    let message = if affected == 1 {
        "Consultant was deleted successfully!".to_string()
    } else {
        format!(
            "Cannot delete Consultant with id={}. Maybe Consultant was not found!",
            id
        )
    };
    Ok(Json(StatusMessage::new(message)))
}

pub async fn delete_all(
    State(state): State<AppState>,
) -> Result<Json<StatusMessage>, AppError> {
    let removed = ConsultantStore::delete_all(&state.pool)
        .await
        .map_err(|e| e.or_fallback("Some error occurred while removing all consultants."))?;
    Ok(Json(StatusMessage::new(format!(
        "{} consultants were deleted successfully!",
        removed
    ))))
}
