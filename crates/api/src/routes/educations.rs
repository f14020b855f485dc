//! Admin CRUD for education entries of the caller's profile.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::education::{CreateEducationRequest, EducationResponse, UpdateEducationRequest};
use domain::models::{Education, ListResponse};
use persistence::repositories::EducationRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::routes::profile::own_profile_id;

fn education_not_found() -> ApiError {
    ApiError::NotFound("Education not found".to_string())
}

/// GET /api/admin/educations
pub async fn list_educations(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<ListResponse<EducationResponse>>, ApiError> {
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    let rows = EducationRepository::new(state.pool.clone())
        .list_by_profile(profile_id)
        .await?;
    Ok(Json(ListResponse::new(
        rows.into_iter().map(|e| Education::from(e).into()).collect(),
    )))
}

/// POST /api/admin/educations
pub async fn create_education(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(request): Json<CreateEducationRequest>,
) -> Result<(StatusCode, Json<EducationResponse>), ApiError> {
    request.validate()?;
    let profile_id = own_profile_id(&state, admin.user().id).await?;

    let education: Education = EducationRepository::new(state.pool.clone())
        .create(profile_id, &request)
        .await?
        .into();
    info!(education_id = %education.id, "Education created");

    Ok((StatusCode::CREATED, Json(education.into())))
}

/// PUT /api/admin/educations/:id
pub async fn update_education(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEducationRequest>,
) -> Result<Json<EducationResponse>, ApiError> {
    request.validate()?;
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    let repo = EducationRepository::new(state.pool.clone());

    let existing: Education = repo
        .find(id, profile_id)
        .await?
        .ok_or_else(education_not_found)?
        .into();
    let dates = request.resolve_dates(&existing)?;

    let education: Education = repo
        .update(id, profile_id, &request, dates)
        .await?
        .ok_or_else(education_not_found)?
        .into();
    info!(education_id = %id, "Education updated");

    Ok(Json(education.into()))
}

/// DELETE /api/admin/educations/:id
pub async fn delete_education(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    if !EducationRepository::new(state.pool.clone())
        .delete(id, profile_id)
        .await?
    {
        return Err(education_not_found());
    }
    info!(education_id = %id, "Education deleted");
    Ok(StatusCode::NO_CONTENT)
}
