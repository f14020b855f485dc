//! Admin CRUD for work experience entries of the caller's profile.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::experience::{
    CreateExperienceRequest, ExperienceResponse, UpdateExperienceRequest,
};
use domain::models::{Experience, ListResponse};
use persistence::repositories::ExperienceRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::routes::profile::own_profile_id;

fn experience_not_found() -> ApiError {
    ApiError::NotFound("Experience not found".to_string())
}

/// GET /api/admin/experiences
pub async fn list_experiences(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<ListResponse<ExperienceResponse>>, ApiError> {
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    let rows = ExperienceRepository::new(state.pool.clone())
        .list_by_profile(profile_id)
        .await?;
    Ok(Json(ListResponse::new(
        rows.into_iter().map(|e| Experience::from(e).into()).collect(),
    )))
}

/// POST /api/admin/experiences
pub async fn create_experience(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(request): Json<CreateExperienceRequest>,
) -> Result<(StatusCode, Json<ExperienceResponse>), ApiError> {
    request.validate()?;
    let profile_id = own_profile_id(&state, admin.user().id).await?;

    let experience: Experience = ExperienceRepository::new(state.pool.clone())
        .create(profile_id, &request)
        .await?
        .into();
    info!(experience_id = %experience.id, company = %experience.company, "Experience created");

    Ok((StatusCode::CREATED, Json(experience.into())))
}

/// PUT /api/admin/experiences/:id
///
/// Dates are merged with the stored row before the range check; setting
/// `isCurrent` clears the end date.
pub async fn update_experience(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateExperienceRequest>,
) -> Result<Json<ExperienceResponse>, ApiError> {
    request.validate()?;
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    let repo = ExperienceRepository::new(state.pool.clone());

    let existing: Experience = repo
        .find(id, profile_id)
        .await?
        .ok_or_else(experience_not_found)?
        .into();
    let dates = request.resolve_dates(&existing)?;

    let experience: Experience = repo
        .update(id, profile_id, &request, dates)
        .await?
        .ok_or_else(experience_not_found)?
        .into();
    info!(experience_id = %id, "Experience updated");

    Ok(Json(experience.into()))
}

/// DELETE /api/admin/experiences/:id
pub async fn delete_experience(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    if !ExperienceRepository::new(state.pool.clone())
        .delete(id, profile_id)
        .await?
    {
        return Err(experience_not_found());
    }
    info!(experience_id = %id, "Experience deleted");
    Ok(StatusCode::NO_CONTENT)
}
