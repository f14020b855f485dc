//! Social media link endpoints: public listing and admin CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::social_media::{
    CreateSocialMediaRequest, SocialMediaResponse, UpdateSocialMediaRequest,
};
use domain::models::{ListResponse, SocialMedia};
use persistence::entities::SocialMediaEntity;
use persistence::repositories::SocialMediaRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::routes::profile::{own_profile_id, owner_profile};

fn link_not_found() -> ApiError {
    ApiError::NotFound("Social media link not found".to_string())
}

fn to_list(rows: Vec<SocialMediaEntity>) -> ListResponse<SocialMediaResponse> {
    ListResponse::new(rows.into_iter().map(|s| SocialMedia::from(s).into()).collect())
}

/// GET /api/social-media
pub async fn list_public_social_media(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<SocialMediaResponse>>, ApiError> {
    let Some(profile) = owner_profile(&state).await? else {
        return Ok(Json(ListResponse::new(Vec::new())));
    };
    let rows = SocialMediaRepository::new(state.pool.clone())
        .list_by_profile(profile.id)
        .await?;
    Ok(Json(to_list(rows)))
}

/// GET /api/admin/social-media
pub async fn list_social_media(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<ListResponse<SocialMediaResponse>>, ApiError> {
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    let rows = SocialMediaRepository::new(state.pool.clone())
        .list_by_profile(profile_id)
        .await?;
    Ok(Json(to_list(rows)))
}

/// POST /api/admin/social-media
pub async fn create_social_media(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(request): Json<CreateSocialMediaRequest>,
) -> Result<(StatusCode, Json<SocialMediaResponse>), ApiError> {
    request.validate()?;
    let profile_id = own_profile_id(&state, admin.user().id).await?;

    let link: SocialMedia = SocialMediaRepository::new(state.pool.clone())
        .create(profile_id, &request)
        .await?
        .into();
    info!(link_id = %link.id, platform = %link.platform, "Social media link created");

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// PUT /api/admin/social-media/:id
pub async fn update_social_media(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSocialMediaRequest>,
) -> Result<Json<SocialMediaResponse>, ApiError> {
    request.validate()?;
    let profile_id = own_profile_id(&state, admin.user().id).await?;

    let link: SocialMedia = SocialMediaRepository::new(state.pool.clone())
        .update(id, profile_id, &request)
        .await?
        .ok_or_else(link_not_found)?
        .into();
    info!(link_id = %id, "Social media link updated");

    Ok(Json(link.into()))
}

/// DELETE /api/admin/social-media/:id
pub async fn delete_social_media(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    if !SocialMediaRepository::new(state.pool.clone())
        .delete(id, profile_id)
        .await?
    {
        return Err(link_not_found());
    }
    info!(link_id = %id, "Social media link deleted");
    Ok(StatusCode::NO_CONTENT)
}
