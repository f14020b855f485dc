//! Profile endpoints: the public owner profile and the admin upsert.

use axum::{extract::State, Json};
use domain::models::profile::{ProfileResponse, PublicProfileResponse, UpsertProfileRequest};
use domain::models::{non_blank, Profile};
use domain::services::{parse_skills, parse_skills_value};
use persistence::repositories::{
    EducationRepository, ExperienceRepository, ProfileInput, ProfileRepository,
    ProjectRepository, SocialMediaRepository, UserRepository,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;

fn profile_not_found() -> ApiError {
    ApiError::NotFound("Profile not found".to_string())
}

fn profile_response(profile: Profile) -> ProfileResponse {
    let skills = parse_skills(profile.skills.as_deref().unwrap_or_default());
    ProfileResponse::new(profile, skills)
}

/// The site owner's profile: the profile of the first active admin.
pub(crate) async fn owner_profile(state: &AppState) -> Result<Option<Profile>, ApiError> {
    let Some(owner) = UserRepository::new(state.pool.clone())
        .find_site_owner()
        .await?
    else {
        return Ok(None);
    };
    Ok(ProfileRepository::new(state.pool.clone())
        .find_by_user_id(owner.id)
        .await?
        .map(Profile::from))
}

/// Profile id of the calling admin; 404 until the profile is created.
pub(crate) async fn own_profile_id(state: &AppState, user_id: Uuid) -> Result<Uuid, ApiError> {
    ProfileRepository::new(state.pool.clone())
        .find_by_user_id(user_id)
        .await?
        .map(|p| p.id)
        .ok_or_else(|| ApiError::NotFound("Create your profile first".to_string()))
}

/// GET /api/profile
pub async fn get_public_profile(
    State(state): State<AppState>,
) -> Result<Json<PublicProfileResponse>, ApiError> {
    let profile = owner_profile(&state).await?.ok_or_else(profile_not_found)?;
    let profile_id = profile.id;
    let pool = &state.pool;

    let experiences = ExperienceRepository::new(pool.clone())
        .list_by_profile(profile_id)
        .await?;
    let educations = EducationRepository::new(pool.clone())
        .list_by_profile(profile_id)
        .await?;
    let projects = ProjectRepository::new(pool.clone())
        .list_by_profile(profile_id, None)
        .await?;
    let social_media = SocialMediaRepository::new(pool.clone())
        .list_by_profile(profile_id)
        .await?;

    Ok(Json(PublicProfileResponse {
        profile: profile_response(profile),
        experiences: experiences
            .into_iter()
            .map(|e| domain::models::Experience::from(e).into())
            .collect(),
        educations: educations
            .into_iter()
            .map(|e| domain::models::Education::from(e).into())
            .collect(),
        projects: projects
            .into_iter()
            .map(|p| domain::models::Project::from(p).into())
            .collect(),
        social_media: social_media
            .into_iter()
            .map(|s| domain::models::SocialMedia::from(s).into())
            .collect(),
    }))
}

/// GET /api/admin/profile
pub async fn get_own_profile(
    State(state): State<AppState>,
    admin: AdminUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile: Profile = ProfileRepository::new(state.pool.clone())
        .find_by_user_id(admin.user().id)
        .await?
        .ok_or_else(profile_not_found)?
        .into();
    Ok(Json(profile_response(profile)))
}

/// PUT /api/admin/profile
///
/// Creates or replaces the caller's profile. Skills are stored as
/// normalized JSON; omitting them keeps the stored value.
pub async fn upsert_profile(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(request): Json<UpsertProfileRequest>,
) -> Result<Json<ProfileResponse>, ApiError> {
    request.validate()?;

    let input = ProfileInput {
        full_name: request.full_name.trim().to_string(),
        headline: non_blank(request.headline),
        bio: non_blank(request.bio),
        avatar_url: non_blank(request.avatar_url),
        location: non_blank(request.location),
        contact_email: non_blank(request.contact_email),
        phone: non_blank(request.phone),
        website: non_blank(request.website),
        resume_url: non_blank(request.resume_url),
        skills: request
            .skills
            .as_ref()
            .map(|value| parse_skills_value(value).to_json()),
        available_for_hire: request.available_for_hire,
    };

    let profile: Profile = ProfileRepository::new(state.pool.clone())
        .upsert(admin.user().id, &input)
        .await?
        .into();
    info!(profile_id = %profile.id, user_id = %admin.user().id, "Profile saved");

    Ok(Json(profile_response(profile)))
}
