//! Project endpoints: public listing and admin CRUD.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use domain::models::project::{
    CreateProjectRequest, ProjectQuery, ProjectResponse, UpdateProjectRequest,
};
use domain::models::{ListResponse, Project};
use persistence::repositories::ProjectRepository;
use shared::validation::normalize_tags;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::routes::profile::{own_profile_id, owner_profile};

fn project_not_found() -> ApiError {
    ApiError::NotFound("Project not found".to_string())
}

fn to_list(rows: Vec<persistence::entities::ProjectEntity>) -> ListResponse<ProjectResponse> {
    ListResponse::new(rows.into_iter().map(|p| Project::from(p).into()).collect())
}

/// GET /api/projects?featured=
///
/// Projects of the site owner; empty until the owner has a profile.
pub async fn list_public_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<ListResponse<ProjectResponse>>, ApiError> {
    let Some(profile) = owner_profile(&state).await? else {
        return Ok(Json(ListResponse::new(Vec::new())));
    };
    let rows = ProjectRepository::new(state.pool.clone())
        .list_by_profile(profile.id, query.featured)
        .await?;
    Ok(Json(to_list(rows)))
}

/// GET /api/admin/projects
pub async fn list_projects(
    State(state): State<AppState>,
    admin: AdminUser,
    Query(query): Query<ProjectQuery>,
) -> Result<Json<ListResponse<ProjectResponse>>, ApiError> {
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    let rows = ProjectRepository::new(state.pool.clone())
        .list_by_profile(profile_id, query.featured)
        .await?;
    Ok(Json(to_list(rows)))
}

/// POST /api/admin/projects
pub async fn create_project(
    State(state): State<AppState>,
    admin: AdminUser,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError> {
    request.validate()?;
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    let tech_stack = normalize_tags(&request.tech_stack);

    let project: Project = ProjectRepository::new(state.pool.clone())
        .create(profile_id, &request, &tech_stack)
        .await?
        .into();
    info!(project_id = %project.id, title = %project.title, "Project created");

    Ok((StatusCode::CREATED, Json(project.into())))
}

/// PUT /api/admin/projects/:id
pub async fn update_project(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError> {
    request.validate()?;
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    let tech_stack = request.tech_stack.as_deref().map(normalize_tags);

    let project: Project = ProjectRepository::new(state.pool.clone())
        .update(id, profile_id, &request, tech_stack.as_deref())
        .await?
        .ok_or_else(project_not_found)?
        .into();
    info!(project_id = %id, "Project updated");

    Ok(Json(project.into()))
}

/// DELETE /api/admin/projects/:id
pub async fn delete_project(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let profile_id = own_profile_id(&state, admin.user().id).await?;
    if !ProjectRepository::new(state.pool.clone())
        .delete(id, profile_id)
        .await?
    {
        return Err(project_not_found());
    }
    info!(project_id = %id, "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
