//! Skill domain taxonomy: public listing and admin CRUD.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::skill_domain::{
    CreateSkillDomainRequest, SkillDomainResponse, UpdateSkillDomainRequest,
};
use domain::models::{ListResponse, SkillDomain};
use persistence::repositories::SkillDomainRepository;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

fn skill_domain_not_found() -> ApiError {
    ApiError::NotFound("Skill domain not found".to_string())
}

/// Duplicate names surface as 409 with a readable message.
fn map_name_conflict(name: &str) -> impl FnOnce(sqlx::Error) -> ApiError + '_ {
    move |err| match ApiError::from(err) {
        ApiError::Conflict(_) => {
            ApiError::Conflict(format!("Skill domain '{}' already exists", name.trim()))
        }
        other => other,
    }
}

/// GET /api/skill-domains and GET /api/admin/skill-domains
pub async fn list_skill_domains(
    State(state): State<AppState>,
) -> Result<Json<ListResponse<SkillDomainResponse>>, ApiError> {
    let rows = SkillDomainRepository::new(state.pool.clone()).list().await?;
    Ok(Json(ListResponse::new(
        rows.into_iter().map(|d| SkillDomain::from(d).into()).collect(),
    )))
}

/// POST /api/admin/skill-domains
pub async fn create_skill_domain(
    State(state): State<AppState>,
    Json(request): Json<CreateSkillDomainRequest>,
) -> Result<(StatusCode, Json<SkillDomainResponse>), ApiError> {
    request.validate()?;

    let domain: SkillDomain = SkillDomainRepository::new(state.pool.clone())
        .create(&request)
        .await
        .map_err(map_name_conflict(&request.name))?
        .into();
    info!(skill_domain_id = %domain.id, name = %domain.name, "Skill domain created");

    Ok((StatusCode::CREATED, Json(domain.into())))
}

/// PUT /api/admin/skill-domains/:id
pub async fn update_skill_domain(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSkillDomainRequest>,
) -> Result<Json<SkillDomainResponse>, ApiError> {
    request.validate()?;

    let name = request.name.clone().unwrap_or_default();
    let domain: SkillDomain = SkillDomainRepository::new(state.pool.clone())
        .update(id, &request)
        .await
        .map_err(map_name_conflict(&name))?
        .ok_or_else(skill_domain_not_found)?
        .into();
    info!(skill_domain_id = %id, "Skill domain updated");

    Ok(Json(domain.into()))
}

/// DELETE /api/admin/skill-domains/:id
pub async fn delete_skill_domain(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !SkillDomainRepository::new(state.pool.clone()).delete(id).await? {
        return Err(skill_domain_not_found());
    }
    info!(skill_domain_id = %id, "Skill domain deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_conflict_errors_pass_through() {
        let error = map_name_conflict("Backend")(sqlx::Error::RowNotFound);
        assert!(matches!(error, ApiError::NotFound(_)));
    }
}
