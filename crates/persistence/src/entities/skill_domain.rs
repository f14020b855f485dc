//! Skill domain entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::SkillLevel;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct SkillDomainEntity {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub level: String,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SkillDomainEntity> for domain::models::SkillDomain {
    fn from(e: SkillDomainEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            description: e.description,
            technologies: e.technologies,
            level: SkillLevel::from_str(&e.level).unwrap_or_default(),
            icon: e.icon,
            sort_order: e.sort_order,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
