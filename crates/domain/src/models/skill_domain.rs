//! Skill domains: named groups of technologies with an expertise level.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

/// Expertise level for a skill domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            "expert" => Ok(SkillLevel::Expert),
            _ => Err(format!("Invalid skill level: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SkillDomain {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub level: SkillLevel,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSkillDomainRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub technologies: Vec<String>,

    #[serde(default)]
    pub level: SkillLevel,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSkillDomainRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    #[validate(custom(function = "shared::validation::validate_tags"))]
    pub technologies: Option<Vec<String>>,

    pub level: Option<SkillLevel>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDomainResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub level: SkillLevel,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SkillDomain> for SkillDomainResponse {
    fn from(d: SkillDomain) -> Self {
        Self {
            id: d.id,
            name: d.name,
            description: d.description,
            technologies: d.technologies,
            level: d.level,
            icon: d.icon,
            sort_order: d.sort_order,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}
