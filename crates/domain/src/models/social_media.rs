//! Social media links on a profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone)]
pub struct SocialMedia {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub platform: String,
    pub url: String,
    pub username: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSocialMediaRequest {
    #[validate(length(min = 1, max = 50, message = "Platform must be 1-50 characters"))]
    pub platform: String,

    #[validate(url(message = "URL must be valid"))]
    pub url: String,

    #[validate(length(max = 100))]
    pub username: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSocialMediaRequest {
    #[validate(length(min = 1, max = 50, message = "Platform must be 1-50 characters"))]
    pub platform: Option<String>,

    #[validate(url(message = "URL must be valid"))]
    pub url: Option<String>,

    #[validate(length(max = 100))]
    pub username: Option<String>,

    #[validate(length(max = 100))]
    pub icon: Option<String>,

    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMediaResponse {
    pub id: Uuid,
    pub platform: String,
    pub url: String,
    pub username: Option<String>,
    pub icon: Option<String>,
    pub sort_order: i32,
}

impl From<SocialMedia> for SocialMediaResponse {
    fn from(s: SocialMedia) -> Self {
        Self {
            id: s.id,
            platform: s.platform,
            url: s.url,
            username: s.username,
            icon: s.icon,
            sort_order: s.sort_order,
        }
    }
}
