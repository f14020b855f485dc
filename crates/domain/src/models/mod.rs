//! Domain models for the portfolio site.

pub mod analytics;
pub mod blog;
pub mod education;
pub mod experience;
pub mod profile;
pub mod project;
pub mod skill_domain;
pub mod skills;
pub mod social_media;
pub mod user;

use serde::{Deserialize, Deserializer, Serialize};

pub use analytics::BlogAnalytics;
pub use blog::Blog;
pub use education::Education;
pub use experience::Experience;
pub use profile::Profile;
pub use project::Project;
pub use skill_domain::{SkillDomain, SkillLevel};
pub use skills::{SkillCategories, SkillCategory};
pub use social_media::SocialMedia;
pub use user::{User, UserRole, UserSession};

/// Generic list envelope used by collection endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> ListResponse<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

/// Turns blank optional strings into `None`.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Deserializes a field where absent means "keep" (`None`) and an explicit
/// `null` means "clear" (`Some(None)`). Pair with `#[serde(default)]`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
