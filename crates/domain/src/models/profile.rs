//! Site owner profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::education::EducationResponse;
use super::experience::ExperienceResponse;
use super::project::ProjectResponse;
use super::skills::SkillCategories;
use super::social_media::SocialMediaResponse;

/// A user's personal and professional record. One per user.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub resume_url: Option<String>,
    /// Raw stored skills; normalized JSON for rows written by this service,
    /// possibly legacy comma-separated text for older rows.
    pub skills: Option<String>,
    pub available_for_hire: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating or replacing the current user's profile.
///
/// `skills` accepts either a categories object, an array of strings or a
/// legacy comma-separated string.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProfileRequest {
    #[validate(length(min = 1, max = 120, message = "Full name must be 1-120 characters"))]
    pub full_name: String,

    #[validate(length(max = 200, message = "Headline must be at most 200 characters"))]
    pub headline: Option<String>,

    #[validate(length(max = 10000, message = "Bio must be at most 10000 characters"))]
    pub bio: Option<String>,

    #[validate(url(message = "Avatar must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[validate(length(max = 120))]
    pub location: Option<String>,

    #[validate(email(message = "Invalid contact email"))]
    pub contact_email: Option<String>,

    #[validate(length(max = 40))]
    pub phone: Option<String>,

    #[validate(url(message = "Website must be a valid URL"))]
    pub website: Option<String>,

    #[validate(url(message = "Resume must be a valid URL"))]
    pub resume_url: Option<String>,

    #[serde(default)]
    pub skills: Option<serde_json::Value>,

    #[serde(default)]
    pub available_for_hire: bool,
}

/// Profile fields without nested collections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub full_name: String,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub location: Option<String>,
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub resume_url: Option<String>,
    pub skills: SkillCategories,
    pub available_for_hire: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileResponse {
    /// Builds the response with already-parsed skills.
    pub fn new(p: Profile, skills: SkillCategories) -> Self {
        Self {
            id: p.id,
            full_name: p.full_name,
            headline: p.headline,
            bio: p.bio,
            avatar_url: p.avatar_url,
            location: p.location,
            contact_email: p.contact_email,
            phone: p.phone,
            website: p.website,
            resume_url: p.resume_url,
            skills,
            available_for_hire: p.available_for_hire,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Public profile page: profile plus its timeline, projects and links.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfileResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub experiences: Vec<ExperienceResponse>,
    pub educations: Vec<EducationResponse>,
    pub projects: Vec<ProjectResponse>,
    pub social_media: Vec<SocialMediaResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::skills::SkillCategory;

    fn sample_profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            full_name: "Ada Lovelace".to_string(),
            headline: Some("Engineer".to_string()),
            bio: None,
            avatar_url: None,
            location: Some("London".to_string()),
            contact_email: None,
            phone: None,
            website: None,
            resume_url: None,
            skills: Some("Rust, React".to_string()),
            available_for_hire: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_accepts_structured_and_text_skills() {
        let structured: UpsertProfileRequest = serde_json::from_str(
            r#"{"fullName":"Ada","skills":{"backend":["Rust"]}}"#,
        )
        .unwrap();
        assert!(structured.skills.as_ref().unwrap().is_object());

        let legacy: UpsertProfileRequest =
            serde_json::from_str(r#"{"fullName":"Ada","skills":"Rust, React"}"#).unwrap();
        assert!(legacy.skills.as_ref().unwrap().is_string());

        let none: UpsertProfileRequest = serde_json::from_str(r#"{"fullName":"Ada"}"#).unwrap();
        assert!(none.skills.is_none());
        assert!(!none.available_for_hire);
    }

    #[test]
    fn test_upsert_validation() {
        let bad: UpsertProfileRequest = serde_json::from_str(
            r#"{"fullName":"","contactEmail":"nope","website":"not a url"}"#,
        )
        .unwrap();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("contact_email"));
        assert!(fields.contains_key("website"));
    }

    #[test]
    fn test_public_response_flattens_profile() {
        let mut skills = SkillCategories::default();
        skills.push(SkillCategory::Backend, "Rust");
        let response = PublicProfileResponse {
            profile: ProfileResponse::new(sample_profile(), skills),
            experiences: vec![],
            educations: vec![],
            projects: vec![],
            social_media: vec![],
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert_eq!(json["skills"]["backend"][0], "Rust");
        assert!(json["socialMedia"].is_array());
        assert_eq!(json["availableForHire"], true);
    }
}
