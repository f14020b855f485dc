//! Education entries on a profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone)]
pub struct Education {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_education_dates"))]
pub struct CreateEducationRequest {
    #[validate(length(min = 1, max = 200, message = "Institution must be 1-200 characters"))]
    pub institution: String,

    #[validate(length(min = 1, max = 200, message = "Degree must be 1-200 characters"))]
    pub degree: String,

    #[validate(length(max = 200))]
    pub field_of_study: Option<String>,

    pub start_date: NaiveDate,

    pub end_date: Option<NaiveDate>,

    #[validate(length(max = 50))]
    pub grade: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: i32,
}

fn validate_education_dates(req: &CreateEducationRequest) -> Result<(), ValidationError> {
    shared::validation::validate_date_range(req.start_date, req.end_date)
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEducationRequest {
    #[validate(length(min = 1, max = 200, message = "Institution must be 1-200 characters"))]
    pub institution: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Degree must be 1-200 characters"))]
    pub degree: Option<String>,

    #[validate(length(max = 200))]
    pub field_of_study: Option<String>,

    pub start_date: Option<NaiveDate>,

    /// `null` clears a stored end date.
    #[serde(default, deserialize_with = "super::nullable")]
    pub end_date: Option<Option<NaiveDate>>,

    #[validate(length(max = 50))]
    pub grade: Option<String>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: Option<i32>,
}

impl UpdateEducationRequest {
    /// Merges the update onto the stored row's dates and checks the range.
    ///
    /// Returns the resolved `(start, end)` pair to persist.
    pub fn resolve_dates(
        &self,
        existing: &Education,
    ) -> Result<(NaiveDate, Option<NaiveDate>), ValidationError> {
        let start = self.start_date.unwrap_or(existing.start_date);
        let end = self.end_date.unwrap_or(existing.end_date);
        shared::validation::validate_date_range(start, end)?;
        Ok((start, end))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationResponse {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub grade: Option<String>,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Education> for EducationResponse {
    fn from(e: Education) -> Self {
        Self {
            id: e.id,
            institution: e.institution,
            degree: e.degree,
            field_of_study: e.field_of_study,
            start_date: e.start_date,
            end_date: e.end_date,
            grade: e.grade,
            description: e.description,
            sort_order: e.sort_order,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
