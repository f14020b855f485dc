//! Work experience entries on a profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone)]
pub struct Experience {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_dates"))]
pub struct CreateExperienceRequest {
    #[validate(length(min = 1, max = 200, message = "Company must be 1-200 characters"))]
    pub company: String,

    #[validate(length(min = 1, max = 200, message = "Position must be 1-200 characters"))]
    pub position: String,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    pub start_date: NaiveDate,

    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub is_current: bool,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: i32,
}

impl CreateExperienceRequest {
    /// End date to persist; current positions have none.
    pub fn effective_end_date(&self) -> Option<NaiveDate> {
        if self.is_current {
            None
        } else {
            self.end_date
        }
    }
}

fn validate_create_dates(req: &CreateExperienceRequest) -> Result<(), ValidationError> {
    shared::validation::validate_date_range(req.start_date, req.effective_end_date())
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExperienceRequest {
    #[validate(length(min = 1, max = 200, message = "Company must be 1-200 characters"))]
    pub company: Option<String>,

    #[validate(length(min = 1, max = 200, message = "Position must be 1-200 characters"))]
    pub position: Option<String>,

    #[validate(length(max = 200))]
    pub location: Option<String>,

    pub start_date: Option<NaiveDate>,

    /// `null` clears a stored end date.
    #[serde(default, deserialize_with = "super::nullable")]
    pub end_date: Option<Option<NaiveDate>>,

    pub is_current: Option<bool>,

    #[validate(length(max = 5000))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "Sort order cannot be negative"))]
    pub sort_order: Option<i32>,
}

impl UpdateExperienceRequest {
    /// Merges the update onto the stored row's dates and checks the range.
    ///
    /// Returns the resolved `(start, end, is_current)` triple to persist.
    pub fn resolve_dates(
        &self,
        existing: &Experience,
    ) -> Result<(NaiveDate, Option<NaiveDate>, bool), ValidationError> {
        let start = self.start_date.unwrap_or(existing.start_date);
        let is_current = self.is_current.unwrap_or(existing.is_current);
        let end = if is_current {
            None
        } else {
            self.end_date.unwrap_or(existing.end_date)
        };
        shared::validation::validate_date_range(start, end)?;
        Ok((start, end, is_current))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceResponse {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Experience> for ExperienceResponse {
    fn from(e: Experience) -> Self {
        Self {
            id: e.id,
            company: e.company,
            position: e.position,
            location: e.location,
            start_date: e.start_date,
            end_date: e.end_date,
            is_current: e.is_current,
            description: e.description,
            sort_order: e.sort_order,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn existing() -> Experience {
        Experience {
            id: Uuid::new_v4(),
            profile_id: Uuid::new_v4(),
            company: "Acme".to_string(),
            position: "Engineer".to_string(),
            location: None,
            start_date: date(2020, 1, 1),
            end_date: Some(date(2022, 1, 1)),
            is_current: false,
            description: None,
            sort_order: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_rejects_end_before_start() {
        let req: CreateExperienceRequest = serde_json::from_str(
            r#"{"company":"Acme","position":"Dev","startDate":"2022-01-01","endDate":"2021-01-01"}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_current_ignores_end_date() {
        let req: CreateExperienceRequest = serde_json::from_str(
            r#"{"company":"Acme","position":"Dev","startDate":"2022-01-01","endDate":"2021-01-01","isCurrent":true}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.effective_end_date(), None);
    }

    #[test]
    fn test_create_rejects_negative_sort_order() {
        let req: CreateExperienceRequest = serde_json::from_str(
            r#"{"company":"Acme","position":"Dev","startDate":"2022-01-01","sortOrder":-1}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_resolves_current_flag() {
        let update = UpdateExperienceRequest {
            is_current: Some(true),
            ..Default::default()
        };
        let (start, end, current) = update.resolve_dates(&existing()).unwrap();
        assert_eq!(start, date(2020, 1, 1));
        assert_eq!(end, None);
        assert!(current);
    }

    #[test]
    fn test_update_null_end_date_clears_it() {
        let update: UpdateExperienceRequest = serde_json::from_str(r#"{"endDate":null}"#).unwrap();
        assert_eq!(update.end_date, Some(None));
        let (_, end, current) = update.resolve_dates(&existing()).unwrap();
        assert_eq!(end, None);
        assert!(!current);

        let update: UpdateExperienceRequest = serde_json::from_str("{}").unwrap();
        let (_, end, _) = update.resolve_dates(&existing()).unwrap();
        assert_eq!(end, Some(date(2022, 1, 1)));

        let update: UpdateExperienceRequest =
            serde_json::from_str(r#"{"endDate":"2023-03-01"}"#).unwrap();
        let (_, end, _) = update.resolve_dates(&existing()).unwrap();
        assert_eq!(end, Some(date(2023, 3, 1)));
    }

    #[test]
    fn test_update_rejects_start_after_stored_end() {
        let update = UpdateExperienceRequest {
            start_date: Some(date(2023, 1, 1)),
            ..Default::default()
        };
        assert!(update.resolve_dates(&existing()).is_err());
    }
}
