//! Common validation utilities.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::{ValidateUrl, ValidationError};

lazy_static! {
    /// Lower-case alphanumeric words joined by single hyphens.
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Maximum length of a URL slug.
pub const MAX_SLUG_LENGTH: usize = 120;

/// Maximum number of tags on a single blog post.
pub const MAX_TAGS: usize = 20;

/// Validates a user-supplied URL slug.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.len() > MAX_SLUG_LENGTH {
        let mut err = ValidationError::new("slug_length");
        err.message = Some(format!("Slug must be at most {} characters", MAX_SLUG_LENGTH).into());
        return Err(err);
    }

    if !SLUG_REGEX.is_match(slug) {
        let mut err = ValidationError::new("slug_format");
        err.message =
            Some("Slug may only contain lowercase letters, digits and single hyphens".into());
        return Err(err);
    }

    Ok(())
}

/// Validates a tag list: bounded size, no blank tags, each tag at most 40 chars.
pub fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    if tags.len() > MAX_TAGS {
        let mut err = ValidationError::new("tags_count");
        err.message = Some(format!("At most {} tags are allowed", MAX_TAGS).into());
        return Err(err);
    }

    if tags.iter().any(|t| t.trim().is_empty() || t.chars().count() > 40) {
        let mut err = ValidationError::new("tag_format");
        err.message = Some("Tags must be 1-40 characters".into());
        return Err(err);
    }

    Ok(())
}

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Value cannot be blank".into());
        return Err(err);
    }
    Ok(())
}

/// URL field on a partial update: blank clears the value, anything else
/// must be a valid URL.
pub fn validate_clearable_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || value.validate_url() {
        return Ok(());
    }
    let mut err = ValidationError::new("url");
    err.message = Some("Must be a valid URL".into());
    Err(err)
}

/// Checks that an optional end date does not precede the start date.
pub fn validate_date_range(start: NaiveDate, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match end {
        Some(end) if end < start => {
            let mut err = ValidationError::new("date_range");
            err.message = Some("End date cannot be before start date".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

/// Normalizes tags: trims, lower-cases and drops duplicates keeping first occurrence.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}
