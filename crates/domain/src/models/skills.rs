//! Categorized skill lists shown on the public profile.

use serde::{Deserialize, Serialize};

/// Buckets skills are grouped into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Frontend,
    Backend,
    Database,
    Devops,
    Mobile,
    Tools,
    Other,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 7] = [
        SkillCategory::Frontend,
        SkillCategory::Backend,
        SkillCategory::Database,
        SkillCategory::Devops,
        SkillCategory::Mobile,
        SkillCategory::Tools,
        SkillCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Frontend => "frontend",
            SkillCategory::Backend => "backend",
            SkillCategory::Database => "database",
            SkillCategory::Devops => "devops",
            SkillCategory::Mobile => "mobile",
            SkillCategory::Tools => "tools",
            SkillCategory::Other => "other",
        }
    }

    /// Parses a category name case-insensitively, accepting a few common aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "frontend" | "front-end" | "front end" | "ui" => Some(SkillCategory::Frontend),
            "backend" | "back-end" | "back end" | "server" => Some(SkillCategory::Backend),
            "database" | "databases" | "db" | "data" => Some(SkillCategory::Database),
            "devops" | "cloud" | "infrastructure" | "ops" => Some(SkillCategory::Devops),
            "mobile" => Some(SkillCategory::Mobile),
            "tools" | "tooling" => Some(SkillCategory::Tools),
            "other" | "others" | "misc" => Some(SkillCategory::Other),
            _ => None,
        }
    }
}

/// Skills grouped by category. Each list keeps first-seen order with no duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillCategories {
    pub frontend: Vec<String>,
    pub backend: Vec<String>,
    pub database: Vec<String>,
    pub devops: Vec<String>,
    pub mobile: Vec<String>,
    pub tools: Vec<String>,
    pub other: Vec<String>,
}

impl SkillCategories {
    pub fn get(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Frontend => &self.frontend,
            SkillCategory::Backend => &self.backend,
            SkillCategory::Database => &self.database,
            SkillCategory::Devops => &self.devops,
            SkillCategory::Mobile => &self.mobile,
            SkillCategory::Tools => &self.tools,
            SkillCategory::Other => &self.other,
        }
    }

    fn get_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::Frontend => &mut self.frontend,
            SkillCategory::Backend => &mut self.backend,
            SkillCategory::Database => &mut self.database,
            SkillCategory::Devops => &mut self.devops,
            SkillCategory::Mobile => &mut self.mobile,
            SkillCategory::Tools => &mut self.tools,
            SkillCategory::Other => &mut self.other,
        }
    }

    /// Adds a skill, ignoring blanks and case-insensitive duplicates within the category.
    pub fn push(&mut self, category: SkillCategory, skill: &str) {
        let skill = skill.trim();
        if skill.is_empty() {
            return;
        }
        let list = self.get_mut(category);
        if !list.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
            list.push(skill.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        SkillCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    pub fn total(&self) -> usize {
        SkillCategory::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    /// Serializes to the canonical JSON form stored in the profile row.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
