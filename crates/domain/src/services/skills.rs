//! Best-effort parsing of profile skills.
//!
//! Skills are stored as a JSON categories object, but older rows and some
//! clients use a flat comma-separated string. Parsing never fails: anything
//! that is not structured JSON is split and bucketed by keyword.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::models::skills::{SkillCategories, SkillCategory};

/// Keywords per category, checked in this order; first match wins.
const KEYWORDS: &[(SkillCategory, &[&str])] = &[
    (
        SkillCategory::Mobile,
        &[
            "react native", "flutter", "swift", "swiftui", "kotlin", "android", "ios",
            "xamarin", "ionic", "dart", "expo",
        ],
    ),
    (
        SkillCategory::Database,
        &[
            "postgres", "postgresql", "mysql", "mariadb", "sqlite", "mongodb", "mongo", "redis",
            "elasticsearch", "cassandra", "dynamodb", "oracle", "sql", "firebase", "supabase",
            "prisma",
        ],
    ),
    (
        SkillCategory::Devops,
        &[
            "docker", "kubernetes", "k8s", "aws", "gcp", "azure", "terraform", "ansible",
            "jenkins", "ci/cd", "github actions", "linux", "nginx", "helm", "vercel", "netlify",
            "heroku",
        ],
    ),
    (
        SkillCategory::Frontend,
        &[
            "react", "vue", "angular", "svelte", "next.js", "nextjs", "nuxt", "html", "css",
            "sass", "scss", "tailwind", "javascript", "typescript", "jquery", "redux", "vite",
            "bootstrap",
        ],
    ),
    (
        SkillCategory::Backend,
        &[
            "rust", "node", "node.js", "nodejs", "express", "django", "flask", "fastapi",
            "spring", "java", "python", "go", "golang", "ruby", "rails", "php", "laravel", "c#",
            ".net", "graphql", "elixir", "phoenix", "scala", "axum",
        ],
    ),
    (
        SkillCategory::Tools,
        &[
            "git", "github", "gitlab", "figma", "jira", "vscode", "vim", "postman", "npm",
            "yarn", "webpack", "notion",
        ],
    ),
];

lazy_static! {
    static ref CATEGORY_MATCHERS: Vec<(SkillCategory, Regex)> = KEYWORDS
        .iter()
        .map(|(category, words)| (*category, keyword_regex(words)))
        .collect();
    static ref SEPARATORS: Regex = Regex::new(r"[,;\n]").unwrap();
}

/// Builds a case-insensitive alternation bounded by non-alphanumerics.
fn keyword_regex(words: &[&str]) -> Regex {
    let alternation = words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)(?:^|[^a-z0-9])(?:{})(?:$|[^a-z0-9])", alternation))
        .unwrap()
}

/// Picks the category for a single skill by keyword.
pub fn categorize(skill: &str) -> SkillCategory {
    CATEGORY_MATCHERS
        .iter()
        .find(|(_, re)| re.is_match(skill))
        .map(|(category, _)| *category)
        .unwrap_or(SkillCategory::Other)
}

/// Parses stored or submitted skills text.
pub fn parse_skills(raw: &str) -> SkillCategories {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return SkillCategories::default();
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => parse_skills_value(&value),
        Ok(Value::String(inner)) => bucket_all(split_legacy(&inner)),
        _ => bucket_all(split_legacy(trimmed)),
    }
}

/// Parses skills from an already-decoded JSON request value.
pub fn parse_skills_value(value: &Value) -> SkillCategories {
    match value {
        Value::Null => SkillCategories::default(),
        Value::String(s) => parse_skills(s),
        Value::Array(items) => bucket_all(items.iter().flat_map(item_strings)),
        Value::Object(map) => {
            let mut out = SkillCategories::default();
            for (key, items) in map {
                let category = SkillCategory::parse(key).unwrap_or(SkillCategory::Other);
                for skill in item_strings(items) {
                    out.push(category, &skill);
                }
            }
            out
        }
        other => parse_skills(&other.to_string()),
    }
}

fn split_legacy(text: &str) -> Vec<String> {
    SEPARATORS
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flattens a JSON value into skill names: strings are split like legacy
/// text, arrays are walked, other scalars are stringified.
fn item_strings(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => split_legacy(s),
        Value::Array(items) => items.iter().flat_map(item_strings).collect(),
        Value::Number(n) => vec![n.to_string()],
        Value::Null | Value::Bool(_) | Value::Object(_) => Vec::new(),
    }
}

fn bucket_all<I: IntoIterator<Item = String>>(skills: I) -> SkillCategories {
    let mut out = SkillCategories::default();
    for skill in skills {
        out.push(categorize(&skill), &skill);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input() {
        assert!(parse_skills("").is_empty());
        assert!(parse_skills("   \n").is_empty());
        assert!(parse_skills_value(&Value::Null).is_empty());
    }

    #[test]
    fn test_categorize_keywords() {
        assert_eq!(categorize("React"), SkillCategory::Frontend);
        assert_eq!(categorize("React Native"), SkillCategory::Mobile);
        assert_eq!(categorize("PostgreSQL"), SkillCategory::Database);
        assert_eq!(categorize("AWS Lambda"), SkillCategory::Devops);
        assert_eq!(categorize("Rust"), SkillCategory::Backend);
        assert_eq!(categorize("Node.js"), SkillCategory::Backend);
        assert_eq!(categorize("C#"), SkillCategory::Backend);
        assert_eq!(categorize("Figma"), SkillCategory::Tools);
        assert_eq!(categorize("Public speaking"), SkillCategory::Other);
    }

    #[test]
    fn test_categorize_respects_word_boundaries() {
        assert_eq!(categorize("JavaScript"), SkillCategory::Frontend);
        assert_eq!(categorize("Java"), SkillCategory::Backend);
        assert_eq!(categorize("Google Docs"), SkillCategory::Other);
        assert_eq!(categorize("Trust building"), SkillCategory::Other);
    }

    #[test]
    fn test_legacy_text() {
        let skills = parse_skills("React, Rust; PostgreSQL\nDocker, , Leadership, react");
        assert_eq!(skills.frontend, vec!["React"]);
        assert_eq!(skills.backend, vec!["Rust"]);
        assert_eq!(skills.database, vec!["PostgreSQL"]);
        assert_eq!(skills.devops, vec!["Docker"]);
        assert_eq!(skills.other, vec!["Leadership"]);
        assert_eq!(skills.total(), 5);
    }

    #[test]
    fn test_json_object_with_aliases() {
        let raw = r#"{"Frontend":["Vue","CSS"],"db":["Redis"],"languages":["Esperanto"]}"#;
        let skills = parse_skills(raw);
        assert_eq!(skills.frontend, vec!["Vue", "CSS"]);
        assert_eq!(skills.database, vec!["Redis"]);
        assert_eq!(skills.other, vec!["Esperanto"]);
    }

    #[test]
    fn test_json_object_keeps_declared_category() {
        // Explicit categories are trusted even when keywords disagree.
        let skills = parse_skills(r#"{"tools":["Docker"]}"#);
        assert_eq!(skills.tools, vec!["Docker"]);
        assert!(skills.devops.is_empty());
    }

    #[test]
    fn test_json_array_is_bucketed() {
        let skills = parse_skills(r#"["Flutter","Kubernetes","Git"]"#);
        assert_eq!(skills.mobile, vec!["Flutter"]);
        assert_eq!(skills.devops, vec!["Kubernetes"]);
        assert_eq!(skills.tools, vec!["Git"]);
    }

    #[test]
    fn test_json_string_is_treated_as_text() {
        let skills = parse_skills("\"Rust, Vue\"");
        assert_eq!(skills.backend, vec!["Rust"]);
        assert_eq!(skills.frontend, vec!["Vue"]);
    }

    #[test]
    fn test_value_forms() {
        let structured = parse_skills_value(&json!({"backend": ["Rust", "rust", "Go"]}));
        assert_eq!(structured.backend, vec!["Rust", "Go"]);

        let text = parse_skills_value(&json!("Svelte, MySQL"));
        assert_eq!(text.frontend, vec!["Svelte"]);
        assert_eq!(text.database, vec!["MySQL"]);

        let list = parse_skills_value(&json!(["Swift", 42, null]));
        assert_eq!(list.mobile, vec!["Swift"]);
        assert_eq!(list.other, vec!["42"]);
    }

    #[test]
    fn test_normalized_json_round_trips() {
        let skills = parse_skills("Rust, React");
        let reparsed = parse_skills(&skills.to_json());
        assert_eq!(reparsed, skills);
    }
}
