//! URL slug generation for blog posts.
//!
//! A base slug is derived from the title; collisions are resolved by probing
//! a [`SlugStore`] and appending `-1`, `-2`, ... until a free slug is found.

use async_trait::async_trait;
use shared::validation::MAX_SLUG_LENGTH;
use thiserror::Error;
use uuid::Uuid;

/// Fallback when a title contains no usable characters.
pub const FALLBACK_SLUG: &str = "post";

/// Upper bound on suffix probes before giving up.
pub const MAX_SLUG_ATTEMPTS: u32 = 1000;

#[derive(Debug, Error)]
pub enum SlugError<E: std::error::Error + 'static> {
    #[error("Could not find a free slug for '{0}'")]
    Exhausted(String),

    #[error("Slug lookup failed: {0}")]
    Store(#[source] E),
}

/// Lookup used by [`unique_slug`] to detect collisions.
#[async_trait]
pub trait SlugStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns true if `slug` is used by a post other than `exclude_id`.
    async fn slug_taken(&self, slug: &str, exclude_id: Option<Uuid>)
        -> Result<bool, Self::Error>;
}

/// Lower-cases a title and joins its alphanumeric words with hyphens.
pub fn generate_slug(title: &str) -> String {
    let slug = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        return FALLBACK_SLUG.to_string();
    }
    truncate_slug(&slug)
}

/// Cuts a slug so that a numeric suffix still fits, without a trailing hyphen.
fn truncate_slug(slug: &str) -> String {
    // room for "-NNNN"
    cut(slug, MAX_SLUG_LENGTH - 5).to_string()
}

/// Longest prefix of `slug` within `max` bytes, without a trailing hyphen.
fn cut(slug: &str, max: usize) -> &str {
    let mut end = slug.len().min(max);
    while !slug.is_char_boundary(end) {
        end -= 1;
    }
    slug[..end].trim_end_matches('-')
}

/// `base-N`, shortening `base` so the result stays within `MAX_SLUG_LENGTH`.
fn with_suffix(base: &str, counter: u32) -> String {
    let suffix = format!("-{}", counter);
    format!("{}{}", cut(base, MAX_SLUG_LENGTH - suffix.len()), suffix)
}

/// Finds the first free slug among `base`, `base-1`, `base-2`, ...
pub async fn unique_slug<S: SlugStore + ?Sized>(
    store: &S,
    base: &str,
    exclude_id: Option<Uuid>,
) -> Result<String, SlugError<S::Error>> {
    let mut candidate = base.to_string();
    let mut counter = 1;

    while store
        .slug_taken(&candidate, exclude_id)
        .await
        .map_err(SlugError::Store)?
    {
        if counter > MAX_SLUG_ATTEMPTS {
            return Err(SlugError::Exhausted(base.to_string()));
        }
        candidate = with_suffix(base, counter);
        counter += 1;
    }

    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Error)]
    #[error("store offline")]
    struct Offline;

    /// In-memory slug index keyed by slug, valued by owning post id.
    #[derive(Default)]
    struct MemoryStore {
        slugs: Mutex<HashMap<String, Uuid>>,
        offline: bool,
    }

    impl MemoryStore {
        fn with(slugs: &[&str]) -> Self {
            let store = Self::default();
            {
                let mut map = store.slugs.lock().unwrap();
                for s in slugs {
                    map.insert(s.to_string(), Uuid::new_v4());
                }
            }
            store
        }
    }

    #[async_trait]
    impl SlugStore for MemoryStore {
        type Error = Offline;

        async fn slug_taken(&self, slug: &str, exclude_id: Option<Uuid>) -> Result<bool, Offline> {
            if self.offline {
                return Err(Offline);
            }
            let map = self.slugs.lock().unwrap();
            Ok(match map.get(slug) {
                Some(owner) => Some(*owner) != exclude_id,
                None => false,
            })
        }
    }

    #[test]
    fn test_generate_slug() {
        assert_eq!(generate_slug("Hello World"), "hello-world");
        assert_eq!(generate_slug("  Rust & Axum: A Guide!  "), "rust-axum-a-guide");
        assert_eq!(generate_slug("Already-Hyphenated_Title"), "already-hyphenated-title");
        assert_eq!(generate_slug("2024 Review"), "2024-review");
    }

    #[test]
    fn test_generate_slug_fallback() {
        assert_eq!(generate_slug(""), FALLBACK_SLUG);
        assert_eq!(generate_slug("!!! ???"), FALLBACK_SLUG);
        assert_eq!(generate_slug("日本語"), FALLBACK_SLUG);
    }

    #[test]
    fn test_generate_slug_is_valid_and_bounded() {
        let long = "word ".repeat(100);
        let slug = generate_slug(&long);
        assert!(slug.len() <= MAX_SLUG_LENGTH - 5);
        assert!(shared::validation::validate_slug(&slug).is_ok());
    }

    #[test]
    fn test_generate_slug_from_random_titles() {
        use fake::faker::lorem::en::Sentence;
        use fake::Fake;

        for _ in 0..50 {
            let title: String = Sentence(1..12).fake();
            let slug = generate_slug(&title);
            assert!(
                shared::validation::validate_slug(&slug).is_ok(),
                "{:?} -> {:?}",
                title,
                slug
            );
        }
    }

    #[tokio::test]
    async fn test_unique_slug_free() {
        let store = MemoryStore::default();
        assert_eq!(unique_slug(&store, "hello", None).await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_unique_slug_appends_suffix() {
        let store = MemoryStore::with(&["hello", "hello-1"]);
        assert_eq!(unique_slug(&store, "hello", None).await.unwrap(), "hello-2");
    }

    #[tokio::test]
    async fn test_unique_slug_suffix_stays_within_max_length() {
        let base = format!("{}-tail", "a".repeat(MAX_SLUG_LENGTH - 5));
        assert_eq!(base.len(), MAX_SLUG_LENGTH);
        let store = MemoryStore::with(&[base.as_str()]);

        let slug = unique_slug(&store, &base, None).await.unwrap();
        assert!(slug.len() <= MAX_SLUG_LENGTH, "{} chars", slug.len());
        assert!(slug.ends_with("-1"));
        assert!(shared::validation::validate_slug(&slug).is_ok());
    }

    #[test]
    fn test_with_suffix_drops_dangling_hyphen() {
        let base = format!("{}-b", "a".repeat(MAX_SLUG_LENGTH - 3));
        // cutting at MAX - 2 would leave "aaa...-"
        let slug = with_suffix(&base, 7);
        assert_eq!(slug, format!("{}-7", "a".repeat(MAX_SLUG_LENGTH - 3)));
        assert!(shared::validation::validate_slug(&slug).is_ok());
    }

    #[tokio::test]
    async fn test_unique_slug_excludes_self() {
        let store = MemoryStore::default();
        let id = Uuid::new_v4();
        store.slugs.lock().unwrap().insert("mine".to_string(), id);
        assert_eq!(unique_slug(&store, "mine", Some(id)).await.unwrap(), "mine");
        assert_eq!(unique_slug(&store, "mine", None).await.unwrap(), "mine-1");
    }

    #[tokio::test]
    async fn test_unique_slug_propagates_store_error() {
        let store = MemoryStore {
            offline: true,
            ..Default::default()
        };
        let err = unique_slug(&store, "x", None).await.unwrap_err();
        assert!(matches!(err, SlugError::Store(_)));
    }
}
