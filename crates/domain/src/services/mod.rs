//! Domain services for the portfolio site.
//!
//! Pure logic over domain models: slug allocation, dashboard listing,
//! analytics, skills parsing and content-derived values.

pub mod analytics;
pub mod blog_listing;
pub mod content;
pub mod skills;
pub mod slug;

pub use analytics::aggregate;
pub use blog_listing::filter_and_sort;
pub use content::{clamp_claps, derive_excerpt, reading_time_minutes};
pub use skills::{parse_skills, parse_skills_value};
pub use slug::{generate_slug, unique_slug, SlugError, SlugStore};
