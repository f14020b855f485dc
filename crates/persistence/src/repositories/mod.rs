//! Repository implementations for database operations.

pub mod blog;
pub mod education;
pub mod experience;
pub mod profile;
pub mod project;
pub mod skill_domain;
pub mod social_media;
pub mod user;

pub use blog::{BlogInput, BlogRepository, PublishedBlogFilter};
pub use education::EducationRepository;
pub use experience::ExperienceRepository;
pub use profile::{ProfileInput, ProfileRepository};
pub use project::ProjectRepository;
pub use skill_domain::SkillDomainRepository;
pub use social_media::SocialMediaRepository;
pub use user::UserRepository;
