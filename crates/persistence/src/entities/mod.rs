//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod blog;
pub mod education;
pub mod experience;
pub mod profile;
pub mod project;
pub mod skill_domain;
pub mod social_media;
pub mod user;

pub use blog::{BlogEntity, TagCountEntity};
pub use education::EducationEntity;
pub use experience::ExperienceEntity;
pub use profile::ProfileEntity;
pub use project::ProjectEntity;
pub use skill_domain::SkillDomainEntity;
pub use social_media::SocialMediaEntity;
pub use user::{UserEntity, UserSessionEntity};
