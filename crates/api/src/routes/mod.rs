//! HTTP route handlers.

pub mod admin_blogs;
pub mod auth;
pub mod blogs;
pub mod educations;
pub mod experiences;
pub mod health;
pub mod profile;
pub mod projects;
pub mod skill_domains;
pub mod social_media;
