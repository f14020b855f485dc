//! Domain layer for the portfolio backend.
//!
//! This crate contains:
//! - Domain models (User, Profile, Blog, Project, SocialMedia, SkillDomain,
//!   Experience, Education) and their request/response payloads
//! - Pure services: slug generation, blog listing, analytics aggregation,
//!   skills parsing and content metadata derivation

pub mod models;
pub mod services;
