//! Shared utilities for the portfolio backend.
//!
//! This crate provides functionality used across all other crates:
//! - Session token generation and hashing
//! - Password hashing with Argon2id
//! - Common validation logic

pub mod crypto;
pub mod password;
pub mod validation;
