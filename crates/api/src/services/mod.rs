//! Application services sitting between handlers and repositories.

pub mod admin_bootstrap;
pub mod auth;
pub mod blogs;
pub mod cookies;

pub use auth::{AuthError, AuthService, AuthenticatedSession};
pub use blogs::BlogService;
pub use cookies::CookieHelper;
