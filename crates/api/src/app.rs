use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_admin,
    security_headers_middleware, trace_id, RateLimiterState,
};
use crate::routes::{
    admin_blogs, auth, blogs, educations, experiences, health, profile, projects, skill_domains,
    social_media,
};
use crate::services::CookieHelper;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub cookies: CookieHelper,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        // rate_limit_per_minute = 0 disables limiting
        let rate_limiter = RateLimiterState::new(config.security.rate_limit_per_minute)
            .map(|limiter| limiter.with_trusted_proxies(config.security.trusted_proxy_ips()))
            .map(Arc::new);
        let cookies = CookieHelper::new(config.session.clone());

        Self {
            pool,
            config: Arc::new(config),
            rate_limiter,
            cookies,
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Development: any origin, no credentials
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    // Session cookies need credentials, which rule out wildcards
    let origins: Vec<_> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let state = AppState::new(config, pool);
    build_router(state)
}

pub fn build_router(state: AppState) -> Router {
    let config = state.config.clone();

    // Endpoints abusable by anonymous clients, limited per IP
    let limited_routes = Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/blogs/:slug/view", post(blogs::record_view))
        .route("/api/blogs/:slug/clap", post(blogs::clap))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    let public_routes = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::current_session))
        .route("/api/auth/password", put(auth::change_password))
        .route("/api/profile", get(profile::get_public_profile))
        .route("/api/projects", get(projects::list_public_projects))
        .route("/api/social-media", get(social_media::list_public_social_media))
        .route("/api/skill-domains", get(skill_domains::list_skill_domains))
        .route("/api/blogs", get(blogs::list_blogs))
        .route("/api/blogs/tags", get(blogs::list_tags))
        .route("/api/blogs/:slug", get(blogs::get_blog));

    let admin_routes = Router::new()
        .route(
            "/api/admin/blogs",
            get(admin_blogs::list_blogs).post(admin_blogs::create_blog),
        )
        .route(
            "/api/admin/blogs/:id",
            get(admin_blogs::get_blog)
                .put(admin_blogs::update_blog)
                .delete(admin_blogs::delete_blog),
        )
        .route(
            "/api/admin/blogs/:id/reset-metrics",
            post(admin_blogs::reset_metrics),
        )
        .route("/api/admin/analytics", get(admin_blogs::analytics))
        .route(
            "/api/admin/profile",
            get(profile::get_own_profile).put(profile::upsert_profile),
        )
        .route(
            "/api/admin/experiences",
            get(experiences::list_experiences).post(experiences::create_experience),
        )
        .route(
            "/api/admin/experiences/:id",
            put(experiences::update_experience).delete(experiences::delete_experience),
        )
        .route(
            "/api/admin/educations",
            get(educations::list_educations).post(educations::create_education),
        )
        .route(
            "/api/admin/educations/:id",
            put(educations::update_education).delete(educations::delete_education),
        )
        .route(
            "/api/admin/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route(
            "/api/admin/projects/:id",
            put(projects::update_project).delete(projects::delete_project),
        )
        .route(
            "/api/admin/social-media",
            get(social_media::list_social_media).post(social_media::create_social_media),
        )
        .route(
            "/api/admin/social-media/:id",
            put(social_media::update_social_media).delete(social_media::delete_social_media),
        )
        .route(
            "/api/admin/skill-domains",
            get(skill_domains::list_skill_domains).post(skill_domains::create_skill_domain),
        )
        .route(
            "/api/admin/skill-domains/:id",
            put(skill_domains::update_skill_domain).delete(skill_domains::delete_skill_domain),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(ops_routes)
        .merge(public_routes)
        .merge(limited_routes)
        .merge(admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security_headers_middleware,
        ))
        .layer(DefaultBodyLimit::max(config.server.max_body_size))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rate_limiter_disabled_with_zero_limit() {
        let config = Config::load_for_test(&[("security.rate_limit_per_minute", "0")]).unwrap();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let state = AppState::new(config, pool);
        assert!(state.rate_limiter.is_none());
    }

    #[tokio::test]
    async fn test_app_state_builds_limiter_and_cookies() {
        let config = Config::load_for_test(&[("session.cookie_name", "sid")]).unwrap();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let state = AppState::new(config, pool);
        assert!(state.rate_limiter.is_some());
        assert_eq!(state.cookies.cookie_name(), "sid");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        use axum::{body::Body, http::Request, http::StatusCode};
        use tower::ServiceExt;

        let config = Config::load_for_test(&[]).unwrap();
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let app = create_app(config, pool);

        let response = app
            .oneshot(Request::builder().uri("/api/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
