// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{articles, auth, categories, contact, health, uploads, videos},
    middleware::{rate_limit, security_headers},
    openapi,
};
use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub const JSON_BODY_LIMIT: usize = 1024 * 1024;
/// Article writes may carry a 4 MB image plus the form envelope.
pub const ARTICLE_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Router-level settings that do not belong to the application services.
#[derive(Debug, Clone, Default)]
pub struct RouterSettings {
    pub allowed_origins: Vec<String>,
}

pub fn build_router(state: HttpState, settings: &RouterSettings) -> Router {
    build_router_with_rate_limiter(state, settings, true)
}

/// `enable_rate_limiter: false` drops the login limiter, whose IP key
/// extraction needs connect info that in-process test requests lack.
pub fn build_router_with_rate_limiter(
    state: HttpState,
    settings: &RouterSettings,
    enable_rate_limiter: bool,
) -> Router {
    let mut login = post(auth::login);
    if enable_rate_limiter {
        match rate_limit::login_rate_limit_layer() {
            Some(layer) => login = login.layer(layer),
            None => tracing::warn!("login rate limiter misconfigured; running without it"),
        }
    }

    let article_routes = Router::new()
        .route(
            "/api/articles",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/api/articles/{slug}",
            get(articles::get_article_by_slug)
                .patch(articles::update_article)
                .delete(articles::delete_article),
        )
        .layer(DefaultBodyLimit::max(ARTICLE_BODY_LIMIT));

    let api = Router::new()
        .route("/health", get(health::health))
        .route("/api/health", get(health::health))
        .route("/api/auth/login", login)
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route(
            "/api/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/api/categories/{id}",
            axum::routing::patch(categories::update_category).delete(categories::delete_category),
        )
        .route(
            "/api/videos",
            get(videos::list_videos).post(videos::create_video),
        )
        .route(
            "/api/videos/{id}",
            get(videos::get_video)
                .patch(videos::update_video)
                .delete(videos::delete_video),
        )
        .route(
            "/api/contact",
            get(contact::list_messages).post(contact::submit_message),
        )
        .route(
            "/api/contact/{id}",
            get(contact::get_message).delete(contact::delete_message),
        )
        .route("/api/uploads/signature", post(uploads::sign_upload))
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .merge(article_routes);

    let router = Router::new()
        .merge(openapi::docs_router())
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.allowed_origins));

    security_headers::apply(router).layer(Extension(state))
}

/// Exact-match origin allowlist; credentials are allowed so the session
/// cookie travels with cross-site requests from the panel.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600))
}
