// src/presentation/http/openapi.rs
use axum::Router;
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{ApiKey, ApiKeyValue, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::dto::{
    ArticleDto, ArticleImageDto, CategoryDto, CategoryRefDto, ContactDto, ImageOnlyDto,
    ListResponse, SessionUserDto, UploadSignatureDto, VideoDto,
};
use crate::presentation::http::controllers::{
    articles, auth, categories, contact, health, uploads, videos,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        auth::login,
        auth::logout,
        auth::me,
        articles::list_articles,
        articles::get_article_by_slug,
        articles::create_article,
        articles::update_article,
        articles::delete_article,
        categories::list_categories,
        categories::create_category,
        categories::update_category,
        categories::delete_category,
        videos::list_videos,
        videos::get_video,
        videos::create_video,
        videos::update_video,
        videos::delete_video,
        contact::submit_message,
        contact::list_messages,
        contact::get_message,
        contact::delete_message,
        uploads::sign_upload
    ),
    components(
        schemas(
            crate::presentation::http::error::ErrorResponse,
            health::OkResponse,
            auth::LoginRequest,
            auth::SessionResponse,
            articles::ArticleImageRequest,
            articles::CreateArticleRequest,
            articles::UpdateArticleRequest,
            categories::CategoryRequest,
            videos::CreateVideoRequest,
            videos::UpdateVideoRequest,
            contact::ContactRequest,
            uploads::SignUploadRequest,
            ArticleDto,
            ArticleImageDto,
            ImageOnlyDto,
            CategoryDto,
            CategoryRefDto,
            VideoDto,
            ContactDto,
            SessionUserDto,
            UploadSignatureDto,
            ListResponse<ArticleDto>,
            ListResponse<CategoryDto>,
            ListResponse<VideoDto>,
            ListResponse<ContactDto>
        )
    ),
    tags(
        (name = "Auth", description = "Admin session endpoints"),
        (name = "Articles", description = "Articles with Turkish-aware slugs"),
        (name = "Categories", description = "Shared categories for articles and videos"),
        (name = "Videos", description = "YouTube videos with stored covers"),
        (name = "Contact", description = "Contact form messages"),
        (name = "Uploads", description = "Signed direct uploads to the media CDN"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    info(
        title = "Folio API",
        description = "Content backend for a personal website",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        components.add_security_scheme(
            "sessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("sid"))),
        );

        let servers = openapi.servers.get_or_insert_with(Vec::new);
        servers.clear();

        let mut urls: Vec<String> = env::var("PUBLIC_API_URLS")
            .ok()
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|segment| !segment.is_empty())
                    .map(|segment| segment.trim_end_matches('/').to_string())
                    .collect()
            })
            .unwrap_or_default();

        if urls.is_empty() {
            urls.push("http://localhost:4001".to_string());
        }
        urls.dedup();
        servers.extend(urls.into_iter().map(Server::new));
    }
}

/// Swagger UI at `/docs`; the document itself at `/openapi.json`.
pub fn docs_router() -> Router {
    Router::new().merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

pub fn write_openapi_snapshot(output_path: &Path) -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output_path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}
