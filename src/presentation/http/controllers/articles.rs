// src/presentation/http/controllers/articles.rs
use crate::application::{
    commands::articles::{
        ArticleImageInput, CreateArticleCommand, DeleteArticleCommand, ReplaceArticleImageCommand,
        UpdateArticleCommand,
    },
    dto::{ArticleDto, ImageOnlyDto, ListResponse},
    queries::articles::GetArticleBySlugQuery,
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{
    AdminSession, ArticlePayload, IdInput, RecordId, double_option,
};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use utoipa::ToSchema;

use super::{non_blank, optional_id};

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ArticleImageRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
    #[serde(default)]
    pub tiny_url: Option<String>,
}

impl From<ArticleImageRequest> for ArticleImageInput {
    fn from(image: ArticleImageRequest) -> Self {
        Self {
            url: non_blank(image.url),
            alt: image.alt,
            tiny_url: non_blank(image.tiny_url),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<ArticleImageRequest>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<IdInput>,
    /// Category name, matched under collation when no id is given.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub reading_minutes: Option<i32>,
}

/// Absent fields keep their stored value; `summary: null` and
/// `readingMinutes: null` clear it.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub image: Option<ArticleImageRequest>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub summary: Option<Option<String>>,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<IdInput>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub reading_minutes: Option<Option<i32>>,
}

#[utoipa::path(
    get,
    path = "/api/articles",
    responses((status = 200, description = "Articles, newest first.", body = ListResponse<ArticleDto>)),
    tag = "Articles"
)]
pub async fn list_articles(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<ListResponse<ArticleDto>>> {
    state
        .services
        .article_queries
        .list_articles()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/articles/{slug}",
    params(("slug" = String, Path, description = "Article slug; matched ignoring case and diacritics")),
    responses(
        (status = 200, description = "The article.", body = ArticleDto),
        (status = 404, description = "No article with this slug.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Articles"
)]
pub async fn get_article_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<ArticleDto>> {
    state
        .services
        .article_queries
        .get_article_by_slug(GetArticleBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/articles",
    request_body(
        content = CreateArticleRequest,
        description = "JSON, or multipart with a `file` part and the JSON document in `data`"
    ),
    responses(
        (status = 201, description = "Article created.", body = ArticleDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Not signed in.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Unknown category.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Articles"
)]
pub async fn create_article(
    Extension(state): Extension<HttpState>,
    AdminSession(user): AdminSession,
    payload: ArticlePayload,
) -> HttpResult<(StatusCode, Json<ArticleDto>)> {
    let request: CreateArticleRequest = payload.parse()?;
    let command = CreateArticleCommand {
        title: request.title,
        content: request.content,
        slug: non_blank(request.slug),
        image: request.image.map(Into::into),
        summary: request.summary,
        category_id: optional_id(request.category_id, "category")?,
        category: non_blank(request.category),
        keywords: request.keywords,
        reading_minutes: request.reading_minutes,
        file: payload.file,
    };

    let article = state
        .services
        .article_commands
        .create_article(command)
        .await
        .into_http()?;
    tracing::info!(user_id = i64::from(user.id), article_id = article.id, slug = %article.slug, "article created");
    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    patch,
    path = "/api/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    request_body(
        content = UpdateArticleRequest,
        description = "JSON or multipart. A multipart body holding only `file` (plus an optional `slug` or `_action`) replaces the image and returns `{ image }`."
    ),
    responses(
        (status = 200, description = "Updated article, or `{ image }` for an image-only upload.", body = ArticleDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "Article or category not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Concurrent modification.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Articles"
)]
pub async fn update_article(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    RecordId(id): RecordId,
    payload: ArticlePayload,
) -> HttpResult<Response> {
    if payload.is_file_only() {
        let Some(file) = payload.file else {
            return Err(HttpError::bad_request("file is required"));
        };
        let image: ImageOnlyDto = state
            .services
            .article_commands
            .replace_article_image(ReplaceArticleImageCommand { id, file })
            .await
            .into_http()?;
        return Ok(Json(image).into_response());
    }

    let request: UpdateArticleRequest = payload.parse()?;
    let command = UpdateArticleCommand {
        id,
        title: request.title,
        content: request.content,
        slug: non_blank(request.slug),
        image: request.image.map(Into::into),
        summary: request.summary,
        category_id: optional_id(request.category_id, "category")?,
        category: non_blank(request.category),
        keywords: request.keywords,
        reading_minutes: request.reading_minutes,
        file: payload.file,
    };

    let article = state
        .services
        .article_commands
        .update_article(command)
        .await
        .into_http()?;
    Ok(Json(article).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    params(("id" = i64, Path, description = "Article id")),
    responses(
        (status = 204, description = "Article deleted."),
        (status = 404, description = "Article not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Articles"
)]
pub async fn delete_article(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    RecordId(id): RecordId,
) -> HttpResult<StatusCode> {
    state
        .services
        .article_commands
        .delete_article(DeleteArticleCommand { id })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
