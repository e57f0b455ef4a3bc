// src/presentation/http/controllers/categories.rs
use crate::application::{
    commands::categories::{CreateCategoryCommand, DeleteCategoryCommand, UpdateCategoryCommand},
    dto::{CategoryDto, ListResponse},
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{AdminSession, RecordId};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::rejection::JsonRejection, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
}

fn body(payload: Result<Json<CategoryRequest>, JsonRejection>) -> HttpResult<CategoryRequest> {
    payload
        .map(|Json(request)| request)
        .map_err(|err| HttpError::bad_request(err.body_text()))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    responses((status = 200, description = "Categories sorted by name.", body = ListResponse<CategoryDto>)),
    tag = "Categories"
)]
pub async fn list_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<ListResponse<CategoryDto>>> {
    state
        .services
        .category_queries
        .list_categories()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created.", body = CategoryDto),
        (status = 400, description = "Invalid name.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "A category with this name already exists.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<CategoryDto>)> {
    let request = body(payload)?;
    let category = state
        .services
        .category_commands
        .create_category(CreateCategoryCommand { name: request.name })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category renamed.", body = CategoryDto),
        (status = 404, description = "Category not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "A category with this name already exists.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    RecordId(id): RecordId,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> HttpResult<Json<CategoryDto>> {
    let request = body(payload)?;
    state
        .services
        .category_commands
        .update_category(UpdateCategoryCommand {
            id,
            name: request.name,
        })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = i64, Path, description = "Category id")),
    responses(
        (status = 204, description = "Category deleted."),
        (status = 404, description = "Category not found.", body = crate::presentation::http::error::ErrorResponse),
        (status = 409, description = "Still referenced; `code` is CATEGORY_IN_ARTICLES or CATEGORY_IN_VIDEOS.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    RecordId(id): RecordId,
) -> HttpResult<StatusCode> {
    state
        .services
        .category_commands
        .delete_category(DeleteCategoryCommand { id })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
