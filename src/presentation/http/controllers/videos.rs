// src/presentation/http/controllers/videos.rs
use crate::application::{
    commands::videos::{CreateVideoCommand, DeleteVideoCommand, UpdateVideoCommand},
    dto::{ListResponse, VideoDto},
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{AdminSession, IdInput, RecordId, double_option};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::rejection::JsonRejection, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

use super::optional_id;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: String,
    pub youtube_id: String,
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<IdInput>,
}

/// `categoryId: null` removes the category.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub youtube_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>)]
    pub category_id: Option<Option<IdInput>>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> HttpResult<T> {
    payload
        .map(|Json(request)| request)
        .map_err(|err| HttpError::bad_request(err.body_text()))
}

#[utoipa::path(
    get,
    path = "/api/videos",
    responses((status = 200, description = "Videos, newest first.", body = ListResponse<VideoDto>)),
    tag = "Videos"
)]
pub async fn list_videos(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<ListResponse<VideoDto>>> {
    state
        .services
        .video_queries
        .list_videos()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/videos/{id}",
    params(("id" = i64, Path, description = "Video id")),
    responses(
        (status = 200, description = "The video.", body = VideoDto),
        (status = 404, description = "Video not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Videos"
)]
pub async fn get_video(
    Extension(state): Extension<HttpState>,
    RecordId(id): RecordId,
) -> HttpResult<Json<VideoDto>> {
    state
        .services
        .video_queries
        .get_video(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    post,
    path = "/api/videos",
    request_body = CreateVideoRequest,
    responses(
        (status = 201, description = "Video created; the cover is copied from YouTube when available.", body = VideoDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Videos"
)]
pub async fn create_video(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    payload: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<VideoDto>)> {
    let request = body(payload)?;
    let command = CreateVideoCommand {
        title: request.title,
        youtube_id: request.youtube_id,
        category_id: optional_id(request.category_id, "category")?,
    };
    let video = state
        .services
        .video_commands
        .create_video(command)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(video)))
}

#[utoipa::path(
    patch,
    path = "/api/videos/{id}",
    params(("id" = i64, Path, description = "Video id")),
    request_body = UpdateVideoRequest,
    responses(
        (status = 200, description = "Updated video.", body = VideoDto),
        (status = 404, description = "Video or category not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Videos"
)]
pub async fn update_video(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    RecordId(id): RecordId,
    payload: Result<Json<UpdateVideoRequest>, JsonRejection>,
) -> HttpResult<Json<VideoDto>> {
    let request = body(payload)?;
    let category_id = match request.category_id {
        None => None,
        Some(inner) => Some(optional_id(inner, "category")?),
    };
    let command = UpdateVideoCommand {
        id,
        title: request.title,
        youtube_id: request.youtube_id,
        category_id,
    };
    state
        .services
        .video_commands
        .update_video(command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/videos/{id}",
    params(("id" = i64, Path, description = "Video id")),
    responses(
        (status = 204, description = "Video and cover deleted."),
        (status = 404, description = "Video not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Videos"
)]
pub async fn delete_video(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    RecordId(id): RecordId,
) -> HttpResult<StatusCode> {
    state
        .services
        .video_commands
        .delete_video(DeleteVideoCommand { id })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
