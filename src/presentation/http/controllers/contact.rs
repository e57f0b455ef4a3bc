// src/presentation/http/controllers/contact.rs
use crate::application::{
    commands::contacts::SubmitContactCommand,
    dto::{ContactDto, ListResponse},
};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{AdminSession, RecordId};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::rejection::JsonRejection, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ContactRequest {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub title: String,
    pub content: String,
}

#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Message stored.", body = ContactDto),
        (status = 400, description = "Invalid input.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Contact"
)]
pub async fn submit_message(
    Extension(state): Extension<HttpState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> HttpResult<(StatusCode, Json<ContactDto>)> {
    let Json(request) = payload.map_err(|err| HttpError::bad_request(err.body_text()))?;
    let message = state
        .services
        .contact_commands
        .submit(SubmitContactCommand {
            name: request.name,
            email: request.email,
            phone: request.phone,
            title: request.title,
            content: request.content,
        })
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[utoipa::path(
    get,
    path = "/api/contact",
    responses((status = 200, description = "Messages, newest first.", body = ListResponse<ContactDto>)),
    security(("sessionCookie" = [])),
    tag = "Contact"
)]
pub async fn list_messages(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
) -> HttpResult<Json<ListResponse<ContactDto>>> {
    state
        .services
        .contact_queries
        .list_messages()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    params(("id" = i64, Path, description = "Message id")),
    responses(
        (status = 200, description = "The message.", body = ContactDto),
        (status = 404, description = "Message not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Contact"
)]
pub async fn get_message(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    RecordId(id): RecordId,
) -> HttpResult<Json<ContactDto>> {
    state
        .services
        .contact_queries
        .get_message(id)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    params(("id" = i64, Path, description = "Message id")),
    responses(
        (status = 204, description = "Message deleted."),
        (status = 404, description = "Message not found.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Contact"
)]
pub async fn delete_message(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    RecordId(id): RecordId,
) -> HttpResult<StatusCode> {
    state
        .services
        .contact_commands
        .delete(id)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
