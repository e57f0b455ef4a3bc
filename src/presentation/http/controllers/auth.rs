// src/presentation/http/controllers/auth.rs
use crate::application::{commands::auth::LoginCommand, dto::SessionUserDto};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::{MaybeSession, SessionCookie};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::rejection::JsonRejection,
    http::{StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::health::OkResponse;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUserDto>,
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session created; the `sid` cookie is set.", body = SessionResponse),
        (status = 400, description = "Missing fields.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Invalid credentials.", body = crate::presentation::http::error::ErrorResponse),
        (status = 429, description = "Too many login attempts.")
    ),
    tag = "Auth"
)]
pub async fn login(
    Extension(state): Extension<HttpState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> HttpResult<Response> {
    let Json(payload) = payload.map_err(|_| HttpError::bad_request("missing_fields"))?;

    let result = state
        .services
        .auth
        .login(LoginCommand {
            username: payload.username,
            password: payload.password,
        })
        .await
        .into_http()?;

    let cookie = state.cookies.issue(&result.session_id, result.ttl_secs);
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(SessionResponse {
            ok: true,
            user: Some(result.user),
        }),
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Session destroyed and cookie cleared.", body = OkResponse)),
    tag = "Auth"
)]
pub async fn logout(
    Extension(state): Extension<HttpState>,
    SessionCookie(session_id): SessionCookie,
) -> HttpResult<Response> {
    if let Some(session_id) = session_id {
        state.services.auth.logout(&session_id).await.into_http()?;
    }
    Ok((
        AppendHeaders([(SET_COOKIE, state.cookies.clear())]),
        Json(OkResponse { ok: true }),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The signed-in admin.", body = SessionResponse),
        (status = 401, description = "No valid session.", body = SessionResponse)
    ),
    tag = "Auth"
)]
pub async fn me(MaybeSession(user): MaybeSession) -> Response {
    match user {
        Some(user) => Json(SessionResponse {
            ok: true,
            user: Some(SessionUserDto {
                username: user.username,
            }),
        })
        .into_response(),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(SessionResponse {
                ok: false,
                user: None,
            }),
        )
            .into_response(),
    }
}
