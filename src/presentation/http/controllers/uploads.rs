// src/presentation/http/controllers/uploads.rs
use crate::application::{commands::uploads::SignUploadCommand, dto::UploadSignatureDto};
use crate::presentation::http::error::{HttpError, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AdminSession;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, body::Bytes};
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUploadRequest {
    /// Upload target; only `article` exists and unknown values fall back to it.
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/uploads/signature",
    request_body(content = SignUploadRequest, description = "Optional; an empty body signs an article upload"),
    responses(
        (status = 200, description = "Parameters for a signed direct upload.", body = UploadSignatureDto),
        (status = 400, description = "Invalid publicId format.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Media credentials are not configured.", body = crate::presentation::http::error::ErrorResponse)
    ),
    security(("sessionCookie" = [])),
    tag = "Uploads"
)]
pub async fn sign_upload(
    Extension(state): Extension<HttpState>,
    AdminSession(_user): AdminSession,
    body: Bytes,
) -> HttpResult<Json<UploadSignatureDto>> {
    // A missing or unparsable body is treated like `{}`.
    let raw: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    if raw
        .get("publicId")
        .is_some_and(|id| !(id.is_null() || id.is_string()))
    {
        return Err(HttpError::bad_request("invalid publicId format"));
    }
    let request: SignUploadRequest = serde_json::from_value(raw).unwrap_or_default();

    state
        .services
        .uploads
        .sign_upload(SignUploadCommand {
            target: request.target,
            public_id: request.public_id,
        })
        .into_http()
        .map(Json)
}
