// src/presentation/http/controllers/health.rs
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service health check.", body = OkResponse)),
    tag = "System"
)]
pub async fn health() -> Json<OkResponse> {
    Json(OkResponse { ok: true })
}
