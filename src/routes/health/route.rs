use axum::{Json, Router, routing::get};
use serde::Serialize;
use utoipa::ToSchema;

pub fn create_route() -> Router {
    Router::new().route("/api/health", get(health))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "CBC-EDU Triad API is running".to_string(),
    })
}
